//! Mesh-specific error types.

use pans_core::CoreError;

pub type MeshResult<T> = Result<T, MeshError>;

/// Mesh construction and validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshError {
    /// A neighbour link refers to a cell that doesn't exist.
    InvalidCellRef { cell: usize, n_cells: usize },

    /// A cell is linked to itself.
    SelfNeighbour { cell: usize },

    /// A cell volume is zero, negative or non-finite.
    NonPositiveVolume { cell: usize, volume: f64 },

    /// A wall distance is negative or non-finite.
    InvalidWallDistance { cell: usize, distance: f64 },

    /// A cell extent component is zero, negative or non-finite.
    InvalidExtent { cell: usize },

    /// The mesh has no cells.
    Empty,

    /// A field passed to a mesh operator has the wrong length.
    FieldSize { expected: usize, got: usize },
}

impl std::fmt::Display for MeshError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeshError::InvalidCellRef { cell, n_cells } => {
                write!(f, "Neighbour link refers to cell {} but mesh has {} cells", cell, n_cells)
            }
            MeshError::SelfNeighbour { cell } => {
                write!(f, "Cell {} is linked to itself", cell)
            }
            MeshError::NonPositiveVolume { cell, volume } => {
                write!(f, "Cell {} has non-positive volume {}", cell, volume)
            }
            MeshError::InvalidWallDistance { cell, distance } => {
                write!(f, "Cell {} has invalid wall distance {}", cell, distance)
            }
            MeshError::InvalidExtent { cell } => {
                write!(f, "Cell {} has a non-positive extent", cell)
            }
            MeshError::Empty => write!(f, "Mesh has no cells"),
            MeshError::FieldSize { expected, got } => {
                write!(f, "Field has {} values but mesh has {} cells", got, expected)
            }
        }
    }
}

impl std::error::Error for MeshError {}

impl From<MeshError> for CoreError {
    fn from(err: MeshError) -> Self {
        match err {
            MeshError::FieldSize { expected, got } => CoreError::SizeMismatch {
                what: "mesh field",
                expected,
                got,
            },
            _ => CoreError::Invariant {
                what: "mesh validation failed",
            },
        }
    }
}
