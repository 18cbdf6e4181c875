//! Read-only geometry interface consumed by the closure.

use crate::error::MeshResult;
use nalgebra::Vector3;
use pans_core::{Real, ScalarField, VectorField};

/// Cell geometry and gradient operator supplied by the host mesh.
///
/// All lengths are in metres and volumes in cubic metres. Implementations must
/// be thread-safe (Send + Sync): the closure evaluates cells in parallel.
pub trait MeshGeometry: Send + Sync {
    /// Number of control volumes.
    fn n_cells(&self) -> usize;

    /// Cell volumes (m³).
    fn cell_volumes(&self) -> &[Real];

    /// Axis-aligned bounding-box edge lengths of each cell (m).
    fn cell_extents(&self) -> &[Vector3<Real>];

    /// Distance from each cell centre to the nearest wall (m).
    fn wall_distance(&self) -> &[Real];

    /// Cell-centred gradient of a scalar field.
    fn grad(&self, field: &ScalarField) -> MeshResult<VectorField>;
}
