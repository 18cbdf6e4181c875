//! Mesh validation logic.

use crate::error::{MeshError, MeshResult};
use nalgebra::Vector3;
use pans_core::Real;

/// Check per-cell geometry: positive finite volumes and extents, non-negative wall distance.
pub(crate) fn validate_cells(
    volumes: &[Real],
    extents: &[Vector3<Real>],
    wall_distance: &[Real],
) -> MeshResult<()> {
    if volumes.is_empty() {
        return Err(MeshError::Empty);
    }

    for (cell, &volume) in volumes.iter().enumerate() {
        if !(volume.is_finite() && volume > 0.0) {
            return Err(MeshError::NonPositiveVolume { cell, volume });
        }
    }

    for (cell, e) in extents.iter().enumerate() {
        if e.iter().any(|c| !(c.is_finite() && *c > 0.0)) {
            return Err(MeshError::InvalidExtent { cell });
        }
    }

    for (cell, &distance) in wall_distance.iter().enumerate() {
        if !(distance.is_finite() && distance >= 0.0) {
            return Err(MeshError::InvalidWallDistance { cell, distance });
        }
    }

    Ok(())
}

/// Check neighbour links reference existing, distinct cells.
pub(crate) fn validate_links(n_cells: usize, links: &[(usize, usize)]) -> MeshResult<()> {
    for &(a, b) in links {
        for cell in [a, b] {
            if cell >= n_cells {
                return Err(MeshError::InvalidCellRef { cell, n_cells });
            }
        }
        if a == b {
            return Err(MeshError::SelfNeighbour { cell: a });
        }
    }
    Ok(())
}
