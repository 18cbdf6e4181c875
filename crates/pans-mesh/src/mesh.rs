//! Core mesh data structure.

use crate::error::{MeshError, MeshResult};
use crate::geometry::MeshGeometry;
use nalgebra::{Matrix3, Vector3};
use pans_core::{Real, ScalarField, VectorField};
use rayon::prelude::*;

/// Determinant below which the least-squares normal matrix is treated as singular.
const DET_MIN: Real = 1e-30;

/// A validated, immutable collection of cells.
///
/// The mesh stores:
/// - Per-cell centre, volume, extents and wall distance.
/// - Compact adjacency: for each cell, which cells share a face with it.
///
/// Neighbour links are only used by the least-squares gradient; face areas and
/// boundary patches belong to the host solver.
#[derive(Debug, Clone)]
pub struct CellMesh {
    pub(crate) centres: Vec<Vector3<Real>>,
    pub(crate) volumes: Vec<Real>,
    pub(crate) extents: Vec<Vector3<Real>>,
    pub(crate) wall_distance: Vec<Real>,

    /// Offsets into `neighbours`: cell i's neighbours are in
    /// neighbours[neighbour_offsets[i]..neighbour_offsets[i+1]].
    pub(crate) neighbour_offsets: Vec<usize>,

    /// Flat list of neighbour cell indices (sorted per cell for determinism).
    pub(crate) neighbours: Vec<usize>,
}

impl CellMesh {
    /// Cell centres (m).
    pub fn centres(&self) -> &[Vector3<Real>] {
        &self.centres
    }

    /// Cells sharing a face with `cell` (empty for out-of-range indices).
    pub fn cell_neighbours(&self, cell: usize) -> &[usize] {
        if cell >= self.volumes.len() {
            return &[];
        }
        let start = self.neighbour_offsets[cell];
        let end = self.neighbour_offsets[cell + 1];
        &self.neighbours[start..end]
    }

    /// Inverse-distance-weighted least-squares gradient for one cell.
    ///
    /// Falls back to a zero gradient when the neighbour stencil does not span
    /// three dimensions (e.g. a single row of cells); directions that are not
    /// resolved by the stencil carry no gradient information anyway.
    fn cell_gradient(&self, cell: usize, phi: &[Real]) -> Vector3<Real> {
        let centre = self.centres[cell];
        let phi_c = phi[cell];

        let mut normal = Matrix3::<Real>::zeros();
        let mut rhs = Vector3::<Real>::zeros();

        for &nb in self.cell_neighbours(cell) {
            let d = self.centres[nb] - centre;
            let dist_sq = d.norm_squared();
            if dist_sq < 1e-20 {
                continue;
            }
            let w = 1.0 / dist_sq;
            normal += d * d.transpose() * w;
            rhs += d * (w * (phi[nb] - phi_c));
        }

        // Pad directions the stencil does not see so the system stays solvable:
        // the padded component then resolves to zero.
        for axis in 0..3 {
            if normal[(axis, axis)] < 1e-12 {
                normal[(axis, axis)] = 1.0;
            }
        }

        if normal.determinant().abs() < DET_MIN {
            return Vector3::zeros();
        }
        normal
            .try_inverse()
            .map(|inv| inv * rhs)
            .filter(|g| g.iter().all(|c| c.is_finite()))
            .unwrap_or_else(Vector3::zeros)
    }
}

impl MeshGeometry for CellMesh {
    fn n_cells(&self) -> usize {
        self.volumes.len()
    }

    fn cell_volumes(&self) -> &[Real] {
        &self.volumes
    }

    fn cell_extents(&self) -> &[Vector3<Real>] {
        &self.extents
    }

    fn wall_distance(&self) -> &[Real] {
        &self.wall_distance
    }

    fn grad(&self, field: &ScalarField) -> MeshResult<VectorField> {
        if field.len() != self.n_cells() {
            return Err(MeshError::FieldSize {
                expected: self.n_cells(),
                got: field.len(),
            });
        }
        let phi = field.values();
        Ok((0..self.n_cells())
            .into_par_iter()
            .map(|cell| self.cell_gradient(cell, phi))
            .collect())
    }
}
