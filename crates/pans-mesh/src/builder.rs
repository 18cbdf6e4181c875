//! Incremental mesh builder.

use nalgebra::Vector3;
use pans_core::units::{Length, Volume, cubic_meters, meters};
use pans_core::Real;

use crate::error::MeshResult;
use crate::mesh::CellMesh;
use crate::validate;

/// Builder for constructing a mesh incrementally.
///
/// Use `add_cell` and `connect` to build up the mesh,
/// then call `build()` to validate and freeze it into an immutable `CellMesh`.
#[derive(Debug, Default)]
pub struct CellMeshBuilder {
    centres: Vec<Vector3<Real>>,
    volumes: Vec<Real>,
    extents: Vec<Vector3<Real>>,
    wall_distance: Vec<Real>,
    links: Vec<(usize, usize)>,
}

impl CellMeshBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cell and return its index.
    ///
    /// `centre` and `extents` are in metres.
    pub fn add_cell(
        &mut self,
        centre: Vector3<Real>,
        volume: Volume,
        extents: Vector3<Real>,
        wall_distance: Length,
    ) -> usize {
        let id = self.volumes.len();
        self.centres.push(centre);
        self.volumes.push(cubic_meters(volume));
        self.extents.push(extents);
        self.wall_distance.push(meters(wall_distance));
        id
    }

    /// Declare that two cells share a face. Links are symmetric.
    pub fn connect(&mut self, a: usize, b: usize) {
        self.links.push((a, b));
    }

    /// Number of cells added so far.
    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// Build and validate the mesh, returning an immutable `CellMesh`.
    pub fn build(self) -> MeshResult<CellMesh> {
        validate::validate_cells(&self.volumes, &self.extents, &self.wall_distance)?;
        validate::validate_links(self.volumes.len(), &self.links)?;

        let (neighbour_offsets, neighbours) = Self::build_adjacency(self.volumes.len(), &self.links);

        Ok(CellMesh {
            centres: self.centres,
            volumes: self.volumes,
            extents: self.extents,
            wall_distance: self.wall_distance,
            neighbour_offsets,
            neighbours,
        })
    }

    /// Build compact adjacency lists: for each cell, collect its neighbours.
    fn build_adjacency(n_cells: usize, links: &[(usize, usize)]) -> (Vec<usize>, Vec<usize>) {
        let mut per_cell: Vec<Vec<usize>> = vec![Vec::new(); n_cells];
        for &(a, b) in links {
            per_cell[a].push(b);
            per_cell[b].push(a);
        }

        let mut offsets = Vec::with_capacity(n_cells + 1);
        let mut flat = Vec::new();
        offsets.push(0);
        for mut nbs in per_cell {
            nbs.sort_unstable();
            nbs.dedup();
            flat.extend(nbs);
            offsets.push(flat.len());
        }
        (offsets, flat)
    }
}
