//! Cartesian channel generator.

use crate::builder::CellMeshBuilder;
use crate::error::{MeshError, MeshResult};
use crate::mesh::CellMesh;
use nalgebra::Vector3;
use pans_core::units::{Length, m, m3, meters};
use pans_core::Real;

/// Which channel faces are no-slip walls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChannelWalls {
    /// Wall at `y = 0` only (boundary layer over a flat plate).
    #[default]
    Bottom,
    /// Walls at `y = 0` and `y = height` (plane channel).
    BottomAndTop,
}

/// Uniform Cartesian box `[0, length] x [0, height] x [0, depth]`.
#[derive(Clone, Debug)]
pub struct ChannelSpec {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    pub length: Length,
    pub height: Length,
    pub depth: Length,
    pub walls: ChannelWalls,
}

impl Default for ChannelSpec {
    fn default() -> Self {
        Self {
            nx: 8,
            ny: 16,
            nz: 1,
            length: m(1.0),
            height: m(1.0),
            depth: m(0.1),
            walls: ChannelWalls::Bottom,
        }
    }
}

impl ChannelSpec {
    /// Flat cell index for `(i, j, k)`, x varying fastest.
    pub fn index(&self, i: usize, j: usize, k: usize) -> usize {
        i + self.nx * (j + self.ny * k)
    }
}

/// Build a uniform channel mesh with face-neighbour links and wall distance.
pub fn channel(spec: &ChannelSpec) -> MeshResult<CellMesh> {
    if spec.nx == 0 || spec.ny == 0 || spec.nz == 0 {
        return Err(MeshError::Empty);
    }

    let h = meters(spec.height);
    let dx = meters(spec.length) / spec.nx as Real;
    let dy = h / spec.ny as Real;
    let dz = meters(spec.depth) / spec.nz as Real;
    let extents = Vector3::new(dx, dy, dz);

    let mut builder = CellMeshBuilder::new();
    for k in 0..spec.nz {
        for j in 0..spec.ny {
            for i in 0..spec.nx {
                let centre = Vector3::new(
                    (i as Real + 0.5) * dx,
                    (j as Real + 0.5) * dy,
                    (k as Real + 0.5) * dz,
                );
                let y_wall = match spec.walls {
                    ChannelWalls::Bottom => centre.y,
                    ChannelWalls::BottomAndTop => centre.y.min(h - centre.y),
                };
                builder.add_cell(centre, m3(dx * dy * dz), extents, m(y_wall));
            }
        }
    }

    for k in 0..spec.nz {
        for j in 0..spec.ny {
            for i in 0..spec.nx {
                let c = spec.index(i, j, k);
                if i + 1 < spec.nx {
                    builder.connect(c, spec.index(i + 1, j, k));
                }
                if j + 1 < spec.ny {
                    builder.connect(c, spec.index(i, j + 1, k));
                }
                if k + 1 < spec.nz {
                    builder.connect(c, spec.index(i, j, k + 1));
                }
            }
        }
    }

    builder.build()
}
