//! pans-mesh: cell geometry collaborator for the PANS closure.
//!
//! Provides:
//! - The `MeshGeometry` trait the closure reads cell data through
//! - `CellMesh`, a validated, immutable collection of cells and neighbours
//! - Incremental builder with validation
//! - Cartesian channel generator with wall-distance computation
//!
//! # Example
//!
//! ```
//! use pans_core::units::{m, m3};
//! use pans_mesh::{CellMeshBuilder, MeshGeometry};
//! use nalgebra::Vector3;
//!
//! let mut builder = CellMeshBuilder::new();
//! let a = builder.add_cell(Vector3::new(0.5, 0.5, 0.5), m3(1.0), Vector3::new(1.0, 1.0, 1.0), m(0.5));
//! let b = builder.add_cell(Vector3::new(1.5, 0.5, 0.5), m3(1.0), Vector3::new(1.0, 1.0, 1.0), m(0.5));
//! builder.connect(a, b);
//! let mesh = builder.build().unwrap();
//!
//! assert_eq!(mesh.n_cells(), 2);
//! ```

pub mod builder;
pub mod cartesian;
pub mod error;
pub mod geometry;
pub mod mesh;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::CellMeshBuilder;
pub use cartesian::{ChannelSpec, ChannelWalls, channel};
pub use error::{MeshError, MeshResult};
pub use geometry::MeshGeometry;
pub use mesh::CellMesh;
