//! pans-core: numeric foundation for the PANS closure workspace.
//!
//! Contains:
//! - units (uom SI types + constructors used at the mesh boundary)
//! - numeric (Real + tolerances + floors + float helpers)
//! - field (mesh-resident scalar/vector/tensor fields)
//! - tensor (velocity-gradient invariants)
//! - error (shared error types)

pub mod error;
pub mod field;
pub mod numeric;
pub mod tensor;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use field::{ScalarField, TensorField, VectorField};
pub use numeric::*;
pub use units::*;
