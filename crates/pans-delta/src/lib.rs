//! pans-delta: filter-width providers for the PANS closure.
//!
//! A filter width is a per-cell length scale for the unresolved-turbulence
//! averaging region. Providers are selected by name at construction:
//! - `cubeRootVol`: cube root of the cell volume
//! - `maxDeltaxyz`: largest cell edge
//! - `Prandtl`: near-wall damping of another provider, `min(kappa y / Cdelta, delta)`
//! - `uniform`: one constant length everywhere
//!
//! All providers implement the `FilterWidth` trait and are deterministic
//! functions of mesh geometry.

pub mod catalog;
pub mod cube_root_vol;
pub mod error;
pub mod max_delta_xyz;
pub mod prandtl;
pub mod traits;
pub mod uniform;

// Re-exports
pub use catalog::{FilterWidthCatalogEntry, build_filter_width, filter_width_catalog};
pub use cube_root_vol::CubeRootVolDelta;
pub use error::{DeltaError, DeltaResult};
pub use max_delta_xyz::MaxDeltaxyzDelta;
pub use prandtl::PrandtlDelta;
pub use traits::FilterWidth;
pub use uniform::UniformDelta;
