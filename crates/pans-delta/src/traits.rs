//! Core trait for filter-width providers.

use pans_core::ScalarField;
use pans_mesh::MeshGeometry;

/// A per-cell filter length scale.
///
/// Providers are deterministic functions of mesh geometry, suitable for
/// parallel evaluation. They are resolved once at closure construction and
/// re-evaluated whenever the closure asks for the current filter width.
pub trait FilterWidth: Send + Sync {
    /// Provider name as used in the coefficient dictionary.
    fn name(&self) -> &str;

    /// Filter width in metres, one value per cell.
    fn delta(&self, mesh: &dyn MeshGeometry) -> ScalarField;
}
