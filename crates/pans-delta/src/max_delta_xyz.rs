//! Largest cell edge length.

use crate::error::{DeltaError, DeltaResult};
use crate::traits::FilterWidth;
use pans_config::DeltaCoeffsDef;
use pans_core::ScalarField;
use pans_mesh::MeshGeometry;
use rayon::prelude::*;

/// `delta = deltaCoeff * max(dx, dy, dz)`.
///
/// Better suited than the cube root on high-aspect-ratio near-wall cells,
/// where the volume-based width underestimates the largest unresolved scale.
#[derive(Clone, Debug)]
pub struct MaxDeltaxyzDelta {
    delta_coeff: f64,
}

impl MaxDeltaxyzDelta {
    pub const NAME: &'static str = "maxDeltaxyz";

    pub fn new(delta_coeff: f64) -> DeltaResult<Self> {
        if !(delta_coeff.is_finite() && delta_coeff > 0.0) {
            return Err(DeltaError::InvalidCoeff {
                provider: Self::NAME,
                key: "deltaCoeff",
                value: delta_coeff,
            });
        }
        Ok(Self { delta_coeff })
    }

    pub fn from_coeffs(coeffs: Option<&DeltaCoeffsDef>) -> DeltaResult<Self> {
        Self::new(coeffs.and_then(|c| c.delta_coeff).unwrap_or(1.0))
    }
}

impl FilterWidth for MaxDeltaxyzDelta {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn delta(&self, mesh: &dyn MeshGeometry) -> ScalarField {
        mesh.cell_extents()
            .par_iter()
            .map(|e| self.delta_coeff * e.max())
            .collect()
    }
}
