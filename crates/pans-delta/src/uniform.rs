//! Constant filter width.

use crate::error::{DeltaError, DeltaResult};
use crate::traits::FilterWidth;
use pans_config::DeltaCoeffsDef;
use pans_core::units::{Length, meters};
use pans_core::ScalarField;
use pans_mesh::MeshGeometry;

/// The same length in every cell, independent of the mesh.
#[derive(Clone, Debug)]
pub struct UniformDelta {
    value_m: f64,
}

impl UniformDelta {
    pub const NAME: &'static str = "uniform";

    /// A zero width is accepted: the closure then clips fK to its lower limit.
    pub fn new(value: Length) -> DeltaResult<Self> {
        let value_m = meters(value);
        if !(value_m.is_finite() && value_m >= 0.0) {
            return Err(DeltaError::InvalidCoeff {
                provider: Self::NAME,
                key: "value",
                value: value_m,
            });
        }
        Ok(Self { value_m })
    }

    pub fn from_coeffs(coeffs: Option<&DeltaCoeffsDef>) -> DeltaResult<Self> {
        let value = coeffs
            .and_then(|c| c.value)
            .ok_or(DeltaError::MissingCoeff {
                provider: Self::NAME,
                key: "value",
            })?;
        Self::new(pans_core::units::m(value))
    }
}

impl FilterWidth for UniformDelta {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn delta(&self, mesh: &dyn MeshGeometry) -> ScalarField {
        ScalarField::uniform(mesh.n_cells(), self.value_m)
    }
}
