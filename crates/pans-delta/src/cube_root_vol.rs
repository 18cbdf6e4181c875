//! Cube root of the cell volume.

use crate::error::{DeltaError, DeltaResult};
use crate::traits::FilterWidth;
use pans_config::DeltaCoeffsDef;
use pans_core::units::{cube_root, m3, meters};
use pans_core::ScalarField;
use pans_mesh::MeshGeometry;
use rayon::prelude::*;

/// `delta = deltaCoeff * V^(1/3)`.
#[derive(Clone, Debug)]
pub struct CubeRootVolDelta {
    delta_coeff: f64,
}

impl CubeRootVolDelta {
    pub const NAME: &'static str = "cubeRootVol";

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

    /// Build from a `cubeRootVol` sub-block; `deltaCoeff` defaults to 1.
    pub fn from_coeffs(coeffs: Option<&DeltaCoeffsDef>) -> DeltaResult<Self> {
        Self::new(coeffs.and_then(|c| c.delta_coeff).unwrap_or(1.0))
    }
}

impl FilterWidth for CubeRootVolDelta {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn delta(&self, mesh: &dyn MeshGeometry) -> ScalarField {
        mesh.cell_volumes()
            .par_iter()
            .map(|&v| self.delta_coeff * meters(cube_root(m3(v))))
            .collect()
    }
}
