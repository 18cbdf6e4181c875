//! Prandtl mixing-length damping of a geometric filter width.

use crate::error::{DeltaError, DeltaResult};
use crate::traits::FilterWidth;
use pans_core::ScalarField;
use pans_mesh::MeshGeometry;
use rayon::prelude::*;

/// `delta = min(kappa * y / Cdelta, geometric delta)`.
///
/// Near walls the wall distance `y` bounds the filter width, far from walls
/// the wrapped provider does.
pub struct PrandtlDelta {
    geometric: Box<dyn FilterWidth>,
    kappa: f64,
    c_delta: f64,
}

impl PrandtlDelta {
    pub const NAME: &'static str = "Prandtl";
    pub const DEFAULT_KAPPA: f64 = pans_core::units::constants::KAPPA;
    pub const DEFAULT_C_DELTA: f64 = 0.158;

    pub fn new(geometric: Box<dyn FilterWidth>, kappa: f64, c_delta: f64) -> DeltaResult<Self> {
        for (key, value) in [("kappa", kappa), ("Cdelta", c_delta)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(DeltaError::InvalidCoeff {
                    provider: Self::NAME,
                    key,
                    value,
                });
            }
        }
        Ok(Self {
            geometric,
            kappa,
            c_delta,
        })
    }

    /// Name of the wrapped geometric provider.
    pub fn geometric_name(&self) -> &str {
        self.geometric.name()
    }
}

impl std::fmt::Debug for PrandtlDelta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrandtlDelta")
            .field("geometric", &self.geometric.name())
            .field("kappa", &self.kappa)
            .field("c_delta", &self.c_delta)
            .finish()
    }
}

impl FilterWidth for PrandtlDelta {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn delta(&self, mesh: &dyn MeshGeometry) -> ScalarField {
        let geometric = self.geometric.delta(mesh);
        let scale = self.kappa / self.c_delta;
        geometric
            .values()
            .par_iter()
            .zip(mesh.wall_distance().par_iter())
            .map(|(&d, &y)| d.min(scale * y))
            .collect()
    }
}
