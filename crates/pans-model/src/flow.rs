//! Read-only flow quantities supplied by the host solver each correction.

use crate::error::{ModelError, ModelResult};
use nalgebra::Matrix3;
use pans_core::tensor::{divergence, production_by_nu, strain_rate_sqr};
use pans_core::{Real, ScalarField, TensorField, ensure_positive};
use rayon::prelude::*;

/// Resolved-flow inputs of one correction step.
///
/// `grad_u[cell][(i, j)]` holds `d u_j / d x_i`. For incompressible flow set
/// `rho` to one everywhere; `nu` is always the kinematic molecular viscosity.
#[derive(Clone, Debug)]
pub struct FlowState {
    pub grad_u: TensorField,
    pub rho: ScalarField,
    pub nu: ScalarField,
    /// `|laplacian(U)|`, required only when scale-adaptive sources are enabled.
    pub mag_laplacian_u: Option<ScalarField>,
    /// Time-step size (s).
    pub dt: Real,
}

/// Velocity-gradient invariants shared by the blending, source and viscosity stages.
#[derive(Clone, Debug)]
pub struct FlowInvariants {
    pub s2: ScalarField,
    pub g_by_nu: ScalarField,
    pub div_u: ScalarField,
}

impl FlowState {
    /// Constant-density flow with uniform molecular viscosity.
    pub fn incompressible(grad_u: TensorField, nu: Real, dt: Real) -> Self {
        let n = grad_u.len();
        Self {
            grad_u,
            rho: ScalarField::uniform(n, 1.0),
            nu: ScalarField::uniform(n, nu),
            mag_laplacian_u: None,
            dt,
        }
    }

    /// Uniform flow: zero velocity gradient in every cell.
    pub fn quiescent(n_cells: usize, nu: Real, dt: Real) -> Self {
        Self::incompressible(vec![Matrix3::zeros(); n_cells], nu, dt)
    }

    pub fn with_mag_laplacian_u(mut self, mag_laplacian_u: ScalarField) -> Self {
        self.mag_laplacian_u = Some(mag_laplacian_u);
        self
    }

    /// Check sizes against the mesh and reject unusable values.
    pub fn validate(&self, n_cells: usize) -> ModelResult<()> {
        if self.grad_u.len() != n_cells {
            return Err(ModelError::InvalidInput {
                what: format!(
                    "velocity gradient has {} cells, mesh has {n_cells}",
                    self.grad_u.len()
                ),
            });
        }
        self.rho.ensure_len(n_cells, "density")?;
        self.nu.ensure_len(n_cells, "molecular viscosity")?;
        if let Some(lap) = &self.mag_laplacian_u {
            lap.ensure_len(n_cells, "velocity laplacian")?;
        }
        ensure_positive(self.dt, "time step")?;
        if self.rho.iter().any(|&r| !(r.is_finite() && r > 0.0)) {
            return Err(ModelError::InvalidInput {
                what: "density must be finite and > 0".to_string(),
            });
        }
        if self.nu.iter().any(|&v| !(v.is_finite() && v >= 0.0)) {
            return Err(ModelError::InvalidInput {
                what: "molecular viscosity must be finite and >= 0".to_string(),
            });
        }
        Ok(())
    }

    pub fn invariants(&self) -> FlowInvariants {
        FlowInvariants {
            s2: self.grad_u.par_iter().map(strain_rate_sqr).collect(),
            g_by_nu: self.grad_u.par_iter().map(production_by_nu).collect(),
            div_u: self.grad_u.par_iter().map(divergence).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shear_invariants() {
        let mut g = Matrix3::zeros();
        g[(1, 0)] = 4.0;
        let flow = FlowState::incompressible(vec![g; 3], 1e-5, 1e-3);
        let inv = flow.invariants();
        assert!((inv.s2[0] - 16.0).abs() < 1e-12);
        assert!((inv.g_by_nu[2] - 16.0).abs() < 1e-12);
        assert_eq!(inv.div_u[1], 0.0);
    }

    #[test]
    fn validate_rejects_size_mismatch() {
        let flow = FlowState::quiescent(4, 1e-5, 1e-3);
        assert!(flow.validate(4).is_ok());
        assert!(matches!(
            flow.validate(5),
            Err(ModelError::InvalidInput { .. })
        ));
    }

    #[test]
    fn validate_rejects_bad_time_step() {
        let flow = FlowState::quiescent(2, 1e-5, 0.0);
        assert!(flow.validate(2).is_err());
    }

    #[test]
    fn validate_rejects_bad_density() {
        let mut flow = FlowState::quiescent(2, 1e-5, 1e-3);
        flow.rho = ScalarField::from_vec(vec![1.0, -1.0]);
        assert!(flow.validate(2).is_err());
    }
}
