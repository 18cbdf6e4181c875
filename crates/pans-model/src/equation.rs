//! Transport-equation hand-off to the host solver.

use crate::error::{ModelError, ModelResult};
use crate::sources::SourceContribution;
use pans_core::{Real, ScalarField, ensure_positive};
use rayon::prelude::*;

/// One assembled transport equation for an unresolved quantity.
///
/// ```text
/// d(rho phi)/dt + div(rho U phi) - div(rho D grad phi) = su - sp phi
/// ```
///
/// Convection and the discrete diffusion operator are the solver's business;
/// the closure supplies `diffusivity` (`D`) and the linearised sources.
#[derive(Clone, Copy, Debug)]
pub struct TransportEquation<'a> {
    pub name: &'static str,
    /// Value at the start of the step.
    pub field: &'a ScalarField,
    pub rho: &'a ScalarField,
    pub diffusivity: &'a ScalarField,
    pub sources: &'a SourceContribution,
    pub dt: Real,
}

impl TransportEquation<'_> {
    pub fn n_cells(&self) -> usize {
        self.field.len()
    }

    /// Check that every operand lives on the same cells.
    pub fn validate(&self) -> ModelResult<()> {
        let n = self.n_cells();
        self.rho.ensure_len(n, "density")?;
        self.diffusivity.ensure_len(n, "diffusivity")?;
        self.sources.su.ensure_len(n, "source su")?;
        self.sources.sp.ensure_len(n, "source sp")?;
        ensure_positive(self.dt, "time step")?;
        Ok(())
    }
}

/// Solves an assembled equation and returns the updated field.
pub trait TransportSolver {
    fn solve(&mut self, equation: &TransportEquation<'_>) -> ModelResult<ScalarField>;
}

/// Cell-local implicit Euler update of the source terms.
///
/// ```text
/// phi_new = (rho phi_old + dt su) / (rho + dt sp)
/// ```
///
/// Transport between cells is ignored, which makes this the exact solution of
/// the closure's own dynamics for spatially uniform fields and a usable
/// stand-in when no host solver is attached.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointImplicitSolver;

impl TransportSolver for PointImplicitSolver {
    fn solve(&mut self, equation: &TransportEquation<'_>) -> ModelResult<ScalarField> {
        equation.validate()?;
        let dt = equation.dt;
        let src = equation.sources;

        let updated: ScalarField = (0..equation.n_cells())
            .into_par_iter()
            .map(|i| {
                let rho = equation.rho[i];
                (rho * equation.field[i] + dt * src.su[i]) / (rho + dt * src.sp[i])
            })
            .collect();

        if !updated.all_finite() {
            return Err(ModelError::Solver {
                equation: equation.name,
                what: "non-finite value after update".to_string(),
            });
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_decay_matches_implicit_euler() {
        let phi = ScalarField::uniform(2, 1.0);
        let rho = ScalarField::uniform(2, 1.0);
        let d = ScalarField::zeros(2);
        let sources = SourceContribution {
            su: ScalarField::zeros(2),
            sp: ScalarField::uniform(2, 10.0),
        };
        let eq = TransportEquation {
            name: "kU",
            field: &phi,
            rho: &rho,
            diffusivity: &d,
            sources: &sources,
            dt: 0.1,
        };
        let out = PointImplicitSolver.solve(&eq).unwrap();
        assert!((out[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn balance_is_a_fixed_point() {
        let phi = ScalarField::uniform(1, 2.0);
        let rho = ScalarField::uniform(1, 1.2);
        let d = ScalarField::zeros(1);
        let sources = SourceContribution {
            su: ScalarField::uniform(1, 6.0),
            sp: ScalarField::uniform(1, 3.0),
        };
        let eq = TransportEquation {
            name: "omegaU",
            field: &phi,
            rho: &rho,
            diffusivity: &d,
            sources: &sources,
            dt: 5.0,
        };
        let out = PointImplicitSolver.solve(&eq).unwrap();
        assert!((out[0] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn mismatched_sources_are_rejected() {
        let phi = ScalarField::uniform(2, 1.0);
        let sources = SourceContribution::zero(3);
        let eq = TransportEquation {
            name: "kU",
            field: &phi,
            rho: &phi,
            diffusivity: &phi,
            sources: &sources,
            dt: 1.0,
        };
        assert!(PointImplicitSolver.solve(&eq).is_err());
    }
}
