//! Resolution control: the unresolved-to-total ratios fK and fOmega.
//!
//! ```text
//! Lambda = sqrt(k) / (betaStar omega)
//! fK     = clamp(C (delta / Lambda)^n, loLim, uLim)
//! fOmega = fK / fEpsilon
//! ```
//!
//! `k` and `omega` are totals. Degenerate cells fall back to a limit instead
//! of producing NaN: a non-positive or non-finite filter width selects
//! `loLim`, a vanishing turbulence length scale selects `uLim`.

use crate::coeffs::PansCoeffs;
use crate::error::ModelResult;
use pans_core::{Real, SMALL, ScalarField, clamp_or_lo};
use rayon::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct ResolutionControl {
    beta_star: Real,
    f_epsilon: Real,
    lo_lim: Real,
    u_lim: Real,
    coeff: Real,
    exponent: Real,
}

#[derive(Clone, Debug)]
pub struct ResolutionFields {
    pub f_k: ScalarField,
    pub f_omega: ScalarField,
}

impl ResolutionControl {
    pub fn new(pans: &PansCoeffs, beta_star: Real) -> Self {
        Self {
            beta_star,
            f_epsilon: pans.f_epsilon,
            lo_lim: pans.fk_lower,
            u_lim: pans.fk_upper,
            coeff: pans.fk_coeff,
            exponent: pans.fk_exponent,
        }
    }

    pub fn limits(&self) -> (Real, Real) {
        (self.lo_lim, self.u_lim)
    }

    /// Turbulence length scale `sqrt(k) / (betaStar omega)`.
    #[inline]
    pub fn length_scale(&self, k: Real, omega: Real) -> Real {
        let k = if k.is_finite() { k.max(0.0) } else { 0.0 };
        k.sqrt() / (self.beta_star * omega.max(SMALL))
    }

    /// fK for one cell from total `k`, total `omega` and filter width `delta`.
    pub fn f_k_cell(&self, k: Real, omega: Real, delta: Real) -> Real {
        if !(delta.is_finite() && delta > 0.0) {
            return self.lo_lim;
        }
        let lambda = self.length_scale(k, omega);
        if lambda <= 0.0 {
            return self.u_lim;
        }
        let estimate = self.coeff * (delta / lambda).powf(self.exponent);
        clamp_or_lo(estimate, self.lo_lim, self.u_lim)
    }

    /// Clamp an externally supplied fK into the configured limits.
    #[inline]
    pub fn clamp_f_k(&self, f_k: Real) -> Real {
        clamp_or_lo(f_k, self.lo_lim, self.u_lim)
    }

    #[inline]
    pub fn f_omega_cell(&self, f_k: Real) -> Real {
        f_k / self.f_epsilon
    }

    pub fn f_omega(&self, f_k: &ScalarField) -> ScalarField {
        f_k.map(|v| self.f_omega_cell(v))
    }

    /// Recompute fK and fOmega over all cells.
    pub fn evaluate(
        &self,
        k: &ScalarField,
        omega: &ScalarField,
        delta: &ScalarField,
    ) -> ModelResult<ResolutionFields> {
        let n = k.len();
        omega.ensure_len(n, "omega")?;
        delta.ensure_len(n, "filter width")?;

        let f_k: ScalarField = (0..n)
            .into_par_iter()
            .map(|i| self.f_k_cell(k[i], omega[i], delta[i]))
            .collect();
        let f_omega = self.f_omega(&f_k);
        Ok(ResolutionFields { f_k, f_omega })
    }
}
