//! Base k-omega SST relations evaluated per cell.
//!
//! Everything here is written in terms of the *unresolved* quantities the
//! closure transports (`kU`, `omegaU`); the PANS modifications live in the
//! source assembler and the resolution controller.

use pans_config::SstCoeffsDef;
use pans_core::{Real, SMALL, pow4};

/// Floor for the cross-diffusion term inside the F1 argument.
pub const CD_K_OMEGA_MIN: Real = 1e-10;

/// Validated base SST coefficients.
#[derive(Clone, Debug, PartialEq)]
pub struct SstCoeffs {
    pub alpha_k1: Real,
    pub alpha_k2: Real,
    pub alpha_omega1: Real,
    pub alpha_omega2: Real,
    pub beta1: Real,
    pub beta2: Real,
    pub beta_star: Real,
    pub gamma1: Real,
    pub gamma2: Real,
    pub a1: Real,
    pub b1: Real,
    pub c1: Real,
    /// Multiply F2 by F3 in the eddy-viscosity and production limiters.
    pub f3: bool,
}

impl Default for SstCoeffs {
    fn default() -> Self {
        Self::from(&SstCoeffsDef::default())
    }
}

impl From<&SstCoeffsDef> for SstCoeffs {
    fn from(def: &SstCoeffsDef) -> Self {
        Self {
            alpha_k1: def.alpha_k1,
            alpha_k2: def.alpha_k2,
            alpha_omega1: def.alpha_omega1,
            alpha_omega2: def.alpha_omega2,
            beta1: def.beta1,
            beta2: def.beta2,
            beta_star: def.beta_star,
            gamma1: def.gamma1,
            gamma2: def.gamma2,
            a1: def.a1,
            b1: def.b1,
            c1: def.c1,
            f3: def.f3,
        }
    }
}

/// Per-cell SST relations over a fixed coefficient set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SstBase {
    coeffs: SstCoeffs,
}

impl SstBase {
    pub fn new(coeffs: SstCoeffs) -> Self {
        Self { coeffs }
    }

    pub fn coeffs(&self) -> &SstCoeffs {
        &self.coeffs
    }

    /// `F1 * psi1 + (1 - F1) * psi2`.
    #[inline]
    pub fn blend(f1: Real, psi1: Real, psi2: Real) -> Real {
        f1 * (psi1 - psi2) + psi2
    }

    #[inline]
    pub fn alpha_k(&self, f1: Real) -> Real {
        Self::blend(f1, self.coeffs.alpha_k1, self.coeffs.alpha_k2)
    }

    #[inline]
    pub fn alpha_omega(&self, f1: Real) -> Real {
        Self::blend(f1, self.coeffs.alpha_omega1, self.coeffs.alpha_omega2)
    }

    #[inline]
    pub fn beta(&self, f1: Real) -> Real {
        Self::blend(f1, self.coeffs.beta1, self.coeffs.beta2)
    }

    #[inline]
    pub fn gamma(&self, f1: Real) -> Real {
        Self::blend(f1, self.coeffs.gamma1, self.coeffs.gamma2)
    }

    /// Near-wall blending function F1 in `[0, 1]`.
    ///
    /// `y` and `omega` are floored so the function stays finite at walls and
    /// in stagnant regions; `cd_k_omega` is floored at [`CD_K_OMEGA_MIN`].
    pub fn f1(&self, k: Real, omega: Real, y: Real, nu: Real, cd_k_omega: Real) -> Real {
        let c = &self.coeffs;
        let (k, omega, y, nu) = sanitize(k, omega, y, nu);
        let cd_plus = cd_k_omega.max(CD_K_OMEGA_MIN);

        let arg1 = (k.sqrt() / (c.beta_star * omega * y))
            .max(500.0 * nu / (y * y * omega))
            .min(4.0 * c.alpha_omega2 * k / (cd_plus * y * y))
            .min(10.0);

        pow4(arg1).tanh()
    }

    /// Blending function F2 in `[0, 1]`.
    pub fn f2(&self, k: Real, omega: Real, y: Real, nu: Real) -> Real {
        let c = &self.coeffs;
        let (k, omega, y, nu) = sanitize(k, omega, y, nu);

        let arg2 = (2.0 * k.sqrt() / (c.beta_star * omega * y))
            .max(500.0 * nu / (y * y * omega))
            .min(100.0);

        (arg2 * arg2).tanh()
    }

    /// Roughness-wall correction F3 in `[0, 1]`.
    pub fn f3(&self, omega: Real, y: Real, nu: Real) -> Real {
        let (_, omega, y, nu) = sanitize(0.0, omega, y, nu);
        let arg3 = (150.0 * nu / (omega * y * y)).min(10.0);
        1.0 - pow4(arg3).tanh()
    }

    /// Limiter blend: `F2`, or `F2 * F3` when F3 is enabled.
    pub fn f23(&self, k: Real, omega: Real, y: Real, nu: Real) -> Real {
        let f2 = self.f2(k, omega, y, nu);
        if self.coeffs.f3 {
            f2 * self.f3(omega, y, nu)
        } else {
            f2
        }
    }

    /// Unclipped eddy viscosity `a1 k / max(a1 omega, b1 F23 sqrt(S2))`.
    pub fn nut(&self, k: Real, omega: Real, f23: Real, s2: Real) -> Real {
        let c = &self.coeffs;
        let k = non_negative(k);
        let omega = non_negative(omega).max(SMALL);
        let denom = (c.a1 * omega).max(c.b1 * f23 * non_negative(s2).sqrt());
        c.a1 * k / denom
    }

    /// Production of `k` limited to `c1 betaStar k omega`.
    #[inline]
    pub fn k_production(&self, g: Real, k: Real, omega: Real) -> Real {
        let c = &self.coeffs;
        g.min(c.c1 * c.beta_star * k * omega)
    }

    /// `GbyNu` limited by the production ceiling of the omega equation.
    ///
    /// Multiply by `gamma` and density to obtain the explicit omega source.
    pub fn omega_production_by_gamma(&self, g_by_nu: Real, omega: Real, f23: Real, s2: Real) -> Real {
        let c = &self.coeffs;
        let ceiling = (c.c1 / c.a1)
            * c.beta_star
            * omega
            * (c.a1 * omega).max(c.b1 * f23 * non_negative(s2).sqrt());
        g_by_nu.min(ceiling)
    }
}

#[inline]
fn non_negative(v: Real) -> Real {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// Floors applied to every blending-function input.
#[inline]
fn sanitize(k: Real, omega: Real, y: Real, nu: Real) -> (Real, Real, Real, Real) {
    (
        non_negative(k),
        non_negative(omega).max(SMALL),
        non_negative(y).max(SMALL),
        non_negative(nu),
    )
}
