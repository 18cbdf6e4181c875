//! Source-term assembly for the `kU` and `omegaU` transport equations.
//!
//! Every source is returned in the linearised form
//!
//! ```text
//! S(phi) = Su - Sp phi,   Sp >= 0
//! ```
//!
//! so the transport solver can treat `Sp` implicitly. A term `-c phi` with a
//! coefficient of unknown sign goes through [`su_sp`]: positive coefficients
//! become implicit sinks, negative ones explicit sources evaluated with the
//! current value of `phi`.

use crate::coeffs::{DecayControl, SasCoeffs};
use crate::error::ModelResult;
use crate::sst::SstBase;
use pans_core::{CoreError, Real, SMALL, ScalarField, VectorField};
use rayon::prelude::*;

/// Explicit part `su` and implicit sink coefficient `sp` of a source.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceContribution {
    pub su: ScalarField,
    pub sp: ScalarField,
}

impl SourceContribution {
    pub fn zero(n_cells: usize) -> Self {
        Self {
            su: ScalarField::zeros(n_cells),
            sp: ScalarField::zeros(n_cells),
        }
    }

    pub fn len(&self) -> usize {
        self.su.len()
    }

    pub fn is_empty(&self) -> bool {
        self.su.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.su.iter().chain(self.sp.iter()).all(|&v| v == 0.0)
    }

    /// Accumulate `other` into `self`.
    pub fn add(&mut self, other: &Self) -> ModelResult<()> {
        other.su.ensure_len(self.len(), "source su")?;
        other.sp.ensure_len(self.len(), "source sp")?;
        for (a, b) in self.su.values_mut().iter_mut().zip(other.su.iter()) {
            *a += b;
        }
        for (a, b) in self.sp.values_mut().iter_mut().zip(other.sp.iter()) {
            *a += b;
        }
        Ok(())
    }

    /// Net source `su - sp phi` evaluated at `phi`.
    pub fn evaluate(&self, phi: &ScalarField) -> ModelResult<ScalarField> {
        phi.ensure_len(self.len(), "source operand")?;
        Ok((0..self.len())
            .into_par_iter()
            .map(|i| self.su[i] - self.sp[i] * phi[i])
            .collect())
    }

    fn from_cells(cells: Vec<(Real, Real)>) -> Self {
        let (su, sp): (Vec<Real>, Vec<Real>) = cells.into_iter().unzip();
        Self {
            su: su.into(),
            sp: sp.into(),
        }
    }

    fn explicit(su: ScalarField) -> Self {
        let n = su.len();
        Self {
            su,
            sp: ScalarField::zeros(n),
        }
    }
}

/// Split `-c phi` into `(su, sp)` with `sp >= 0`.
#[inline]
pub fn su_sp(c: Real, phi: Real) -> (Real, Real) {
    if c > 0.0 { (0.0, c) } else { (-c * phi, 0.0) }
}

/// Current closure state the assembler reads.
#[derive(Clone, Copy, Debug)]
pub struct SourceInputs<'a> {
    pub k_u: &'a ScalarField,
    pub omega_u: &'a ScalarField,
    pub f_k: &'a ScalarField,
    pub f_omega: &'a ScalarField,
    pub nut: &'a ScalarField,
    pub rho: &'a ScalarField,
    pub s2: &'a ScalarField,
    pub g_by_nu: &'a ScalarField,
    pub div_u: &'a ScalarField,
    pub f1: &'a ScalarField,
    pub f23: &'a ScalarField,
    pub cd_k_omega: &'a ScalarField,
}

impl SourceInputs<'_> {
    fn ensure_len(&self) -> ModelResult<usize> {
        let n = self.k_u.len();
        for (what, field) in [
            ("omegaU", self.omega_u),
            ("fK", self.f_k),
            ("fOmega", self.f_omega),
            ("nut", self.nut),
            ("density", self.rho),
            ("S2", self.s2),
            ("GbyNu", self.g_by_nu),
            ("divU", self.div_u),
            ("F1", self.f1),
            ("F23", self.f23),
            ("CDkOmega", self.cd_k_omega),
        ] {
            field.ensure_len(n, what)?;
        }
        Ok(n)
    }
}

/// Extra inputs of the scale-adaptive source.
#[derive(Clone, Copy, Debug)]
pub struct SasInputs<'a> {
    pub delta: &'a ScalarField,
    pub mag_laplacian_u: &'a ScalarField,
    pub grad_k_u: &'a VectorField,
    pub grad_omega_u: &'a VectorField,
    pub dt: Real,
}

impl SasInputs<'_> {
    fn ensure_len(&self, n: usize) -> ModelResult<()> {
        self.delta.ensure_len(n, "filter width")?;
        self.mag_laplacian_u.ensure_len(n, "velocity laplacian")?;
        for (what, len) in [
            ("grad kU", self.grad_k_u.len()),
            ("grad omegaU", self.grad_omega_u.len()),
        ] {
            if len != n {
                return Err(CoreError::SizeMismatch {
                    what,
                    expected: n,
                    got: len,
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Builds the source contributions of both transport equations.
#[derive(Clone, Copy, Debug)]
pub struct SourceAssembler<'a> {
    base: &'a SstBase,
    decay: Option<&'a DecayControl>,
    sas: Option<&'a SasCoeffs>,
}

impl<'a> SourceAssembler<'a> {
    pub fn new(
        base: &'a SstBase,
        decay: Option<&'a DecayControl>,
        sas: Option<&'a SasCoeffs>,
    ) -> Self {
        Self { base, decay, sas }
    }

    /// PANS destruction coefficient of `omegaU`,
    /// `gamma betaStar - gamma betaStar / fOmega + beta / fOmega`.
    pub fn beta_prime(&self, f1: Real, f_omega: Real) -> Real {
        let beta_star = self.base.coeffs().beta_star;
        let gamma = self.base.gamma(f1);
        let f_omega = f_omega.max(SMALL);
        gamma * beta_star - gamma * beta_star / f_omega + self.base.beta(f1) / f_omega
    }

    /// Production, destruction and compressibility terms of the `kU` equation.
    pub fn k_u_equation(&self, inp: &SourceInputs<'_>) -> ModelResult<SourceContribution> {
        let n = inp.ensure_len()?;
        let beta_star = self.base.coeffs().beta_star;

        let cells = (0..n)
            .into_par_iter()
            .map(|i| {
                let rho = inp.rho[i];
                let k = inp.k_u[i];
                let omega = inp.omega_u[i];
                let g = inp.nut[i] * inp.g_by_nu[i];

                let production = rho * self.base.k_production(g, k, omega);
                let (su_div, sp_div) = su_sp((2.0 / 3.0) * rho * inp.div_u[i], k);

                (production + su_div, rho * beta_star * omega + sp_div)
            })
            .collect();
        Ok(SourceContribution::from_cells(cells))
    }

    /// Production, destruction, compressibility and cross-diffusion terms of
    /// the `omegaU` equation.
    ///
    /// The destruction coefficient carries the PANS modification
    /// `beta' = gamma betaStar - gamma betaStar / fOmega + beta / fOmega`.
    pub fn omega_u_equation(&self, inp: &SourceInputs<'_>) -> ModelResult<SourceContribution> {
        let n = inp.ensure_len()?;

        let cells = (0..n)
            .into_par_iter()
            .map(|i| {
                let rho = inp.rho[i];
                let omega = inp.omega_u[i];
                let f1 = inp.f1[i];
                let gamma = self.base.gamma(f1);

                let production = rho
                    * gamma
                    * self
                        .base
                        .omega_production_by_gamma(inp.g_by_nu[i], omega, inp.f23[i], inp.s2[i]);

                let beta_prime = self.beta_prime(f1, inp.f_omega[i]);

                let mut su = production;
                let mut sp = 0.0;
                for c in [
                    (2.0 / 3.0) * rho * gamma * inp.div_u[i],
                    rho * beta_prime * omega,
                    (f1 - 1.0) * rho * inp.cd_k_omega[i] / omega.max(SMALL),
                ] {
                    let (a, b) = su_sp(c, omega);
                    su += a;
                    sp += b;
                }
                (su, sp)
            })
            .collect();
        Ok(SourceContribution::from_cells(cells))
    }

    /// Decay-control source of the `kU` equation.
    ///
    /// With ambient levels configured this is the explicit production
    /// `rho betaStar omegaU_amb kU_amb` with `kU_amb = fK kInf` and
    /// `omegaU_amb = fOmega omegaInf`; otherwise zero.
    pub fn k_source(&self, inp: &SourceInputs<'_>) -> ModelResult<SourceContribution> {
        let n = inp.ensure_len()?;
        let Some(decay) = self.decay else {
            return Ok(SourceContribution::zero(n));
        };
        let beta_star = self.base.coeffs().beta_star;

        Ok(SourceContribution::explicit(
            (0..n)
                .into_par_iter()
                .map(|i| {
                    let k_amb = inp.f_k[i] * decay.k_inf;
                    let omega_amb = inp.f_omega[i] * decay.omega_inf;
                    inp.rho[i] * beta_star * omega_amb * k_amb
                })
                .collect(),
        ))
    }

    /// Decay-control source of the `omegaU` equation, `rho beta' omegaU_amb^2`.
    ///
    /// Uses the same destruction coefficient as [`Self::omega_u_equation`] so
    /// the ambient level is a fixed point for any fOmega.
    pub fn omega_source(&self, inp: &SourceInputs<'_>) -> ModelResult<SourceContribution> {
        let n = inp.ensure_len()?;
        let Some(decay) = self.decay else {
            return Ok(SourceContribution::zero(n));
        };

        Ok(SourceContribution::explicit(
            (0..n)
                .into_par_iter()
                .map(|i| {
                    let omega_amb = inp.f_omega[i] * decay.omega_inf;
                    let beta_prime = self.beta_prime(inp.f1[i], inp.f_omega[i]);
                    inp.rho[i] * beta_prime * omega_amb * omega_amb
                })
                .collect(),
        ))
    }

    /// Scale-adaptive source of the `omegaU` equation; zero unless enabled.
    ///
    /// ```text
    /// L    = sqrt(kU) / (betaStar^0.25 omegaU)
    /// Lvk  = max(kappa sqrt(S2) / |lap U|, Cs sqrt(kappa zeta2 / (beta/betaStar - gamma)) delta)
    /// Qsas = min(max(zeta2 kappa S2 (L/Lvk)^2 - 2C/sigmaPhi kU max(|grad omegaU|^2/omegaU^2, |grad kU|^2/kU^2), 0),
    ///            omegaU / (0.1 dt))
    /// ```
    pub fn qsas(
        &self,
        inp: &SourceInputs<'_>,
        sas_inputs: &SasInputs<'_>,
    ) -> ModelResult<SourceContribution> {
        let n = inp.ensure_len()?;
        let Some(sas) = self.sas else {
            return Ok(SourceContribution::zero(n));
        };
        sas_inputs.ensure_len(n)?;
        let beta_star = self.base.coeffs().beta_star;

        Ok(SourceContribution::explicit(
            (0..n)
                .into_par_iter()
                .map(|i| {
                    let k = inp.k_u[i].max(SMALL);
                    let omega = inp.omega_u[i].max(SMALL);
                    let s2 = inp.s2[i].max(0.0);
                    let f1 = inp.f1[i];

                    let length = k.sqrt() / (beta_star.powf(0.25) * omega);
                    let c_ratio = (self.base.beta(f1) / beta_star - self.base.gamma(f1)).max(SMALL);
                    let l_vk = (sas.kappa * s2.sqrt() / (sas_inputs.mag_laplacian_u[i] + SMALL))
                        .max(sas.cs * (sas.kappa * sas.zeta2 / c_ratio).sqrt() * sas_inputs.delta[i])
                        .max(SMALL);

                    let grad_ratio = (sas_inputs.grad_omega_u[i].norm_squared() / (omega * omega))
                        .max(sas_inputs.grad_k_u[i].norm_squared() / (k * k));
                    let q = sas.zeta2 * sas.kappa * s2 * (length / l_vk).powi(2)
                        - (2.0 * sas.c / sas.sigma_phi) * k * grad_ratio;

                    inp.rho[i] * q.max(0.0).min(omega / (0.1 * sas_inputs.dt))
                })
                .collect(),
        ))
    }

    /// Effective diffusivity of `kU`: `(fK/fOmega) alphaK(F1) nut + nu`.
    pub fn d_k_u_eff(
        &self,
        f1: &ScalarField,
        f_k: &ScalarField,
        f_omega: &ScalarField,
        nut: &ScalarField,
        nu: &ScalarField,
    ) -> ModelResult<ScalarField> {
        self.effective_diffusivity(f1, f_k, f_omega, nut, nu, |f1| self.base.alpha_k(f1))
    }

    /// Effective diffusivity of `omegaU`: `(fK/fOmega) alphaOmega(F1) nut + nu`.
    pub fn d_omega_u_eff(
        &self,
        f1: &ScalarField,
        f_k: &ScalarField,
        f_omega: &ScalarField,
        nut: &ScalarField,
        nu: &ScalarField,
    ) -> ModelResult<ScalarField> {
        self.effective_diffusivity(f1, f_k, f_omega, nut, nu, |f1| self.base.alpha_omega(f1))
    }

    fn effective_diffusivity<F>(
        &self,
        f1: &ScalarField,
        f_k: &ScalarField,
        f_omega: &ScalarField,
        nut: &ScalarField,
        nu: &ScalarField,
        alpha: F,
    ) -> ModelResult<ScalarField>
    where
        F: Fn(Real) -> Real + Sync + Send,
    {
        let n = f1.len();
        for (what, field) in [("fK", f_k), ("fOmega", f_omega), ("nut", nut), ("nu", nu)] {
            field.ensure_len(n, what)?;
        }
        Ok((0..n)
            .into_par_iter()
            .map(|i| (f_k[i] / f_omega[i].max(SMALL)) * alpha(f1[i]) * nut[i] + nu[i])
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        k_u: ScalarField,
        omega_u: ScalarField,
        f_k: ScalarField,
        f_omega: ScalarField,
        nut: ScalarField,
        rho: ScalarField,
        s2: ScalarField,
        g_by_nu: ScalarField,
        div_u: ScalarField,
        f1: ScalarField,
        f23: ScalarField,
        cd: ScalarField,
    }

    impl Fixture {
        fn new(n: usize) -> Self {
            Self {
                k_u: ScalarField::uniform(n, 0.1),
                omega_u: ScalarField::uniform(n, 10.0),
                f_k: ScalarField::uniform(n, 1.0),
                f_omega: ScalarField::uniform(n, 1.0),
                nut: ScalarField::uniform(n, 0.01),
                rho: ScalarField::uniform(n, 1.0),
                s2: ScalarField::zeros(n),
                g_by_nu: ScalarField::zeros(n),
                div_u: ScalarField::zeros(n),
                f1: ScalarField::uniform(n, 1.0),
                f23: ScalarField::uniform(n, 1.0),
                cd: ScalarField::zeros(n),
            }
        }

        fn inputs(&self) -> SourceInputs<'_> {
            SourceInputs {
                k_u: &self.k_u,
                omega_u: &self.omega_u,
                f_k: &self.f_k,
                f_omega: &self.f_omega,
                nut: &self.nut,
                rho: &self.rho,
                s2: &self.s2,
                g_by_nu: &self.g_by_nu,
                div_u: &self.div_u,
                f1: &self.f1,
                f23: &self.f23,
                cd_k_omega: &self.cd,
            }
        }
    }

    #[test]
    fn su_sp_keeps_sink_implicit() {
        assert_eq!(su_sp(2.0, 5.0), (0.0, 2.0));
        assert_eq!(su_sp(-2.0, 5.0), (10.0, 0.0));
    }

    #[test]
    fn uniform_flow_has_no_production() {
        let base = SstBase::default();
        let asm = SourceAssembler::new(&base, None, None);
        let fx = Fixture::new(3);

        let k = asm.k_u_equation(&fx.inputs()).unwrap();
        let w = asm.omega_u_equation(&fx.inputs()).unwrap();

        assert!(k.su.iter().all(|&v| v == 0.0));
        assert!(w.su.iter().all(|&v| v == 0.0));
        // Destruction only: betaStar omegaU
        assert!((k.sp[0] - 0.09 * 10.0).abs() < 1e-12);
        // fOmega = 1 reduces beta' to beta1
        assert!((w.sp[0] - 0.075 * 10.0).abs() < 1e-12);
    }

    #[test]
    fn shear_produces_k() {
        let base = SstBase::default();
        let asm = SourceAssembler::new(&base, None, None);
        let mut fx = Fixture::new(1);
        fx.s2 = ScalarField::uniform(1, 4.0);
        fx.g_by_nu = ScalarField::uniform(1, 4.0);

        let k = asm.k_u_equation(&fx.inputs()).unwrap();
        assert!((k.su[0] - 0.01 * 4.0).abs() < 1e-12);
    }

    #[test]
    fn omega_destruction_grows_as_f_omega_drops() {
        let base = SstBase::default();
        let asm = SourceAssembler::new(&base, None, None);
        let mut fx = Fixture::new(1);
        let full = asm.omega_u_equation(&fx.inputs()).unwrap();
        fx.f_omega = ScalarField::uniform(1, 0.5);
        let partial = asm.omega_u_equation(&fx.inputs()).unwrap();
        assert!(partial.sp[0] > full.sp[0]);
    }

    #[test]
    fn positive_cross_diffusion_is_explicit() {
        let base = SstBase::default();
        let asm = SourceAssembler::new(&base, None, None);
        let mut fx = Fixture::new(1);
        fx.f1 = ScalarField::uniform(1, 0.0);
        fx.cd = ScalarField::uniform(1, 2.0);
        let w = asm.omega_u_equation(&fx.inputs()).unwrap();
        // (1 - F1) rho CDkOmega
        assert!((w.su[0] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn decay_sources_are_zero_unless_configured() {
        let base = SstBase::default();
        let fx = Fixture::new(2);
        let asm = SourceAssembler::new(&base, None, None);
        assert!(asm.k_source(&fx.inputs()).unwrap().is_zero());
        assert!(asm.omega_source(&fx.inputs()).unwrap().is_zero());

        let decay = DecayControl {
            k_inf: 1e-3,
            omega_inf: 2.0,
        };
        let asm = SourceAssembler::new(&base, Some(&decay), None);
        let k = asm.k_source(&fx.inputs()).unwrap();
        let w = asm.omega_source(&fx.inputs()).unwrap();
        assert!((k.su[0] - 0.09 * 2.0 * 1e-3).abs() < 1e-15);
        assert!((w.su[1] - 0.075 * 4.0).abs() < 1e-12);
        assert!(k.sp.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn ambient_levels_balance_destruction_below_full_resolution() {
        let base = SstBase::default();
        let decay = DecayControl {
            k_inf: 1e-3,
            omega_inf: 5.0,
        };
        let asm = SourceAssembler::new(&base, Some(&decay), None);
        let mut fx = Fixture::new(2);
        fx.f1 = ScalarField::from_vec(vec![1.0, 0.2]);
        fx.f_k = ScalarField::uniform(2, 0.5);
        fx.f_omega = ScalarField::uniform(2, 0.5);
        fx.k_u = ScalarField::uniform(2, 0.5 * 1e-3);
        fx.omega_u = ScalarField::uniform(2, 0.5 * 5.0);
        fx.nut = ScalarField::zeros(2);

        let mut k = asm.k_u_equation(&fx.inputs()).unwrap();
        k.add(&asm.k_source(&fx.inputs()).unwrap()).unwrap();
        let mut w = asm.omega_u_equation(&fx.inputs()).unwrap();
        w.add(&asm.omega_source(&fx.inputs()).unwrap()).unwrap();

        for net in k.evaluate(&fx.k_u).unwrap().iter() {
            assert!(net.abs() < 1e-15);
        }
        for net in w.evaluate(&fx.omega_u).unwrap().iter() {
            assert!(net.abs() < 1e-12);
        }
    }

    #[test]
    fn qsas_is_zero_without_coefficients_and_bounded_with() {
        let base = SstBase::default();
        let mut fx = Fixture::new(2);
        fx.s2 = ScalarField::uniform(2, 1e4);
        let delta = ScalarField::uniform(2, 0.01);
        let lap = ScalarField::uniform(2, 1e3);
        let grads = vec![nalgebra::Vector3::zeros(); 2];
        let sas_inputs = SasInputs {
            delta: &delta,
            mag_laplacian_u: &lap,
            grad_k_u: &grads,
            grad_omega_u: &grads,
            dt: 1e-3,
        };

        let asm = SourceAssembler::new(&base, None, None);
        assert!(asm.qsas(&fx.inputs(), &sas_inputs).unwrap().is_zero());

        let coeffs = SasCoeffs {
            cs: 0.11,
            kappa: 0.41,
            zeta2: 3.51,
            sigma_phi: 2.0 / 3.0,
            c: 2.0,
        };
        let asm = SourceAssembler::new(&base, None, Some(&coeffs));
        let q = asm.qsas(&fx.inputs(), &sas_inputs).unwrap();
        for &v in q.su.iter() {
            assert!(v > 0.0);
            assert!(v <= 10.0 / (0.1 * 1e-3) + 1e-9);
        }
    }

    #[test]
    fn effective_diffusivity_scales_with_resolution_ratio() {
        let base = SstBase::default();
        let asm = SourceAssembler::new(&base, None, None);
        let f1 = ScalarField::uniform(1, 1.0);
        let nut = ScalarField::uniform(1, 1.0);
        let nu = ScalarField::uniform(1, 1e-5);
        let f_k = ScalarField::uniform(1, 0.5);
        let f_omega = ScalarField::uniform(1, 0.25);

        let dk = asm.d_k_u_eff(&f1, &f_k, &f_omega, &nut, &nu).unwrap();
        let dw = asm.d_omega_u_eff(&f1, &f_k, &f_omega, &nut, &nu).unwrap();
        assert!((dk[0] - (2.0 * 0.85 + 1e-5)).abs() < 1e-12);
        assert!((dw[0] - (2.0 * 0.5 + 1e-5)).abs() < 1e-12);
    }

    #[test]
    fn add_accumulates() {
        let mut a = SourceContribution::zero(2);
        let b = SourceContribution {
            su: ScalarField::uniform(2, 1.0),
            sp: ScalarField::uniform(2, 3.0),
        };
        a.add(&b).unwrap();
        a.add(&b).unwrap();
        assert_eq!(a.su[1], 2.0);
        assert_eq!(a.sp[0], 6.0);
        let net = a.evaluate(&ScalarField::uniform(2, 1.0)).unwrap();
        assert_eq!(net[0], -4.0);
        assert!(a.add(&SourceContribution::zero(3)).is_err());
    }
}
