//! Validated, typed closure configuration.
//!
//! [`ModelCoefficients`] is built from a [`ClosureDict`] after validation and
//! is the only configuration the numerical code reads. Reconfiguration swaps
//! the whole value and bumps the [`ConfigVersion`].

use crate::error::ModelResult;
use crate::sst::SstCoeffs;
use pans_config::schema::{ClosureDict, DeltaCoeffsDef};
use pans_config::validate_dict;
use pans_core::Real;
use std::collections::BTreeMap;
use std::fmt;

/// Monotonic configuration counter, incremented on each effective reconfigure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConfigVersion(pub u64);

impl ConfigVersion {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ConfigVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Resolution-control coefficients with the fK prefactor resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct PansCoeffs {
    pub f_epsilon: Real,
    /// Upper limit of fK (`uLim`).
    pub fk_upper: Real,
    /// Lower limit of fK (`loLim`).
    pub fk_lower: Real,
    pub fk_coeff: Real,
    pub fk_exponent: Real,
}

/// Ambient turbulence levels sustained by the decay-control sources.
#[derive(Clone, Debug, PartialEq)]
pub struct DecayControl {
    pub k_inf: Real,
    pub omega_inf: Real,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SasCoeffs {
    pub cs: Real,
    pub kappa: Real,
    pub zeta2: Real,
    pub sigma_phi: Real,
    pub c: Real,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Limits {
    pub k_min: Real,
    pub omega_min: Real,
    pub nut_min: Real,
    pub nut_max: Real,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModelCoefficients {
    pub sst: SstCoeffs,
    pub pans: PansCoeffs,
    pub decay: Option<DecayControl>,
    pub sas: Option<SasCoeffs>,
    pub limits: Limits,
    /// Filter-width provider name.
    pub delta: String,
    pub delta_coeffs: BTreeMap<String, DeltaCoeffsDef>,
}

impl ModelCoefficients {
    /// Validate `dict` and convert it into typed coefficients.
    pub fn from_dict(dict: &ClosureDict) -> ModelResult<Self> {
        validate_dict(dict)?;

        let sst = SstCoeffs::from(&dict.coeffs);
        let p = &dict.pans;
        let pans = PansCoeffs {
            f_epsilon: p.f_epsilon,
            fk_upper: p.fk_upper_limit,
            fk_lower: p.fk_lower_limit,
            fk_coeff: p
                .fk_coeff
                .unwrap_or_else(|| 1.0 / sst.beta_star.sqrt()),
            fk_exponent: p.fk_exponent,
        };

        Ok(Self {
            sst,
            pans,
            decay: dict.decay_control.as_ref().map(|d| DecayControl {
                k_inf: d.k_inf,
                omega_inf: d.omega_inf,
            }),
            sas: dict.sas.as_ref().map(|s| SasCoeffs {
                cs: s.cs,
                kappa: s.kappa,
                zeta2: s.zeta2,
                sigma_phi: s.sigma_phi,
                c: s.c,
            }),
            limits: Limits {
                k_min: dict.limits.k_min,
                omega_min: dict.limits.omega_min,
                nut_min: dict.limits.nut_min,
                nut_max: dict.limits.nut_max,
            },
            delta: dict.delta.clone(),
            delta_coeffs: dict.delta_coeffs.clone(),
        })
    }

    /// True when the filter-width provider must be rebuilt to match `other`.
    pub fn delta_differs(&self, other: &Self) -> bool {
        self.delta != other.delta || self.delta_coeffs != other.delta_coeffs
    }
}

impl Default for ModelCoefficients {
    fn default() -> Self {
        // The default dictionary always validates.
        match Self::from_dict(&ClosureDict::default()) {
            Ok(coeffs) => coeffs,
            Err(err) => unreachable!("default dictionary rejected: {err}"),
        }
    }
}
