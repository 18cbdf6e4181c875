//! Coefficient dictionary schema.
//!
//! Key names follow the established `kOmegaSSTPANS` dictionary so existing
//! case files translate one-to-one:
//!
//! ```yaml
//! version: 1
//! coeffs:
//!   alphaK1: 0.85
//!   betaStar: 0.09
//!   F3: false
//! pans:
//!   fEpsilon: 1.0
//!   fKupperLimit: 1.0
//!   fKlowerLimit: 0.1
//! delta: cubeRootVol
//! deltaCoeffs:
//!   cubeRootVol:
//!     deltaCoeff: 1.0
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClosureDict {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub coeffs: SstCoeffsDef,
    #[serde(default)]
    pub pans: PansCoeffsDef,
    /// Name of the filter-width provider.
    #[serde(default = "default_delta")]
    pub delta: String,
    /// Per-provider sub-configuration, keyed by provider name.
    #[serde(rename = "deltaCoeffs", default)]
    pub delta_coeffs: BTreeMap<String, DeltaCoeffsDef>,
    #[serde(
        rename = "decayControl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub decay_control: Option<DecayControlDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sas: Option<SasCoeffsDef>,
    #[serde(default)]
    pub limits: LimitsDef,
}

impl Default for ClosureDict {
    fn default() -> Self {
        Self {
            version: crate::LATEST_VERSION,
            model: default_model(),
            coeffs: SstCoeffsDef::default(),
            pans: PansCoeffsDef::default(),
            delta: default_delta(),
            delta_coeffs: BTreeMap::new(),
            decay_control: None,
            sas: None,
            limits: LimitsDef::default(),
        }
    }
}

fn default_version() -> u32 {
    crate::LATEST_VERSION
}

fn default_model() -> String {
    "kOmegaSSTPANS".to_string()
}

fn default_delta() -> String {
    "cubeRootVol".to_string()
}

/// Base k-omega SST coefficients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SstCoeffsDef {
    #[serde(rename = "alphaK1", default = "d_alpha_k1")]
    pub alpha_k1: f64,
    #[serde(rename = "alphaK2", default = "d_alpha_k2")]
    pub alpha_k2: f64,
    #[serde(rename = "alphaOmega1", default = "d_alpha_omega1")]
    pub alpha_omega1: f64,
    #[serde(rename = "alphaOmega2", default = "d_alpha_omega2")]
    pub alpha_omega2: f64,
    #[serde(default = "d_beta1")]
    pub beta1: f64,
    #[serde(default = "d_beta2")]
    pub beta2: f64,
    #[serde(rename = "betaStar", default = "d_beta_star")]
    pub beta_star: f64,
    #[serde(default = "d_gamma1")]
    pub gamma1: f64,
    #[serde(default = "d_gamma2")]
    pub gamma2: f64,
    #[serde(default = "d_a1")]
    pub a1: f64,
    #[serde(default = "d_b1")]
    pub b1: f64,
    #[serde(default = "d_c1")]
    pub c1: f64,
    #[serde(rename = "F3", default)]
    pub f3: bool,
}

impl Default for SstCoeffsDef {
    fn default() -> Self {
        Self {
            alpha_k1: d_alpha_k1(),
            alpha_k2: d_alpha_k2(),
            alpha_omega1: d_alpha_omega1(),
            alpha_omega2: d_alpha_omega2(),
            beta1: d_beta1(),
            beta2: d_beta2(),
            beta_star: d_beta_star(),
            gamma1: d_gamma1(),
            gamma2: d_gamma2(),
            a1: d_a1(),
            b1: d_b1(),
            c1: d_c1(),
            f3: false,
        }
    }
}

fn d_alpha_k1() -> f64 {
    0.85
}
fn d_alpha_k2() -> f64 {
    1.0
}
fn d_alpha_omega1() -> f64 {
    0.5
}
fn d_alpha_omega2() -> f64 {
    0.856
}
fn d_beta1() -> f64 {
    0.075
}
fn d_beta2() -> f64 {
    0.0828
}
fn d_beta_star() -> f64 {
    0.09
}
fn d_gamma1() -> f64 {
    5.0 / 9.0
}
fn d_gamma2() -> f64 {
    0.44
}
fn d_a1() -> f64 {
    0.31
}
fn d_b1() -> f64 {
    1.0
}
fn d_c1() -> f64 {
    10.0
}

/// Resolution-control coefficients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PansCoeffsDef {
    #[serde(rename = "fEpsilon", default = "d_f_epsilon")]
    pub f_epsilon: f64,
    #[serde(rename = "fKupperLimit", default = "d_fk_upper")]
    pub fk_upper_limit: f64,
    #[serde(rename = "fKlowerLimit", default = "d_fk_lower")]
    pub fk_lower_limit: f64,
    /// Prefactor of the fK estimate; `None` selects `1/sqrt(betaStar)`.
    #[serde(rename = "fKCoeff", default, skip_serializing_if = "Option::is_none")]
    pub fk_coeff: Option<f64>,
    /// Exponent applied to `delta / Lambda`.
    #[serde(rename = "fKExponent", default = "d_fk_exponent")]
    pub fk_exponent: f64,
}

impl Default for PansCoeffsDef {
    fn default() -> Self {
        Self {
            f_epsilon: d_f_epsilon(),
            fk_upper_limit: d_fk_upper(),
            fk_lower_limit: d_fk_lower(),
            fk_coeff: None,
            fk_exponent: d_fk_exponent(),
        }
    }
}

fn d_f_epsilon() -> f64 {
    1.0
}
fn d_fk_upper() -> f64 {
    1.0
}
fn d_fk_lower() -> f64 {
    0.1
}
fn d_fk_exponent() -> f64 {
    2.0 / 3.0
}

/// Sub-configuration of one filter-width provider.
///
/// Each provider reads only the keys it understands; the rest stay `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DeltaCoeffsDef {
    #[serde(rename = "deltaCoeff", default, skip_serializing_if = "Option::is_none")]
    pub delta_coeff: Option<f64>,
    /// Constant filter width in metres (`uniform`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Wrapped provider name (`Prandtl`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kappa: Option<f64>,
    #[serde(rename = "Cdelta", default, skip_serializing_if = "Option::is_none")]
    pub c_delta: Option<f64>,
}

/// Ambient turbulence maintained against free-stream decay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecayControlDef {
    #[serde(rename = "kInf")]
    pub k_inf: f64,
    #[serde(rename = "omegaInf")]
    pub omega_inf: f64,
}

/// Scale-adaptive simulation coefficients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SasCoeffsDef {
    #[serde(rename = "Cs", default = "d_sas_cs")]
    pub cs: f64,
    #[serde(default = "d_sas_kappa")]
    pub kappa: f64,
    #[serde(default = "d_sas_zeta2")]
    pub zeta2: f64,
    #[serde(rename = "sigmaPhi", default = "d_sas_sigma_phi")]
    pub sigma_phi: f64,
    #[serde(rename = "C", default = "d_sas_c")]
    pub c: f64,
}

impl Default for SasCoeffsDef {
    fn default() -> Self {
        Self {
            cs: d_sas_cs(),
            kappa: d_sas_kappa(),
            zeta2: d_sas_zeta2(),
            sigma_phi: d_sas_sigma_phi(),
            c: d_sas_c(),
        }
    }
}

fn d_sas_cs() -> f64 {
    0.11
}
fn d_sas_kappa() -> f64 {
    0.41
}
fn d_sas_zeta2() -> f64 {
    3.51
}
fn d_sas_sigma_phi() -> f64 {
    2.0 / 3.0
}
fn d_sas_c() -> f64 {
    2.0
}

/// Bounding floors and eddy-viscosity clip range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LimitsDef {
    #[serde(rename = "kMin", default = "d_k_min")]
    pub k_min: f64,
    #[serde(rename = "omegaMin", default = "d_omega_min")]
    pub omega_min: f64,
    #[serde(rename = "nutMin", default)]
    pub nut_min: f64,
    #[serde(rename = "nutMax", default = "d_nut_max")]
    pub nut_max: f64,
}

impl Default for LimitsDef {
    fn default() -> Self {
        Self {
            k_min: d_k_min(),
            omega_min: d_omega_min(),
            nut_min: 0.0,
            nut_max: d_nut_max(),
        }
    }
}

fn d_k_min() -> f64 {
    1e-15
}
fn d_omega_min() -> f64 {
    1e-15
}
fn d_nut_max() -> f64 {
    1e5
}
