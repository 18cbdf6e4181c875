//! Dictionary validation logic.

use crate::schema::ClosureDict;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported feature: {feature} - {reason}")]
    Unsupported { feature: String, reason: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be finite and > 0"))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be finite and >= 0"))
    }
}

pub fn validate_dict(dict: &ClosureDict) -> Result<(), ValidationError> {
    if dict.version == 0 || dict.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: dict.version,
        });
    }

    if dict.model != "kOmegaSSTPANS" {
        return Err(ValidationError::Unsupported {
            feature: format!("model {}", dict.model),
            reason: "only kOmegaSSTPANS is available".to_string(),
        });
    }

    let c = &dict.coeffs;
    for (field, value) in [
        ("alphaK1", c.alpha_k1),
        ("alphaK2", c.alpha_k2),
        ("alphaOmega1", c.alpha_omega1),
        ("alphaOmega2", c.alpha_omega2),
        ("beta1", c.beta1),
        ("beta2", c.beta2),
        ("betaStar", c.beta_star),
        ("gamma1", c.gamma1),
        ("gamma2", c.gamma2),
        ("a1", c.a1),
        ("b1", c.b1),
        ("c1", c.c1),
    ] {
        positive(field, value)?;
    }

    let p = &dict.pans;
    positive("fEpsilon", p.f_epsilon)?;
    if p.f_epsilon > 1.0 {
        return Err(invalid("fEpsilon", p.f_epsilon, "must not exceed 1"));
    }
    positive("fKlowerLimit", p.fk_lower_limit)?;
    positive("fKupperLimit", p.fk_upper_limit)?;
    if p.fk_upper_limit > 1.0 {
        return Err(invalid("fKupperLimit", p.fk_upper_limit, "must not exceed 1"));
    }
    if p.fk_lower_limit > p.fk_upper_limit {
        return Err(invalid(
            "fKlowerLimit",
            p.fk_lower_limit,
            "must not exceed fKupperLimit",
        ));
    }
    if let Some(coeff) = p.fk_coeff {
        positive("fKCoeff", coeff)?;
    }
    positive("fKExponent", p.fk_exponent)?;

    if dict.delta.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "delta".to_string(),
            value: String::new(),
            reason: "filter-width provider name is empty".to_string(),
        });
    }
    for (name, block) in &dict.delta_coeffs {
        let field = |key: &str| format!("deltaCoeffs.{name}.{key}");
        if let Some(v) = block.delta_coeff {
            positive(&field("deltaCoeff"), v)?;
        }
        if let Some(v) = block.value {
            non_negative(&field("value"), v)?;
        }
        if let Some(v) = block.kappa {
            positive(&field("kappa"), v)?;
        }
        if let Some(v) = block.c_delta {
            positive(&field("Cdelta"), v)?;
        }
    }

    if let Some(decay) = &dict.decay_control {
        non_negative("decayControl.kInf", decay.k_inf)?;
        non_negative("decayControl.omegaInf", decay.omega_inf)?;
    }

    if let Some(sas) = &dict.sas {
        positive("sas.Cs", sas.cs)?;
        positive("sas.kappa", sas.kappa)?;
        positive("sas.zeta2", sas.zeta2)?;
        positive("sas.sigmaPhi", sas.sigma_phi)?;
        positive("sas.C", sas.c)?;
    }

    let l = &dict.limits;
    positive("kMin", l.k_min)?;
    positive("omegaMin", l.omega_min)?;
    non_negative("nutMin", l.nut_min)?;
    positive("nutMax", l.nut_max)?;
    if l.nut_min >= l.nut_max {
        return Err(invalid("nutMin", l.nut_min, "must be below nutMax"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dict_is_valid() {
        validate_dict(&ClosureDict::default()).unwrap();
    }

    #[test]
    fn inverted_fk_limits_are_rejected() {
        let mut dict = ClosureDict::default();
        dict.pans.fk_lower_limit = 0.8;
        dict.pans.fk_upper_limit = 0.5;
        let err = validate_dict(&dict).unwrap_err();
        assert!(err.to_string().contains("fKlowerLimit"));
    }

    #[test]
    fn future_version_is_rejected() {
        let dict = ClosureDict {
            version: crate::LATEST_VERSION + 1,
            ..ClosureDict::default()
        };
        assert!(matches!(
            validate_dict(&dict),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn unknown_model_is_rejected() {
        let dict = ClosureDict {
            model: "kEpsilon".to_string(),
            ..ClosureDict::default()
        };
        assert!(matches!(
            validate_dict(&dict),
            Err(ValidationError::Unsupported { .. })
        ));
    }

    #[test]
    fn nan_coefficient_is_rejected() {
        let mut dict = ClosureDict::default();
        dict.coeffs.beta_star = f64::NAN;
        let err = validate_dict(&dict).unwrap_err();
        assert!(err.to_string().contains("betaStar"));
    }
}
