//! Error types for filter-width construction.

use thiserror::Error;

/// Errors raised while resolving a filter-width provider from configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeltaError {
    #[error("Unknown filter-width provider '{name}' (known: {known})")]
    UnknownProvider { name: String, known: String },

    #[error("Provider '{provider}' requires coefficient '{key}'")]
    MissingCoeff {
        provider: &'static str,
        key: &'static str,
    },

    #[error("Provider '{provider}' coefficient '{key}' is invalid: {value}")]
    InvalidCoeff {
        provider: &'static str,
        key: &'static str,
        value: f64,
    },

    #[error("Filter-width providers nest deeper than {depth} levels starting at '{name}'")]
    NestingTooDeep { name: String, depth: usize },
}

pub type DeltaResult<T> = Result<T, DeltaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DeltaError::UnknownProvider {
            name: "vanDriest".into(),
            known: "cubeRootVol".into(),
        };
        assert!(err.to_string().contains("vanDriest"));
    }
}
