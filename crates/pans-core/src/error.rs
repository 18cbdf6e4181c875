use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

/// Failures of the numeric layer. Limiters never produce these; they come from
/// inconsistent inputs handed in by a caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("{what} is not finite ({value})")]
    NonFinite { what: &'static str, value: f64 },

    #[error("{what} must be > 0, got {value}")]
    NotPositive { what: &'static str, value: f64 },

    #[error("{what} has {got} cells, expected {expected}")]
    SizeMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
