//! Error types for closure operations.

use pans_config::{ConfigError, ValidationError};
use pans_core::CoreError;
use pans_delta::DeltaError;
use pans_mesh::MeshError;
use thiserror::Error;

/// Errors surfaced by the closure.
///
/// Numerical degeneracy never appears here: limiters handle it locally.
/// Only configuration problems and collaborator failures are reported.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid coefficients: {0}")]
    Validation(#[from] ValidationError),

    #[error("Filter width error: {0}")]
    Delta(#[from] DeltaError),

    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),

    #[error("Numeric error: {0}")]
    Core(#[from] CoreError),

    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    #[error("Transport solver failed for {equation}: {what}")]
    Solver {
        equation: &'static str,
        what: String,
    },
}

pub type ModelResult<T> = Result<T, ModelError>;
