//! pans-config: coefficient dictionary format and validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_dict};

/// Newest dictionary layout this crate reads and writes.
pub const LATEST_VERSION: u32 = 1;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn from_yaml_str(content: &str) -> ConfigResult<ClosureDict> {
    let dict: ClosureDict = serde_yaml::from_str(content)?;
    validate_dict(&dict)?;
    Ok(dict)
}

pub fn load_yaml(path: &std::path::Path) -> ConfigResult<ClosureDict> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn save_yaml(path: &std::path::Path, dict: &ClosureDict) -> ConfigResult<()> {
    validate_dict(dict)?;
    let content = serde_yaml::to_string(dict)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ConfigResult<ClosureDict> {
    let content = std::fs::read_to_string(path)?;
    let dict: ClosureDict = serde_json::from_str(&content)?;
    validate_dict(&dict)?;
    Ok(dict)
}

pub fn save_json(path: &std::path::Path, dict: &ClosureDict) -> ConfigResult<()> {
    validate_dict(dict)?;
    let content = serde_json::to_string_pretty(dict)?;
    std::fs::write(path, content)?;
    Ok(())
}
