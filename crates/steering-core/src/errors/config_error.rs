//! Configuration errors.

use super::error_code::{self, SteeringErrorCode};

/// Errors that can occur during configuration loading and validation.
/// Always fatal: the run aborts before scanning.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Invalid config value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Invalid project root {path}: {message}")]
    InvalidRoot { path: String, message: String },
}

impl SteeringErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
