//! Pipeline errors.

use super::error_code::SteeringErrorCode;
use super::{ConfigError, ExecuteError, PlanError, RegistryError, ScanError};

/// Errors that abort a pipeline run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    #[error("Execution error: {0}")]
    Execute(#[from] ExecuteError),
}

impl SteeringErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Scan(e) => e.error_code(),
            Self::Registry(e) => e.error_code(),
            Self::Plan(e) => e.error_code(),
            Self::Execute(e) => e.error_code(),
        }
    }
}
