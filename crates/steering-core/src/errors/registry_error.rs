//! Registry errors.

use std::path::PathBuf;

use super::error_code::{self, SteeringErrorCode};
use crate::types::Tier;

/// Errors raised while building a `RuleRegistry`.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Two rules normalize to the same source path. Indicates a scanner or
    /// caller bug; fatal.
    #[error("Duplicate rule {path} (registered as {first} and {second})")]
    DuplicateRule {
        path: PathBuf,
        first: Tier,
        second: Tier,
    },
}

impl SteeringErrorCode for RegistryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateRule { .. } => error_code::DUPLICATE_RULE,
        }
    }
}
