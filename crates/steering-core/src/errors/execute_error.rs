//! Execution errors.

use std::path::PathBuf;

use super::error_code::{self, SteeringErrorCode};
use super::ConflictError;

/// Errors raised while applying a generation plan.
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    #[error("{} unresolved conflict(s):\n{}", .0.len(), list(.0))]
    Conflicts(Vec<ConflictError>),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Manifest {path} is unusable: {message}")]
    Manifest { path: PathBuf, message: String },
}

impl ExecuteError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn list(conflicts: &[ConflictError]) -> String {
    conflicts
        .iter()
        .map(|c| format!("  - {c}"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl SteeringErrorCode for ExecuteError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Conflicts(_) => error_code::CONFLICT,
            _ => error_code::EXECUTE_ERROR,
        }
    }
}
