//! Planning errors.

use std::path::PathBuf;

use super::error_code::{self, SteeringErrorCode};
use crate::types::Vendor;

/// Errors raised by an adapter while planning. Programming-error class:
/// valid configuration never triggers them.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("{vendor} planned {path}, which escapes the output root {root}")]
    PathEscape {
        vendor: Vendor,
        path: PathBuf,
        root: PathBuf,
    },

    #[error("{vendor} could not render {path}: {message}")]
    Render {
        vendor: Vendor,
        path: PathBuf,
        message: String,
    },
}

impl SteeringErrorCode for PlanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::PathEscape { .. } => error_code::PATH_ESCAPE,
            Self::Render { .. } => error_code::PLAN_ERROR,
        }
    }
}
