//! Scanner errors.

use std::path::PathBuf;

use super::error_code::{self, SteeringErrorCode};

/// Errors that can occur while walking the project tree.
///
/// `RootUnreadable` is fatal. The other variants are collected as warnings
/// when they happen below the root.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Cannot read scan root {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error scanning {path}: {message}")]
    IoError { path: PathBuf, message: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Included rule not found: {path}")]
    IncludedRuleNotFound { path: PathBuf },

    #[error("Included rule {path} is not under an auto or contextual rules directory")]
    IncludedRuleUnclassified { path: PathBuf },
}

impl ScanError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::RootUnreadable { path, .. }
            | Self::IoError { path, .. }
            | Self::PermissionDenied { path }
            | Self::IncludedRuleNotFound { path }
            | Self::IncludedRuleUnclassified { path } => path,
        }
    }
}

impl SteeringErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        error_code::SCAN_ERROR
    }
}
