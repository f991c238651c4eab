//! Output conflicts.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use super::error_code::{self, SteeringErrorCode};
use crate::types::Vendor;

/// The vendor and originating rule behind a planned operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Claimant {
    pub vendor: Vendor,
    pub origin: Option<PathBuf>,
}

impl fmt::Display for Claimant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.origin {
            Some(origin) => write!(f, "{} (from {})", self.vendor, origin.display()),
            None => write!(f, "{}", self.vendor),
        }
    }
}

/// A planned output that cannot be materialized without clobbering
/// something. Fatal in apply mode unless `force` resolves it; always listed
/// in full by a dry run.
#[derive(Debug, Clone, thiserror::Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConflictError {
    #[error("{path} is claimed by more than one operation: {}", join(.claimants))]
    DuplicateTarget {
        path: PathBuf,
        claimants: Vec<Claimant>,
    },

    #[error("{path} already exists and is not managed by steering (wanted by {claimant})")]
    Unmanaged { path: PathBuf, claimant: Claimant },

    #[error("{path} is a {found}, expected a {expected} (wanted by {claimant})")]
    TypeMismatch {
        path: PathBuf,
        expected: &'static str,
        found: &'static str,
        claimant: Claimant,
    },
}

impl ConflictError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::DuplicateTarget { path, .. }
            | Self::Unmanaged { path, .. }
            | Self::TypeMismatch { path, .. } => path,
        }
    }

    /// Whether `force` may overwrite the existing item.
    pub fn is_forceable(&self) -> bool {
        matches!(self, Self::Unmanaged { .. })
    }
}

fn join(claimants: &[Claimant]) -> String {
    claimants
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl SteeringErrorCode for ConflictError {
    fn error_code(&self) -> &'static str {
        error_code::CONFLICT
    }
}
