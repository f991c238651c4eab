//! Execution report.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use steering_core::errors::ConflictError;
use steering_core::Vendor;

use super::types::{ExecutionMode, OperationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Create,
    Update,
    Unchanged,
    Remove,
    /// Not executed because of a conflict.
    Skipped,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Unchanged => "unchanged",
            Self::Remove => "remove",
            Self::Skipped => "skipped",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub vendor: Vendor,
    pub kind: OperationKind,
    pub path: PathBuf,
    pub origin: Option<PathBuf>,
    pub outcome: Outcome,
}

/// What a run did (Apply) or would do (DryRun), in execution order.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub mode: ExecutionMode,
    pub entries: Vec<ReportEntry>,
    pub conflicts: Vec<ConflictError>,
    pub warnings: Vec<String>,
}

impl Report {
    pub fn new(mode: ExecutionMode) -> Self {
        Self {
            mode,
            entries: Vec::new(),
            conflicts: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Entries that are not `Unchanged`. Zero for an idempotent re-run.
    pub fn changes(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome != Outcome::Unchanged)
            .count()
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.entries.iter().filter(|e| e.outcome == outcome).count()
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}
