//! Scanner types

use std::path::{Path, PathBuf};

use serde::Serialize;
use steering_core::errors::ScanError;
use steering_core::Tier;

/// A discovered rule file, classified but not yet read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSource {
    /// Absolute path.
    pub path: PathBuf,
    /// Path relative to the scan root. For an included rule outside the root,
    /// the configured entry.
    pub relative_path: PathBuf,
    pub tier: Tier,
}

/// Result of a scan. `files` is sorted by relative path.
#[derive(Debug)]
pub struct ScanResult {
    pub root: PathBuf,
    pub files: Vec<RuleSource>,
    /// Non-fatal problems: unreadable subdirectories and unusable
    /// `included_rules` entries.
    pub warnings: Vec<ScanError>,
}

impl ScanResult {
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|f| f.path.as_path())
    }

    pub fn by_tier(&self, tier: Tier) -> impl Iterator<Item = &RuleSource> {
        self.files.iter().filter(move |f| f.tier == tier)
    }
}
