//! Scanner module - rule source discovery
//!
//! Walks a project root with:
//! - `walkdir` for sorted, pruned traversal
//! - `ignore` gitignore matching for the ignored-directory list
//! - `globset` for tier classification

mod ignores;
mod tiers;
mod types;
mod walker;

pub use ignores::IgnoredDirectories;
pub use tiers::TierMatcher;
pub use types::{RuleSource, ScanResult};
pub use walker::Scanner;
