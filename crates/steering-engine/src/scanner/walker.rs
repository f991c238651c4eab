//! Sorted, pruned rule-source walker.

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use steering_core::errors::{ConfigError, ScanError};
use steering_core::SteeringConfig;
use walkdir::WalkDir;

use super::ignores::IgnoredDirectories;
use super::tiers::TierMatcher;
use super::types::{RuleSource, ScanResult};

/// Rule source scanner.
///
/// Ignored directories are pruned before descent, never post-filtered.
/// Symlinks are not followed and are never yielded, so generated links
/// pointing back at rule files are not rediscovered. `included_rules`
/// entries are resolved after the walk and may live outside the root.
pub struct Scanner {
    root: PathBuf,
    ignores: IgnoredDirectories,
    tiers: TierMatcher,
    included: Vec<String>,
}

impl Scanner {
    /// Fails with `ConfigError::InvalidRoot` unless `root` is an existing
    /// directory.
    pub fn new(root: &Path, config: &SteeringConfig) -> Result<Self, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidRoot {
            path: root.display().to_string(),
            message,
        };
        let metadata = fs::metadata(root).map_err(|e| invalid(e.to_string()))?;
        if !metadata.is_dir() {
            return Err(invalid("not a directory".to_string()));
        }
        let root = root.canonicalize().map_err(|e| invalid(e.to_string()))?;

        let ignores = IgnoredDirectories::new(&root, &config.effective_ignored_directories())?;
        let tiers = TierMatcher::new(config)?;

        Ok(Self {
            root,
            ignores,
            tiers,
            included: config.effective_included_rules().to_vec(),
        })
    }

    /// Canonical scan root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the root and return every rule source, sorted by relative path.
    ///
    /// Running it again on an unchanged tree yields the same result.
    pub fn scan(&self) -> Result<ScanResult, ScanError> {
        let start = Instant::now();

        fs::read_dir(&self.root).map_err(|source| ScanError::RootUnreadable {
            path: self.root.clone(),
            source,
        })?;

        let dirs_skipped = Cell::new(0usize);
        let mut files = Vec::new();
        let mut warnings = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                let relative = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
                if self.ignores.is_ignored(relative) {
                    tracing::debug!(dir = %relative.display(), "skipping ignored directory");
                    dirs_skipped.set(dirs_skipped.get() + 1);
                    return false;
                }
                true
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().unwrap_or(&self.root).to_path_buf();
                    let warning = match err.io_error().map(|e| e.kind()) {
                        Some(std::io::ErrorKind::PermissionDenied) => {
                            ScanError::PermissionDenied { path }
                        }
                        _ => ScanError::IoError {
                            path,
                            message: err.to_string(),
                        },
                    };
                    tracing::warn!("{warning}");
                    warnings.push(warning);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            let relative = match entry.path().strip_prefix(&self.root) {
                Ok(relative) => relative,
                Err(_) => continue,
            };
            if let Some(tier) = self.tiers.classify(relative) {
                files.push(RuleSource {
                    path: entry.path().to_path_buf(),
                    relative_path: relative.to_path_buf(),
                    tier,
                });
            }
        }

        self.add_included(&mut files, &mut warnings);
        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        tracing::debug!(
            root = %self.root.display(),
            files = files.len(),
            warnings = warnings.len(),
            dirs_skipped = dirs_skipped.get(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "scan complete"
        );

        Ok(ScanResult {
            root: self.root.clone(),
            files,
            warnings,
        })
    }

    fn add_included(&self, files: &mut Vec<RuleSource>, warnings: &mut Vec<ScanError>) {
        for entry in &self.included {
            let candidate = self.root.join(entry);
            let path = match candidate.canonicalize() {
                Ok(path) if path.is_file() => path,
                _ => {
                    let warning = ScanError::IncludedRuleNotFound { path: candidate };
                    tracing::warn!("{warning}");
                    warnings.push(warning);
                    continue;
                }
            };
            if files.iter().any(|f| f.path == path) {
                continue;
            }
            let Some(tier) = self.tiers.classify_included(&path) else {
                let warning = ScanError::IncludedRuleUnclassified { path };
                tracing::warn!("{warning}");
                warnings.push(warning);
                continue;
            };
            let relative_path = match path.strip_prefix(&self.root) {
                Ok(relative) => relative.to_path_buf(),
                Err(_) => PathBuf::from(entry),
            };
            tracing::debug!(path = %relative_path.display(), %tier, "included rule");
            files.push(RuleSource {
                path,
                relative_path,
                tier,
            });
        }
    }
}
