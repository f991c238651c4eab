//! Positional tier classification.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobBuilder, GlobMatcher};
use steering_core::errors::ConfigError;
use steering_core::{SteeringConfig, Tier};

/// Decides a file's tier from its root-relative path alone.
///
/// Precedence is auto, then contextual, then local. A local pattern without
/// a `/` is matched against the file name, so it applies at any depth. Local
/// matches inside the auto/contextual rule directories are not rules.
pub struct TierMatcher {
    auto: GlobMatcher,
    contextual: GlobMatcher,
    local: GlobMatcher,
    local_by_name: bool,
    rule_dirs: Vec<PathBuf>,
    auto_dir: Option<OsString>,
    contextual_dir: Option<OsString>,
}

impl TierMatcher {
    pub fn new(config: &SteeringConfig) -> Result<Self, ConfigError> {
        let auto_glob = config.effective_auto_rules_glob();
        let contextual_glob = config.effective_contextual_rules_glob();
        let local_glob = config.effective_local_rules_glob();

        let auto_prefix = literal_prefix(auto_glob);
        let contextual_prefix = literal_prefix(contextual_glob);
        let auto_dir = auto_prefix.file_name().map(OsString::from);
        let contextual_dir = contextual_prefix.file_name().map(OsString::from);
        let rule_dirs = [auto_prefix, contextual_prefix]
            .into_iter()
            .filter(|p| !p.as_os_str().is_empty())
            .collect();

        Ok(Self {
            auto: compile("auto_rules_glob", auto_glob)?,
            contextual: compile("contextual_rules_glob", contextual_glob)?,
            local: compile("local_rules_glob", local_glob)?,
            local_by_name: !local_glob.contains('/'),
            rule_dirs,
            auto_dir,
            contextual_dir,
        })
    }

    pub fn classify(&self, relative: &Path) -> Option<Tier> {
        if self.auto.is_match(relative) {
            return Some(Tier::Auto);
        }
        if self.contextual.is_match(relative) {
            return Some(Tier::Contextual);
        }
        let local = if self.local_by_name {
            relative
                .file_name()
                .is_some_and(|name| self.local.is_match(Path::new(name)))
        } else {
            self.local.is_match(relative)
        };
        if local && !self.in_rule_dir(relative) {
            return Some(Tier::Local);
        }
        None
    }

    /// Tier of a file named in `included_rules`: the innermost path
    /// component equal to the auto or contextual rules directory name
    /// decides. Included files are never Local.
    pub fn classify_included(&self, path: &Path) -> Option<Tier> {
        let parent = path.parent()?;
        parent.components().rev().find_map(|c| {
            let name = c.as_os_str();
            if self.auto_dir.as_deref() == Some(name) {
                Some(Tier::Auto)
            } else if self.contextual_dir.as_deref() == Some(name) {
                Some(Tier::Contextual)
            } else {
                None
            }
        })
    }

    fn in_rule_dir(&self, relative: &Path) -> bool {
        self.rule_dirs.iter().any(|dir| relative.starts_with(dir))
    }
}

fn compile(field: &str, pattern: &str) -> Result<GlobMatcher, ConfigError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob: Glob| glob.compile_matcher())
        .map_err(|e| ConfigError::ValidationFailed {
            field: field.to_string(),
            message: e.to_string(),
        })
}

/// Leading path components free of glob metacharacters:
/// `rules/auto-rules/**/*.mdc` -> `rules/auto-rules`.
fn literal_prefix(pattern: &str) -> PathBuf {
    let mut prefix = PathBuf::new();
    let mut parts = pattern.split('/').peekable();
    while let Some(part) = parts.next() {
        // The last component names files, not a directory.
        if parts.peek().is_none() || part.contains(|c: char| matches!(c, '*' | '?' | '[' | '{')) {
            break;
        }
        prefix.push(part);
    }
    prefix
}
