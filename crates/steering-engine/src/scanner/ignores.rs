//! Ignored-directory matching.

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use steering_core::errors::ConfigError;

/// Directory names pruned during the walk.
///
/// Plain names (`node_modules`) match at any depth; entries containing a `/`
/// are anchored to the root. `*` is the only wildcard: every other character,
/// including `#`, `!`, `?` and brackets, matches itself. Matching is
/// case-sensitive.
pub struct IgnoredDirectories {
    gitignore: Gitignore,
}

impl IgnoredDirectories {
    pub fn new(root: &Path, names: &[String]) -> Result<Self, ConfigError> {
        let mut builder = GitignoreBuilder::new(root);
        for name in names {
            let pattern = format!("{}/", escape(name.trim_end_matches('/')));
            builder
                .add_line(None, &pattern)
                .map_err(|e| invalid(name, e))?;
        }
        let gitignore = builder.build().map_err(|e| invalid("<all>", e))?;
        Ok(Self { gitignore })
    }

    /// `relative` is a directory path relative to the scan root.
    pub fn is_ignored(&self, relative: &Path) -> bool {
        self.gitignore.matched(relative, true).is_ignore()
    }
}

/// Quotes gitignore syntax so an entry is read as a literal name, keeping `*`.
fn escape(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    for (i, c) in name.chars().enumerate() {
        match c {
            '#' | '!' if i == 0 => out.push('\\'),
            '\\' | '[' | ']' | '?' => out.push('\\'),
            _ => {}
        }
        out.push(c);
    }
    out
}

fn invalid(name: &str, err: ignore::Error) -> ConfigError {
    ConfigError::ValidationFailed {
        field: "ignored_directories".to_string(),
        message: format!("'{name}': {err}"),
    }
}
