//! Normalized rule records.

use std::path::PathBuf;

use serde::Serialize;
use steering_core::Tier;

/// Recognized frontmatter fields. Unknown keys are kept in `extra` and never
/// emitted downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Frontmatter {
    pub description: Option<String>,
    /// `None` when the key is absent; `Some(vec![])` when present but empty.
    pub globs: Option<Vec<String>>,
    pub always_apply: bool,
    #[serde(skip)]
    pub extra: serde_yaml::Mapping,
}

/// A single behavioral-guidance unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    /// Absolute path of the originating file. Unique within a registry.
    pub source_path: PathBuf,
    /// `source_path` relative to the scan root.
    pub relative_path: PathBuf,
    pub tier: Tier,
    pub frontmatter: Frontmatter,
    /// Whether the file opened with a frontmatter block at all.
    pub has_frontmatter: bool,
    /// Raw body, never interpreted.
    pub body: String,
    /// Directory holding the source file; set for Local rules only.
    pub scope_directory: Option<PathBuf>,
}

impl Rule {
    /// File stem: `rules/auto-rules/quality.mdc` -> `quality`.
    pub fn name(&self) -> &str {
        self.source_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }

    /// File name: `src/components/AGENTS.md` -> `AGENTS.md`.
    pub fn file_name(&self) -> &str {
        self.source_path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }

    /// First `# ` heading of the body, else the rule name.
    pub fn title(&self) -> &str {
        self.body
            .lines()
            .find_map(|line| line.strip_prefix("# "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| self.name())
    }

    pub fn description(&self) -> Option<&str> {
        self.frontmatter.description.as_deref()
    }

    pub fn globs(&self) -> &[String] {
        self.frontmatter.globs.as_deref().unwrap_or_default()
    }

    pub fn always_apply(&self) -> bool {
        self.frontmatter.always_apply
    }
}
