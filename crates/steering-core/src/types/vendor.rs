//! Vendor identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// An AI coding assistant that steering can generate configuration for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Cursor,
    Claude,
    Continue,
    Copilot,
    Gemini,
}

impl Vendor {
    pub const ALL: [Vendor; 5] = [
        Vendor::Cursor,
        Vendor::Claude,
        Vendor::Continue,
        Vendor::Copilot,
        Vendor::Gemini,
    ];

    /// Stable identifier used in config files, the manifest and the CLI.
    pub fn id(self) -> &'static str {
        match self {
            Self::Cursor => "cursor",
            Self::Claude => "claude",
            Self::Continue => "continue",
            Self::Copilot => "copilot",
            Self::Gemini => "gemini",
        }
    }

    /// Whether Local rules are wrapped into glob-scoped files, so explicit
    /// frontmatter globs replace the directory scope.
    pub fn wraps_local_rules(self) -> bool {
        matches!(self, Self::Cursor | Self::Continue)
    }

    /// Output artifact used when `vendor_files` has no entry for this vendor.
    /// A directory for symlink-style vendors, a file otherwise.
    pub fn default_artifact(self) -> &'static str {
        match self {
            Self::Cursor => ".cursor/rules",
            Self::Claude => "CLAUDE.md",
            Self::Continue => ".continue/rules",
            Self::Copilot => ".github/copilot-instructions.md",
            Self::Gemini => "GEMINI.md",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Vendor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Vendor::ALL
            .into_iter()
            .find(|v| v.id() == wanted)
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "vendor".to_string(),
                message: format!(
                    "unknown vendor '{s}', expected one of: {}",
                    Vendor::ALL.map(Vendor::id).join(", ")
                ),
            })
    }
}
