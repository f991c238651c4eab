//! Rule tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a rule, decided purely by where the file lives.
///
/// `Auto` and `Contextual` come from the configured rule globs; `Local` is any
/// local-rule file found outside the rule-tier directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Auto,
    Contextual,
    Local,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Auto, Tier::Contextual, Tier::Local];

    pub fn name(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Contextual => "contextual",
            Self::Local => "local",
        }
    }

    /// Auto and Contextual rules live in the central rule directories and
    /// must carry a `description`.
    pub fn is_central(self) -> bool {
        matches!(self, Self::Auto | Self::Contextual)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
