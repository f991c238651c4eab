//! Claude Code: `@` references in `CLAUDE.md`, adjacent `CLAUDE.md` files
//! next to Local rules.

use std::path::{Path, PathBuf};

use steering_core::errors::PlanError;
use steering_core::Vendor;

use super::reference::{self, Flavor};
use super::Adapter;
use crate::plan::PlannedOperation;
use crate::registry::RuleRegistry;

pub struct ClaudeAdapter {
    root_file: PathBuf,
}

impl ClaudeAdapter {
    pub fn new(root_file: impl Into<PathBuf>) -> Self {
        Self {
            root_file: root_file.into(),
        }
    }
}

impl Adapter for ClaudeAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::Claude
    }

    fn plan(
        &self,
        registry: &RuleRegistry,
        output_root: &Path,
    ) -> Result<Vec<PlannedOperation>, PlanError> {
        let flavor = Flavor {
            vendor: Vendor::Claude,
            product: "Claude Code",
        };
        reference::plan(&flavor, &self.root_file, registry, output_root)
    }
}
