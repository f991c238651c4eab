//! Gemini CLI: same reference format as Claude, written to `GEMINI.md`.

use std::path::{Path, PathBuf};

use steering_core::errors::PlanError;
use steering_core::Vendor;

use super::reference::{self, Flavor};
use super::Adapter;
use crate::plan::PlannedOperation;
use crate::registry::RuleRegistry;

pub struct GeminiAdapter {
    root_file: PathBuf,
}

impl GeminiAdapter {
    pub fn new(root_file: impl Into<PathBuf>) -> Self {
        Self {
            root_file: root_file.into(),
        }
    }
}

impl Adapter for GeminiAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::Gemini
    }

    fn plan(
        &self,
        registry: &RuleRegistry,
        output_root: &Path,
    ) -> Result<Vec<PlannedOperation>, PlanError> {
        let flavor = Flavor {
            vendor: Vendor::Gemini,
            product: "Gemini CLI",
        };
        reference::plan(&flavor, &self.root_file, registry, output_root)
    }
}
