//! Continue: symlinks into `.continue/rules` with a `.md` extension, wrapped
//! `agents-<dir>.md` files for Local rules.

use std::path::{Path, PathBuf};

use serde::Serialize;
use steering_core::errors::PlanError;
use steering_core::Vendor;

use super::render::{with_frontmatter, GlobsField};
use super::symlink_style::{self, LocalScope, SymlinkConvention};
use super::Adapter;
use crate::plan::PlannedOperation;
use crate::registry::RuleRegistry;
use crate::rules::Rule;

pub struct ContinueAdapter {
    rules_dir: PathBuf,
}

impl ContinueAdapter {
    pub fn new(rules_dir: impl Into<PathBuf>) -> Self {
        Self {
            rules_dir: rules_dir.into(),
        }
    }
}

#[derive(Serialize)]
struct ContinueFrontmatter<'a> {
    name: String,
    description: &'a str,
    globs: GlobsField,
    #[serde(rename = "alwaysApply")]
    always_apply: bool,
}

impl SymlinkConvention for ContinueAdapter {
    // Continue only loads `.md` rule files.
    fn link_name(&self, rule: &Rule) -> String {
        format!("{}.md", rule.name())
    }

    fn wrapped_name(&self, scope: &LocalScope) -> String {
        format!("agents-{}.md", scope.slug)
    }

    fn wrap(&self, rule: &Rule, scope: &LocalScope, path: &Path) -> Result<String, PlanError> {
        let name = format!("Local context for {}", scope.dir_name);
        let frontmatter = ContinueFrontmatter {
            description: rule.description().unwrap_or(&name),
            name: name.clone(),
            globs: GlobsField::new(scope.globs.clone()),
            always_apply: false,
        };
        with_frontmatter(Vendor::Continue, path, &frontmatter, &rule.body)
    }
}

impl Adapter for ContinueAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::Continue
    }

    fn plan(
        &self,
        registry: &RuleRegistry,
        output_root: &Path,
    ) -> Result<Vec<PlannedOperation>, PlanError> {
        symlink_style::plan(self, &self.rules_dir, registry, output_root)
    }
}
