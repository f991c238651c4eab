//! Cursor: symlinks into `.cursor/rules`, wrapped `local-<dir>.mdc` files.

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

pub struct CursorAdapter {
    rules_dir: PathBuf,
}

impl CursorAdapter {
    pub fn new(rules_dir: impl Into<PathBuf>) -> Self {
        Self {
            rules_dir: rules_dir.into(),
        }
    }
}

#[derive(Serialize)]
struct CursorFrontmatter<'a> {
    description: &'a str,
    globs: GlobsField,
    #[serde(rename = "alwaysApply")]
    always_apply: bool,
}

impl SymlinkConvention for CursorAdapter {
    fn link_name(&self, rule: &Rule) -> String {
        rule.file_name().to_string()
    }

    fn wrapped_name(&self, scope: &LocalScope) -> String {
        format!("local-{}.mdc", scope.slug)
    }

    fn wrap(&self, rule: &Rule, scope: &LocalScope, path: &Path) -> Result<String, PlanError> {
        let fallback = format!("Local context for {}", scope.dir_name);
        let frontmatter = CursorFrontmatter {
            description: rule.description().unwrap_or(&fallback),
            globs: GlobsField::new(scope.globs.clone()),
            always_apply: false,
        };
        with_frontmatter(Vendor::Cursor, path, &frontmatter, &rule.body)
    }
}

impl Adapter for CursorAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::Cursor
    }

    fn plan(
        &self,
        registry: &RuleRegistry,
        output_root: &Path,
    ) -> Result<Vec<PlannedOperation>, PlanError> {
        symlink_style::plan(self, &self.rules_dir, registry, output_root)
    }
}
