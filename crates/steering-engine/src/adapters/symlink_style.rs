//! Shared planning for symlink-style vendors.
//!
//! Auto and Contextual rules are linked into the vendor's rules directory.
//! Local rules are never linked: the vendor only understands glob scoping,
//! so each one is wrapped into a synthesized file whose `globs` cover the
//! rule's directory.

use std::path::Path;

use steering_core::errors::PlanError;
use steering_core::{Tier, Vendor};

use super::{paths, Adapter};
use crate::plan::PlannedOperation;
use crate::registry::RuleRegistry;
use crate::rules::Rule;

/// Scope of a wrapped Local rule.
pub(crate) struct LocalScope {
    /// Explicit frontmatter globs when set, else the directory glob.
    pub globs: Vec<String>,
    /// Last directory component, `root` at the output root.
    pub dir_name: String,
    /// Kebab-case directory path, `root` at the output root.
    pub slug: String,
}

/// Per-vendor naming and wrapping.
pub(crate) trait SymlinkConvention: Adapter {
    /// File name of the link for an Auto/Contextual rule.
    fn link_name(&self, rule: &Rule) -> String;

    /// File name of the wrapped file for a Local rule.
    fn wrapped_name(&self, scope: &LocalScope) -> String;

    /// Content of the wrapped file.
    fn wrap(&self, rule: &Rule, scope: &LocalScope, path: &Path) -> Result<String, PlanError>;
}

pub(crate) fn plan<C: SymlinkConvention>(
    convention: &C,
    rules_dir: &Path,
    registry: &RuleRegistry,
    output_root: &Path,
) -> Result<Vec<PlannedOperation>, PlanError> {
    let vendor = convention.vendor();
    let rules_dir = paths::contained(vendor, output_root, rules_dir)?;
    let link_parent = output_root.join(&rules_dir);

    let mut ops = vec![PlannedOperation::ensure_directory(vendor, &rules_dir)];

    for rule in registry.central() {
        let link = paths::contained(vendor, output_root, &rules_dir.join(convention.link_name(rule)))?;
        let target = paths::relative_to(&rule.source_path, &link_parent);
        ops.push(PlannedOperation::create_symlink(
            vendor,
            &rule.relative_path,
            target,
            link,
        ));
    }

    for rule in registry.by_tier(Tier::Local) {
        let scope = local_scope(vendor, rule, output_root)?;
        let path = paths::contained(vendor, output_root, &rules_dir.join(convention.wrapped_name(&scope)))?;
        let content = convention.wrap(rule, &scope, &path)?;
        ops.push(PlannedOperation::write_file(
            vendor,
            Some(&rule.relative_path),
            path,
            content,
        ));
    }

    Ok(ops)
}

fn local_scope(vendor: Vendor, rule: &Rule, output_root: &Path) -> Result<LocalScope, PlanError> {
    let scope_dir = rule
        .scope_directory
        .as_deref()
        .or_else(|| rule.source_path.parent())
        .unwrap_or(output_root);
    let relative_dir = paths::relative_to(scope_dir, output_root);
    if paths::normalize(&relative_dir).is_none() {
        return Err(PlanError::PathEscape {
            vendor,
            path: rule.source_path.clone(),
            root: output_root.to_path_buf(),
        });
    }

    let globs = if rule.globs().is_empty() {
        vec![paths::scope_glob(&relative_dir)]
    } else {
        tracing::debug!(
            rule = %rule.relative_path.display(),
            "local rule sets explicit globs; using them instead of its directory scope"
        );
        rule.globs().to_vec()
    };

    Ok(LocalScope {
        globs,
        dir_name: paths::dir_name(&relative_dir),
        slug: paths::slug(&relative_dir),
    })
}
