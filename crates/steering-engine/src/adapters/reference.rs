//! Shared planning for reference-file vendors.
//!
//! One root file lists `@path` references to every Auto and Contextual rule.
//! Each Local rule gets a file of the same name next to it that references
//! it back, so the vendor picks it up when entering that directory.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use steering_core::errors::PlanError;
use steering_core::{Tier, Vendor};

use super::paths;
use crate::plan::PlannedOperation;
use crate::registry::RuleRegistry;
use crate::rules::Rule;

/// Vendor-specific wording for the generated files.
pub(crate) struct Flavor {
    pub vendor: Vendor,
    /// Product name used in prose, e.g. "Claude Code".
    pub product: &'static str,
}

pub(crate) fn plan(
    flavor: &Flavor,
    root_file: &Path,
    registry: &RuleRegistry,
    output_root: &Path,
) -> Result<Vec<PlannedOperation>, PlanError> {
    let vendor = flavor.vendor;
    let root_file = paths::contained(vendor, output_root, root_file)?;
    let file_name = root_file
        .file_name()
        .map(PathBuf::from)
        .ok_or_else(|| PlanError::PathEscape {
            vendor,
            path: root_file.clone(),
            root: output_root.to_path_buf(),
        })?;

    let mut ops = Vec::new();
    if let Some(parent) = root_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        ops.push(PlannedOperation::ensure_directory(vendor, parent));
    }

    // Local rules whose adjacent file would be the root file itself are
    // listed in the root file instead.
    let mut root_locals = Vec::new();
    let mut adjacent = Vec::new();
    for rule in registry.by_tier(Tier::Local) {
        let dir = rule.scope_directory.as_deref().unwrap_or(output_root);
        let relative_dir = paths::relative_to(dir, output_root);
        let path = paths::contained(vendor, output_root, &relative_dir.join(&file_name))?;
        if path == root_file {
            root_locals.push(rule);
        } else {
            adjacent.push((rule, path));
        }
    }

    let content = render_root(flavor, registry, &root_locals, adjacent.len(), output_root, &file_name);
    ops.push(PlannedOperation::write_file(vendor, None, root_file, content));

    for (rule, path) in adjacent {
        let content = format!("@{}\n", rule.file_name());
        ops.push(PlannedOperation::write_file(
            vendor,
            Some(&rule.relative_path),
            path,
            content,
        ));
    }

    Ok(ops)
}

fn reference(rule: &Rule, output_root: &Path) -> String {
    paths::to_slash(&paths::relative_to(&rule.source_path, output_root))
}

fn render_root(
    flavor: &Flavor,
    registry: &RuleRegistry,
    root_locals: &[&Rule],
    local_count: usize,
    output_root: &Path,
    file_name: &Path,
) -> String {
    let file_name = file_name.display();
    let mut out = String::new();

    out.push_str("# AI Agent Context\n\n");
    out.push_str("This repository uses AI-assisted development with structured behavioral rules.\n\n");

    out.push_str("## Auto-Rules\n\n");
    out.push_str("The following rules are automatically applied across all contexts:\n\n");
    let auto: Vec<&Rule> = root_locals
        .iter()
        .copied()
        .chain(registry.by_tier(Tier::Auto))
        .collect();
    if auto.is_empty() {
        out.push_str("No auto-rules configured.\n");
    }
    for rule in auto {
        let _ = writeln!(out, "- @{}", reference(rule, output_root));
    }
    out.push('\n');

    out.push_str("## Contextual Rules\n\n");
    out.push_str(
        "The following rules apply to specific contexts. \
         Load them when working in the relevant domain:\n\n",
    );
    let mut any_contextual = false;
    for rule in registry.by_tier(Tier::Contextual) {
        any_contextual = true;
        let _ = writeln!(
            out,
            "- @{} - {}",
            reference(rule, output_root),
            rule.description().unwrap_or_default()
        );
    }
    if !any_contextual {
        out.push_str("No contextual rules configured.\n");
    }
    out.push('\n');

    out.push_str("## Local Context\n\n");
    if local_count == 0 {
        out.push_str("No directory-scoped rules discovered.\n");
    } else {
        let _ = writeln!(
            out,
            "This repository has {local_count} directory-scoped rule file(s) co-located with code."
        );
        let _ = writeln!(
            out,
            "{} loads the adjacent {file_name} automatically when entering those directories.",
            flavor.product
        );
    }
    out.push('\n');

    out.push_str("## Usage\n\n");
    out.push_str("- **Auto-rules** above are always active\n");
    out.push_str(
        "- **Contextual rules** can be loaded on demand when their description matches the task\n",
    );
    let _ = writeln!(
        out,
        "- **Local rules** in subdirectories are loaded via their adjacent {file_name}"
    );

    out
}
