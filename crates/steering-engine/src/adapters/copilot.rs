//! GitHub Copilot: Auto rule bodies merged into one instructions file, one
//! path-specific `*.instructions.md` per Contextual rule. Copilot reads
//! AGENTS.md natively, so Local rules produce nothing.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::Serialize;
use steering_core::errors::PlanError;
use steering_core::{Tier, Vendor};

use super::paths;
use super::render::with_frontmatter;
use super::Adapter;
use crate::plan::PlannedOperation;
use crate::registry::RuleRegistry;
use crate::rules::Rule;

pub struct CopilotAdapter {
    instructions_file: PathBuf,
}

impl CopilotAdapter {
    pub fn new(instructions_file: impl Into<PathBuf>) -> Self {
        Self {
            instructions_file: instructions_file.into(),
        }
    }
}

#[derive(Serialize)]
struct InstructionFrontmatter {
    #[serde(rename = "applyTo")]
    apply_to: String,
}

/// Copilot takes one comma-separated pattern string; no globs means all files.
fn apply_to(rule: &Rule) -> String {
    if rule.globs().is_empty() {
        "**".to_string()
    } else {
        rule.globs().join(",")
    }
}

fn merged_instructions<'a>(rules: impl Iterator<Item = &'a Rule>) -> String {
    let mut out = String::new();
    out.push_str("# GitHub Copilot Repository Instructions\n\n");
    out.push_str("This repository uses AI-assisted development with structured behavioral rules.\n");
    out.push_str(
        "These instructions apply repository-wide to all Copilot Chat conversations \
         and coding agent tasks.\n\n---\n\n",
    );
    for rule in rules {
        let _ = write!(out, "## {}\n\n{}\n\n---\n\n", rule.title(), rule.body.trim_end());
    }
    out.push_str("## Additional Context\n\n");
    out.push_str(
        "- **Path-specific instructions**: see the `instructions/` directory next to this file\n",
    );
    out.push_str(
        "- **Local context**: AGENTS.md files throughout the repository provide \
         directory-specific context\n",
    );
    out
}

impl Adapter for CopilotAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::Copilot
    }

    fn plan(
        &self,
        registry: &RuleRegistry,
        output_root: &Path,
    ) -> Result<Vec<PlannedOperation>, PlanError> {
        let vendor = Vendor::Copilot;
        let instructions_file = paths::contained(vendor, output_root, &self.instructions_file)?;
        let base_dir = instructions_file.parent().unwrap_or(Path::new("")).to_path_buf();
        let instructions_dir = base_dir.join("instructions");

        let mut ops = Vec::new();

        let has_auto = registry.by_tier(Tier::Auto).next().is_some();
        let has_contextual = registry.by_tier(Tier::Contextual).next().is_some();
        if (has_auto || has_contextual) && !base_dir.as_os_str().is_empty() {
            ops.push(PlannedOperation::ensure_directory(vendor, &base_dir));
        }

        if has_auto {
            let content = merged_instructions(registry.by_tier(Tier::Auto));
            ops.push(PlannedOperation::write_file(vendor, None, instructions_file, content));
        }

        if has_contextual {
            ops.push(PlannedOperation::ensure_directory(vendor, &instructions_dir));
        }
        for rule in registry.by_tier(Tier::Contextual) {
            let path = paths::contained(
                vendor,
                output_root,
                &instructions_dir.join(format!("{}.instructions.md", rule.name())),
            )?;
            let frontmatter = InstructionFrontmatter {
                apply_to: apply_to(rule),
            };
            let body = format!("# {}\n\n{}\n", rule.title(), rule.body.trim_end());
            let content = with_frontmatter(vendor, &path, &frontmatter, &body)?;
            ops.push(PlannedOperation::write_file(
                vendor,
                Some(&rule.relative_path),
                path,
                content,
            ));
        }

        Ok(ops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Frontmatter;

    fn contextual(globs: Option<Vec<&str>>) -> Rule {
        Rule {
            source_path: PathBuf::from("/r/rules/contextual-rules/db.mdc"),
            relative_path: PathBuf::from("rules/contextual-rules/db.mdc"),
            tier: Tier::Contextual,
            frontmatter: Frontmatter {
                description: Some("Database".into()),
                globs: globs.map(|g| g.into_iter().map(String::from).collect()),
                ..Default::default()
            },
            has_frontmatter: true,
            body: "# Database\nUse migrations.\n".into(),
            scope_directory: None,
        }
    }

    #[test]
    fn test_apply_to() {
        assert_eq!(apply_to(&contextual(None)), "**");
        assert_eq!(apply_to(&contextual(Some(vec!["db/**/*.sql"]))), "db/**/*.sql");
        assert_eq!(
            apply_to(&contextual(Some(vec!["db/**/*.sql", "migrations/**"]))),
            "db/**/*.sql,migrations/**"
        );
    }

    #[test]
    fn test_merged_instructions_use_titles() {
        let rule = contextual(None);
        let merged = merged_instructions(std::iter::once(&rule));
        assert!(merged.contains("## Database\n\n# Database\nUse migrations.\n"));
    }
}
