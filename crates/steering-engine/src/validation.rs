//! Validation issues and the metadata lints run over parsed rules.
//! `pipeline::validate` collects them for a whole tree in one pass.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use steering_core::errors::RuleParseError;
use steering_core::Tier;

use crate::rules::Rule;
use crate::scanner::RuleSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// One problem with one rule file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Relative to the scan root.
    pub path: PathBuf,
    /// Stable snake_case identifier.
    pub kind: &'static str,
    pub severity: Severity,
    pub message: String,
}

impl ValidationIssue {
    pub fn from_parse_error(source: &RuleSource, err: &RuleParseError) -> Self {
        Self {
            path: source.relative_path.clone(),
            kind: err.kind(),
            severity: Severity::Error,
            message: err.to_string(),
        }
    }

    fn lint(rule: &Rule, kind: &'static str, severity: Severity, message: String) -> Self {
        Self {
            path: rule.relative_path.clone(),
            kind,
            severity,
            message,
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct ValidationOutcome {
    /// Sorted by path, then kind.
    pub issues: Vec<ValidationIssue>,
    pub rules_checked: usize,
    /// Non-fatal scan problems.
    pub warnings: Vec<String>,
}

impl ValidationOutcome {
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn errors(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }
}

/// Metadata checks on parsed rules.
pub fn lint<'a>(rules: impl IntoIterator<Item = &'a Rule>) -> Vec<ValidationIssue> {
    let central: Vec<&Rule> = rules.into_iter().filter(|r| r.tier.is_central()).collect();
    let mut issues = Vec::new();

    for &rule in &central {
        match (rule.tier, rule.always_apply()) {
            (Tier::Auto, false) => issues.push(ValidationIssue::lint(
                rule,
                "always_apply_mismatch",
                Severity::Warning,
                format!("auto rule '{}' should set alwaysApply: true", rule.name()),
            )),
            (Tier::Contextual, true) => issues.push(ValidationIssue::lint(
                rule,
                "always_apply_mismatch",
                Severity::Warning,
                format!("contextual rule '{}' should set alwaysApply: false", rule.name()),
            )),
            _ => {}
        }

        if rule.frontmatter.globs.is_none() {
            issues.push(ValidationIssue::lint(
                rule,
                "missing_globs",
                Severity::Warning,
                format!(
                    "rule '{}' has no 'globs' field (required by glob-matching vendors)",
                    rule.name()
                ),
            ));
        }
    }

    let mut by_name: BTreeMap<&str, Vec<&Rule>> = BTreeMap::new();
    for &rule in &central {
        by_name.entry(rule.name()).or_default().push(rule);
    }
    for (name, group) in by_name.into_iter().filter(|(_, g)| g.len() > 1) {
        for rule in &group {
            let others: Vec<String> = group
                .iter()
                .filter(|other| other.source_path != rule.source_path)
                .map(|other| other.relative_path.display().to_string())
                .collect();
            issues.push(ValidationIssue::lint(
                rule,
                "duplicate_rule_name",
                Severity::Error,
                format!("rule name '{name}' is also used by {}", others.join(", ")),
            ));
        }
    }

    issues
}

pub(crate) fn sort_issues(issues: &mut [ValidationIssue]) {
    issues.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.kind.cmp(b.kind)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Frontmatter;

    fn rule(relative: &str, tier: Tier, always_apply: bool, globs: Option<Vec<String>>) -> Rule {
        Rule {
            source_path: PathBuf::from("/r").join(relative),
            relative_path: PathBuf::from(relative),
            tier,
            frontmatter: Frontmatter {
                description: Some("d".into()),
                globs,
                always_apply,
                ..Default::default()
            },
            has_frontmatter: true,
            body: String::new(),
            scope_directory: None,
        }
    }

    #[test]
    fn test_compliant_rules_have_no_issues() {
        let rules = vec![
            rule("rules/auto-rules/a.mdc", Tier::Auto, true, Some(vec![])),
            rule("rules/contextual-rules/b.mdc", Tier::Contextual, false, Some(vec![])),
        ];
        assert!(lint(&rules).is_empty());
    }

    #[test]
    fn test_always_apply_and_globs_lints() {
        let rules = vec![
            rule("rules/auto-rules/a.mdc", Tier::Auto, false, None),
            rule("rules/contextual-rules/b.mdc", Tier::Contextual, true, Some(vec![])),
        ];
        let mut issues = lint(&rules);
        sort_issues(&mut issues);
        let kinds: Vec<_> = issues.iter().map(|i| (i.path.to_str().unwrap(), i.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("rules/auto-rules/a.mdc", "always_apply_mismatch"),
                ("rules/auto-rules/a.mdc", "missing_globs"),
                ("rules/contextual-rules/b.mdc", "always_apply_mismatch"),
            ]
        );
        assert!(issues.iter().all(|i| i.severity == Severity::Warning));
    }

    #[test]
    fn test_duplicate_names_are_errors() {
        let rules = vec![
            rule("rules/auto-rules/quality.mdc", Tier::Auto, true, Some(vec![])),
            rule("rules/contextual-rules/quality.mdc", Tier::Contextual, false, Some(vec![])),
            rule("src/AGENTS.md", Tier::Local, false, None),
        ];
        let issues = lint(&rules);
        assert_eq!(issues.len(), 2);
        assert!(issues
            .iter()
            .all(|i| i.kind == "duplicate_rule_name" && i.severity == Severity::Error));
    }
}
