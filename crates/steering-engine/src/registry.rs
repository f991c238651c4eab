//! Rule registry: the ordered, read-only rule set for one invocation.

use std::path::Path;

use globset::Glob;
use rustc_hash::FxHashMap;
use steering_core::errors::RegistryError;
use steering_core::Tier;

use crate::rules::Rule;

/// Rules ordered lexicographically by relative path. Built once per run and
/// never mutated; adapters only see `&RuleRegistry`.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

impl RuleRegistry {
    /// Fails with `DuplicateRule` if two rules share a source path.
    pub fn build(rules: impl IntoIterator<Item = Rule>) -> Result<Self, RegistryError> {
        let mut rules: Vec<Rule> = rules.into_iter().collect();
        rules.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        let mut seen: FxHashMap<&Path, Tier> = FxHashMap::default();
        for rule in &rules {
            if let Some(first) = seen.insert(&rule.source_path, rule.tier) {
                return Err(RegistryError::DuplicateRule {
                    path: rule.source_path.clone(),
                    first,
                    second: rule.tier,
                });
            }
        }

        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn query<'a>(&'a self, predicate: impl Fn(&Rule) -> bool + 'a) -> impl Iterator<Item = &'a Rule> {
        self.rules.iter().filter(move |rule| predicate(rule))
    }

    pub fn by_tier(&self, tier: Tier) -> impl Iterator<Item = &Rule> {
        self.query(move |rule| rule.tier == tier)
    }

    /// Auto then Contextual rules, each in path order.
    pub fn central(&self) -> impl Iterator<Item = &Rule> {
        self.by_tier(Tier::Auto).chain(self.by_tier(Tier::Contextual))
    }

    /// Rules whose source file sits directly in `directory` (absolute).
    pub fn in_directory<'a>(&'a self, directory: &'a Path) -> impl Iterator<Item = &'a Rule> {
        self.query(move |rule| rule.source_path.parent() == Some(directory))
    }

    /// Rules whose `globs` match `relative` (a path relative to the root).
    /// Globs that fail to compile never match.
    pub fn matching_scope<'a>(&'a self, relative: &'a Path) -> impl Iterator<Item = &'a Rule> {
        self.query(move |rule| {
            rule.globs().iter().any(|pattern| {
                Glob::new(pattern)
                    .map(|glob| glob.compile_matcher().is_match(relative))
                    .unwrap_or(false)
            })
        })
    }
}

impl<'a> IntoIterator for &'a RuleRegistry {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Frontmatter;
    use std::path::PathBuf;

    fn rule(relative: &str, tier: Tier, globs: &[&str]) -> Rule {
        let source_path = PathBuf::from("/p").join(relative);
        Rule {
            scope_directory: (tier == Tier::Local)
                .then(|| source_path.parent().map(Path::to_path_buf))
                .flatten(),
            source_path,
            relative_path: PathBuf::from(relative),
            tier,
            frontmatter: Frontmatter {
                description: Some("d".into()),
                globs: Some(globs.iter().map(|g| g.to_string()).collect()),
                ..Default::default()
            },
            has_frontmatter: true,
            body: String::new(),
        }
    }

    #[test]
    fn test_build_sorts_by_path() {
        let registry = RuleRegistry::build(vec![
            rule("rules/contextual-rules/b.mdc", Tier::Contextual, &[]),
            rule("AGENTS.md", Tier::Local, &[]),
            rule("rules/auto-rules/a.mdc", Tier::Auto, &[]),
        ])
        .unwrap();
        let order: Vec<_> = registry.iter().map(|r| r.relative_path.clone()).collect();
        assert_eq!(
            order,
            vec![
                PathBuf::from("AGENTS.md"),
                PathBuf::from("rules/auto-rules/a.mdc"),
                PathBuf::from("rules/contextual-rules/b.mdc"),
            ]
        );
    }

    #[test]
    fn test_duplicate_source_rejected() {
        let err = RuleRegistry::build(vec![
            rule("rules/auto-rules/a.mdc", Tier::Auto, &[]),
            rule("rules/auto-rules/a.mdc", Tier::Contextual, &[]),
        ])
        .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateRule { .. }));
    }

    #[test]
    fn test_queries() {
        let registry = RuleRegistry::build(vec![
            rule("rules/auto-rules/a.mdc", Tier::Auto, &["**/*.rs"]),
            rule("rules/contextual-rules/sql.mdc", Tier::Contextual, &["db/**/*.sql"]),
            rule("src/AGENTS.md", Tier::Local, &[]),
        ])
        .unwrap();

        assert_eq!(registry.by_tier(Tier::Local).count(), 1);
        assert_eq!(registry.central().count(), 2);
        assert_eq!(registry.in_directory(Path::new("/p/src")).count(), 1);

        let names: Vec<_> = registry
            .matching_scope(Path::new("db/migrations/1.sql"))
            .map(|r| r.name())
            .collect();
        assert_eq!(names, vec!["sql"]);
    }
}
