//! Rule parser/normalizer.

use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};
use steering_core::errors::RuleParseError;
use steering_core::Tier;

use super::frontmatter::{self, Split};
use super::types::{Frontmatter, Rule};
use crate::scanner::RuleSource;

const DESCRIPTION: &str = "description";
const GLOBS: &str = "globs";
const ALWAYS_APPLY: &str = "alwaysApply";

/// Read and normalize one rule file.
pub fn parse_rule(source: &RuleSource) -> Result<Rule, RuleParseError> {
    let bytes = fs::read(&source.path).map_err(|e| RuleParseError::Unreadable {
        path: source.path.clone(),
        source: e,
    })?;
    let content = String::from_utf8(bytes).map_err(|_| RuleParseError::NotUtf8 {
        path: source.path.clone(),
    })?;
    parse_content(source, &content)
}

/// Normalize already-read content.
///
/// Auto and Contextual rules must carry a non-empty `description`; Local
/// rules may be body-only.
pub fn parse_content(source: &RuleSource, content: &str) -> Result<Rule, RuleParseError> {
    let path = &source.path;

    let (frontmatter, has_frontmatter, body) = match frontmatter::split(content) {
        Split::Absent { body } => (Frontmatter::default(), false, body),
        Split::Present { yaml, body } => (parse_frontmatter(path, yaml)?, true, body),
        Split::Unterminated => {
            return Err(RuleParseError::UnterminatedFrontmatter { path: path.clone() })
        }
    };

    if source.tier.is_central() && frontmatter.description.is_none() {
        return Err(RuleParseError::MissingDescription { path: path.clone() });
    }

    let scope_directory = match source.tier {
        Tier::Local => path.parent().map(Path::to_path_buf),
        _ => None,
    };

    Ok(Rule {
        source_path: path.clone(),
        relative_path: source.relative_path.clone(),
        tier: source.tier,
        frontmatter,
        has_frontmatter,
        body: body.to_string(),
        scope_directory,
    })
}

fn parse_frontmatter(path: &Path, yaml: &str) -> Result<Frontmatter, RuleParseError> {
    let value: Value = serde_yaml::from_str(yaml).map_err(|e| RuleParseError::InvalidFrontmatter {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut mapping = match value {
        Value::Mapping(mapping) => mapping,
        Value::Null => Mapping::new(),
        other => {
            return Err(RuleParseError::InvalidFrontmatter {
                path: path.to_path_buf(),
                message: format!("expected a key-value mapping, found {}", kind_of(&other)),
            })
        }
    };

    let description = match mapping.remove(DESCRIPTION) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Some(other) => return Err(field_error(path, DESCRIPTION, "a string", &other)),
    };

    let globs = match mapping.remove(GLOBS) {
        None => None,
        Some(Value::Null) => Some(Vec::new()),
        Some(Value::String(s)) if s.trim().is_empty() => Some(Vec::new()),
        Some(Value::String(s)) => Some(vec![s]),
        Some(Value::Sequence(items)) => Some(
            items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(field_error(path, GLOBS, "a list of strings", &other)),
                })
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Some(other) => return Err(field_error(path, GLOBS, "a string or a list of strings", &other)),
    };

    let always_apply = match mapping.remove(ALWAYS_APPLY) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => b,
        Some(other) => return Err(field_error(path, ALWAYS_APPLY, "a boolean", &other)),
    };

    Ok(Frontmatter {
        description,
        globs,
        always_apply,
        extra: mapping,
    })
}

fn field_error(path: &Path, field: &str, expected: &str, found: &Value) -> RuleParseError {
    RuleParseError::InvalidField {
        path: path.to_path_buf(),
        field: field.to_string(),
        message: format!("expected {expected}, found {}", kind_of(found)),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
