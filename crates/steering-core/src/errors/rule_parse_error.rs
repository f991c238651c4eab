//! Rule parse errors.

use std::path::{Path, PathBuf};

use super::error_code::{self, SteeringErrorCode};

/// Errors raised while turning a rule file into a normalized `Rule`.
///
/// Always scoped to one file: the validator collects them, generation omits
/// the offending rule and keeps going.
#[derive(Debug, thiserror::Error)]
pub enum RuleParseError {
    #[error("Cannot read rule {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Rule {path} is not valid UTF-8")]
    NotUtf8 { path: PathBuf },

    #[error("Rule {path} opens a frontmatter block that is never closed")]
    UnterminatedFrontmatter { path: PathBuf },

    #[error("Invalid frontmatter in {path}: {message}")]
    InvalidFrontmatter { path: PathBuf, message: String },

    #[error("Invalid '{field}' in {path}: {message}")]
    InvalidField {
        path: PathBuf,
        field: String,
        message: String,
    },

    #[error("Rule {path} is missing the required 'description' frontmatter field")]
    MissingDescription { path: PathBuf },
}

impl RuleParseError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Unreadable { path, .. }
            | Self::NotUtf8 { path }
            | Self::UnterminatedFrontmatter { path }
            | Self::InvalidFrontmatter { path, .. }
            | Self::InvalidField { path, .. }
            | Self::MissingDescription { path } => path,
        }
    }

    /// Stable snake_case kind, used in validation reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unreadable { .. } => "unreadable",
            Self::NotUtf8 { .. } => "not_utf8",
            Self::UnterminatedFrontmatter { .. } => "unterminated_frontmatter",
            Self::InvalidFrontmatter { .. } => "invalid_frontmatter",
            Self::InvalidField { .. } => "invalid_field",
            Self::MissingDescription { .. } => "missing_description",
        }
    }
}

impl SteeringErrorCode for RuleParseError {
    fn error_code(&self) -> &'static str {
        error_code::RULE_PARSE_ERROR
    }
}
