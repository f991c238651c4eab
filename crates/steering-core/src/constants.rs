//! Shared constants for the steering generator.

/// Project config file looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "steering.toml";

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "STEERING_LOG";

/// Default glob for always-applied rules, relative to the project root.
pub const DEFAULT_AUTO_RULES_GLOB: &str = "rules/auto-rules/**/*.mdc";

/// Default glob for contextual rules, relative to the project root.
pub const DEFAULT_CONTEXTUAL_RULES_GLOB: &str = "rules/contextual-rules/**/*.mdc";

/// Default pattern for directory-local rules. Matched against the file name
/// because it contains no `/`.
pub const DEFAULT_LOCAL_RULES_GLOB: &str = "AGENTS.{md,mdc}";

/// Directory names never descended into unless the config says otherwise.
pub const DEFAULT_IGNORED_DIRECTORIES: &[&str] = &[".git", "node_modules", ".venv", "target"];

/// Vendors generated when a run does not name any.
pub const DEFAULT_VENDORS: &[&str] = &["cursor", "claude", "continue", "copilot"];

/// Ownership manifest location, relative to the output root.
pub const DEFAULT_MANIFEST_PATH: &str = ".steering/manifest.json";

/// Only supported config schema version.
pub const CONFIG_VERSION: f64 = 1.0;
