//! Tests for the steering configuration system.

use std::sync::Mutex;

use steering_core::config::{CliOverrides, SteeringConfig};
use steering_core::errors::ConfigError;
use steering_core::Vendor;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all STEERING_ env vars to prevent cross-test contamination.
fn clear_steering_env_vars() {
    for key in [
        "STEERING_FORCE",
        "STEERING_PRUNE_STALE",
        "STEERING_DEFAULT_VENDORS",
        "STEERING_IGNORED_DIRECTORIES",
    ] {
        std::env::remove_var(key);
    }
}

/// CLI beats env, env beats the project file, the project file beats defaults.
#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_steering_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("steering.toml"),
        r#"
version = 1.0
default_vendors = ["claude"]
force = false
prune_stale = false
"#,
    )
    .unwrap();

    std::env::set_var("STEERING_DEFAULT_VENDORS", "cursor, gemini");
    std::env::set_var("STEERING_FORCE", "false");

    let cli = CliOverrides {
        force: Some(true),
        ..Default::default()
    };
    let config = SteeringConfig::load(dir.path(), Some(&cli)).unwrap();

    assert!(config.effective_force());
    assert_eq!(
        config.effective_default_vendors(),
        vec![Vendor::Cursor, Vendor::Gemini]
    );
    assert!(!config.effective_prune_stale());

    clear_steering_env_vars();
}

/// No project file: compiled defaults.
#[test]
fn test_load_missing_file_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_steering_env_vars();

    let dir = tempdir();
    let config = SteeringConfig::load(dir.path(), None).unwrap();

    assert_eq!(config, SteeringConfig::default());
    assert_eq!(
        config.effective_contextual_rules_glob(),
        "rules/contextual-rules/**/*.mdc"
    );
    assert_eq!(
        config.effective_ignored_directories(),
        vec![".git", "node_modules", ".venv", "target"]
    );
    assert_eq!(config.effective_manifest_path(), ".steering/manifest.json");
}

/// An explicit config path that does not exist is an error, not a fallback.
#[test]
fn test_explicit_missing_config_is_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_steering_env_vars();

    let dir = tempdir();
    let cli = CliOverrides {
        config_path: Some(dir.path().join("nope.toml")),
        ..Default::default()
    };
    let err = SteeringConfig::load(dir.path(), Some(&cli)).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

/// YAML config files are accepted, including the `agents_glob` alias and
/// unknown vendor sections.
#[test]
fn test_yaml_config_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_steering_env_vars();

    let dir = tempdir();
    let path = dir.path().join("steering.yaml");
    std::fs::write(
        &path,
        r#"
version: 1.0
agents_glob: "AGENTS.md"
vendor_files:
  claude: docs/CLAUDE.md
cursor: {}
"#,
    )
    .unwrap();

    let cli = CliOverrides {
        config_path: Some(path),
        ..Default::default()
    };
    let config = SteeringConfig::load(dir.path(), Some(&cli)).unwrap();
    assert_eq!(config.effective_local_rules_glob(), "AGENTS.md");
    assert_eq!(config.vendor_artifact(Vendor::Claude), "docs/CLAUDE.md");
    assert_eq!(config.vendor_artifact(Vendor::Gemini), "GEMINI.md");
}

/// Invalid TOML produces a parse error naming the file.
#[test]
fn test_invalid_toml_is_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_steering_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("steering.toml"), "version = = 1").unwrap();
    let err = SteeringConfig::load(dir.path(), None).unwrap_err();
    match err {
        ConfigError::ParseError { path, .. } => assert!(path.ends_with("steering.toml")),
        other => panic!("expected ParseError, got {other:?}"),
    }
}

/// Unknown vendors anywhere in the config are rejected.
#[test]
fn test_unknown_vendor_rejected() {
    let config = SteeringConfig::from_toml(r#"default_vendors = ["cursor", "windsurf"]"#).unwrap();
    let err = SteeringConfig::validate(&config).unwrap_err();
    assert!(err.to_string().contains("windsurf"));

    let config = SteeringConfig::from_toml(
        r#"
[vendor_files]
windsurf = ".windsurf/rules"
"#,
    )
    .unwrap();
    assert!(SteeringConfig::validate(&config).is_err());
}

/// Only version 1 is supported.
#[test]
fn test_version_must_be_one() {
    let config = SteeringConfig::from_toml("version = 2").unwrap();
    let err = SteeringConfig::validate(&config).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "version"));

    let config = SteeringConfig::from_toml("version = 1").unwrap();
    assert!(SteeringConfig::validate(&config).is_ok());
}

/// Empty and malformed globs fail validation.
#[test]
fn test_bad_globs_rejected() {
    let config = SteeringConfig::from_toml(r#"auto_rules_glob = """#).unwrap();
    assert!(SteeringConfig::validate(&config).is_err());

    let config = SteeringConfig::from_toml(r#"contextual_rules_glob = "rules/[oops""#).unwrap();
    assert!(SteeringConfig::validate(&config).is_err());
}

/// `included_rules` and the `skills` table parse from the YAML layout and
/// resolve skill destinations per vendor.
#[test]
fn test_included_rules_and_skills() {
    let config = SteeringConfig::from_yaml(
        r#"
included_rules:
  - ../shared/auto-rules/security.mdc
skills:
  shared_path: skills
  vendor_destinations:
    claude: .claude/skills
    cursor: .cursor/skills
"#,
    )
    .unwrap();
    SteeringConfig::validate(&config).unwrap();

    assert_eq!(
        config.effective_included_rules(),
        ["../shared/auto-rules/security.mdc".to_string()]
    );
    let skills = config.skills.as_ref().unwrap();
    assert_eq!(skills.shared_path.as_deref(), Some("skills"));
    assert_eq!(skills.destination(Vendor::Claude), Some(".claude/skills"));
    assert_eq!(skills.destination(Vendor::Copilot), None);
}

#[test]
fn test_skills_unknown_vendor_rejected() {
    let config = SteeringConfig::from_toml(
        r#"
[skills]
shared_path = "skills"
vendor_destinations = { vim = ".vim/skills" }
"#,
    )
    .unwrap();
    let err = SteeringConfig::validate(&config).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "skills.vendor_destinations"));
}
