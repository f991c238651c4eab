//! Top-level steering configuration with layered resolution.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use globset::Glob;
use serde::{Deserialize, Serialize};

use crate::constants::{
    CONFIG_VERSION, DEFAULT_AUTO_RULES_GLOB, DEFAULT_CONTEXTUAL_RULES_GLOB,
    DEFAULT_IGNORED_DIRECTORIES, DEFAULT_LOCAL_RULES_GLOB, DEFAULT_MANIFEST_PATH,
    DEFAULT_VENDORS, PROJECT_CONFIG_FILE,
};
use crate::errors::ConfigError;
use crate::types::Vendor;

/// Project configuration.
///
/// Every field is optional so that layers can be merged; the `effective_*`
/// accessors apply the documented defaults. Unknown keys are ignored, which
/// keeps older binaries working against newer config files.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`STEERING_*`)
/// 3. Project config (`steering.toml` in the root, or an explicit path)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SteeringConfig {
    /// Schema version. Only `1` is supported.
    pub version: Option<f64>,
    /// Vendor id -> output artifact path, relative to the output root.
    pub vendor_files: BTreeMap<String, String>,
    /// Vendors generated when a run names none.
    pub default_vendors: Option<Vec<String>>,
    pub auto_rules_glob: Option<String>,
    pub contextual_rules_glob: Option<String>,
    #[serde(alias = "agents_glob")]
    pub local_rules_glob: Option<String>,
    /// Directory names pruned at any depth during scanning. `*` is the only wildcard.
    pub ignored_directories: Option<Vec<String>>,
    /// Overwrite existing files that steering does not manage.
    pub force: Option<bool>,
    /// Remove outputs from earlier runs that the current plan no longer produces.
    pub prune_stale: Option<bool>,
    /// Ownership manifest path, relative to the output root.
    pub manifest_path: Option<String>,
    /// Extra rule files outside the tier globs, relative to the scan root.
    /// The tier comes from an `auto-rules` or `contextual-rules` directory
    /// somewhere on the path.
    pub included_rules: Option<Vec<String>>,
    pub skills: Option<SkillsConfig>,
}

/// Shared skill directories linked into vendor skill folders.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SkillsConfig {
    /// Directory whose immediate subdirectories are skills, relative to the
    /// scan root.
    pub shared_path: Option<String>,
    /// Vendor id -> skills folder, relative to the output root.
    pub vendor_destinations: BTreeMap<String, String>,
}

impl SkillsConfig {
    /// Configured destination for `vendor`, if any.
    pub fn destination(&self, vendor: Vendor) -> Option<&str> {
        self.vendor_destinations
            .iter()
            .find(|(id, _)| id.parse::<Vendor>().ok() == Some(vendor))
            .map(|(_, dest)| dest.as_str())
    }
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Explicit config file; replaces the `steering.toml` lookup.
    pub config_path: Option<PathBuf>,
    pub force: Option<bool>,
    pub prune_stale: Option<bool>,
    pub ignored_directories: Option<Vec<String>>,
}

impl SteeringConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let explicit = cli_overrides.and_then(|cli| cli.config_path.as_deref());
        match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                Self::merge_file(&mut config, path)?;
            }
            None => {
                let project_config_path = root.join(PROJECT_CONFIG_FILE);
                if project_config_path.is_file() {
                    Self::merge_file(&mut config, &project_config_path)?;
                }
            }
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        tracing::debug!(?config, "configuration resolved");
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a YAML string, the format of the original
    /// `default-config.yaml` files.
    pub fn from_yaml(yaml_str: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &SteeringConfig) -> Result<(), ConfigError> {
        if let Some(version) = config.version {
            if version != CONFIG_VERSION {
                return Err(ConfigError::ValidationFailed {
                    field: "version".to_string(),
                    message: format!("unsupported version {version}, only 1.0 is supported"),
                });
            }
        }

        for (vendor, artifact) in &config.vendor_files {
            vendor.parse::<Vendor>().map_err(|_| ConfigError::ValidationFailed {
                field: "vendor_files".to_string(),
                message: format!("unknown vendor '{vendor}'"),
            })?;
            check_relative(&format!("vendor_files.{vendor}"), artifact)?;
        }

        if let Some(vendors) = &config.default_vendors {
            for vendor in vendors {
                vendor.parse::<Vendor>().map_err(|_| ConfigError::ValidationFailed {
                    field: "default_vendors".to_string(),
                    message: format!("unknown vendor '{vendor}'"),
                })?;
            }
        }

        for (field, glob) in [
            ("auto_rules_glob", config.effective_auto_rules_glob()),
            ("contextual_rules_glob", config.effective_contextual_rules_glob()),
            ("local_rules_glob", config.effective_local_rules_glob()),
        ] {
            if glob.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
            Glob::new(glob).map_err(|e| ConfigError::ValidationFailed {
                field: field.to_string(),
                message: e.to_string(),
            })?;
        }

        if let Some(dirs) = &config.ignored_directories {
            if dirs.iter().any(|d| d.trim().is_empty()) {
                return Err(ConfigError::ValidationFailed {
                    field: "ignored_directories".to_string(),
                    message: "entries must not be empty".to_string(),
                });
            }
        }

        if let Some(manifest) = &config.manifest_path {
            check_relative("manifest_path", manifest)?;
        }

        if let Some(included) = &config.included_rules {
            if included.iter().any(|p| p.trim().is_empty()) {
                return Err(ConfigError::ValidationFailed {
                    field: "included_rules".to_string(),
                    message: "entries must not be empty".to_string(),
                });
            }
        }

        if let Some(skills) = &config.skills {
            if skills.shared_path.as_deref().is_some_and(|p| p.trim().is_empty()) {
                return Err(ConfigError::ValidationFailed {
                    field: "skills.shared_path".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
            for (vendor, dest) in &skills.vendor_destinations {
                vendor.parse::<Vendor>().map_err(|_| ConfigError::ValidationFailed {
                    field: "skills.vendor_destinations".to_string(),
                    message: format!("unknown vendor '{vendor}'"),
                })?;
                check_relative(&format!("skills.vendor_destinations.{vendor}"), dest)?;
            }
        }

        Ok(())
    }

    pub fn effective_auto_rules_glob(&self) -> &str {
        self.auto_rules_glob.as_deref().unwrap_or(DEFAULT_AUTO_RULES_GLOB)
    }

    pub fn effective_contextual_rules_glob(&self) -> &str {
        self.contextual_rules_glob
            .as_deref()
            .unwrap_or(DEFAULT_CONTEXTUAL_RULES_GLOB)
    }

    pub fn effective_local_rules_glob(&self) -> &str {
        self.local_rules_glob.as_deref().unwrap_or(DEFAULT_LOCAL_RULES_GLOB)
    }

    pub fn effective_ignored_directories(&self) -> Vec<String> {
        match &self.ignored_directories {
            Some(dirs) => dirs.clone(),
            None => DEFAULT_IGNORED_DIRECTORIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Returns the configured default vendors, in configured order.
    /// Entries that fail to parse were rejected by `validate`.
    pub fn effective_default_vendors(&self) -> Vec<Vendor> {
        match &self.default_vendors {
            Some(ids) => ids.iter().filter_map(|id| id.parse().ok()).collect(),
            None => DEFAULT_VENDORS
                .iter()
                .filter_map(|id| id.parse().ok())
                .collect(),
        }
    }

    /// Output artifact for `vendor`, relative to the output root.
    pub fn vendor_artifact(&self, vendor: Vendor) -> &str {
        self.vendor_files
            .iter()
            .find(|(id, _)| id.parse::<Vendor>().ok() == Some(vendor))
            .map(|(_, artifact)| artifact.as_str())
            .unwrap_or_else(|| vendor.default_artifact())
    }

    pub fn effective_force(&self) -> bool {
        self.force.unwrap_or(false)
    }

    pub fn effective_prune_stale(&self) -> bool {
        self.prune_stale.unwrap_or(true)
    }

    pub fn effective_manifest_path(&self) -> &str {
        self.manifest_path.as_deref().unwrap_or(DEFAULT_MANIFEST_PATH)
    }

    pub fn effective_included_rules(&self) -> &[String] {
        self.included_rules.as_deref().unwrap_or_default()
    }

    /// Merge a config file into the existing config. `.yaml`/`.yml` files are
    /// parsed as YAML, everything else as TOML.
    fn merge_file(config: &mut SteeringConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let file_config: SteeringConfig = if is_yaml {
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?
        } else {
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?
        };

        tracing::debug!(path = %path.display(), "merging config file");
        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a value.
    fn merge(base: &mut SteeringConfig, other: &SteeringConfig) {
        if other.version.is_some() {
            base.version = other.version;
        }
        for (vendor, artifact) in &other.vendor_files {
            base.vendor_files.insert(vendor.clone(), artifact.clone());
        }
        if other.default_vendors.is_some() {
            base.default_vendors = other.default_vendors.clone();
        }
        if other.auto_rules_glob.is_some() {
            base.auto_rules_glob = other.auto_rules_glob.clone();
        }
        if other.contextual_rules_glob.is_some() {
            base.contextual_rules_glob = other.contextual_rules_glob.clone();
        }
        if other.local_rules_glob.is_some() {
            base.local_rules_glob = other.local_rules_glob.clone();
        }
        if other.ignored_directories.is_some() {
            base.ignored_directories = other.ignored_directories.clone();
        }
        if other.force.is_some() {
            base.force = other.force;
        }
        if other.prune_stale.is_some() {
            base.prune_stale = other.prune_stale;
        }
        if other.manifest_path.is_some() {
            base.manifest_path = other.manifest_path.clone();
        }
        if other.included_rules.is_some() {
            base.included_rules = other.included_rules.clone();
        }
        if other.skills.is_some() {
            base.skills = other.skills.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `STEERING_FORCE`, `STEERING_DEFAULT_VENDORS=claude,cursor`, etc.
    fn apply_env_overrides(config: &mut SteeringConfig) {
        if let Ok(val) = std::env::var("STEERING_FORCE") {
            if let Ok(v) = val.parse::<bool>() {
                config.force = Some(v);
            }
        }
        if let Ok(val) = std::env::var("STEERING_PRUNE_STALE") {
            if let Ok(v) = val.parse::<bool>() {
                config.prune_stale = Some(v);
            }
        }
        if let Ok(val) = std::env::var("STEERING_DEFAULT_VENDORS") {
            config.default_vendors = Some(split_list(&val));
        }
        if let Ok(val) = std::env::var("STEERING_IGNORED_DIRECTORIES") {
            config.ignored_directories = Some(split_list(&val));
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut SteeringConfig, cli: &CliOverrides) {
        if let Some(v) = cli.force {
            config.force = Some(v);
        }
        if let Some(v) = cli.prune_stale {
            config.prune_stale = Some(v);
        }
        if let Some(ref v) = cli.ignored_directories {
            config.ignored_directories = Some(v.clone());
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Output paths must stay under the output root.
fn check_relative(field: &str, value: &str) -> Result<(), ConfigError> {
    let path = Path::new(value);
    let escapes = value.trim().is_empty()
        || path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: format!("'{value}' must be a non-empty path relative to the output root"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = SteeringConfig::default();
        assert_eq!(config.effective_auto_rules_glob(), "rules/auto-rules/**/*.mdc");
        assert_eq!(config.effective_local_rules_glob(), "AGENTS.{md,mdc}");
        assert_eq!(config.vendor_artifact(Vendor::Cursor), ".cursor/rules");
        assert_eq!(config.vendor_artifact(Vendor::Claude), "CLAUDE.md");
        assert!(config.effective_prune_stale());
        assert!(!config.effective_force());
        assert_eq!(
            config.effective_default_vendors(),
            vec![Vendor::Cursor, Vendor::Claude, Vendor::Continue, Vendor::Copilot]
        );
    }

    #[test]
    fn absolute_artifact_is_rejected() {
        let mut config = SteeringConfig::default();
        config
            .vendor_files
            .insert("claude".to_string(), "/etc/CLAUDE.md".to_string());
        assert!(SteeringConfig::validate(&config).is_err());
    }

    #[test]
    fn parent_traversal_in_manifest_is_rejected() {
        let config = SteeringConfig {
            manifest_path: Some("../manifest.json".to_string()),
            ..Default::default()
        };
        assert!(SteeringConfig::validate(&config).is_err());
    }

    #[test]
    fn skills_destination_must_stay_relative() {
        let mut skills = SkillsConfig::default();
        skills
            .vendor_destinations
            .insert("claude".to_string(), "../skills".to_string());
        let config = SteeringConfig {
            skills: Some(skills),
            ..Default::default()
        };
        assert!(SteeringConfig::validate(&config).is_err());
    }

    #[test]
    fn split_list_trims_and_drops_empties() {
        assert_eq!(split_list(" a, b ,,c"), vec!["a", "b", "c"]);
    }
}
