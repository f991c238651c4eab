//! Pipeline facade: scanner -> parser -> registry -> adapters -> executor.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use steering_core::errors::{ConfigError, PipelineError};
use steering_core::{SteeringConfig, Tier, Vendor};

use crate::adapters::{adapter_for, Adapter, Skill, SkillLinks};
use crate::plan::{build_plan, execute, ExecuteOptions, ExecutionMode, Report};
use crate::registry::RuleRegistry;
use crate::rules::parse_rule;
use crate::scanner::Scanner;
use crate::validation::{lint, sort_issues, ValidationIssue, ValidationOutcome};

/// Parsed rules of one tree. Rules that failed to parse are left out of the
/// registry and reported in `issues`; `warnings` holds scan problems.
#[derive(Debug)]
pub struct Discovery {
    /// Canonical scan root; the default output root.
    pub root: PathBuf,
    pub registry: RuleRegistry,
    pub issues: Vec<ValidationIssue>,
    pub warnings: Vec<String>,
}

pub fn discover(root: &Path, config: &SteeringConfig) -> Result<Discovery, PipelineError> {
    let scanner = Scanner::new(root, config)?;
    let scan = scanner.scan()?;

    let warnings: Vec<String> = scan.warnings.iter().map(ToString::to_string).collect();
    let mut issues = Vec::new();
    let mut rules = Vec::with_capacity(scan.files.len());

    for source in &scan.files {
        match parse_rule(source) {
            Ok(rule) => rules.push(rule),
            Err(err) => {
                tracing::warn!(path = %source.relative_path.display(), "omitting rule: {err}");
                issues.push(ValidationIssue::from_parse_error(source, &err));
            }
        }
    }

    let registry = RuleRegistry::build(rules)?;
    tracing::debug!(rules = registry.len(), omitted = issues.len(), "rules discovered");

    Ok(Discovery {
        root: scan.root,
        registry,
        issues,
        warnings,
    })
}

/// Parameters of one `generate` run.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// Empty means the configured default vendors.
    pub vendors: Vec<Vendor>,
    pub mode: ExecutionMode,
    /// Overrides the configured `force` when set.
    pub force: Option<bool>,
    /// Where outputs and the manifest go; `None` means the scan root.
    pub output_root: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct GenerateOutcome {
    pub vendors: Vec<Vendor>,
    pub report: Report,
    /// Rules omitted because they failed to parse.
    pub issues: Vec<ValidationIssue>,
}

impl GenerateOutcome {
    /// Whether anything should make the run fail.
    pub fn is_blocked(&self) -> bool {
        self.report.has_conflicts() || !self.issues.is_empty()
    }
}

/// Discover, plan every selected vendor and execute the merged plan.
///
/// In `Apply` mode unresolved conflicts abort with
/// `PipelineError::Execute(ExecuteError::Conflicts)` before any mutation.
pub fn generate(
    root: &Path,
    config: &SteeringConfig,
    request: &GenerateRequest,
) -> Result<GenerateOutcome, PipelineError> {
    let discovery = discover(root, config)?;

    let mut vendors = if request.vendors.is_empty() {
        config.effective_default_vendors()
    } else {
        request.vendors.clone()
    };
    let mut seen = Vec::with_capacity(vendors.len());
    vendors.retain(|v| {
        let first = !seen.contains(v);
        seen.push(*v);
        first
    });

    let output_root = match &request.output_root {
        Some(path) => resolve_output_root(path, request.mode)?,
        None => discovery.root.clone(),
    };
    let mut warnings = discovery.warnings;
    for issue in &discovery.issues {
        warnings.push(format!("omitted {}: {}", issue.path.display(), issue.message));
    }

    let mut adapters: Vec<Box<dyn Adapter>> = vendors.iter().map(|v| adapter_for(*v, config)).collect();
    if let Some(skills_config) = &config.skills {
        let skills = read_skills(&discovery.root, skills_config.shared_path.as_deref(), &mut warnings);
        for vendor in &vendors {
            if let Some(destination) = skills_config.destination(*vendor) {
                adapters.push(Box::new(SkillLinks::new(*vendor, destination, skills.clone())));
            }
        }
    }

    if vendors.iter().any(|v| v.wraps_local_rules()) {
        for rule in discovery.registry.by_tier(Tier::Local).filter(|r| !r.globs().is_empty()) {
            let warning = format!(
                "{} sets explicit globs; glob-scoped vendors use them instead of its directory",
                rule.relative_path.display()
            );
            tracing::warn!("{warning}");
            warnings.push(warning);
        }
    }

    let plan = build_plan(&adapters, &discovery.registry, &output_root)?;

    let options = ExecuteOptions {
        mode: request.mode,
        force: request.force.unwrap_or_else(|| config.effective_force()),
        prune_stale: config.effective_prune_stale(),
        manifest_path: PathBuf::from(config.effective_manifest_path()),
    };
    let mut report = execute(&plan, &output_root, &options)?;

    warnings.append(&mut report.warnings);
    report.warnings = warnings;

    Ok(GenerateOutcome {
        vendors,
        report,
        issues: discovery.issues,
    })
}

/// Check every rule without generating anything.
///
/// A file that fails to parse gets exactly one issue; lint checks only see
/// rules that parsed.
pub fn validate(root: &Path, config: &SteeringConfig) -> Result<ValidationOutcome, PipelineError> {
    let discovery = discover(root, config)?;
    let rules_checked = discovery.registry.len() + discovery.issues.len();

    let mut issues = discovery.issues;
    issues.extend(lint(&discovery.registry));
    sort_issues(&mut issues);

    tracing::info!(rules = rules_checked, issues = issues.len(), "validation complete");

    Ok(ValidationOutcome {
        issues,
        rules_checked,
        warnings: discovery.warnings,
    })
}

/// Canonical output root. Apply creates a missing one; a dry run leaves it
/// missing and plans against its absolute path.
fn resolve_output_root(path: &Path, mode: ExecutionMode) -> Result<PathBuf, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidRoot {
        path: path.display().to_string(),
        message,
    };
    match fs::metadata(path) {
        Ok(metadata) if !metadata.is_dir() => return Err(invalid("not a directory".to_string())),
        Ok(_) => {}
        Err(_) if mode == ExecutionMode::DryRun => {
            return std::path::absolute(path).map_err(|e| invalid(e.to_string()));
        }
        Err(_) => {
            fs::create_dir_all(path).map_err(|e| invalid(e.to_string()))?;
            tracing::debug!(path = %path.display(), "created output root");
        }
    }
    path.canonicalize().map_err(|e| invalid(e.to_string()))
}

/// Immediate subdirectories of the shared skills path, sorted by name.
/// A missing or unreadable path yields no skills and a warning.
fn read_skills(root: &Path, shared_path: Option<&str>, warnings: &mut Vec<String>) -> Vec<Skill> {
    let Some(shared_path) = shared_path else {
        return Vec::new();
    };
    let dir = root.join(shared_path);
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(err) => {
            let warning = format!("skills path {}: {err}", dir.display());
            tracing::warn!("{warning}");
            warnings.push(warning);
            return Vec::new();
        }
    };

    let mut skills: Vec<Skill> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            let path = entry.path().canonicalize().ok()?;
            let relative_path = match path.strip_prefix(root) {
                Ok(relative) => relative.to_path_buf(),
                Err(_) => Path::new(shared_path).join(&name),
            };
            Some(Skill {
                name,
                path,
                relative_path,
            })
        })
        .collect();
    skills.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::debug!(dir = %dir.display(), skills = skills.len(), "skills discovered");
    skills
}

#[derive(Debug, Clone, Serialize)]
pub struct ListedRule {
    pub tier: Tier,
    pub name: String,
    pub description: Option<String>,
    pub path: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct Listing {
    /// Grouped by tier (auto, contextual, local), then by path.
    pub rules: Vec<ListedRule>,
    pub issues: Vec<ValidationIssue>,
    pub warnings: Vec<String>,
}

impl Listing {
    pub fn by_tier(&self, tier: Tier) -> impl Iterator<Item = &ListedRule> {
        self.rules.iter().filter(move |r| r.tier == tier)
    }
}

/// Enumerate discovered rules and their tiers.
pub fn list(root: &Path, config: &SteeringConfig) -> Result<Listing, PipelineError> {
    let discovery = discover(root, config)?;
    let rules = Tier::ALL
        .into_iter()
        .flat_map(|tier| discovery.registry.by_tier(tier))
        .map(|rule| ListedRule {
            tier: rule.tier,
            name: rule.name().to_string(),
            description: rule.description().map(str::to_string),
            path: rule.relative_path.clone(),
        })
        .collect();

    Ok(Listing {
        rules,
        issues: discovery.issues,
        warnings: discovery.warnings,
    })
}
