//! Adapter planning tests. Planning never touches the filesystem, so these
//! inspect planned operations directly.

use std::fs;
use std::path::{Path, PathBuf};

use steering_core::errors::PlanError;
use steering_core::{SteeringConfig, Vendor};
use steering_engine::adapters::{adapter_for, Adapter, ClaudeAdapter, CursorAdapter};
use steering_engine::pipeline::{self, Discovery};
use steering_engine::plan::{Action, PlannedOperation};
use tempfile::TempDir;

// ---- Helpers ----

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

const QUALITY: &str = "---\ndescription: Code quality\nglobs:\nalwaysApply: true\n---\n# Quality\nKeep it tidy.\n";
const DATABASE: &str =
    "---\ndescription: Database conventions\nglobs: db/**/*.sql\n---\n# Database\nUse migrations.\n";

fn fixture() -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    write(dir.path(), "rules/auto-rules/quality.mdc", QUALITY);
    write(dir.path(), "rules/contextual-rules/database.mdc", DATABASE);
    write(dir.path(), "src/components/AGENTS.md", "# Component Guidelines\n...");
    write(dir.path(), "AGENTS.md", "# Root guidance\n");
    dir
}

fn discover(root: &Path) -> Discovery {
    pipeline::discover(root, &SteeringConfig::default()).unwrap()
}

fn plan(vendor: Vendor, discovery: &Discovery) -> Vec<PlannedOperation> {
    adapter_for(vendor, &SteeringConfig::default())
        .plan(&discovery.registry, &discovery.root)
        .unwrap()
}

fn find<'a>(ops: &'a [PlannedOperation], path: &str) -> &'a PlannedOperation {
    ops.iter()
        .find(|op| op.path() == Path::new(path))
        .unwrap_or_else(|| panic!("no operation for {path}: {ops:#?}"))
}

fn content(op: &PlannedOperation) -> &str {
    match &op.action {
        Action::WriteFile { content, .. } => content,
        other => panic!("expected WriteFile, got {other:?}"),
    }
}

/// Split generated `---` frontmatter and parse it back.
fn frontmatter(text: &str) -> (serde_yaml::Value, &str) {
    let rest = text.strip_prefix("---\n").unwrap();
    let end = rest.find("---\n").unwrap();
    let yaml = serde_yaml::from_str(&rest[..end]).unwrap();
    (yaml, &rest[end + 4..])
}

// ---- Symlink style ----

#[test]
fn test_cursor_links_auto_rule() {
    let dir = fixture();
    let discovery = discover(dir.path());
    let ops = plan(Vendor::Cursor, &discovery);

    let op = find(&ops, ".cursor/rules/quality.mdc");
    match &op.action {
        Action::CreateSymlink { target, .. } => {
            assert_eq!(target, &PathBuf::from("../../rules/auto-rules/quality.mdc"));
            let resolved = discovery.root.join(".cursor/rules").join(target);
            assert_eq!(
                steering_engine::adapters::paths::normalize(
                    resolved.strip_prefix(&discovery.root).unwrap()
                ),
                Some(PathBuf::from("rules/auto-rules/quality.mdc"))
            );
        }
        other => panic!("expected symlink, got {other:?}"),
    }
    assert_eq!(op.origin.as_deref(), Some(Path::new("rules/auto-rules/quality.mdc")));
    assert!(matches!(
        find(&ops, ".cursor/rules/database.mdc").action,
        Action::CreateSymlink { .. }
    ));
}

#[test]
fn test_cursor_wraps_local_rules_never_links_them() {
    let dir = fixture();
    let discovery = discover(dir.path());
    let ops = plan(Vendor::Cursor, &discovery);

    for op in &ops {
        if let Action::CreateSymlink { .. } = op.action {
            let origin = op.origin.as_deref().unwrap();
            assert!(!origin.ends_with("AGENTS.md"), "local rule linked: {origin:?}");
        }
    }

    let (fm, body) = frontmatter(content(find(&ops, ".cursor/rules/local-src-components.mdc")));
    assert_eq!(fm["globs"], serde_yaml::Value::from("src/components/**/*"));
    assert_eq!(fm["description"], serde_yaml::Value::from("Local context for components"));
    assert_eq!(fm["alwaysApply"], serde_yaml::Value::from(false));
    assert_eq!(body, "# Component Guidelines\n...");

    let (fm, _) = frontmatter(content(find(&ops, ".cursor/rules/local-root.mdc")));
    assert_eq!(fm["globs"], serde_yaml::Value::from("**/*"));
    assert_eq!(fm["description"], serde_yaml::Value::from("Local context for root"));
}

#[test]
fn test_local_explicit_globs_take_precedence() {
    let dir = fixture();
    write(
        dir.path(),
        "src/api/AGENTS.md",
        "---\ndescription: API rules\nglobs:\n  - src/api/**/*.rs\n  - proto/**\n---\nbody\n",
    );
    let discovery = discover(dir.path());
    let ops = plan(Vendor::Cursor, &discovery);

    let (fm, _) = frontmatter(content(find(&ops, ".cursor/rules/local-src-api.mdc")));
    let globs: Vec<String> = serde_yaml::from_value(fm["globs"].clone()).unwrap();
    assert_eq!(globs, vec!["src/api/**/*.rs", "proto/**"]);
    assert_eq!(fm["description"], serde_yaml::Value::from("API rules"));
}

#[test]
fn test_continue_layout() {
    let dir = fixture();
    let discovery = discover(dir.path());
    let ops = plan(Vendor::Continue, &discovery);

    match &find(&ops, ".continue/rules/quality.md").action {
        Action::CreateSymlink { target, .. } => {
            assert_eq!(target, &PathBuf::from("../../rules/auto-rules/quality.mdc"))
        }
        other => panic!("expected symlink, got {other:?}"),
    }
    let (fm, _) = frontmatter(content(find(&ops, ".continue/rules/agents-src-components.md")));
    assert_eq!(fm["name"], serde_yaml::Value::from("Local context for components"));
    assert_eq!(fm["globs"], serde_yaml::Value::from("src/components/**/*"));
    assert_eq!(fm["alwaysApply"], serde_yaml::Value::from(false));
}

#[test]
fn test_symlink_adapter_ensures_rules_dir_first() {
    let dir = fixture();
    let discovery = discover(dir.path());
    let ops = plan(Vendor::Cursor, &discovery);
    assert_eq!(
        ops[0].action,
        Action::EnsureDirectory {
            path: PathBuf::from(".cursor/rules")
        }
    );
}

// ---- Reference-file style ----

#[test]
fn test_claude_adjacent_file_for_local_rule() {
    let dir = fixture();
    let discovery = discover(dir.path());
    let ops = plan(Vendor::Claude, &discovery);

    let adjacent = find(&ops, "src/components/CLAUDE.md");
    assert_eq!(content(adjacent), "@AGENTS.md\n");
    assert_eq!(adjacent.origin.as_deref(), Some(Path::new("src/components/AGENTS.md")));

    let root = content(find(&ops, "CLAUDE.md"));
    assert!(!root.contains("src/components/AGENTS.md"));
    assert!(root.contains("- @rules/auto-rules/quality.mdc\n"));
    assert!(root.contains("- @rules/contextual-rules/database.mdc - Database conventions\n"));
    assert!(root.contains("This repository has 1 directory-scoped rule file(s)"));
}

#[test]
fn test_claude_root_local_rule_is_referenced_not_adjacent() {
    let dir = fixture();
    let discovery = discover(dir.path());
    let ops = plan(Vendor::Claude, &discovery);

    let writes_to_root = ops
        .iter()
        .filter(|op| op.path() == Path::new("CLAUDE.md"))
        .count();
    assert_eq!(writes_to_root, 1);
    assert!(content(find(&ops, "CLAUDE.md")).contains("- @AGENTS.md\n"));
}

#[test]
fn test_gemini_uses_its_own_file_name() {
    let dir = fixture();
    let discovery = discover(dir.path());
    let ops = plan(Vendor::Gemini, &discovery);

    assert_eq!(content(find(&ops, "src/components/GEMINI.md")), "@AGENTS.md\n");
    let root = content(find(&ops, "GEMINI.md"));
    assert!(root.contains("Gemini CLI loads the adjacent GEMINI.md"));
    assert!(!ops.iter().any(|op| op.path().ends_with("CLAUDE.md")));
}

#[test]
fn test_reference_root_file_is_deterministic() {
    let dir = fixture();
    let first = plan(Vendor::Claude, &discover(dir.path()));
    let second = plan(Vendor::Claude, &discover(dir.path()));
    assert_eq!(first, second);
}

#[test]
fn test_claude_root_file_in_subdirectory() {
    let dir = fixture();
    let discovery = discover(dir.path());
    let ops = ClaudeAdapter::new("docs/CLAUDE.md")
        .plan(&discovery.registry, &discovery.root)
        .unwrap();
    assert_eq!(
        ops[0].action,
        Action::EnsureDirectory {
            path: PathBuf::from("docs")
        }
    );
    // References stay relative to the output root.
    assert!(content(find(&ops, "docs/CLAUDE.md")).contains("- @rules/auto-rules/quality.mdc\n"));
    // The root-level local rule now gets its own adjacent file.
    assert_eq!(content(find(&ops, "CLAUDE.md")), "@AGENTS.md\n");
}

// ---- Copilot ----

#[test]
fn test_copilot_outputs() {
    let dir = fixture();
    let discovery = discover(dir.path());
    let ops = plan(Vendor::Copilot, &discovery);

    let merged = content(find(&ops, ".github/copilot-instructions.md"));
    assert!(merged.contains("## Quality\n\n# Quality\nKeep it tidy.\n"));
    assert!(!merged.contains("Use migrations."));

    let (fm, body) = frontmatter(content(find(&ops, ".github/instructions/database.instructions.md")));
    assert_eq!(fm["applyTo"], serde_yaml::Value::from("db/**/*.sql"));
    assert!(body.starts_with("# Database\n"));

    assert!(!ops
        .iter()
        .any(|op| op.origin.as_deref().is_some_and(|o| o.ends_with("AGENTS.md"))));
}

// ---- Path escape ----

#[test]
fn test_escaping_artifact_fails_fast() {
    let dir = fixture();
    let discovery = discover(dir.path());
    let err = CursorAdapter::new("../outside/rules")
        .plan(&discovery.registry, &discovery.root)
        .unwrap_err();
    assert!(matches!(err, PlanError::PathEscape { vendor: Vendor::Cursor, .. }));

    let err = ClaudeAdapter::new("/etc/CLAUDE.md")
        .plan(&discovery.registry, &discovery.root)
        .unwrap_err();
    assert!(matches!(err, PlanError::PathEscape { .. }));
}

#[test]
fn test_local_rule_outside_output_root_fails_fast() {
    let dir = fixture();
    let discovery = discover(&dir.path().join("src"));
    // The rule's directory is inside the parent of the scan root.
    assert!(CursorAdapter::new(".cursor/rules")
        .plan(&discovery.registry, dir.path().canonicalize().unwrap().as_path())
        .is_ok());
    // A sibling directory does not contain it.
    let sibling = dir.path().canonicalize().unwrap().join("rules");
    let err = CursorAdapter::new(".cursor/rules")
        .plan(&discovery.registry, &sibling)
        .unwrap_err();
    assert!(matches!(err, PlanError::PathEscape { .. }));
}
