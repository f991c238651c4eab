//! Property tests: no rule layout makes a planned output leave the output
//! root.

use std::fs;
use std::path::{Component, Path, PathBuf};

use proptest::prelude::*;
use steering_core::{SteeringConfig, Vendor};
use steering_engine::adapters::{adapter_for, paths};
use steering_engine::pipeline;
use steering_engine::plan::build_plan;
use tempfile::TempDir;

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9_-]{0,8}",
        "\\.\\.[a-z]{1,4}",
        "[a-z]{1,4}\\.\\.",
        "[A-Z][a-z ]{0,6}[a-z]",
    ]
}

fn layout() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec(segment(), 0..4), 1..5)
}

fn is_plain_relative(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.components().all(|c| matches!(c, Component::Normal(_)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_planned_paths_stay_inside_root(dirs in layout()) {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("rules/auto-rules")).unwrap();
        fs::write(
            root.join("rules/auto-rules/base.mdc"),
            "---\ndescription: Base\nalwaysApply: true\n---\nbody\n",
        )
        .unwrap();
        for (i, parts) in dirs.iter().enumerate() {
            let dir: PathBuf = parts.iter().collect();
            fs::create_dir_all(root.join(&dir)).unwrap();
            fs::write(root.join(&dir).join("AGENTS.md"), format!("# Local {i}\n")).unwrap();
        }

        let config = SteeringConfig::default();
        let discovery = pipeline::discover(root, &config).unwrap();
        let adapters: Vec<_> = Vendor::ALL.iter().map(|v| adapter_for(*v, &config)).collect();
        let plan = build_plan(&adapters, &discovery.registry, &discovery.root).unwrap();

        for op in plan.iter() {
            prop_assert!(is_plain_relative(op.path()), "escaping path {:?}", op.path());
        }
    }

    #[test]
    fn prop_contained_never_escapes(parts in prop::collection::vec(prop_oneof![
        segment(),
        Just("..".to_string()),
        Just(".".to_string()),
    ], 0..6)) {
        let path: PathBuf = parts.iter().collect();
        if let Ok(normalized) = paths::contained(Vendor::Cursor, Path::new("/repo"), &path) {
            prop_assert!(is_plain_relative(&normalized));
            prop_assert!(Path::new("/repo").join(&normalized).starts_with("/repo"));
        }
    }

    #[test]
    fn prop_slug_is_kebab(parts in prop::collection::vec(segment(), 0..4)) {
        let path: PathBuf = parts.iter().collect();
        let slug = paths::slug(&path);
        prop_assert!(!slug.is_empty());
        prop_assert!(!slug.starts_with('-') && !slug.ends_with('-'));
        prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }
}
