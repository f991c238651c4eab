//! Output path helpers. Purely lexical; the filesystem is never consulted.

use std::path::{Component, Path, PathBuf};

use steering_core::errors::PlanError;
use steering_core::Vendor;

/// Resolve `.` and `..` lexically. `None` if the path is absolute or climbs
/// above its starting point.
pub fn normalize(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(out)
}

/// Normalize `path` as an output path under `output_root`, or fail with
/// `PathEscape`. The empty path (the root itself) is not a valid output.
pub fn contained(vendor: Vendor, output_root: &Path, path: &Path) -> Result<PathBuf, PlanError> {
    match normalize(path) {
        Some(normalized) if !normalized.as_os_str().is_empty() => Ok(normalized),
        _ => Err(PlanError::PathEscape {
            vendor,
            path: path.to_path_buf(),
            root: output_root.to_path_buf(),
        }),
    }
}

/// Lexical relative path from directory `base` to `path`; both absolute.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path_parts: Vec<Component<'_>> = path.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();
    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..base_parts.len() {
        out.push("..");
    }
    for part in &path_parts[common..] {
        out.push(part.as_os_str());
    }
    out
}

/// `/`-separated rendering used inside generated content.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Directory-derived scope glob: `src/components/**/*`, or `**/*` at the root.
pub fn scope_glob(relative_dir: &Path) -> String {
    let dir = to_slash(relative_dir);
    if dir.is_empty() {
        "**/*".to_string()
    } else {
        format!("{dir}/**/*")
    }
}

/// Kebab-case slug of a relative directory: `src/Web UI` -> `src-web-ui`,
/// the root -> `root`.
pub fn slug(relative_dir: &Path) -> String {
    let mut slug = String::new();
    for ch in to_slash(relative_dir).chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "root".to_string()
    } else {
        slug.to_string()
    }
}

/// Last component of a relative directory, `root` for the root itself.
pub fn dir_name(relative_dir: &Path) -> String {
    relative_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "root".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("a/./b/../c")), Some(PathBuf::from("a/c")));
        assert_eq!(normalize(Path::new("a/../../b")), None);
        assert_eq!(normalize(Path::new("/etc/passwd")), None);
        assert_eq!(normalize(Path::new("..hidden/x")), Some(PathBuf::from("..hidden/x")));
    }

    #[test]
    fn test_contained_rejects_root_and_escapes() {
        let root = Path::new("/repo");
        assert!(contained(Vendor::Claude, root, Path::new("CLAUDE.md")).is_ok());
        assert!(contained(Vendor::Claude, root, Path::new("")).is_err());
        assert!(contained(Vendor::Claude, root, Path::new("../CLAUDE.md")).is_err());
    }

    #[test]
    fn test_relative_to() {
        assert_eq!(
            relative_to(
                Path::new("/repo/rules/auto-rules/quality.mdc"),
                Path::new("/repo/.cursor/rules")
            ),
            PathBuf::from("../../rules/auto-rules/quality.mdc")
        );
        assert_eq!(
            relative_to(Path::new("/repo/AGENTS.md"), Path::new("/repo")),
            PathBuf::from("AGENTS.md")
        );
    }

    #[test]
    fn test_scope_glob_and_slug() {
        assert_eq!(scope_glob(Path::new("src/components")), "src/components/**/*");
        assert_eq!(scope_glob(Path::new("")), "**/*");
        assert_eq!(slug(Path::new("nix/services/grafana")), "nix-services-grafana");
        assert_eq!(slug(Path::new("src/Web UI")), "src-web-ui");
        assert_eq!(slug(Path::new("")), "root");
        assert_eq!(dir_name(Path::new("src/components")), "components");
        assert_eq!(dir_name(Path::new("")), "root");
    }
}
