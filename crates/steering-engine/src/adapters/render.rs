//! Frontmatter rendering for synthesized rule files.

use std::path::Path;

use serde::Serialize;
use steering_core::errors::PlanError;
use steering_core::Vendor;

/// `globs` as vendors expect it: a plain string for one pattern, a list
/// otherwise.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum GlobsField {
    One(String),
    Many(Vec<String>),
}

impl GlobsField {
    pub(crate) fn new(mut globs: Vec<String>) -> Self {
        if globs.len() == 1 {
            Self::One(globs.remove(0))
        } else {
            Self::Many(globs)
        }
    }
}

/// `---\n<yaml>---\n<body>`, with the body copied verbatim.
pub(crate) fn with_frontmatter<T: Serialize>(
    vendor: Vendor,
    path: &Path,
    frontmatter: &T,
    body: &str,
) -> Result<String, PlanError> {
    let yaml = serde_yaml::to_string(frontmatter).map_err(|e| PlanError::Render {
        vendor,
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(format!("---\n{yaml}---\n{body}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Fm {
        description: &'static str,
        globs: GlobsField,
        #[serde(rename = "alwaysApply")]
        always_apply: bool,
    }

    #[test]
    fn test_rendered_frontmatter_parses_back() {
        let fm = Fm {
            description: "Local context for web",
            globs: GlobsField::new(vec!["**/*".to_string()]),
            always_apply: false,
        };
        let out = with_frontmatter(Vendor::Cursor, Path::new("x.mdc"), &fm, "# Body\n").unwrap();
        assert!(out.starts_with("---\n"));
        assert!(out.ends_with("---\n# Body\n"));

        let yaml = out
            .strip_prefix("---\n")
            .and_then(|rest| rest.split("---\n").next())
            .unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(value["globs"], serde_yaml::Value::from("**/*"));
        assert_eq!(value["alwaysApply"], serde_yaml::Value::from(false));
    }
}
