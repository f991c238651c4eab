//! Shared skills: every skill directory is linked into a vendor's skills
//! folder under its own name.

use std::path::{Path, PathBuf};

use steering_core::errors::PlanError;
use steering_core::Vendor;

use super::{paths, Adapter};
use crate::plan::PlannedOperation;
use crate::registry::RuleRegistry;

/// A directory under the shared skills path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub name: String,
    /// Absolute path.
    pub path: PathBuf,
    /// Path relative to the scan root, or as configured when outside it.
    pub relative_path: PathBuf,
}

/// Links `skills` into `destination` for one vendor. Rules play no part.
pub struct SkillLinks {
    vendor: Vendor,
    destination: PathBuf,
    skills: Vec<Skill>,
}

impl SkillLinks {
    pub fn new(vendor: Vendor, destination: impl Into<PathBuf>, skills: Vec<Skill>) -> Self {
        Self {
            vendor,
            destination: destination.into(),
            skills,
        }
    }
}

impl Adapter for SkillLinks {
    fn vendor(&self) -> Vendor {
        self.vendor
    }

    fn plan(
        &self,
        _registry: &RuleRegistry,
        output_root: &Path,
    ) -> Result<Vec<PlannedOperation>, PlanError> {
        if self.skills.is_empty() {
            return Ok(Vec::new());
        }
        let vendor = self.vendor;
        let destination = paths::contained(vendor, output_root, &self.destination)?;
        let link_parent = output_root.join(&destination);

        let mut ops = vec![PlannedOperation::ensure_directory(vendor, &destination)];
        for skill in &self.skills {
            let link = paths::contained(vendor, output_root, &destination.join(&skill.name))?;
            let target = paths::relative_to(&skill.path, &link_parent);
            ops.push(PlannedOperation::create_symlink(
                vendor,
                &skill.relative_path,
                target,
                link,
            ));
        }
        Ok(ops)
    }
}
