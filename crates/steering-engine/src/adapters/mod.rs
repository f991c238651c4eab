//! Vendor adapters.
//!
//! Each adapter turns the read-only `RuleRegistry` into planned filesystem
//! operations for one vendor. Planning never touches the filesystem, and
//! every planned path is checked against the output root before it leaves
//! the adapter.

pub mod claude;
pub mod continue_dev;
pub mod copilot;
pub mod cursor;
pub mod gemini;
pub mod paths;
mod reference;
mod render;
pub mod skills;
mod symlink_style;

use std::path::{Path, PathBuf};

use steering_core::errors::PlanError;
use steering_core::{SteeringConfig, Vendor};

use crate::plan::PlannedOperation;
use crate::registry::RuleRegistry;

pub use claude::ClaudeAdapter;
pub use continue_dev::ContinueAdapter;
pub use copilot::CopilotAdapter;
pub use cursor::CursorAdapter;
pub use gemini::GeminiAdapter;
pub use skills::{Skill, SkillLinks};

/// Vendor-specific transformation from rules to filesystem operations.
pub trait Adapter {
    fn vendor(&self) -> Vendor;

    /// Plan this vendor's outputs. Pure with respect to the filesystem.
    /// Every returned path is relative to `output_root` and stays inside it.
    fn plan(
        &self,
        registry: &RuleRegistry,
        output_root: &Path,
    ) -> Result<Vec<PlannedOperation>, PlanError>;
}

/// Build the adapter for `vendor`, using the artifact path from
/// `vendor_files` or the vendor default.
pub fn adapter_for(vendor: Vendor, config: &SteeringConfig) -> Box<dyn Adapter> {
    let artifact = PathBuf::from(config.vendor_artifact(vendor));
    match vendor {
        Vendor::Cursor => Box::new(CursorAdapter::new(artifact)),
        Vendor::Continue => Box::new(ContinueAdapter::new(artifact)),
        Vendor::Claude => Box::new(ClaudeAdapter::new(artifact)),
        Vendor::Gemini => Box::new(GeminiAdapter::new(artifact)),
        Vendor::Copilot => Box::new(CopilotAdapter::new(artifact)),
    }
}
