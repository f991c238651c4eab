//! Plan merging.

use std::path::Path;

use rustc_hash::FxHashSet;
use steering_core::errors::PlanError;

use super::types::{GenerationPlan, OperationKind, PlannedOperation};
use crate::adapters::paths;
use crate::adapters::Adapter;
use crate::registry::RuleRegistry;

/// Collect every adapter's operations into one plan. Several adapters may
/// plan for the same vendor.
///
/// Directory operations are hoisted to the front and deduplicated so they
/// run before anything that depends on them. Everything else keeps adapter
/// order, then per-adapter order. Duplicate file targets are kept: the
/// executor reports them as conflicts.
pub fn build_plan(
    adapters: &[Box<dyn Adapter>],
    registry: &RuleRegistry,
    output_root: &Path,
) -> Result<GenerationPlan, PlanError> {
    let mut directories = Vec::new();
    let mut seen_dirs = FxHashSet::default();
    let mut outputs = Vec::new();

    for adapter in adapters {
        let ops = adapter.plan(registry, output_root)?;
        tracing::debug!(vendor = %adapter.vendor(), operations = ops.len(), "adapter planned");

        for op in ops {
            check_contained(&op, output_root)?;
            if op.action.kind() == OperationKind::Directory {
                if seen_dirs.insert(op.path().to_path_buf()) {
                    directories.push(op);
                }
            } else {
                outputs.push(op);
            }
        }
    }

    // Parents before children.
    directories.sort_by_key(|op| op.path().components().count());

    let mut operations = directories;
    operations.extend(outputs);

    let mut vendors = Vec::new();
    for vendor in adapters.iter().map(|a| a.vendor()) {
        if !vendors.contains(&vendor) {
            vendors.push(vendor);
        }
    }

    Ok(GenerationPlan { vendors, operations })
}

/// Adapters check their own paths; this is the boundary check every
/// operation passes regardless of which adapter produced it.
fn check_contained(op: &PlannedOperation, output_root: &Path) -> Result<(), PlanError> {
    let escapes = match paths::normalize(op.path()) {
        Some(normalized) => normalized.as_os_str().is_empty() || normalized != op.path(),
        None => true,
    };
    if escapes {
        return Err(PlanError::PathEscape {
            vendor: op.vendor,
            path: op.path().to_path_buf(),
            root: output_root.to_path_buf(),
        });
    }
    Ok(())
}
