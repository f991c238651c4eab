//! Generation planning and execution.
//!
//! `planner` merges adapter output into a `GenerationPlan`; `executor`
//! checks it against the output root and either applies it or reports what
//! applying would do. The ownership `manifest` records what steering wrote so
//! later runs can tell managed files from user files.

pub mod executor;
pub mod manifest;
pub mod planner;
pub mod report;
pub mod types;

pub use executor::{execute, ExecuteOptions};
pub use manifest::{hash_content, Manifest, ManifestEntry};
pub use planner::build_plan;
pub use report::{Outcome, Report, ReportEntry};
pub use types::{Action, ExecutionMode, GenerationPlan, OperationKind, PlannedOperation};
