//! steering-core: shared foundation for the steering rule generator.
//!
//! - `config`: layered `SteeringConfig` (CLI > env > project file > defaults)
//! - `errors`: one `thiserror` enum per subsystem, each with a stable error code
//! - `tracing`: idempotent `tracing-subscriber` setup driven by `STEERING_LOG`
//! - `types`: the rule `Tier` and `Vendor` vocabulary shared by every crate

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::{CliOverrides, SkillsConfig, SteeringConfig};
pub use errors::PipelineError;
pub use types::{Tier, Vendor};
