//! Error handling for steering.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod conflict_error;
pub mod error_code;
pub mod execute_error;
pub mod pipeline_error;
pub mod plan_error;
pub mod registry_error;
pub mod rule_parse_error;
pub mod scan_error;

pub use config_error::ConfigError;
pub use conflict_error::{Claimant, ConflictError};
pub use error_code::SteeringErrorCode;
pub use execute_error::ExecuteError;
pub use pipeline_error::PipelineError;
pub use plan_error::PlanError;
pub use registry_error::RegistryError;
pub use rule_parse_error::RuleParseError;
pub use scan_error::ScanError;
