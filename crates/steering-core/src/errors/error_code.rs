//! SteeringErrorCode trait for machine-readable output.

/// Every error enum implements this to provide a structured error code
/// string for JSON consumers of the CLI.
pub trait SteeringErrorCode {
    /// Returns the error code string (e.g., "SCAN_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SCAN_ERROR: &str = "SCAN_ERROR";
pub const RULE_PARSE_ERROR: &str = "RULE_PARSE_ERROR";
pub const DUPLICATE_RULE: &str = "DUPLICATE_RULE";
pub const PATH_ESCAPE: &str = "PATH_ESCAPE";
pub const PLAN_ERROR: &str = "PLAN_ERROR";
pub const CONFLICT: &str = "CONFLICT";
pub const EXECUTE_ERROR: &str = "EXECUTE_ERROR";
