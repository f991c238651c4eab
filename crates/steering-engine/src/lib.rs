//! steering-engine: the rule discovery and multi-vendor generation pipeline.
//!
//! Data flows leaf-first through the modules:
//!
//! ```text
//! scanner -> rules -> registry -> adapters -> plan
//!                  \-> validation
//! ```
//!
//! `pipeline` chains them for the CLI.

pub mod adapters;
pub mod pipeline;
pub mod plan;
pub mod registry;
pub mod rules;
pub mod scanner;
pub mod validation;

pub use adapters::{adapter_for, Adapter};
pub use plan::{ExecutionMode, GenerationPlan, Report};
pub use registry::RuleRegistry;
pub use rules::Rule;
pub use scanner::Scanner;
