//! Command-line interface definitions.
//!
//! - `Cli`, `Commands`: argument definitions via clap
//! - `Display`: colored terminal rendering of pipeline results

mod commands;
mod display;

pub use commands::{Cli, Commands, OutputFormat, RootArg};
pub use display::Display;
