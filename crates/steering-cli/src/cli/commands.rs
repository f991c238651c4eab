use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use steering_core::Vendor;

#[derive(Parser)]
#[command(name = "steering")]
#[command(author, version, about = "Generate AI coding assistant rules for every vendor from one rule tree", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: <root>/steering.toml)
    #[arg(long, global = true, env = "STEERING_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Output format for command results.
/// - Text: human-readable, colored when stdout is a terminal (default)
/// - Json: one JSON document on stdout
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct RootArg {
    /// Project root to scan
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate vendor outputs from the rule tree
    Generate {
        #[command(flatten)]
        root: RootArg,

        /// Vendor to generate for (repeatable; default: configured vendors)
        #[arg(long = "vendor", value_name = "VENDOR", value_parser = parse_vendor)]
        vendors: Vec<Vendor>,

        /// Report what would change without touching the filesystem
        #[arg(long)]
        dry_run: bool,

        /// Overwrite existing files that steering does not manage
        #[arg(long)]
        force: bool,

        /// Keep outputs that earlier runs produced but this run no longer does
        #[arg(long)]
        no_prune: bool,

        /// Directory for outputs and the manifest (default: the scan root)
        #[arg(long, value_name = "DIR")]
        output_root: Option<PathBuf>,
    },

    /// Check every rule file and report all problems
    Validate {
        #[command(flatten)]
        root: RootArg,
    },

    /// List discovered rules by tier
    List {
        #[command(flatten)]
        root: RootArg,
    },
}

fn parse_vendor(value: &str) -> Result<Vendor, String> {
    value.parse::<Vendor>().map_err(|e| e.to_string())
}
