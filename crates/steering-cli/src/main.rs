use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use serde_json::json;
use steering_core::errors::{ExecuteError, SteeringErrorCode};
use steering_core::tracing::init_tracing;
use steering_core::{CliOverrides, PipelineError, SteeringConfig};
use steering_engine::pipeline::{self, GenerateRequest};
use steering_engine::ExecutionMode;

mod cli;

use cli::{Cli, Commands, Display, OutputFormat};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let display = Display::new();
    match run(&cli, &display) {
        Ok(code) => code,
        Err(err) => {
            report_error(cli.output, &display, &err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, display: &Display) -> Result<ExitCode, PipelineError> {
    match &cli.command {
        Commands::Generate {
            root,
            vendors,
            dry_run,
            force,
            no_prune,
            output_root,
        } => {
            let overrides = CliOverrides {
                config_path: cli.config.clone(),
                force: force.then_some(true),
                prune_stale: no_prune.then_some(false),
                ignored_directories: None,
            };
            let config = load_config(&root.root, &overrides)?;
            let mode = if *dry_run {
                ExecutionMode::DryRun
            } else {
                ExecutionMode::Apply
            };
            let request = GenerateRequest {
                vendors: vendors.clone(),
                mode,
                force: None,
                output_root: output_root.clone(),
            };
            cmd_generate(cli.output, display, &root.root, &config, &request)
        }
        Commands::Validate { root } => {
            let config = load_config(&root.root, &base_overrides(cli))?;
            let outcome = pipeline::validate(&root.root, &config)?;
            match cli.output {
                OutputFormat::Text => display.print_validation(&outcome),
                OutputFormat::Json => println!(
                    "{:#}",
                    json!({
                        "rules_checked": outcome.rules_checked,
                        "errors": outcome.errors(),
                        "issues": outcome.issues,
                        "warnings": outcome.warnings,
                    })
                ),
            }
            Ok(exit_code(outcome.has_errors()))
        }
        Commands::List { root } => {
            let config = load_config(&root.root, &base_overrides(cli))?;
            let listing = pipeline::list(&root.root, &config)?;
            match cli.output {
                OutputFormat::Text => display.print_listing(&listing),
                OutputFormat::Json => println!("{:#}", json!(listing)),
            }
            Ok(exit_code(!listing.issues.is_empty()))
        }
    }
}

fn cmd_generate(
    output: OutputFormat,
    display: &Display,
    root: &Path,
    config: &SteeringConfig,
    request: &GenerateRequest,
) -> Result<ExitCode, PipelineError> {
    let outcome = match pipeline::generate(root, config, request) {
        Ok(outcome) => outcome,
        Err(PipelineError::Execute(ExecuteError::Conflicts(conflicts))) => {
            match output {
                OutputFormat::Text => {
                    display.print_conflicts(&conflicts);
                    display.print_error(&format!(
                        "{} unresolved conflict(s); nothing was written",
                        conflicts.len()
                    ));
                }
                OutputFormat::Json => println!(
                    "{:#}",
                    json!({
                        "error": { "code": "CONFLICT", "message": "unresolved conflicts; nothing was written" },
                        "conflicts": conflicts,
                    })
                ),
            }
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err),
    };

    match output {
        OutputFormat::Text => display.print_generate(&outcome),
        OutputFormat::Json => println!(
            "{:#}",
            json!({
                "vendors": outcome.vendors,
                "blocked": outcome.is_blocked(),
                "changes": outcome.report.changes(),
                "report": outcome.report,
                "issues": outcome.issues,
            })
        ),
    }
    Ok(exit_code(outcome.is_blocked()))
}

fn base_overrides(cli: &Cli) -> CliOverrides {
    CliOverrides {
        config_path: cli.config.clone(),
        ..CliOverrides::default()
    }
}

fn load_config(root: &Path, overrides: &CliOverrides) -> Result<SteeringConfig, PipelineError> {
    let config = SteeringConfig::load(root, Some(overrides))?;
    tracing::debug!(root = %root.display(), ?config, "configuration loaded");
    Ok(config)
}

fn exit_code(blocked: bool) -> ExitCode {
    if blocked {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn report_error(output: OutputFormat, display: &Display, err: &PipelineError) {
    match output {
        OutputFormat::Text => display.print_coded_error(err.error_code(), &err.to_string()),
        OutputFormat::Json => println!(
            "{:#}",
            json!({ "error": { "code": err.error_code(), "message": err.to_string() } })
        ),
    }
}
