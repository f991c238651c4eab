use console::{style, Style};
use steering_core::errors::ConflictError;
use steering_core::Tier;
use steering_engine::pipeline::{GenerateOutcome, Listing};
use steering_engine::plan::{ExecutionMode, Outcome, Report};
use steering_engine::validation::{Severity, ValidationIssue, ValidationOutcome};

pub struct Display;

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

impl Display {
    pub fn new() -> Self {
        Self
    }

    pub fn print_header(&self, text: &str) {
        println!("{}", style(text).bold().cyan());
        println!("{}", style("═".repeat(60)).dim());
    }

    pub fn print_error(&self, message: &str) {
        eprintln!("{} {}", style("error:").red().bold(), message);
    }

    pub fn print_coded_error(&self, code: &str, message: &str) {
        eprintln!("{} {}", style(format!("error[{code}]:")).red().bold(), message);
    }

    pub fn print_warning(&self, message: &str) {
        println!("{} {}", style("warning:").yellow().bold(), message);
    }

    pub fn print_generate(&self, outcome: &GenerateOutcome) {
        let vendors: Vec<&str> = outcome.vendors.iter().map(|v| v.id()).collect();
        let title = match outcome.report.mode {
            ExecutionMode::DryRun => format!("steering generate (dry run): {}", vendors.join(", ")),
            ExecutionMode::Apply => format!("steering generate: {}", vendors.join(", ")),
        };
        self.print_header(&title);
        self.print_report(&outcome.report);
        self.print_issues(&outcome.issues);
    }

    pub fn print_report(&self, report: &Report) {
        for entry in report.entries.iter().filter(|e| e.outcome != Outcome::Unchanged) {
            println!(
                "  {}  {:<8}  {}",
                self.outcome_style(entry.outcome)
                    .apply_to(format!("{:<9}", entry.outcome.to_string())),
                entry.vendor.id(),
                entry.path.display()
            );
        }

        for warning in &report.warnings {
            self.print_warning(warning);
        }
        self.print_conflicts(&report.conflicts);

        println!();
        println!(
            "{} created, {} updated, {} removed, {} unchanged, {} conflict(s)",
            report.count(Outcome::Create),
            report.count(Outcome::Update),
            report.count(Outcome::Remove),
            report.count(Outcome::Unchanged),
            report.conflicts.len()
        );
        if report.mode == ExecutionMode::DryRun {
            println!("{}", style("Dry run: nothing was written.").dim());
        }
    }

    pub fn print_conflicts(&self, conflicts: &[ConflictError]) {
        for conflict in conflicts {
            let hint = if conflict.is_forceable() {
                style(" (use --force to overwrite)").dim().to_string()
            } else {
                String::new()
            };
            println!("{} {}{}", style("conflict:").red().bold(), conflict, hint);
        }
    }

    pub fn print_validation(&self, outcome: &ValidationOutcome) {
        self.print_issues(&outcome.issues);
        for warning in &outcome.warnings {
            self.print_warning(warning);
        }

        let warnings = outcome.issues.len() - outcome.errors();
        let summary = format!(
            "{} rule(s) checked, {} error(s), {} warning(s)",
            outcome.rules_checked,
            outcome.errors(),
            warnings
        );
        if outcome.has_errors() {
            println!("{}", style(summary).red());
        } else {
            println!("{}", style(summary).green());
        }
    }

    pub fn print_issues(&self, issues: &[ValidationIssue]) {
        for issue in issues {
            let label = match issue.severity {
                Severity::Error => style("error").red().bold(),
                Severity::Warning => style("warning").yellow().bold(),
            };
            println!(
                "{label} {}: {} {}",
                style(issue.path.display()).bold(),
                issue.message,
                style(format!("[{}]", issue.kind)).dim()
            );
        }
    }

    pub fn print_listing(&self, listing: &Listing) {
        for tier in Tier::ALL {
            let rules: Vec<_> = listing.by_tier(tier).collect();
            self.print_header(&format!("{} rules ({})", tier_title(tier), rules.len()));
            if rules.is_empty() {
                println!("  {}", style("none").dim());
            }
            for rule in rules {
                println!("  {}  {}", style(&rule.name).bold(), style(rule.path.display()).dim());
                if let Some(description) = &rule.description {
                    println!("      {description}");
                }
            }
            println!();
        }

        self.print_issues(&listing.issues);
        for warning in &listing.warnings {
            self.print_warning(warning);
        }
    }

    fn outcome_style(&self, outcome: Outcome) -> Style {
        match outcome {
            Outcome::Create => Style::new().green(),
            Outcome::Update => Style::new().cyan(),
            Outcome::Remove => Style::new().magenta(),
            Outcome::Skipped => Style::new().red(),
            Outcome::Unchanged => Style::new().dim(),
        }
    }
}

fn tier_title(tier: Tier) -> &'static str {
    match tier {
        Tier::Auto => "Auto",
        Tier::Contextual => "Contextual",
        Tier::Local => "Local",
    }
}
