//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize the steering tracing/logging system.
///
/// Reads the `STEERING_LOG` environment variable for per-module log levels.
/// Format: `STEERING_LOG=steering_engine::scanner=debug,steering_engine::plan=trace`
///
/// Falls back to `steering=info` (`steering=debug` when `verbose`) if
/// `STEERING_LOG` is not set or is invalid. Logs go to stderr so that JSON
/// output on stdout stays machine-readable.
///
/// Idempotent; only the first call installs a subscriber.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let fallback = if verbose { "steering=debug" } else { "steering=info" };
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(fallback));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(verbose)
                    .with_file(verbose)
                    .with_line_number(verbose),
            )
            .with(filter)
            .try_init();
    });
}
