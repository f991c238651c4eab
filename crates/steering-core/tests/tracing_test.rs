//! Tests for the steering tracing setup.

use std::sync::Mutex;

use steering_core::tracing::init_tracing;

static TRACING_MUTEX: Mutex<()> = Mutex::new(());

/// A per-module STEERING_LOG filter is accepted.
#[test]
fn test_steering_log_filter_accepted() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("STEERING_LOG", "steering_engine::scanner=debug,steering_engine::plan=warn");
    init_tracing(false);
    std::env::remove_var("STEERING_LOG");
}

/// Repeated initialization is a no-op.
#[test]
fn test_init_tracing_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing(true);
    init_tracing(false);
    tracing::info!("still alive");
}
