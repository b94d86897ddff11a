//! Tracing initialization for tests
//!
//! Call `init_test_tracing()` at the top of a test to get log output
//! when it fails. Guarded by `once_cell` so repeated calls across a
//! test binary are harmless; the filter honors `RUST_LOG` and defaults
//! to `debug` for the workspace crates.

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

static TRACING: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("domain_ledger=debug,domain_tax=debug,infra_mem=debug")
    });

    // try_init: another harness may already have installed a subscriber
    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
});

/// Installs the test tracing subscriber exactly once
pub fn init_test_tracing() {
    Lazy::force(&TRACING);
}
