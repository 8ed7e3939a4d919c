//! Tracing initialisation helpers for tests.
//!
//! Call [`init_test_tracing`] at the top of any test that should show log
//! output when run with `RUST_LOG` set. The subscriber is installed at most
//! once per process.

use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber honouring `RUST_LOG` (default `warn`).
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
