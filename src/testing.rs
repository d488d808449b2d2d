//! Test tooling shared by unit and integration tests.

use tracing_subscriber::EnvFilter;

/// Install a `tracing` subscriber for tests.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Safe to call
/// from every test; only the first call installs the subscriber.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}
