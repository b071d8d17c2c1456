//! Tracing subscriber setup for the `dlo` binary
//!
//! Library code only emits events; installing a subscriber is the binary's
//! job. Output goes to stderr so stdout stays machine-readable.

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "DLO_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber
///
/// `verbose` raises the crate's level to debug. Otherwise `DLO_LOG` is
/// read, falling back to `warn`.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("dlo=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    // A subscriber may already be set when embedded; keep the existing one
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time()
        .try_init();
}

/// Subscriber for unit tests, captured by the test harness
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("dlo=debug"))
        .with_test_writer()
        .try_init();
}
