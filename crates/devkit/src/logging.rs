//! Logging setup for binaries.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "warn";

/// Initialise tracing-based logging on stderr.
///
/// Uses `RUST_LOG` if set, otherwise [`DEFAULT_FILTER`].
pub fn init_logging() {
    init_logging_with(DEFAULT_FILTER);
}

/// Initialise logging with `default` as the filter when `RUST_LOG` is unset.
///
/// Returns `false` if a subscriber was already installed.
pub fn init_logging_with(default: &str) -> bool {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(default)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
