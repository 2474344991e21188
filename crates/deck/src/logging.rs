//! Logging setup

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Initialize the tracing subscriber.
///
/// Filter resolution order: `WORKDECK_LOG_FILTER`, then `RUST_LOG`, then the
/// default. Output goes to stderr so command output stays pipeable.
pub fn init_logging() {
    let filter = std::env::var("WORKDECK_LOG_FILTER")
        .ok()
        .and_then(|value| EnvFilter::try_new(value).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
