//! Logging setup
//!
//! Installs a tracing subscriber driven by [`LoggingConfig`]. `RUST_LOG`
//! takes precedence over the configured level. Output goes to stderr so
//! command output on stdout stays machine-readable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Install the global subscriber
pub fn init(config: &LoggingConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let registry = tracing_subscriber::registry().with(filter);

    match config.format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        _ => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    }
}

/// Default filter: the configured level for this crate, warnings elsewhere
pub fn filter_directive(config: &LoggingConfig) -> String {
    format!("warn,catalog={}", config.level.trim().to_lowercase())
}
