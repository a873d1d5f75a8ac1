//! Logging setup utilities for the relay server and the terminal client.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the calling package and the binary. It can be
/// overridden with the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `package_name` - The package whose modules should log (e.g., `env!("CARGO_PKG_NAME")`)
/// * `binary_name` - The name of the binary (e.g., "tebak-server", "tebak-client")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use tebak_shared::logger::setup_logger;
///
/// setup_logger(env!("CARGO_PKG_NAME"), "tebak-server", "debug");
/// ```
pub fn setup_logger(package_name: &str, binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(package_name, binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the filter directive used when `RUST_LOG` is not set.
///
/// Cargo names use dashes while tracing targets use underscores, so both
/// names are normalized.
pub fn default_filter(package_name: &str, binary_name: &str, default_log_level: &str) -> String {
    format!(
        "{}={},{}={},tower_http={}",
        package_name.replace('-', "_"),
        default_log_level,
        binary_name.replace('-', "_"),
        default_log_level,
        default_log_level
    )
}
