//! Logging setup for the `sift` binary
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=sift::find=trace` - module-level filtering
//!
//! Logs are also written to `~/.config/sift/logs/sift.log` with daily rotation.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Daily-rotated file name prefix inside the logs dir
const LOG_FILE: &str = "sift.log";

/// Initialize tracing subscriber with console and file logging
///
/// Console output goes to stderr so reports on stdout stay machine-readable.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level so every find/replace is traceable
    let logs_dir = crate::config_paths::ensure_logs_dir();
    let file_layer = match &logs_dir {
        Ok(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::debug!(
        config = ?crate::config_paths::config_file(),
        logs = ?logs_dir.ok(),
        "sift {} started",
        env!("CARGO_PKG_VERSION")
    );
}
