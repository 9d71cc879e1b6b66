//! Logging initialization and configuration.
//!
//! Uses the `tracing` ecosystem for structured logging with support for
//! both human-readable and JSON output formats.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use yoot_core::LoggingConfig;

/// Initialize the logging subsystem.
///
/// # Arguments
///
/// * `level` - Default level filter when `RUST_LOG` is not set.
/// * `json_format` - If true, outputs structured JSON logs; otherwise pretty-printed.
///
/// # Notes
///
/// - Log output goes to stderr (stdout is reserved for URLs and attributes)
/// - The RUST_LOG environment variable can override the log level
pub fn init(level: &str, json_format: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Initialize logging from the `[logging]` config section, with CLI
/// overrides.
pub fn init_from_config(config: &LoggingConfig, verbose_override: bool, json_logs_override: bool) {
    let level = effective_level(config, verbose_override);
    let json_format = json_logs_override || config.format == "json";
    init(level, json_format);
}

/// `--verbose` raises the level to at least `debug`.
fn effective_level(config: &LoggingConfig, verbose: bool) -> &str {
    match config.level.as_str() {
        "trace" => "trace",
        _ if verbose => "debug",
        level => level,
    }
}
