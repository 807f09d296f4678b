//! Logging initialization.
//!
//! Thin wrapper over the observability crate: structured JSONL goes to
//! `~/.triqueta/logs/<service>.jsonl`, human-readable lines to stderr.

use crate::Paths;
use observability::LogConfig;

/// Initialize the logging system for the CLI.
///
/// * `level` - Default log level (trace, debug, info, warn, error).
///   `RUST_LOG` takes precedence when set.
pub fn init_logging(level: &str) {
    init_logging_for_service("cli", level);
}

/// Initialize logging with a custom service name.
///
/// When the home directory cannot be resolved only the stderr sink is
/// installed.
pub fn init_logging_for_service(service_name: &str, level: &str) {
    let log_path = Paths::new().ok().map(|paths| paths.log_file(service_name));

    observability::init_with_config(LogConfig {
        service_name: service_name.into(),
        default_level: parse_level(level).to_string().to_lowercase(),
        log_path,
        also_stderr: true,
    });
}

/// Parse a log level string into a tracing Level.
pub fn parse_level(level: &str) -> tracing::Level {
    match level.trim().to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" | "warning" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
