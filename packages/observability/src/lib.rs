//! # Observability
//!
//! Centralized logging setup for the Triqueta client workspace.
//!
//! Binaries call [`init_with_config`] once at startup and use the standard
//! `tracing` macros everywhere else. Library crates never install a
//! subscriber themselves.
//!
//! Two sinks are available:
//!
//! - a JSONL file (one structured entry per line, append-only), enabled by
//!   setting [`LogConfig::log_path`]
//! - a compact human-readable stderr stream, enabled by
//!   [`LogConfig::also_stderr`]
//!
//! Field values whose name looks like a credential (`access_token`,
//! `password`, ...) are redacted before they reach the file.
//!
//! ```rust,ignore
//! observability::init_with_config(observability::LogConfig {
//!     service_name: "cli".into(),
//!     default_level: "debug".into(),
//!     log_path: Some("/tmp/cli.jsonl".into()),
//!     also_stderr: true,
//! });
//! ```

mod json_layer;
mod sink;

pub use json_layer::{JsonLayer, LogEntry};
pub use sink::{CentralLogWriter, WriterFactory};

use std::io;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Name of the service (e.g., "cli").
    /// Included in every log line for filtering.
    pub service_name: String,

    /// Default log level filter (e.g., "debug", "info", "warn").
    /// Can be overridden by `RUST_LOG` environment variable.
    pub default_level: String,

    /// Optional JSONL log file. No file sink is installed when unset.
    pub log_path: Option<PathBuf>,

    /// Also emit logs to stderr.
    pub also_stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "unknown".into(),
            default_level: "info".into(),
            log_path: None,
            also_stderr: false,
        }
    }
}

/// Initialize logging with default settings: stderr only, `info` level.
pub fn init(service_name: &str) {
    init_with_config(LogConfig {
        service_name: service_name.into(),
        also_stderr: true,
        ..Default::default()
    });
}

/// Initialize logging with custom configuration.
///
/// Failures (unwritable log file, subscriber already installed) are reported
/// on stderr and degrade to whatever sinks could be set up; logging problems
/// never abort the host process.
pub fn init_with_config(config: LogConfig) {
    if let Err(e) = try_init_with_config(&config) {
        eprintln!("observability: {}", e);
    }
}

/// Fallible variant of [`init_with_config`].
pub fn try_init_with_config(config: &LogConfig) -> io::Result<()> {
    let (file_layer, file_error) = match &config.log_path {
        Some(path) => match CentralLogWriter::new(path) {
            Ok(writer) => (
                Some(
                    JsonLayer::new(config.service_name.clone(), WriterFactory::new(writer))
                        .with_filter(env_filter(&config.default_level)),
                ),
                None,
            ),
            Err(e) => (
                None,
                Some(io::Error::new(
                    e.kind(),
                    format!("failed to open log file {}: {}", path.display(), e),
                )),
            ),
        },
        None => (None, None),
    };

    let stderr_layer = config.also_stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .compact()
            .with_writer(io::stderr)
            .with_filter(env_filter(&config.default_level))
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    if let Some(path) = &config.log_path {
        tracing::debug!(
            service = %config.service_name,
            log_path = %path.display(),
            "observability initialized"
        );
    }

    match file_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Re-export tracing macros for convenience.
pub use tracing::{debug, error, info, instrument, trace, warn};

/// Re-export Level for advanced filtering.
pub use tracing::Level;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.service_name, "unknown");
        assert_eq!(config.default_level, "info");
        assert!(config.log_path.is_none());
        assert!(!config.also_stderr);
    }
}
