//! Logging initialization for docstat binaries.
//!
//! Thin wrapper over the `observability` crate so every binary configures
//! logging the same way: JSONL to the shared log file plus compact stderr.

use observability::LogConfig;
use std::path::PathBuf;

/// Initialize logging for a docstat process.
///
/// * `service_name` - included in every JSONL line
/// * `level` - default filter, overridden by `RUST_LOG`
/// * `log_path` - JSONL sink; `None` logs to stderr only
pub fn init_logging(service_name: &str, level: &str, log_path: Option<PathBuf>) {
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
