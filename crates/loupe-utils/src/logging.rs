//! # Logging Utilities
//!
//! Logging infrastructure for Loupe using `tracing`.
//!
//! Supports pretty (development) and JSON (production) output, environment
//! variable configuration, and an optional file sink for hosts whose UI owns
//! stdout (a locals view embedded in a TUI/GUI frontend must not have log
//! lines interleaved with its drawing).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use loupe_utils::init_logging;
//!
//! init_logging().expect("Failed to initialize logging");
//!
//! tracing::info!("locals view attached");
//! tracing::debug!("debug information");
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: level filter (e.g. `debug`, `loupe_core=trace`)
//! - `LOUPE_LOG_FORMAT`: output format (`json` or `pretty`, default: `pretty`)
//! - `LOUPE_LOG_FILE`: optional path to a log file (console-only if unset)

use std::path::PathBuf;
use std::str::FromStr;
use std::{env, io};

use chrono::Utc;
use tracing::Level;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat
{
    /// Pretty-printed, human-readable format (default for development)
    Pretty,
    /// JSON format (default for production)
    Json,
}

impl FromStr for LogFormat
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "pretty" | "dev" | "development" => Ok(LogFormat::Pretty),
            "json" | "prod" | "production" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {s}. Use 'pretty' or 'json'")),
        }
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel
{
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level (default)
    Info,
    /// Debug level
    Debug,
    /// Trace level (most verbose)
    Trace,
}

impl From<LogLevel> for Level
{
    fn from(level: LogLevel) -> Self
    {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

impl FromStr for LogLevel
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "error" | "err" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(format!(
                "Unknown log level: {s}. Use 'error', 'warn', 'info', 'debug', or 'trace'"
            )),
        }
    }
}

/// Initialize logging with default settings.
///
/// Reads configuration from `RUST_LOG`, `LOUPE_LOG_FORMAT`, and
/// `LOUPE_LOG_FILE`.
///
/// ## Errors
///
/// Returns an error if logging is already initialized or file logging fails
/// (when `LOUPE_LOG_FILE` is set).
pub fn init_logging() -> Result<(), LoggingError>
{
    let format = env::var("LOUPE_LOG_FORMAT")
        .ok()
        .and_then(|s| LogFormat::from_str(&s).ok())
        .unwrap_or(LogFormat::Pretty);

    let default_level = env::var("RUST_LOG")
        .unwrap_or_else(|_| "info".to_string())
        .parse::<LogLevel>()
        .map(Into::into)
        .unwrap_or(Level::INFO);

    init_logging_internal(format, default_level)
}

/// Initialize logging with an explicit level and format.
///
/// ## Errors
///
/// Returns an error if logging is already initialized or file logging fails.
pub fn init_logging_with_level(level: LogLevel, format: LogFormat) -> Result<(), LoggingError>
{
    init_logging_internal(format, level.into())
}

/// Initialize file-only logging for hosts whose UI owns stdout.
///
/// Writes to `path` and nothing else, so log lines never interleave with a
/// frontend's drawing. Level priority: explicit `level` argument, then
/// `RUST_LOG`, then `INFO`.
///
/// ## Errors
///
/// Returns an error if logging is already initialized or the file cannot be
/// created.
pub fn init_logging_to_file(path: PathBuf, level: Option<LogLevel>) -> Result<(), LoggingError>
{
    let env_filter = if let Some(level) = level {
        EnvFilter::new(Level::from(level).to_string())
    } else if let Ok(rust_log) = env::var("RUST_LOG") {
        EnvFilter::try_new(&rust_log).unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()))
    } else {
        EnvFilter::new(Level::INFO.to_string())
    };

    let file_appender = tracing_appender::rolling::never(
        path.parent().unwrap_or(&PathBuf::from(".")),
        path.file_name().unwrap_or_default(),
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the writer guard alive for the lifetime of the process.
    std::mem::forget(guard);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_ansi(false) // No ANSI in files
        .with_filter(env_filter);

    Registry::default().with(file_layer).init();
    Ok(())
}

/// Initialize file-only logging at the default location, returning the path.
///
/// The file is `$HOME/.loupe/<YYYY-MM-DD>-loupe.log` (or under `/tmp` when
/// `HOME` is unset), so each day's session starts a fresh file.
///
/// ## Errors
///
/// Returns an error if logging is already initialized or the log directory
/// cannot be created.
pub fn init_logging_to_default_file(level: Option<LogLevel>) -> Result<PathBuf, LoggingError>
{
    let log_file = default_log_file()?;
    init_logging_to_file(log_file.clone(), level)?;
    Ok(log_file)
}

/// Default log file path with a date prefix, creating the directory.
fn default_log_file() -> Result<PathBuf, LoggingError>
{
    let today = Utc::now().format("%Y-%m-%d");
    if let Ok(home) = env::var("HOME") {
        let loupe_dir = PathBuf::from(home).join(".loupe");
        std::fs::create_dir_all(&loupe_dir).map_err(LoggingError::FileError)?;
        Ok(loupe_dir.join(format!("{today}-loupe.log")))
    } else {
        Ok(PathBuf::from("/tmp").join(format!("{today}-loupe.log")))
    }
}

/// Internal initialization function
#[allow(clippy::unnecessary_wraps)]
fn init_logging_internal(format: LogFormat, default_level: Level) -> Result<(), LoggingError>
{
    // RUST_LOG can override the default level with more specific filters
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));

    let log_file = env::var("LOUPE_LOG_FILE").ok().map(PathBuf::from);

    match format {
        LogFormat::Pretty => {
            let console_layer = fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_thread_names(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(true)
                .with_writer(io::stdout)
                .with_filter(env_filter.clone());

            if let Some(file_path) = log_file {
                let file_appender = tracing_appender::rolling::daily(
                    file_path.parent().unwrap_or(&PathBuf::from(".")),
                    file_path.file_name().unwrap_or_default(),
                );
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                std::mem::forget(guard);
                let file_layer = fmt::layer()
                    .with_writer(non_blocking)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false) // No ANSI in files
                    .with_filter(env_filter);

                Registry::default().with(console_layer).with(file_layer).init();
            } else {
                Registry::default().with(console_layer).init();
            }
        }
        LogFormat::Json => {
            let console_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_thread_names(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(ChronoUtc::rfc_3339())
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(io::stdout)
                .with_filter(env_filter.clone());

            if let Some(file_path) = log_file {
                let file_appender = tracing_appender::rolling::daily(
                    file_path.parent().unwrap_or(&PathBuf::from(".")),
                    file_path.file_name().unwrap_or_default(),
                );
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                std::mem::forget(guard);
                let file_layer = fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_filter(env_filter);

                Registry::default().with(console_layer).with(file_layer).init();
            } else {
                Registry::default().with(console_layer).init();
            }
        }
    }

    Ok(())
}

/// Logging initialization error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError
{
    /// Invalid log format
    #[error("Invalid log format: {0}")]
    InvalidFormat(String),

    /// Invalid log level
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    /// Failed to initialize logging
    #[error("Failed to initialize logging: {0}")]
    InitializationFailed(String),

    /// File logging error
    #[error("File logging error: {0}")]
    FileError(#[from] io::Error),
}
