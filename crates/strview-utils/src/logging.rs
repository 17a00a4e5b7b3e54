//! # Logging Utilities
//!
//! Logging infrastructure for strview using `tracing`.
//!
//! The printer runs inside a host debugger, so there are two ways to set it up:
//!
//! - [`init_logging`] / [`init_logging_with_level`]: console output (plus an optional
//!   rolling file), for standalone tools and tests that drive the printer directly.
//! - [`init_logging_for_plugin`]: file-only output, for when the printer is loaded into
//!   a debugger session and stdout belongs to the host.
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level filter (e.g., `RUST_LOG=debug`, `RUST_LOG=strview_core=trace`)
//! - `STRVIEW_LOG_FORMAT`: Set output format (`json` or `pretty`, default: `pretty`)
//! - `STRVIEW_LOG_FILE`: Optional path to a log file (console logging only)
//!
//! ## Example
//!
//! ```rust,no_run
//! use strview_utils::{LogFormat, LogLevel, init_logging_with_level};
//!
//! init_logging_with_level(LogLevel::Debug, LogFormat::Pretty).expect("Failed to initialize logging");
//! tracing::debug!("printer registry ready");
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, io};

use chrono::Utc;
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Environment variable selecting the output format.
pub const LOG_FORMAT_ENV: &str = "STRVIEW_LOG_FORMAT";

/// Environment variable naming an additional log file for console logging.
pub const LOG_FILE_ENV: &str = "STRVIEW_LOG_FILE";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat
{
    /// Pretty-printed, human-readable format (default)
    Pretty,
    /// JSON format
    Json,
}

impl FromStr for LogFormat
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "dev" | "development" => Ok(LogFormat::Pretty),
            "json" | "prod" | "production" => Ok(LogFormat::Json),
            _ => Err(LoggingError::InvalidFormat(s.to_string())),
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
    /// Trace level (most verbose; logs every match decision and failed read)
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
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.trim().to_lowercase().as_str() {
            "error" | "err" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(LoggingError::InvalidLevel(s.to_string())),
        }
    }
}

/// Initialize console logging with default settings
///
/// Reads `RUST_LOG`, `STRVIEW_LOG_FORMAT` and `STRVIEW_LOG_FILE`.
///
/// ## Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging() -> Result<(), LoggingError>
{
    let format = env::var(LOG_FORMAT_ENV)
        .ok()
        .and_then(|s| LogFormat::from_str(&s).ok())
        .unwrap_or(LogFormat::Pretty);

    let default_level = env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse::<LogLevel>().ok())
        .map_or(Level::INFO, Into::into);

    init_console(format, default_level)
}

/// Initialize console logging with explicit level and format
///
/// `RUST_LOG` still takes precedence when it holds a valid filter directive.
///
/// ## Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging_with_level(level: LogLevel, format: LogFormat) -> Result<(), LoggingError>
{
    init_console(format, level.into())
}

/// Initialize file-only logging for use inside a host debugger
///
/// Nothing is written to stdout or stderr. The file is
/// `~/.strview/YYYY-MM-DD-strview.log`, or `/tmp/YYYY-MM-DD-strview.log` when `HOME`
/// is not set. The returned path is where the log ends up.
///
/// When `level` is `None`, `RUST_LOG` is used, falling back to `INFO`.
///
/// ## Errors
///
/// Returns an error if the log directory can't be created or a global subscriber is
/// already installed.
pub fn init_logging_for_plugin(level: Option<LogLevel>) -> Result<PathBuf, LoggingError>
{
    let dir = env::var("HOME").map_or_else(|_| PathBuf::from("/tmp"), |home| PathBuf::from(home).join(".strview"));
    init_logging_in_dir(&dir, level)
}

/// Same as [`init_logging_for_plugin`], writing the dated log file into `dir`
///
/// `dir` is created if it doesn't exist.
///
/// ## Errors
///
/// Returns an error if `dir` can't be created or a global subscriber is already
/// installed.
pub fn init_logging_in_dir(dir: &Path, level: Option<LogLevel>) -> Result<PathBuf, LoggingError>
{
    std::fs::create_dir_all(dir)?;
    let log_file = dir.join(format!("{}-strview.log", Utc::now().format("%Y-%m-%d")));

    let env_filter = match level {
        Some(level) => EnvFilter::new(Level::from(level).to_string()),
        None => env::var("RUST_LOG")
            .ok()
            .and_then(|directive| EnvFilter::try_new(directive).ok())
            .unwrap_or_else(|| EnvFilter::new(Level::INFO.to_string())),
    };

    let (writer, guard) = file_writer(&log_file, false);
    // The host owns the process lifetime; the plugin never gets a chance to flush on exit.
    std::mem::forget(guard);

    Registry::default()
        .with(file_layer(writer, LogFormat::Pretty, env_filter))
        .try_init()
        .map_err(|e| LoggingError::InitializationFailed(e.to_string()))?;

    Ok(log_file)
}

fn init_console(format: LogFormat, default_level: Level) -> Result<(), LoggingError>
{
    let env_filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));
    let console = console_layer(format, env_filter());

    let result = if let Some(path) = env::var(LOG_FILE_ENV).ok().map(PathBuf::from) {
        let (writer, guard) = file_writer(&path, true);
        std::mem::forget(guard);
        Registry::default()
            .with(console)
            .with(file_layer(writer, format, env_filter()))
            .try_init()
    } else {
        Registry::default().with(console).try_init()
    };

    result.map_err(|e| LoggingError::InitializationFailed(e.to_string()))
}

fn file_writer(path: &Path, rolling_daily: bool) -> (tracing_appender::non_blocking::NonBlocking, WorkerGuard)
{
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().unwrap_or_default();
    let appender = if rolling_daily {
        tracing_appender::rolling::daily(dir, file_name)
    } else {
        // The date is already part of the file name.
        tracing_appender::rolling::never(dir, file_name)
    };
    tracing_appender::non_blocking(appender)
}

fn console_layer<S>(format: LogFormat, filter: EnvFilter) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'span> LookupSpan<'span> + 'static,
{
    let layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_writer(io::stdout);

    match format {
        LogFormat::Pretty => layer.with_ansi(true).with_filter(filter).boxed(),
        LogFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(filter)
            .boxed(),
    }
}

fn file_layer<S, W>(writer: W, format: LogFormat, filter: EnvFilter) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'span> LookupSpan<'span> + 'static,
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_ansi(false);

    match format {
        LogFormat::Pretty => layer.with_filter(filter).boxed(),
        LogFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(filter)
            .boxed(),
    }
}

/// Logging initialization error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError
{
    /// Invalid log format
    #[error("Invalid log format: {0}. Use 'pretty' or 'json'")]
    InvalidFormat(String),

    /// Invalid log level
    #[error("Invalid log level: {0}. Use 'error', 'warn', 'info', 'debug', or 'trace'")]
    InvalidLevel(String),

    /// Failed to install the global subscriber
    #[error("Failed to initialize logging: {0}")]
    InitializationFailed(String),

    /// File logging error
    #[error("File logging error: {0}")]
    FileError(#[from] io::Error),
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_log_format_from_str()
    {
        assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str(" dev ").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("prod").unwrap(), LogFormat::Json);
        assert!(matches!(LogFormat::from_str("xml"), Err(LoggingError::InvalidFormat(_))));
    }

    #[test]
    fn test_log_level_from_str()
    {
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);
        assert_eq!(LogLevel::from_str("warning").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("dbg").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert!(matches!(LogLevel::from_str("loud"), Err(LoggingError::InvalidLevel(_))));
    }

    #[test]
    fn test_log_level_to_tracing_level()
    {
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
        assert_eq!(Level::from(LogLevel::Warn), Level::WARN);
        assert_eq!(Level::from(LogLevel::Info), Level::INFO);
        assert_eq!(Level::from(LogLevel::Debug), Level::DEBUG);
        assert_eq!(Level::from(LogLevel::Trace), Level::TRACE);
    }

    #[test]
    fn test_error_messages_name_the_bad_value()
    {
        let message = LogLevel::from_str("loud").unwrap_err().to_string();
        assert!(message.contains("loud"));
    }
}
