//! # Logging Utilities
//!
//! `tracing`-based logging setup shared by the Tracewalk binaries.
//!
//! Log lines go to stderr so they never interleave with trace output on
//! stdout. Configuration comes from the environment:
//!
//! - `RUST_LOG`: level filter (e.g. `debug`, `tracewalk_core=trace`)
//! - `TRACEWALK_LOG_FORMAT`: `pretty` (default) or `json`
//! - `TRACEWALK_LOG_FILE`: optional path; adds a daily-rolling file output
//!
//! ```rust,no_run
//! use tracewalk_utils::init_logging;
//!
//! init_logging().expect("Failed to initialize logging");
//! tracing::info!("ready");
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, io};

use tracing::Level;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat
{
    /// Human-readable format (default for development)
    Pretty,
    /// JSON format for machine consumption
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

/// Initialize logging from the environment.
///
/// Level comes from `RUST_LOG` (default `info`), format from
/// `TRACEWALK_LOG_FORMAT`, and an optional file output from
/// `TRACEWALK_LOG_FILE`.
///
/// ## Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> Result<(), LoggingError>
{
    let format = env::var("TRACEWALK_LOG_FORMAT")
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

/// Initialize logging with an explicit level and format, bypassing
/// `RUST_LOG` unless it carries module-specific filters.
///
/// ## Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging_with_level(level: LogLevel, format: LogFormat) -> Result<(), LoggingError>
{
    init_logging_internal(format, level.into())
}

fn init_logging_internal(format: LogFormat, default_level: Level) -> Result<(), LoggingError>
{
    // RUST_LOG can refine the default with module-specific directives.
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));

    let mut layers = vec![output_layer(format, io::stderr as fn() -> io::Stderr, true, filter())];

    if let Some(file_path) = env::var("TRACEWALK_LOG_FILE").ok().map(PathBuf::from) {
        let appender = tracing_appender::rolling::daily(
            file_path.parent().unwrap_or(Path::new(".")),
            file_path.file_name().unwrap_or_default(),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        // The worker guard must outlive every log call; logging stays on
        // until process exit, so leak it.
        std::mem::forget(guard);
        layers.push(output_layer(format, non_blocking, false, filter()));
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}

/// One output of the subscriber: a fully configured fmt layer writing to
/// `writer`. Console and file outputs differ only in writer and ANSI.
fn output_layer<W>(format: LogFormat, writer: W, ansi: bool, filter: EnvFilter) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_writer(writer)
        .with_ansi(ansi);

    match format {
        LogFormat::Pretty => base.with_filter(filter).boxed(),
        LogFormat::Json => base
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
    /// A global subscriber was already installed.
    #[error("failed to install log subscriber: {0}")]
    AlreadyInitialized(String),
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn log_format_parses_names_and_aliases()
    {
        assert_eq!(LogFormat::from_str("pretty"), Ok(LogFormat::Pretty));
        assert_eq!(LogFormat::from_str("DEV"), Ok(LogFormat::Pretty));
        assert_eq!(LogFormat::from_str("json"), Ok(LogFormat::Json));
        assert_eq!(LogFormat::from_str("production"), Ok(LogFormat::Json));
        assert!(LogFormat::from_str("yaml").is_err());
    }

    #[test]
    fn log_level_parses_names_and_aliases()
    {
        assert_eq!(LogLevel::from_str("err"), Ok(LogLevel::Error));
        assert_eq!(LogLevel::from_str("warning"), Ok(LogLevel::Warn));
        assert_eq!(LogLevel::from_str("Info"), Ok(LogLevel::Info));
        assert_eq!(LogLevel::from_str("dbg"), Ok(LogLevel::Debug));
        assert_eq!(LogLevel::from_str("trace"), Ok(LogLevel::Trace));
        assert!(LogLevel::from_str("verbose").is_err());
    }

    #[test]
    fn log_level_maps_onto_tracing_levels()
    {
        for (ours, theirs) in [
            (LogLevel::Error, Level::ERROR),
            (LogLevel::Warn, Level::WARN),
            (LogLevel::Info, Level::INFO),
            (LogLevel::Debug, Level::DEBUG),
            (LogLevel::Trace, Level::TRACE),
        ] {
            assert_eq!(Level::from(ours), theirs);
        }
    }
}
