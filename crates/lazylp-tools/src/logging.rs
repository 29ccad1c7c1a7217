//! Structured logging setup.

use std::env;
use std::fs::{File, OpenOptions};
use std::io;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Errors raised while installing the global subscriber.
#[derive(Debug)]
pub enum LoggingError {
    InvalidFilter(String),
    InvalidFormat(String),
    LogFile(io::Error),
    Init(String),
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggingError::InvalidFilter(msg) => write!(f, "Invalid log filter: {msg}"),
            LoggingError::InvalidFormat(format) => write!(
                f,
                "Invalid LAZYLP_LOG_FORMAT '{format}' (expected 'json' or 'pretty')"
            ),
            LoggingError::LogFile(err) => write!(f, "Failed to open log file: {err}"),
            LoggingError::Init(msg) => write!(f, "Failed to initialize logging: {msg}"),
        }
    }
}

impl std::error::Error for LoggingError {}

fn open_log_file(path: &str) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(LoggingError::LogFile)
}

fn map_init_err<E: std::fmt::Display>(err: E) -> LoggingError {
    LoggingError::Init(err.to_string())
}

/// Build the level filter from an explicit level or `LAZYLP_TRACE`.
///
/// Defaults to `off` when neither is set.
pub fn level_filter(level: Option<&str>) -> Result<EnvFilter, LoggingError> {
    let level_value = level
        .map(str::to_string)
        .or_else(|| env::var("LAZYLP_TRACE").ok())
        .unwrap_or_else(|| "off".to_string());

    if level_value.eq_ignore_ascii_case("off") {
        Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()))
    } else {
        EnvFilter::try_new(&level_value).map_err(|err| LoggingError::InvalidFilter(err.to_string()))
    }
}

/// Enable structured logging for lazylp.
///
/// Output goes to stderr, formatted per `LAZYLP_LOG_FORMAT` (`pretty` or
/// `json`), and is also appended to `LAZYLP_LOG_FILE` when set. Returns
/// `false` if a global subscriber is already configured.
pub fn enable_logging(level: Option<&str>) -> Result<bool, LoggingError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let filter = level_filter(level)?;
    let format = env::var("LAZYLP_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let log_file = env::var("LAZYLP_LOG_FILE").ok();
    let use_json = format.eq_ignore_ascii_case("json");

    if !use_json && !format.eq_ignore_ascii_case("pretty") {
        return Err(LoggingError::InvalidFormat(format));
    }

    if use_json {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .json();
        let base = tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer);
        if let Some(path) = log_file {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(open_log_file(&path)?)
                .with_ansi(false)
                .json();
            base.with(file_layer).try_init().map_err(map_init_err)?;
        } else {
            base.try_init().map_err(map_init_err)?;
        }
    } else {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .pretty();
        let base = tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer);
        if let Some(path) = log_file {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(open_log_file(&path)?)
                .with_ansi(false)
                .pretty();
            base.with(file_layer).try_init().map_err(map_init_err)?;
        } else {
            base.try_init().map_err(map_init_err)?;
        }
    }

    Ok(true)
}
