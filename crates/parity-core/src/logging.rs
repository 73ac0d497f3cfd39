//! `tracing` subscriber setup for the `parity` binary.
//!
//! Events go to stderr, pretty or as JSON lines, and optionally to an
//! appended log file in the same format. Stdout is left to the run summary.
//!
//! ```ignore
//! let config = LogConfig { level: "debug".into(), ..LogConfig::default() };
//! parity_core::logging::init_logging(&config)?;
//! ```

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::Subscriber;
use tracing_subscriber::fmt::time::SystemTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Global flag to track if logging has been initialized
static LOGGING_INITIALIZED: OnceLock<bool> = OnceLock::new();

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => f.write_str("pretty"),
            Self::Json => f.write_str("json"),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown log format: {s}. Expected one of: pretty, json")),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level filter (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG environment variable
    pub level: String,

    /// Output format (pretty or json)
    pub format: LogFormat,

    /// Optional path to log file
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file: None,
        }
    }
}

/// Error type for logging initialization
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("logging already initialized")]
    AlreadyInitialized,

    #[error("invalid log level: {0}")]
    InvalidLevel(String),

    #[error("failed to create log file: {0}")]
    FileCreate(#[from] io::Error),

    #[error("failed to set global subscriber: {0}")]
    SetSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn open_log_file(path: &Path) -> io::Result<File> {
    ensure_parent_dir(path)?;
    std::fs::OpenOptions::new().create(true).append(true).open(path)
}

/// Build the filter for a configured level.
///
/// A bare word must be a level name (`off`, `error` .. `trace`). Anything
/// with `=` or `,` is read as an `EnvFilter` directive list such as
/// `warn,parity_core=debug`.
fn level_filter(level: &str) -> Result<EnvFilter, LogError> {
    let level = level.trim();
    if level.contains(['=', ',']) {
        return EnvFilter::try_new(level)
            .map_err(|e| LogError::InvalidLevel(format!("{level} ({e})")));
    }
    let filter: LevelFilter = level
        .parse()
        .map_err(|_| LogError::InvalidLevel(level.to_string()))?;
    Ok(EnvFilter::default().add_directive(filter.into()))
}

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync>;

/// Stderr layer; ANSI colors only in pretty mode.
fn console_layer<S>(format: LogFormat) -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .with_writer(io::stderr)
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(true)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_timer(SystemTime)
            .with_writer(io::stderr)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .flatten_event(true)
            .boxed(),
    }
}

fn file_layer<S>(format: LogFormat, file: File) -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .with_writer(file)
            .with_target(true)
            .with_ansi(false)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_timer(SystemTime)
            .with_writer(file)
            .with_target(true)
            .flatten_event(true)
            .boxed(),
    }
}

/// Install the global subscriber: stderr plus the optional log file, both
/// in the configured format.
///
/// `RUST_LOG` takes precedence over `config.level`, e.g.
/// `RUST_LOG=parity_core=debug`, but `config.level` is validated either way.
/// A second call returns [`LogError::AlreadyInitialized`].
pub fn init_logging(config: &LogConfig) -> Result<(), LogError> {
    if LOGGING_INITIALIZED.get().is_some() {
        return Err(LogError::AlreadyInitialized);
    }

    let configured = level_filter(&config.level)?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or(configured);
    let log_file = config.file.as_deref().map(open_log_file).transpose()?;

    let mut layers: Vec<BoxedLayer<Registry>> = vec![console_layer(config.format)];
    if let Some(file) = log_file {
        layers.push(file_layer(config.format, file));
    }

    let subscriber = tracing_subscriber::registry().with(layers).with(env_filter);
    tracing::subscriber::set_global_default(subscriber)?;

    let _ = LOGGING_INITIALIZED.set(true);
    tracing::debug!(
        level = %config.level,
        format = %config.format,
        file = ?config.file,
        "Logging initialized"
    );
    Ok(())
}
