//! Logging for safe-proposals
//!
//! Structured logging on top of `tracing`, with text, JSON and compact
//! output and optional daily-rotated log files.
//!
//! ```rust,no_run
//! use safe_proposals::logging::{init_logging, LogFormat, LoggingConfig};
//!
//! let config = LoggingConfig::new().with_debug(true).with_format(LogFormat::Json);
//! init_logging(&config);
//! ```
//!
//! The `safe_*` macros wrap the matching `tracing` macros:
//!
//! ```rust,ignore
//! safe_info!("Proposal approved");
//! safe_warn!(error = %e, "Ignoring malformed proposal link");
//! ```

pub mod format;

use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Once, OnceLock};

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub use format::{CompactFormatter, JsonFormatter, TextFormatter};

/// Name of the rotated log file
const LOG_FILE_NAME: &str = "safe-proposals.log";

static INIT: Once = Once::new();

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Keeps the non-blocking file writer flushing for the life of the process
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// `YYYY-MM-DD HH:MM:SS | LEVEL | target | message`
    #[default]
    Text,
    /// One JSON object per line
    Json,
    /// `[LEVEL] message`
    Compact,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
            LogFormat::Compact => write!(f, "compact"),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!(
                "Invalid log format '{}'. Valid options: text, json, compact",
                s
            )),
        }
    }
}

/// Runtime logging settings
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level DEBUG
    pub debug: bool,
    /// Minimum level TRACE, wins over `debug`
    pub trace: bool,
    /// Also write to a daily-rotated file in `logging_dir`
    pub record_log: bool,
    /// Log directory, `~` expands to the home directory
    pub logging_dir: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            debug: false,
            trace: false,
            record_log: false,
            logging_dir: crate::config::DEFAULT_LOGGING_DIR.to_string(),
            format: LogFormat::Text,
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_file_logging(mut self, enabled: bool) -> Self {
        self.record_log = enabled;
        self
    }

    pub fn with_logging_dir(mut self, dir: impl Into<String>) -> Self {
        self.logging_dir = dir.into();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Settings from `SAFE_PROPOSALS_*` environment variables
    pub fn from_env() -> Self {
        crate::config::Config::from_env()
            .logging
            .to_logging_config()
    }

    fn level(&self) -> Level {
        if self.trace {
            Level::TRACE
        } else if self.debug {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }

    fn expand_path(&self) -> PathBuf {
        let path = &self.logging_dir;
        if let Some(stripped) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        }
        PathBuf::from(path)
    }
}

/// Install the global subscriber. Only the first call has any effect.
pub fn init_logging(config: &LoggingConfig) {
    INIT.call_once(|| {
        install(config);
        INITIALIZED.store(true, Ordering::SeqCst);
    });
}

/// Install the global subscriber with INFO level and text output
pub fn init_default_logging() {
    init_logging(&LoggingConfig::default());
}

pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::SeqCst)
}

fn file_writer(config: &LoggingConfig) -> Option<tracing_appender::non_blocking::NonBlocking> {
    if !config.record_log {
        return None;
    }
    let log_dir = config.expand_path();
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!(
            "Warning: Failed to create log directory {:?}: {}",
            log_dir, e
        );
        return None;
    }
    let appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = FILE_GUARD.set(guard);
    Some(writer)
}

fn install(config: &LoggingConfig) {
    // RUST_LOG wins over the configured level
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(config.level().to_string())
    };
    let file = file_writer(config);
    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.format {
        LogFormat::Text => registry
            .with(fmt::layer().event_format(TextFormatter).with_writer(io::stdout))
            .with(file.map(|w| {
                fmt::layer()
                    .event_format(TextFormatter)
                    .with_writer(w)
                    .with_ansi(false)
            }))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().event_format(JsonFormatter).with_writer(io::stdout))
            .with(file.map(|w| {
                fmt::layer()
                    .event_format(JsonFormatter)
                    .with_writer(w)
                    .with_ansi(false)
            }))
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().event_format(CompactFormatter).with_writer(io::stdout))
            .with(file.map(|w| {
                fmt::layer()
                    .event_format(CompactFormatter)
                    .with_writer(w)
                    .with_ansi(false)
            }))
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("Warning: logging already initialised elsewhere: {}", e);
    }
}

/// Log a debug message via `tracing::debug!`
#[macro_export]
macro_rules! safe_debug {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

/// Log an info message via `tracing::info!`
#[macro_export]
macro_rules! safe_info {
    ($($arg:tt)*) => {
        tracing::info!($($arg)*)
    };
}

/// Log a warning via `tracing::warn!`
#[macro_export]
macro_rules! safe_warn {
    ($($arg:tt)*) => {
        tracing::warn!($($arg)*)
    };
}

/// Log an error via `tracing::error!`
#[macro_export]
macro_rules! safe_error {
    ($($arg:tt)*) => {
        tracing::error!($($arg)*)
    };
}

/// Log a trace message via `tracing::trace!`
#[macro_export]
macro_rules! safe_trace {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}
