//! Configuration for safe-proposals
//!
//! Settings come from defaults, a JSON file, and `SAFE_PROPOSALS_*`
//! environment variables, in that order of increasing precedence.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::logging::{self, LogFormat};

/// Default directory for log files
pub const DEFAULT_LOGGING_DIR: &str = "~/.safe-proposals/logs";

/// Proposal validation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProposalConfig {
    /// Reject mixed-case addresses whose EIP-55 checksum is wrong
    pub strict_checksum: bool,
    /// Upper bound on actions per proposal
    pub max_actions: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub debug: bool,
    pub trace: bool,
    pub record_log: bool,
    pub logging_dir: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            debug: false,
            trace: false,
            record_log: false,
            logging_dir: DEFAULT_LOGGING_DIR.to_string(),
            format: LogFormat::Text.to_string(),
        }
    }
}

impl LoggingConfig {
    /// Runtime logging settings; an unknown format falls back to text
    pub fn to_logging_config(&self) -> logging::LoggingConfig {
        logging::LoggingConfig {
            debug: self.debug,
            trace: self.trace,
            record_log: self.record_log,
            logging_dir: self.logging_dir.clone(),
            format: self.format.parse().unwrap_or_default(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub proposal: ProposalConfig,
    pub logging: LoggingConfig,
    /// Additional custom configuration
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Require valid EIP-55 checksums on mixed-case addresses
    pub fn with_strict_checksum(mut self, strict: bool) -> Self {
        self.proposal.strict_checksum = strict;
        self
    }

    /// Limit the number of actions per proposal
    pub fn with_max_actions(mut self, max: usize) -> Self {
        self.proposal.max_actions = Some(max);
        self
    }

    /// Set debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.logging.debug = debug;
        self
    }

    /// Set log format
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.logging.format = format.to_string();
        self
    }

    /// Load config from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))
    }

    /// Write config as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load config from environment variables on top of defaults
    pub fn from_env() -> Self {
        Self::default().apply_env()
    }

    /// Override fields from `SAFE_PROPOSALS_*` environment variables
    pub fn apply_env(mut self) -> Self {
        if let Ok(strict) = std::env::var("SAFE_PROPOSALS_STRICT_CHECKSUM") {
            self.proposal.strict_checksum = matches!(strict.as_str(), "1" | "true" | "yes");
        }

        if let Ok(max) = std::env::var("SAFE_PROPOSALS_MAX_ACTIONS") {
            if let Ok(m) = max.parse() {
                self.proposal.max_actions = Some(m);
            }
        }

        if std::env::var("SAFE_PROPOSALS_DEBUG").is_ok() {
            self.logging.debug = true;
        }

        if std::env::var("SAFE_PROPOSALS_TRACE").is_ok() {
            self.logging.trace = true;
        }

        if let Ok(format) = std::env::var("SAFE_PROPOSALS_LOG_FORMAT") {
            self.logging.format = format;
        }

        if let Ok(dir) = std::env::var("SAFE_PROPOSALS_LOG_DIR") {
            self.logging.logging_dir = dir;
            self.logging.record_log = true;
        }

        self
    }

    /// Merge with another config (other takes precedence where it differs from defaults)
    pub fn merge(mut self, other: Config) -> Self {
        if other.proposal != ProposalConfig::default() {
            self.proposal = other.proposal;
        }
        if other.logging.debug || other.logging.trace || other.logging.record_log {
            self.logging = other.logging;
        }
        self.extra.extend(other.extra);
        self
    }
}
