//! Error types for safe-proposals

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// A single problem with one field of a proposal form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Location of the field, e.g. `actions[1].to`
    pub path: String,
    /// Human-readable message
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn describe_values_len(values: &Option<usize>) -> String {
    match values {
        Some(n) => format!(", values={}", n),
        None => String::new(),
    }
}

/// Main error type for safe-proposals
#[derive(Error, Debug)]
pub enum Error {
    /// Text is not a 20-byte hex address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Text is not `0x`-prefixed, even-length hex
    #[error("Invalid hex data: {0}")]
    InvalidHex(String),

    /// Text is not a non-negative decimal amount
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Amount has more fractional digits than the unit supports
    #[error("Value {value} has more than {decimals} decimal places")]
    Precision { value: String, decimals: usize },

    /// Amount does not fit in 256 bits
    #[error("Value overflow: {0}")]
    Overflow(String),

    /// One or more proposal fields failed validation
    #[error("Validation failed: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    /// Per-action query lists disagree in length
    #[error(
        "Mismatched action lists: targets={targets}, calldatas={calldatas}{}",
        describe_values_len(.values)
    )]
    LengthMismatch {
        targets: usize,
        calldatas: usize,
        values: Option<usize>,
    },

    /// Proposal has no actions to submit
    #[error("Proposal has no actions")]
    EmptyProposal,

    /// The current account already approved this transaction
    #[error("Current account has already approved this transaction")]
    AlreadyApproved,

    /// Execution is not available with the current approvals
    #[error("Cannot execute: {approvals} of {threshold} approvals")]
    NotExecutable { approvals: usize, threshold: usize },

    /// Error reported by the Safe SDK
    #[error("Safe error: {0}")]
    Safe(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_address(msg: impl Into<String>) -> Self {
        Error::InvalidAddress(msg.into())
    }

    pub fn invalid_hex(msg: impl Into<String>) -> Self {
        Error::InvalidHex(msg.into())
    }

    pub fn invalid_value(msg: impl Into<String>) -> Self {
        Error::InvalidValue(msg.into())
    }

    pub fn overflow(msg: impl Into<String>) -> Self {
        Error::Overflow(msg.into())
    }

    pub fn safe(msg: impl Into<String>) -> Self {
        Error::Safe(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Field errors carried by a validation failure, empty otherwise
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Error::Validation(errors) => errors,
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
