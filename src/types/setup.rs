//! Parameters of a new Safe: owner addresses and approval threshold.

use serde::{Deserialize, Serialize};

use crate::config::ProposalConfig;
use crate::error::{Error, FieldError, Result};
use crate::types::Address;
use crate::utils::validators::{validate_address, validate_threshold};

/// Owners and threshold entered before deploying a Safe.
///
/// Owners are kept as typed text, like proposal actions, so each one can be
/// reported on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeSetup {
    pub owners: Vec<String>,
    pub threshold: usize,
}

impl SafeSetup {
    pub fn new(owners: Vec<String>, threshold: usize) -> Self {
        Self { owners, threshold }
    }

    /// Every field problem, using default validation settings
    pub fn validate(&self) -> Vec<FieldError> {
        self.validate_with(&ProposalConfig::default())
    }

    /// Every field problem; `strict_checksum` applies to owner addresses
    pub fn validate_with(&self, config: &ProposalConfig) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(message) = validate_threshold(self.threshold, self.owners.len()) {
            errors.push(FieldError::new("threshold", message));
        }
        for (index, owner) in self.owners.iter().enumerate() {
            if let Some(message) = validate_address(owner, config.strict_checksum) {
                errors.push(FieldError::new(format!("owners[{}]", index), message));
            }
        }
        errors
    }

    pub fn validated_with(self, config: &ProposalConfig) -> Result<Self> {
        let errors = self.validate_with(config);
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(Error::Validation(errors))
        }
    }

    /// Parsed owner addresses, failing on the first invalid one
    pub fn owner_addresses(&self) -> Result<Vec<Address>> {
        self.owners.iter().map(|o| Address::parse(o)).collect()
    }
}
