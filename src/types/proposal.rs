//! Proposal and action data model.
//!
//! A [`Proposal`] is an ordered list of [`Action`]s plus an optional Safe
//! nonce. Action fields are kept as the exact text the user typed or the
//! share link carried, so that encoding and decoding never alter them.
//! Typed views ([`Address`], [`Wei`], [`Calldata`]) are produced on demand.

use serde::{Deserialize, Serialize};

use crate::config::ProposalConfig;
use crate::core::constants::{DEFAULT_ACTION_TO, DEFAULT_VALUE, EMPTY_CALLDATA};
use crate::error::{Error, FieldError, Result};
use crate::types::{Address, Calldata};
use crate::utils::units::{format_ether, parse_ether, parse_wei, Wei};
use crate::utils::validators::{
    is_data_format, is_value_format, INVALID_ADDRESS_MESSAGE, INVALID_DATA_MESSAGE,
    INVALID_VALUE_MESSAGE,
};

/// Unit in which the `value` strings of a proposal are expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueUnit {
    /// Human-readable ether, as typed into the edit form
    Ether,
    /// Integer wei, as submitted to the Safe and stored in share links
    Wei,
}

/// One on-chain call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Destination address
    pub to: String,
    /// Native currency amount, in ether or wei depending on context
    pub value: String,
    /// Call data
    pub data: String,
}

impl Default for Action {
    fn default() -> Self {
        Self {
            to: DEFAULT_ACTION_TO.to_string(),
            value: DEFAULT_VALUE.to_string(),
            data: EMPTY_CALLDATA.to_string(),
        }
    }
}

impl Action {
    pub fn new(to: impl Into<String>, value: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            value: value.into(),
            data: data.into(),
        }
    }

    /// A plain value transfer with empty call data
    pub fn transfer(to: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(to, value, EMPTY_CALLDATA)
    }

    pub fn address(&self) -> Result<Address> {
        Address::parse(&self.to)
    }

    pub fn calldata(&self) -> Result<Calldata> {
        Calldata::parse(&self.data)
    }

    /// Value as wei, reading `value` in the given unit
    pub fn wei(&self, unit: ValueUnit) -> Result<Wei> {
        match unit {
            ValueUnit::Ether => parse_ether(&self.value),
            ValueUnit::Wei => parse_wei(&self.value),
        }
    }

    fn collect_errors(&self, index: usize, strict_checksum: bool, errors: &mut Vec<FieldError>) {
        let address = if strict_checksum {
            Address::parse_strict(&self.to)
        } else {
            Address::parse(&self.to)
        };
        if address.is_err() {
            errors.push(FieldError::new(
                format!("actions[{}].to", index),
                INVALID_ADDRESS_MESSAGE,
            ));
        }
        if !is_value_format(&self.value) {
            errors.push(FieldError::new(
                format!("actions[{}].value", index),
                INVALID_VALUE_MESSAGE,
            ));
        }
        if !is_data_format(&self.data) {
            errors.push(FieldError::new(
                format!("actions[{}].data", index),
                INVALID_DATA_MESSAGE,
            ));
        }
    }
}

/// An unsigned, shareable description of one Safe transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Pins the proposal to a Safe nonce; `None` lets the Safe pick the next one
    pub nonce: Option<u64>,
    /// Calls executed in order within one Safe transaction
    pub actions: Vec<Action>,
}

impl Default for Proposal {
    /// The blank "new proposal" form: no nonce and a single empty action.
    fn default() -> Self {
        Self {
            nonce: None,
            actions: vec![Action::default()],
        }
    }
}

impl Proposal {
    pub fn new(actions: Vec<Action>) -> Self {
        Self {
            nonce: None,
            actions,
        }
    }

    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Append an action at the end
    pub fn add_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Remove and return the action at `index`, if it exists
    pub fn remove_action(&mut self, index: usize) -> Option<Action> {
        if index < self.actions.len() {
            Some(self.actions.remove(index))
        } else {
            None
        }
    }

    /// Replace the action at `index`, returning the previous one
    pub fn replace_action(&mut self, index: usize, action: Action) -> Option<Action> {
        self.actions
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, action))
    }

    /// Every field problem, using default validation settings
    pub fn validate(&self) -> Vec<FieldError> {
        self.validate_with(&ProposalConfig::default())
    }

    /// Every field problem, using the given validation settings
    pub fn validate_with(&self, config: &ProposalConfig) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(max) = config.max_actions {
            if self.actions.len() > max {
                errors.push(FieldError::new(
                    "actions",
                    format!("At most {} actions are allowed", max),
                ));
            }
        }
        for (index, action) in self.actions.iter().enumerate() {
            action.collect_errors(index, config.strict_checksum, &mut errors);
        }
        errors
    }

    /// Return `self` unchanged when valid, or every field problem at once
    pub fn validated(self) -> Result<Self> {
        self.validated_with(&ProposalConfig::default())
    }

    pub fn validated_with(self, config: &ProposalConfig) -> Result<Self> {
        let errors = self.validate_with(config);
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(Error::Validation(errors))
        }
    }

    /// Convert every action value from ether to wei
    pub fn to_wei(&self) -> Result<Self> {
        self.map_values(|value| parse_ether(value).map(|w| w.to_string()))
    }

    /// Convert every action value from wei to ether
    pub fn from_wei(&self) -> Result<Self> {
        self.map_values(|value| parse_wei(value).map(format_ether))
    }

    /// Sum of all action values
    pub fn total_value(&self, unit: ValueUnit) -> Result<Wei> {
        self.actions.iter().try_fold(Wei::ZERO, |total, action| {
            total
                .checked_add(action.wei(unit)?)
                .ok_or_else(|| Error::overflow("total proposal value"))
        })
    }

    fn map_values<F>(&self, convert: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<String>,
    {
        let actions = self
            .actions
            .iter()
            .map(|action| {
                Ok(Action {
                    value: convert(&action.value)?,
                    ..action.clone()
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            nonce: self.nonce,
            actions,
        })
    }
}
