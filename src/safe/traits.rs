//! Seam between proposals and the Safe SDK / wallet.
//!
//! Transaction hashing, signature collection and execution belong to the
//! Safe SDK. This module only describes what the review workflow needs from
//! it, so the workflow can run against any implementation, including
//! [`MockSafe`](super::mock::MockSafe) in tests.

use async_trait::async_trait;
use sp_core::H256;
use std::fmt;

use crate::error::{Error, Result};
use crate::types::{Address, Calldata, Proposal, ValueUnit};
use crate::utils::units::Wei;

/// Hash of a submitted chain transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxHash(pub H256);

impl TxHash {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(H256(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.as_bytes()))
    }
}

/// One typed call inside a Safe transaction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafeCall {
    pub to: Address,
    pub value: Wei,
    pub data: Calldata,
}

/// Payload handed to the Safe SDK for building, approving and executing
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafeTransaction {
    pub calls: Vec<SafeCall>,
    /// `None` lets the Safe use its next nonce
    pub nonce: Option<u64>,
}

impl SafeTransaction {
    /// Build from a proposal whose values are in wei.
    pub fn from_proposal(proposal: &Proposal) -> Result<Self> {
        if proposal.is_empty() {
            return Err(Error::EmptyProposal);
        }
        let calls = proposal
            .actions
            .iter()
            .map(|action| {
                Ok(SafeCall {
                    to: action.address()?,
                    value: action.wei(ValueUnit::Wei)?,
                    data: action.calldata()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            calls,
            nonce: proposal.nonce,
        })
    }

    /// Same calls pinned to a concrete nonce
    pub fn with_nonce(&self, nonce: u64) -> Self {
        Self {
            calls: self.calls.clone(),
            nonce: Some(nonce),
        }
    }

    /// Sum of the values of all calls
    pub fn total_value(&self) -> Result<Wei> {
        self.calls.iter().try_fold(Wei::ZERO, |total, call| {
            total
                .checked_add(call.value)
                .ok_or_else(|| Error::overflow("total transaction value"))
        })
    }
}

/// What the review workflow needs from the Safe SDK and the connected wallet
#[async_trait]
pub trait SafeClient: Send + Sync {
    /// Approvals required by the Safe
    async fn threshold(&self) -> Result<usize>;

    /// Connected wallet account, `None` when no wallet is connected
    async fn account(&self) -> Result<Option<Address>>;

    /// Owners that approved the hash of `tx`
    async fn approvers(&self, tx: &SafeTransaction) -> Result<Vec<Address>>;

    /// Record the connected account's approval of `tx` on chain
    async fn approve(&self, tx: &SafeTransaction) -> Result<TxHash>;

    /// Execute `tx`, adding the connected account's signature if needed
    async fn execute(&self, tx: &SafeTransaction) -> Result<TxHash>;
}
