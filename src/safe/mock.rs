//! In-memory Safe for tests and demos.

use async_trait::async_trait;
use sp_core::H256;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use super::traits::{SafeClient, SafeTransaction, TxHash};
use crate::error::{Error, Result};
use crate::types::Address;

/// Mock Safe with a fixed owner set and threshold.
///
/// Approvals are keyed by the transaction pinned to its nonce. A
/// transaction without a nonce resolves to the Safe's current nonce, which
/// advances on every execution.
#[derive(Clone)]
pub struct MockSafe {
    state: Arc<Mutex<MockState>>,
}

struct MockState {
    owners: Vec<Address>,
    threshold: usize,
    account: Option<Address>,
    nonce: u64,
    approvals: HashMap<SafeTransaction, Vec<Address>>,
    executed: HashSet<SafeTransaction>,
    submissions: u64,
}

impl MockState {
    fn resolve(&self, tx: &SafeTransaction) -> SafeTransaction {
        tx.with_nonce(tx.nonce.unwrap_or(self.nonce))
    }

    fn signer(&self) -> Result<Address> {
        let account = self
            .account
            .ok_or_else(|| Error::safe("no wallet connected"))?;
        if !self.owners.contains(&account) {
            return Err(Error::safe(format!("{} is not an owner", account)));
        }
        Ok(account)
    }

    fn next_hash(&mut self) -> TxHash {
        self.submissions += 1;
        TxHash(H256::from_low_u64_be(self.submissions))
    }
}

impl MockSafe {
    pub fn new(owners: Vec<Address>, threshold: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                owners,
                threshold,
                account: None,
                nonce: 0,
                approvals: HashMap::new(),
                executed: HashSet::new(),
                submissions: 0,
            })),
        }
    }

    /// Connect a wallet account
    pub fn with_account(self, account: Address) -> Self {
        self.set_account(Some(account));
        self
    }

    /// Switch or disconnect the wallet; clones share the change
    pub fn set_account(&self, account: Option<Address>) {
        self.lock().account = account;
    }

    /// Record an approval directly (test setup); only owners may approve
    pub fn approve_as(&self, owner: Address, tx: &SafeTransaction) -> Result<()> {
        let mut state = self.lock();
        if !state.owners.contains(&owner) {
            return Err(Error::safe(format!("{} is not an owner", owner)));
        }
        let key = state.resolve(tx);
        let approvers = state.approvals.entry(key).or_default();
        if !approvers.contains(&owner) {
            approvers.push(owner);
        }
        Ok(())
    }

    /// Whether the transaction has been executed
    pub fn is_executed(&self, tx: &SafeTransaction) -> bool {
        let state = self.lock();
        let key = state.resolve(tx);
        state.executed.contains(&key)
    }

    /// Current Safe nonce
    pub fn nonce(&self) -> u64 {
        self.lock().nonce
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // a poisoned lock only means another test thread panicked
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl SafeClient for MockSafe {
    async fn threshold(&self) -> Result<usize> {
        Ok(self.lock().threshold)
    }

    async fn account(&self) -> Result<Option<Address>> {
        Ok(self.lock().account)
    }

    async fn approvers(&self, tx: &SafeTransaction) -> Result<Vec<Address>> {
        let state = self.lock();
        let key = state.resolve(tx);
        Ok(state.approvals.get(&key).cloned().unwrap_or_default())
    }

    async fn approve(&self, tx: &SafeTransaction) -> Result<TxHash> {
        let mut state = self.lock();
        let signer = state.signer()?;
        let key = state.resolve(tx);
        if state.executed.contains(&key) {
            return Err(Error::safe("transaction already executed"));
        }
        let approvers = state.approvals.entry(key).or_default();
        if !approvers.contains(&signer) {
            approvers.push(signer);
        }
        Ok(state.next_hash())
    }

    async fn execute(&self, tx: &SafeTransaction) -> Result<TxHash> {
        let mut state = self.lock();
        let signer = state.signer()?;
        let key = state.resolve(tx);
        if state.executed.contains(&key) {
            return Err(Error::safe("transaction already executed"));
        }
        if key.nonce != Some(state.nonce) {
            return Err(Error::safe(format!(
                "nonce {:?} is not the current nonce {}",
                key.nonce, state.nonce
            )));
        }

        let approvers = state.approvals.get(&key).cloned().unwrap_or_default();
        let signatures = approvers.len() + usize::from(!approvers.contains(&signer));
        if signatures < state.threshold {
            return Err(Error::safe(format!(
                "threshold not reached: {} of {} signatures",
                signatures, state.threshold
            )));
        }

        state.executed.insert(key);
        state.nonce += 1;
        Ok(state.next_hash())
    }
}
