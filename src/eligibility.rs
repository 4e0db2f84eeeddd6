//! Whether the current account may execute a pending Safe transaction.

use std::fmt;

use crate::types::Address;

/// Decide whether the caller may trigger execution now.
///
/// - threshold already met (or exceeded): execution may proceed
/// - exactly one approval missing and the caller has not approved: the
///   caller's own signature completes the set, so the combined
///   "sign and execute" submission is allowed
/// - otherwise: not yet
///
/// `threshold` must be at least 1.
pub fn can_execute_now(has_approved: bool, total_approvers: usize, threshold: usize) -> bool {
    if total_approvers >= threshold {
        return true;
    }
    threshold - total_approvers == 1 && !has_approved
}

/// Approval snapshot for one transaction, rebuilt from the Safe on every refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalState {
    /// Owners that have approved the transaction hash
    pub approvers: Vec<Address>,
    /// Approvals required by the Safe
    pub threshold: usize,
    /// Connected account, if a wallet is connected
    pub account: Option<Address>,
}

impl ApprovalState {
    pub fn new(approvers: Vec<Address>, threshold: usize, account: Option<Address>) -> Self {
        Self {
            approvers,
            threshold,
            account,
        }
    }

    /// The connected account is among the approvers
    pub fn has_approved(&self) -> bool {
        self.account
            .is_some_and(|account| self.approvers.contains(&account))
    }

    pub fn total_approvers(&self) -> usize {
        self.approvers.len()
    }

    /// Approvals still missing, zero once the threshold is met
    pub fn remaining(&self) -> usize {
        self.threshold.saturating_sub(self.approvers.len())
    }

    /// "Sign and execute" is available
    pub fn can_execute(&self) -> bool {
        can_execute_now(self.has_approved(), self.total_approvers(), self.threshold)
    }

    /// "Sign" is available: a wallet is connected and has not approved yet
    pub fn can_sign(&self) -> bool {
        self.account.is_some() && !self.has_approved()
    }

    /// Whether `address` is the connected account
    pub fn is_account(&self, address: &Address) -> bool {
        self.account.as_ref() == Some(address)
    }
}

impl fmt::Display for ApprovalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} out of {} signed",
            self.total_approvers(),
            self.threshold
        )
    }
}
