//! Review workflow for one proposal: refresh approvals, sign, sign and execute.

use crate::config::ProposalConfig;
use crate::eligibility::ApprovalState;
use crate::error::{Error, Result};
use crate::types::Proposal;
use crate::{safe_debug, safe_info};

use super::traits::{SafeClient, SafeTransaction, TxHash};

/// Drives approval and execution of a single proposal against a Safe.
///
/// Approvals are never cached beyond the last explicit refresh; every
/// state-changing call refreshes them afterwards.
pub struct ProposalReview<C> {
    client: C,
    proposal: Proposal,
    transaction: SafeTransaction,
    state: Option<ApprovalState>,
}

impl<C: SafeClient> ProposalReview<C> {
    /// Start reviewing a proposal whose values are in wei
    pub fn new(client: C, proposal: Proposal) -> Result<Self> {
        Self::with_config(client, proposal, &ProposalConfig::default())
    }

    pub fn with_config(client: C, proposal: Proposal, config: &ProposalConfig) -> Result<Self> {
        let proposal = proposal.validated_with(config)?;
        let transaction = SafeTransaction::from_proposal(&proposal)?;
        Ok(Self {
            client,
            proposal,
            transaction,
            state: None,
        })
    }

    pub fn proposal(&self) -> &Proposal {
        &self.proposal
    }

    pub fn transaction(&self) -> &SafeTransaction {
        &self.transaction
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Approval state from the last refresh
    pub fn state(&self) -> Option<&ApprovalState> {
        self.state.as_ref()
    }

    /// Fetch threshold, approvers and the connected account again
    pub async fn refresh_approvals(&mut self) -> Result<ApprovalState> {
        let (threshold, approvers, account) = futures::try_join!(
            self.client.threshold(),
            self.client.approvers(&self.transaction),
            self.client.account(),
        )?;

        let state = ApprovalState::new(approvers, threshold, account);
        safe_debug!(
            approvals = state.total_approvers(),
            threshold = state.threshold,
            has_approved = state.has_approved(),
            "Refreshed approvals"
        );
        self.state = Some(state.clone());
        Ok(state)
    }

    /// Approve the transaction with the connected account
    pub async fn sign(&mut self) -> Result<TxHash> {
        let state = self.refresh_approvals().await?;
        if state.has_approved() {
            return Err(Error::AlreadyApproved);
        }

        let hash = self.client.approve(&self.transaction).await?;
        safe_info!(hash = %hash, "Approved transaction");
        self.refresh_approvals().await?;
        Ok(hash)
    }

    /// Approve (if needed) and execute in one submission
    pub async fn sign_and_execute(&mut self) -> Result<TxHash> {
        let state = self.refresh_approvals().await?;
        if !state.can_execute() {
            return Err(Error::NotExecutable {
                approvals: state.total_approvers(),
                threshold: state.threshold,
            });
        }

        let hash = self.client.execute(&self.transaction).await?;
        safe_info!(hash = %hash, "Executed transaction");
        self.refresh_approvals().await?;
        Ok(hash)
    }
}
