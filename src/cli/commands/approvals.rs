//! Approval commands: which review actions are open to an account.

use clap::{Args, Subcommand};

use crate::cli::utils::{
    availability, create_table_with_headers, parse_address_list, print_info,
};
use crate::eligibility::ApprovalState;
use crate::types::Address;

/// Approvals command container
#[derive(Args, Clone)]
pub struct ApprovalsCommand {
    #[command(subcommand)]
    pub command: ApprovalsCommands,
}

/// Available approval operations
#[derive(Subcommand, Clone)]
pub enum ApprovalsCommands {
    /// Show whether Sign and Sign-and-execute are available
    Check {
        /// Approvals required by the Safe
        #[arg(long)]
        threshold: usize,
        /// Owners that already approved (repeatable or comma-separated)
        #[arg(long = "approver")]
        approvers: Vec<String>,
        /// Connected account
        #[arg(long)]
        account: Option<String>,
    },
}

/// Execute approvals commands
pub fn execute(cmd: ApprovalsCommand) -> anyhow::Result<()> {
    match cmd.command {
        ApprovalsCommands::Check {
            threshold,
            approvers,
            account,
        } => check(threshold, &approvers, account.as_deref()),
    }
}

fn check(threshold: usize, approvers: &[String], account: Option<&str>) -> anyhow::Result<()> {
    if threshold == 0 {
        return Err(anyhow::anyhow!("Threshold must be at least 1"));
    }
    let approvers = parse_address_list(approvers)?;
    let account = account
        .map(|a| Address::parse(a).map_err(|e| anyhow::anyhow!("{}", e)))
        .transpose()?;

    let state = ApprovalState::new(approvers, threshold, account);

    let mut table = create_table_with_headers(&["Check", "Value"]);
    table.add_row(vec!["Signatures".to_string(), state.to_string()]);
    table.add_row(vec!["Remaining".to_string(), state.remaining().to_string()]);
    table.add_row(vec![
        "Account approved".to_string(),
        state.has_approved().to_string(),
    ]);
    table.add_row(vec!["Sign".to_string(), availability(state.can_sign())]);
    table.add_row(vec![
        "Sign and execute".to_string(),
        availability(state.can_execute()),
    ]);
    println!("{}", table);

    if state.account.is_none() {
        print_info("No account given; signing requires a connected wallet");
    }
    Ok(())
}
