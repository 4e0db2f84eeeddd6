//! Proposal commands: build share links, read them back, and dry-run the
//! approval flow against an in-memory Safe.

use clap::{Args, Subcommand, ValueEnum};

use crate::cli::utils::{
    availability, create_table_with_headers, parse_action_arg, parse_address_list,
    print_error, print_field_errors, print_info, print_success, print_warning, proposal_table,
};
use crate::codec::{decode, encode, QueryParams};
use crate::config::Config;
use crate::error::Error;
use crate::safe::{MockSafe, ProposalReview};
use crate::types::{Address, Proposal, ValueUnit};

/// Proposal command container
#[derive(Args, Clone)]
pub struct ProposalCommand {
    #[command(subcommand)]
    pub command: ProposalCommands,
}

/// Step to attempt after loading approvals in a review
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewStep {
    /// Only show the approval state
    #[value(name = "none")]
    Show,
    /// Approve with the connected account
    Sign,
    /// Approve if needed and execute
    Execute,
}

/// Available proposal operations
#[derive(Subcommand, Clone)]
pub enum ProposalCommands {
    /// Build a share link query string from actions
    Encode {
        /// Action as TO,VALUE[,DATA] (repeatable)
        #[arg(short, long = "action", required = true)]
        actions: Vec<String>,
        /// Pin the proposal to a Safe nonce
        #[arg(long)]
        nonce: Option<u64>,
        /// Values are already in wei (default: ether)
        #[arg(long)]
        wei: bool,
    },

    /// Show the proposal carried by a share link
    Decode {
        /// Query string or full link
        query: String,
        /// Show values converted to ether
        #[arg(long)]
        ether: bool,
    },

    /// Check every field of a share link
    Validate {
        /// Query string or full link
        query: String,
    },

    /// Dry-run signing and execution against an in-memory Safe
    Review {
        /// Query string or full link
        query: String,
        /// Safe owners (repeatable or comma-separated)
        #[arg(long = "owner", required = true)]
        owners: Vec<String>,
        /// Approvals required by the Safe
        #[arg(long)]
        threshold: usize,
        /// Owners that already approved (repeatable or comma-separated)
        #[arg(long = "approver")]
        approvers: Vec<String>,
        /// Connected account
        #[arg(long)]
        account: Option<String>,
        /// Step to attempt
        #[arg(long, value_enum, default_value = "none")]
        step: ReviewStep,
    },
}

/// Execute proposal commands
pub async fn execute(cmd: ProposalCommand, config: &Config) -> anyhow::Result<()> {
    match cmd.command {
        ProposalCommands::Encode {
            actions,
            nonce,
            wei,
        } => encode_link(&actions, nonce, wei, config),
        ProposalCommands::Decode { query, ether } => decode_link(&query, ether),
        ProposalCommands::Validate { query } => validate_link(&query, config),
        ProposalCommands::Review {
            query,
            owners,
            threshold,
            approvers,
            account,
            step,
        } => {
            review(
                &query,
                &owners,
                threshold,
                &approvers,
                account.as_deref(),
                step,
                config,
            )
            .await
        }
    }
}

/// Query part of a link; input without `?` is taken as the query itself.
fn query_part(input: &str) -> &str {
    let query = match input.split_once('?') {
        Some((_, query)) => query,
        None => input,
    };
    query.split('#').next().unwrap_or(query)
}

/// Decode a link, turning a missing proposal into an error
fn load_proposal(input: &str) -> anyhow::Result<Proposal> {
    let params = QueryParams::parse(query_part(input));
    match decode(&params)? {
        Some(proposal) => Ok(proposal),
        None => Err(anyhow::anyhow!(
            "Link does not carry a proposal (targets and calldatas are required)"
        )),
    }
}

fn report_invalid(error: Error) -> anyhow::Error {
    print_field_errors(error.field_errors());
    anyhow::anyhow!(error)
}

fn encode_link(
    actions: &[String],
    nonce: Option<u64>,
    wei: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let actions = actions
        .iter()
        .map(|a| parse_action_arg(a))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let mut proposal = Proposal::new(actions);
    proposal.nonce = nonce;

    let proposal = proposal
        .validated_with(&config.proposal)
        .map_err(report_invalid)?;
    let proposal = if wei { proposal } else { proposal.to_wei()? };

    let params = encode(&proposal).ok_or(Error::EmptyProposal)?;
    println!("?{}", params.to_query_string());
    Ok(())
}

fn decode_link(input: &str, ether: bool) -> anyhow::Result<()> {
    let proposal = load_proposal(input)?;
    let (proposal, unit) = if ether {
        (proposal.from_wei()?, ValueUnit::Ether)
    } else {
        (proposal, ValueUnit::Wei)
    };

    match proposal.nonce {
        Some(nonce) => print_info(&format!("Nonce: {}", nonce)),
        None => print_info("Nonce: next available"),
    }
    println!("{}", proposal_table(&proposal, unit));
    Ok(())
}

fn validate_link(input: &str, config: &Config) -> anyhow::Result<()> {
    let proposal = load_proposal(input)?;
    let errors = proposal.validate_with(&config.proposal);
    if errors.is_empty() {
        print_success(&format!("Proposal with {} action(s) is valid", proposal.len()));
        Ok(())
    } else {
        print_field_errors(&errors);
        Err(anyhow::anyhow!(Error::Validation(errors)))
    }
}

fn parse_account(account: Option<&str>) -> anyhow::Result<Option<Address>> {
    account
        .map(|a| Address::parse(a).map_err(|e| anyhow::anyhow!("{}", e)))
        .transpose()
}

async fn review(
    input: &str,
    owners: &[String],
    threshold: usize,
    approvers: &[String],
    account: Option<&str>,
    step: ReviewStep,
    config: &Config,
) -> anyhow::Result<()> {
    if threshold == 0 {
        return Err(anyhow::anyhow!("Threshold must be at least 1"));
    }
    let proposal = load_proposal(input)?;
    let owners = parse_address_list(owners)?;
    let approvers = parse_address_list(approvers)?;
    let account = parse_account(account)?;

    let safe = MockSafe::new(owners, threshold);
    safe.set_account(account);

    let mut review = ProposalReview::with_config(safe.clone(), proposal, &config.proposal)
        .map_err(report_invalid)?;
    for approver in approvers {
        safe.approve_as(approver, review.transaction())?;
    }

    let state = review.refresh_approvals().await?;
    println!("{}", proposal_table(review.proposal(), ValueUnit::Wei));

    let mut table = create_table_with_headers(&["Approver", "You"]);
    for approver in &state.approvers {
        let you = if state.is_account(approver) { "✓" } else { "" };
        table.add_row(vec![approver.to_string(), you.to_string()]);
    }
    println!("{}", table);
    print_info(&format!("{}", state));
    print_info(&format!("Sign: {}", availability(state.can_sign())));
    print_info(&format!(
        "Sign and execute: {}",
        availability(state.can_execute())
    ));

    let outcome = match step {
        ReviewStep::Show => return Ok(()),
        ReviewStep::Sign => review.sign().await,
        ReviewStep::Execute => review.sign_and_execute().await,
    };

    match outcome {
        Ok(hash) => {
            print_success(&format!("Submitted {}", hash));
            if let Some(state) = review.state() {
                print_info(&format!("{}", state));
            }
            if safe.is_executed(review.transaction()) {
                print_success("Transaction executed");
            }
            Ok(())
        }
        Err(Error::AlreadyApproved) => {
            print_warning("The connected account already approved this transaction");
            Ok(())
        }
        Err(e) => {
            print_error(&e.to_string());
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_part() {
        assert_eq!(
            query_part("https://app/new?targets=0x1&calldatas=0x"),
            "targets=0x1&calldatas=0x"
        );
        assert_eq!(query_part("?targets=0x1#frag"), "targets=0x1");
        assert_eq!(query_part("targets=0x1"), "targets=0x1");
    }

    #[test]
    fn test_load_proposal_requires_keys() {
        assert!(load_proposal("?values=1").is_err());
        let proposal = load_proposal(
            "?targets=0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed&calldatas=0x&values=5",
        )
        .unwrap();
        assert_eq!(proposal.actions[0].value, "5");
    }

    #[test]
    fn test_parse_account() {
        assert_eq!(parse_account(None).unwrap(), None);
        assert!(parse_account(Some("nope")).is_err());
    }
}
