//! Safe setup commands.

use clap::{Args, Subcommand};

use crate::cli::utils::{create_table_with_headers, print_field_errors, print_success};
use crate::config::Config;
use crate::error::Error;
use crate::types::SafeSetup;

/// Safe command container
#[derive(Args, Clone)]
pub struct SafeCommand {
    #[command(subcommand)]
    pub command: SafeCommands,
}

/// Available Safe operations
#[derive(Subcommand, Clone)]
pub enum SafeCommands {
    /// Check owners and threshold before deploying a Safe
    CheckSetup {
        /// Owner address (repeatable or comma-separated)
        #[arg(long = "owner", required = true)]
        owners: Vec<String>,
        /// Approvals required to execute
        #[arg(long)]
        threshold: usize,
    },
}

/// Execute Safe commands
pub fn execute(cmd: SafeCommand, config: &Config) -> anyhow::Result<()> {
    match cmd.command {
        SafeCommands::CheckSetup { owners, threshold } => check_setup(&owners, threshold, config),
    }
}

/// Split repeated and comma-separated owner arguments, keeping invalid text
fn split_owners(owners: &[String]) -> Vec<String> {
    owners
        .iter()
        .flat_map(|s| s.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn check_setup(owners: &[String], threshold: usize, config: &Config) -> anyhow::Result<()> {
    let setup = SafeSetup::new(split_owners(owners), threshold);
    let errors = setup.validate_with(&config.proposal);

    let mut table = create_table_with_headers(&["#", "Owner"]);
    for (index, owner) in setup.owners.iter().enumerate() {
        table.add_row(vec![index.to_string(), owner.clone()]);
    }
    println!("{}", table);

    if errors.is_empty() {
        print_success(&format!(
            "{} out of {} owners required to execute",
            setup.threshold,
            setup.owners.len()
        ));
        Ok(())
    } else {
        print_field_errors(&errors);
        Err(anyhow::anyhow!(Error::Validation(errors)))
    }
}
