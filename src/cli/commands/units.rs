//! Ether/wei conversion commands.

use clap::{Args, Subcommand};

use crate::utils::units::{ether_to_wei_string, wei_to_ether_string};

/// Units command container
#[derive(Args, Clone)]
pub struct UnitsCommand {
    #[command(subcommand)]
    pub command: UnitsCommands,
}

/// Available conversions
#[derive(Subcommand, Clone)]
pub enum UnitsCommands {
    /// Convert an ether amount to wei
    ToWei {
        /// Amount in ether (up to 18 decimals)
        amount: String,
    },

    /// Convert a wei amount to ether
    FromWei {
        /// Amount in wei
        amount: String,
    },
}

/// Execute units commands
pub fn execute(cmd: UnitsCommand) -> anyhow::Result<()> {
    let output = match cmd.command {
        UnitsCommands::ToWei { amount } => ether_to_wei_string(&amount)?,
        UnitsCommands::FromWei { amount } => wei_to_ether_string(&amount)?,
    };
    println!("{}", output);
    Ok(())
}
