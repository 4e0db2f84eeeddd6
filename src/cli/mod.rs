//! `safecli`: command-line access to proposal links, ether units and
//! approval checks.
//!
//! # Commands
//!
//! - `proposal` - Encode, decode, validate and dry-run shareable proposals
//! - `units` - Convert between ether and wei
//! - `approvals` - Check which actions the connected account may take
//! - `safe` - Check the parameters of a new Safe

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::logging::{init_logging, LogFormat};

pub mod commands;
pub mod utils;

/// Safe proposal tool
#[derive(Parser)]
#[command(name = "safecli")]
#[command(author = "Cortex Foundation")]
#[command(version)]
#[command(about = "Build, share and check Safe multisig proposals", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Log format (text, json, compact)
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Effective configuration: file, then environment, then flags
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        let mut config = config.apply_env();
        if self.debug {
            config = config.with_debug(true);
        }
        if let Some(format) = self.log_format {
            config = config.with_log_format(format);
        }
        Ok(config)
    }
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Proposal links (encode, decode, validate, review)
    #[command(alias = "p")]
    Proposal(commands::proposal::ProposalCommand),

    /// Ether/wei conversion
    #[command(alias = "u")]
    Units(commands::units::UnitsCommand),

    /// Approval and execution eligibility
    #[command(alias = "a")]
    Approvals(commands::approvals::ApprovalsCommand),

    /// New Safe parameters
    #[command(alias = "s")]
    Safe(commands::safe::SafeCommand),
}

/// Run the CLI application
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    init_logging(&config.logging.to_logging_config());

    match &cli.command {
        Commands::Proposal(cmd) => commands::proposal::execute(cmd.clone(), &config).await,
        Commands::Units(cmd) => commands::units::execute(cmd.clone()),
        Commands::Approvals(cmd) => commands::approvals::execute(cmd.clone()),
        Commands::Safe(cmd) => commands::safe::execute(cmd.clone(), &config),
    }
}
