//! `safecli` binary entrypoint.
//!
//! Encodes and decodes shareable Safe proposal links, converts ether
//! amounts and checks approval eligibility.

use safe_proposals::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // logging is configured inside `run` once the config is known
    cli::run().await
}
