//! Terminal output helpers and argument parsing for the CLI.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use console::{style, Term};

use crate::error::FieldError;
use crate::types::{Action, Address, Proposal, ValueUnit};
use crate::utils::units::{format_ether, parse_wei};

/// Print success message in green.
pub fn print_success(message: &str) {
    let term = Term::stdout();
    let _ = term.write_line(&format!("{} {}", style("✓").green().bold(), message));
}

/// Print error message in red.
pub fn print_error(message: &str) {
    let term = Term::stderr();
    let _ = term.write_line(&format!("{} {}", style("✗").red().bold(), message));
}

/// Print info message in blue.
pub fn print_info(message: &str) {
    let term = Term::stdout();
    let _ = term.write_line(&format!("{} {}", style("ℹ").blue().bold(), message));
}

/// Print warning message in yellow.
pub fn print_warning(message: &str) {
    let term = Term::stdout();
    let _ = term.write_line(&format!("{} {}", style("⚠").yellow().bold(), message));
}

/// Print every field error, one per line.
pub fn print_field_errors(errors: &[FieldError]) {
    for error in errors {
        print_error(&error.to_string());
    }
}

/// Create a styled table for CLI output.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Create a table with bold headers.
pub fn create_table_with_headers(headers: &[&str]) -> Table {
    let mut table = create_table();
    table.set_header(headers.iter().map(|h| style(*h).bold().to_string()));
    table
}

/// Enabled/disabled marker for a button-like action.
pub fn availability(enabled: bool) -> String {
    if enabled {
        style("available").green().to_string()
    } else {
        style("unavailable").red().to_string()
    }
}

/// Parse `TO,VALUE[,DATA]` into an action; data defaults to `0x`.
pub fn parse_action_arg(input: &str) -> anyhow::Result<Action> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [to, value] => Ok(Action::transfer(*to, *value)),
        [to, value, data] => Ok(Action::new(*to, *value, *data)),
        _ => Err(anyhow::anyhow!(
            "Invalid action '{}': expected TO,VALUE[,DATA]",
            input
        )),
    }
}

/// Parse a comma-separated list of addresses.
pub fn parse_address_list(input: &[String]) -> anyhow::Result<Vec<Address>> {
    input
        .iter()
        .flat_map(|s| s.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Address::parse(s).map_err(|e| anyhow::anyhow!("{}", e)))
        .collect()
}

/// Render an action value for display, showing ether alongside wei when possible.
pub fn format_value(value: &str, unit: ValueUnit) -> String {
    match unit {
        ValueUnit::Ether => format!("{} ETH", value),
        ValueUnit::Wei => match parse_wei(value) {
            Ok(wei) => format!("{} wei ({} ETH)", value, format_ether(wei)),
            Err(_) => value.to_string(),
        },
    }
}

/// Table of a proposal's actions.
pub fn proposal_table(proposal: &Proposal, unit: ValueUnit) -> Table {
    let mut table = create_table_with_headers(&["#", "To", "Value", "Data"]);
    for (index, action) in proposal.actions.iter().enumerate() {
        let data = if action.data == "0x" {
            "No data".to_string()
        } else {
            action.data.clone()
        };
        table.add_row(vec![
            index.to_string(),
            action.to.clone(),
            format_value(&action.value, unit),
            data,
        ]);
    }
    table
}
