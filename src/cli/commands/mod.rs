//! CLI command implementations
//!
//! Each module contains the command definitions and execution logic
//! for a specific category of operations.

pub mod approvals;
pub mod proposal;
pub mod safe;
pub mod units;
