//! Proposal data types

pub mod address;
pub mod calldata;
pub mod proposal;
pub mod setup;

pub use address::Address;
pub use calldata::Calldata;
pub use proposal::{Action, Proposal, ValueUnit};
pub use setup::SafeSetup;
