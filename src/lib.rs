pub mod cli;
pub mod codec;
pub mod config;
pub mod core;
pub mod eligibility;
pub mod error;
pub mod logging;
pub mod safe;
pub mod types;
pub mod utils;

pub use config::{Config, LoggingConfig as ConfigLoggingConfig, ProposalConfig};

pub use logging::{
    init_default_logging, init_logging, is_initialized, CompactFormatter, JsonFormatter,
    LogFormat, LoggingConfig, TextFormatter,
};

pub use error::{Error, FieldError, Result};

pub use types::{Action, Address, Calldata, Proposal, SafeSetup, ValueUnit};

pub use codec::{decode, encode, load_from_query, to_query_string, QueryParams};

pub use eligibility::{can_execute_now, ApprovalState};

pub use utils::units::{format_ether, parse_ether, parse_wei, Wei};
pub use utils::validators::{validate_address, validate_eth, validate_threshold};

pub use safe::{MockSafe, ProposalReview, SafeCall, SafeClient, SafeTransaction, TxHash};
