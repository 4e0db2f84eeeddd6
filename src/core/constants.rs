//! Protocol and encoding constants shared across the crate

/// Ether/wei conversion factor (1 ETH = 10^18 wei)
pub const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

/// Number of decimal places in one ether
pub const ETHER_DECIMALS: usize = 18;

#[allow(dead_code)]
const _: () = assert!(
    WEI_PER_ETHER == 10u128.pow(ETHER_DECIMALS as u32),
    "WEI_PER_ETHER must equal 10^ETHER_DECIMALS"
);

/// Native currency symbol
pub const ETHER_SYMBOL: &str = "ETH";

/// Length of an address in bytes
pub const ADDRESS_LENGTH: usize = 20;

/// Query parameter holding the `to` address of each action
pub const QUERY_KEY_TARGETS: &str = "targets";

/// Query parameter holding the calldata of each action
pub const QUERY_KEY_CALLDATAS: &str = "calldatas";

/// Query parameter holding the value of each action
pub const QUERY_KEY_VALUES: &str = "values";

/// Query parameter holding the optional Safe nonce
pub const QUERY_KEY_NONCE: &str = "nonce";

/// Separator between per-action entries inside one query parameter.
/// Cannot occur in a hex address, hex calldata or decimal value.
pub const ACTION_DELIMITER: char = '|';

/// Placeholder destination of a freshly added action
pub const DEFAULT_ACTION_TO: &str = "0x";

/// Value of an action when none is given
pub const DEFAULT_VALUE: &str = "0";

/// Empty calldata
pub const EMPTY_CALLDATA: &str = "0x";
