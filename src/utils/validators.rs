//! Textual grammars for proposal fields and the form-level checks built on them.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::Address;
use crate::utils::units::parse_ether;

lazy_static! {
    /// `0x` followed by exactly 40 hex characters, any case
    static ref ADDRESS_RE: Regex = Regex::new(r"^0x[a-fA-F0-9]{40}$").unwrap();
    /// Non-negative integer or decimal, no sign, no exponent
    static ref VALUE_RE: Regex = Regex::new(r"^[0-9]+(\.[0-9]+)?$").unwrap();
    /// `0x` followed by character pairs
    static ref DATA_RE: Regex = Regex::new(r"^0x(?:[0-9A-Za-z]{2})*$").unwrap();
}

pub const INVALID_ADDRESS_MESSAGE: &str = "Invalid address";
pub const INVALID_VALUE_MESSAGE: &str = "Needs to be a ETH price (0, 1, or 0.23)";
pub const INVALID_DATA_MESSAGE: &str = "Data is required to match hex format";
pub const INVALID_ETH_MESSAGE: &str = "ETH Value is Invalid";
pub const THRESHOLD_TOO_LOW_MESSAGE: &str = "Threshold needs to be at least 1";
pub const THRESHOLD_TOO_HIGH_MESSAGE: &str =
    "Threshold cannot be more than the number of addresses";

/// Check the address grammar (`0x` + 40 hex characters)
pub fn is_address_format(s: &str) -> bool {
    ADDRESS_RE.is_match(s)
}

/// Check the value grammar (`123` or `0.23`)
pub fn is_value_format(s: &str) -> bool {
    VALUE_RE.is_match(s)
}

/// Check the calldata grammar (`0x` + pairs)
pub fn is_data_format(s: &str) -> bool {
    DATA_RE.is_match(s)
}

/// Form check for an address field.
///
/// Returns the message to show, or `None` when the address is acceptable.
/// With `strict` set, a mixed-case address must carry a valid EIP-55 checksum.
pub fn validate_address(address: &str, strict: bool) -> Option<&'static str> {
    let parsed = if strict {
        Address::parse_strict(address)
    } else {
        Address::parse(address)
    };
    parsed.err().map(|_| INVALID_ADDRESS_MESSAGE)
}

/// Form check for a Safe threshold against its owner count.
///
/// Applies to new Safes and to owner changes alike: the threshold must be
/// at least 1 and at most the number of owners after the change.
pub fn validate_threshold(threshold: usize, owner_count: usize) -> Option<&'static str> {
    if threshold == 0 {
        Some(THRESHOLD_TOO_LOW_MESSAGE)
    } else if threshold > owner_count {
        Some(THRESHOLD_TOO_HIGH_MESSAGE)
    } else {
        None
    }
}

/// Form check for an ether amount field
pub fn validate_eth(value: &str) -> Option<&'static str> {
    parse_ether(value).err().map(|_| INVALID_ETH_MESSAGE)
}
