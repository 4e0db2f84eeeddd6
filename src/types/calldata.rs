//! Hex-encoded call data

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Raw call data for one action. `0x` is the empty call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Calldata(pub Vec<u8>);

impl Calldata {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Parse `0x` followed by an even number of hex digits.
    pub fn parse(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix("0x")
            .ok_or_else(|| Error::invalid_hex(format!("'{}' is missing the 0x prefix", s)))?;
        hex::decode(digits)
            .map(Self)
            .map_err(|e| Error::invalid_hex(format!("'{}': {}", s, e)))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First four bytes, the function selector of a contract call.
    pub fn selector(&self) -> Option<[u8; 4]> {
        self.0.get(..4).map(|s| [s[0], s[1], s[2], s[3]])
    }
}

impl fmt::Display for Calldata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl FromStr for Calldata {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
