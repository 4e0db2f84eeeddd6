//! 20-byte account addresses with EIP-55 checksum rendering

use crate::core::constants::ADDRESS_LENGTH;
use crate::error::{Error, Result};
use crate::utils::validators::is_address_format;
use sp_core::{keccak_256, H160};
use std::fmt;
use std::str::FromStr;

/// An account or contract address.
///
/// Parsing is case-insensitive; equality compares the raw bytes, so
/// `0xabc…` and `0xABC…` are the same address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub H160);

impl Address {
    /// The zero address.
    pub const ZERO: Self = Self(H160::zero());

    pub const fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(H160(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Parse `0x` + 40 hex characters, ignoring letter case.
    pub fn parse(s: &str) -> Result<Self> {
        if !is_address_format(s) {
            return Err(Error::invalid_address(s.to_string()));
        }
        let bytes = hex::decode(&s[2..])
            .map_err(|e| Error::invalid_address(format!("{}: {}", s, e)))?;
        Ok(Self(H160::from_slice(&bytes)))
    }

    /// Parse like [`Address::parse`], and additionally require a correct
    /// EIP-55 checksum when the hex digits mix upper and lower case.
    pub fn parse_strict(s: &str) -> Result<Self> {
        let address = Self::parse(s)?;
        let digits = &s[2..];
        let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
        if has_lower && has_upper && address.to_checksum() != s {
            return Err(Error::invalid_address(format!("{}: bad checksum", s)));
        }
        Ok(address)
    }

    /// Lower-case `0x` hex form.
    pub fn to_lower_hex(&self) -> String {
        format!("0x{}", hex::encode(self.as_bytes()))
    }

    /// EIP-55 mixed-case checksum form.
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.as_bytes());
        let hash = keccak_256(lower.as_bytes());

        let mut out = String::with_capacity(2 + lower.len());
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Shortened form for tables, e.g. `0x5aAe…BeAed`.
    pub fn short(&self) -> String {
        let full = self.to_checksum();
        format!("{}…{}", &full[..6], &full[full.len() - 5..])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_checksum())
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<H160> for Address {
    fn from(value: H160) -> Self {
        Self(value)
    }
}
