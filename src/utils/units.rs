//! Exact ether/wei conversion.
//!
//! Form fields carry human-readable ether amounts such as `"0.23"`, while
//! transactions and share links carry integer wei strings. All conversions
//! here are exact integer arithmetic on 256-bit values:
//! - 1 ETH = 10^18 wei
//! - an ether amount with more than 18 fractional digits is rejected, never rounded
//! - `format_ether` drops trailing fractional zeros, so `parse_ether(format_ether(w)) == w`
//!
//! # Examples
//! ```
//! use safe_proposals::utils::units::{format_ether, parse_ether};
//! let wei = parse_ether("0.23").unwrap();
//! assert_eq!(wei.to_string(), "230000000000000000");
//! assert_eq!(format_ether(wei), "0.23");
//! ```

use crate::core::constants::{ETHER_DECIMALS, ETHER_SYMBOL, WEI_PER_ETHER};
use crate::error::{Error, Result};
use crate::utils::validators::is_value_format;
use sp_core::U256;
use std::fmt;
use std::str::FromStr;

/// Amount in wei, the smallest unit of ether.
///
/// Wraps a `U256` so that any on-chain value is representable. All
/// transaction payloads use `Wei`; ether strings are for display and input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Wei(pub U256);

impl Wei {
    /// Zero wei.
    pub const ZERO: Self = Self(U256::zero());

    pub const fn new(value: U256) -> Self {
        Self(value)
    }

    /// One ether expressed in wei.
    pub fn one_ether() -> Self {
        Self(U256::from(WEI_PER_ETHER))
    }

    pub fn from_u128(value: u128) -> Self {
        Self(U256::from(value))
    }

    pub const fn as_u256(self) -> U256 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition, `None` on overflow.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Render as ether with the currency symbol, e.g. `"1.5 ETH"`.
    pub fn format_eth(self) -> String {
        format!("{} {}", format_ether(self), ETHER_SYMBOL)
    }
}

impl fmt::Display for Wei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Wei {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_wei(s)
    }
}

impl From<u128> for Wei {
    fn from(value: u128) -> Self {
        Self::from_u128(value)
    }
}

impl From<U256> for Wei {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

fn parse_integer(digits: &str, original: &str) -> Result<U256> {
    U256::from_dec_str(digits).map_err(|_| Error::overflow(original.to_string()))
}

/// Parse a base-unit integer string such as `"230000000000000000"`.
pub fn parse_wei(s: &str) -> Result<Wei> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_value(format!("'{}' is not a wei amount", s)));
    }
    parse_integer(s, s).map(Wei)
}

/// Parse an ether amount such as `"1"` or `"0.23"` into wei.
///
/// Fails with [`Error::InvalidValue`] when the text is not a plain
/// non-negative decimal, [`Error::Precision`] when it has more than 18
/// fractional digits, and [`Error::Overflow`] when it exceeds 256 bits.
pub fn parse_ether(s: &str) -> Result<Wei> {
    if !is_value_format(s) {
        return Err(Error::invalid_value(format!(
            "'{}' is not an ether amount",
            s
        )));
    }

    let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
    if fraction.len() > ETHER_DECIMALS {
        return Err(Error::Precision {
            value: s.to_string(),
            decimals: ETHER_DECIMALS,
        });
    }

    let whole = parse_integer(whole, s)?;
    let fraction = if fraction.is_empty() {
        U256::zero()
    } else {
        let padded = format!("{:0<width$}", fraction, width = ETHER_DECIMALS);
        parse_integer(&padded, s)?
    };

    whole
        .checked_mul(U256::from(WEI_PER_ETHER))
        .and_then(|w| w.checked_add(fraction))
        .map(Wei)
        .ok_or_else(|| Error::overflow(s.to_string()))
}

/// Render wei as the shortest exact ether string (`"1"`, `"0.23"`).
pub fn format_ether(wei: Wei) -> String {
    let per_ether = U256::from(WEI_PER_ETHER);
    let whole = wei.0 / per_ether;
    let fraction = (wei.0 % per_ether).low_u128();

    if fraction == 0 {
        return whole.to_string();
    }

    let fraction = format!("{:0>width$}", fraction, width = ETHER_DECIMALS);
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}

/// Convert an ether string into a wei string.
pub fn ether_to_wei_string(ether: &str) -> Result<String> {
    parse_ether(ether).map(|w| w.to_string())
}

/// Convert a wei string into an ether string.
pub fn wei_to_ether_string(wei: &str) -> Result<String> {
    parse_wei(wei).map(format_ether)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ether_whole_and_fraction() {
        assert_eq!(parse_ether("0").unwrap(), Wei::ZERO);
        assert_eq!(parse_ether("1").unwrap(), Wei::one_ether());
        assert_eq!(
            parse_ether("0.23").unwrap(),
            Wei::from_u128(230_000_000_000_000_000)
        );
        assert_eq!(
            parse_ether("1.000000000000000001").unwrap(),
            Wei::from_u128(1_000_000_000_000_000_001)
        );
        assert_eq!(parse_ether("007.50").unwrap(), parse_ether("7.5").unwrap());
    }

    #[test]
    fn test_parse_ether_rejects_excess_precision() {
        let err = parse_ether("0.0000000000000000001").unwrap_err();
        assert!(matches!(err, Error::Precision { decimals: 18, .. }));
    }

    #[test]
    fn test_parse_ether_rejects_bad_grammar() {
        for bad in ["", "-1", "1e18", ".5", "1.", "abc"] {
            assert!(
                matches!(parse_ether(bad), Err(Error::InvalidValue(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_parse_ether_overflow() {
        let huge = "1".repeat(80);
        assert!(matches!(parse_ether(&huge), Err(Error::Overflow(_))));
    }

    #[test]
    fn test_format_ether() {
        assert_eq!(format_ether(Wei::ZERO), "0");
        assert_eq!(format_ether(Wei::one_ether()), "1");
        assert_eq!(format_ether(Wei::from_u128(230_000_000_000_000_000)), "0.23");
        assert_eq!(format_ether(Wei::from_u128(1)), "0.000000000000000001");
        assert_eq!(
            format_ether(Wei::from_u128(12_345_000_000_000_000_000)),
            "12.345"
        );
    }

    #[test]
    fn test_format_eth_symbol() {
        assert_eq!(Wei::from_u128(1_500_000_000_000_000_000).format_eth(), "1.5 ETH");
    }

    #[test]
    fn test_parse_wei() {
        assert_eq!(parse_wei("42").unwrap(), Wei::from_u128(42));
        assert!(parse_wei("").is_err());
        assert!(parse_wei("0.5").is_err());
        assert_eq!("1000".parse::<Wei>().unwrap(), Wei::from_u128(1000));
    }

    #[test]
    fn test_string_conversions() {
        assert_eq!(ether_to_wei_string("0.23").unwrap(), "230000000000000000");
        assert_eq!(wei_to_ether_string("230000000000000000").unwrap(), "0.23");
    }

    #[test]
    fn test_checked_add() {
        let max = Wei(U256::MAX);
        assert_eq!(max.checked_add(Wei::from_u128(1)), None);
        assert_eq!(
            Wei::from_u128(2).checked_add(Wei::from_u128(3)),
            Some(Wei::from_u128(5))
        );
    }
}
