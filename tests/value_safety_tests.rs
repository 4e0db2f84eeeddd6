//! Value safety for ether/wei conversions.
//!
//! This test suite validates:
//! 1. WEI_PER_ETHER = 10^18 consistency across all operations
//! 2. Lossless ether -> wei -> ether conversion for up to 18 decimals
//! 3. Rejection (never rounding) of amounts finer than one wei
//! 4. Proposal-level conversion and totals
//!
//! # Property-Based Testing
//! Uses proptest to verify properties hold across a wide range of inputs.

use proptest::prelude::*;
use safe_proposals::core::constants::{ETHER_DECIMALS, WEI_PER_ETHER};
use safe_proposals::utils::units::{ether_to_wei_string, wei_to_ether_string};
use safe_proposals::{
    format_ether, parse_ether, parse_wei, validate_eth, Action, Error, Proposal, ValueUnit, Wei,
};
use sp_core::U256;

// ============================================================================
// Compile-time assertions
// ============================================================================

const _: () = assert!(WEI_PER_ETHER == 1_000_000_000_000_000_000);
const _: () = assert!(ETHER_DECIMALS == 18);

// ============================================================================
// Boundaries
// ============================================================================

#[test]
fn test_one_wei_and_one_ether() {
    assert_eq!(parse_ether("0.000000000000000001").unwrap(), Wei::from_u128(1));
    assert_eq!(parse_ether("1").unwrap(), Wei::from_u128(WEI_PER_ETHER));
    assert_eq!(format_ether(Wei::from_u128(1)), "0.000000000000000001");
}

#[test]
fn test_sub_wei_amounts_are_rejected() {
    assert!(matches!(
        parse_ether("0.0000000000000000005"),
        Err(Error::Precision { .. })
    ));
    assert!(validate_eth("0.0000000000000000005").is_some());
    assert!(validate_eth("0.5").is_none());
}

#[test]
fn test_max_wei_round_trips() {
    let max = Wei(U256::MAX);
    let ether = format_ether(max);
    assert_eq!(parse_ether(&ether).unwrap(), max);
    assert!(parse_wei(&U256::MAX.to_string()).is_ok());
    assert!(matches!(
        parse_wei(&format!("{}0", U256::MAX)),
        Err(Error::Overflow(_))
    ));
}

#[test]
fn test_proposal_unit_conversion() {
    let proposal = Proposal::new(vec![
        Action::transfer("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed", "0.23"),
        Action::transfer("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed", "1.5"),
    ]);

    let wei = proposal.to_wei().unwrap();
    assert_eq!(wei.actions[0].value, "230000000000000000");
    assert_eq!(wei.actions[1].value, "1500000000000000000");
    assert_eq!(wei.from_wei().unwrap(), proposal);

    assert_eq!(
        proposal.total_value(ValueUnit::Ether).unwrap(),
        Wei::from_u128(1_730_000_000_000_000_000)
    );
    assert_eq!(
        wei.total_value(ValueUnit::Wei).unwrap(),
        proposal.total_value(ValueUnit::Ether).unwrap()
    );
}

#[test]
fn test_total_value_overflow() {
    let max = U256::MAX.to_string();
    let proposal = Proposal::new(vec![
        Action::transfer("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed", max.clone()),
        Action::transfer("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed", "1"),
    ]);
    assert!(matches!(
        proposal.total_value(ValueUnit::Wei),
        Err(Error::Overflow(_))
    ));
}

// ============================================================================
// Property-based tests
// ============================================================================

proptest! {
    #[test]
    fn prop_wei_ether_round_trip(wei in any::<u128>()) {
        let ether = format_ether(Wei::from_u128(wei));
        prop_assert_eq!(parse_ether(&ether).unwrap(), Wei::from_u128(wei));
    }

    #[test]
    fn prop_ether_strings_round_trip(
        whole in 0u64..1_000_000_000,
        fraction in "[0-9]{1,18}",
    ) {
        let ether = format!("{}.{}", whole, fraction);
        let wei = ether_to_wei_string(&ether).unwrap();
        let back = wei_to_ether_string(&wei).unwrap();
        prop_assert_eq!(parse_ether(&back).unwrap(), parse_ether(&ether).unwrap());
    }

    #[test]
    fn prop_format_is_canonical(wei in any::<u128>()) {
        let ether = format_ether(Wei::from_u128(wei));
        prop_assert!(!ether.ends_with('.'));
        if ether.contains('.') {
            prop_assert!(!ether.ends_with('0'));
        }
    }

    #[test]
    fn prop_too_many_decimals_rejected(fraction in "[0-9]{19,30}") {
        let ether = format!("0.{}", fraction);
        let is_precision_error = matches!(parse_ether(&ether), Err(Error::Precision { .. }));
        prop_assert!(is_precision_error);
    }
}
