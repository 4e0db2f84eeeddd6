//! Share link encoding and decoding.
//!
//! Covers the `targets` / `calldatas` / `values` / `nonce` query format:
//! key layout, defaults, length mismatches, nonce handling and round trips
//! through a real query string.

use proptest::prelude::*;
use safe_proposals::{
    decode, encode, load_from_query, to_query_string, Action, Error, Proposal, QueryParams,
};

const A: &str = "0xaAaAaAaaAaAaAaaAaAAAAAAAAaaaAaAaAaaAaaAa";
const B: &str = "0xbBbBBBBbbBBBbbbBbbBbbbbBBbBbbbbBbBbbBBbB";

fn params(pairs: &[(&str, &str)]) -> QueryParams {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

// ============================================================================
// Encode
// ============================================================================

#[test]
fn test_encode_joins_fields_in_order() {
    let proposal = Proposal::new(vec![
        Action::new(A, "1000", "0x"),
        Action::new(B, "0", "0x1234"),
    ]);

    let encoded = encode(&proposal).unwrap();
    assert_eq!(encoded.get("targets"), Some(format!("{A}|{B}").as_str()));
    assert_eq!(encoded.get("calldatas"), Some("0x|0x1234"));
    assert_eq!(encoded.get("values"), Some("1000|0"));
    assert!(!encoded.contains_key("nonce"));

    let keys: Vec<&str> = encoded.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["targets", "calldatas", "values"]);
}

#[test]
fn test_encode_includes_nonce() {
    let proposal = Proposal::new(vec![Action::transfer(A, "1")]).with_nonce(7);
    let encoded = encode(&proposal).unwrap();
    assert_eq!(encoded.get("nonce"), Some("7"));

    let zero = Proposal::new(vec![Action::transfer(A, "1")]).with_nonce(0);
    assert_eq!(encode(&zero).unwrap().get("nonce"), Some("0"));
}

#[test]
fn test_encode_empty_proposal_is_noop() {
    let empty = Proposal::new(vec![]);
    assert!(encode(&empty).is_none());
    assert!(to_query_string(&empty).is_none());
}

#[test]
fn test_encode_does_not_validate() {
    let proposal = Proposal::new(vec![Action::new("not-an-address", "-1", "zz")]);
    let encoded = encode(&proposal).unwrap();
    assert_eq!(encoded.get("targets"), Some("not-an-address"));
    assert_eq!(encoded.get("values"), Some("-1"));
}

// ============================================================================
// Decode
// ============================================================================

#[test]
fn test_decode_missing_keys_is_absent() {
    assert_eq!(decode(&QueryParams::new()).unwrap(), None);
    assert_eq!(decode(&params(&[("targets", A)])).unwrap(), None);
    assert_eq!(decode(&params(&[("calldatas", "0x")])).unwrap(), None);
    assert_eq!(decode(&params(&[("values", "1"), ("nonce", "3")])).unwrap(), None);
}

#[test]
fn test_decode_defaults_values_to_zero() {
    let targets = format!("{A}|{B}");
    let decoded = decode(&params(&[
        ("targets", targets.as_str()),
        ("calldatas", "0x|0x1234"),
    ]))
    .unwrap()
    .unwrap();

    assert_eq!(decoded.nonce, None);
    assert_eq!(
        decoded.actions,
        vec![Action::new(A, "0", "0x"), Action::new(B, "0", "0x1234")]
    );
}

#[test]
fn test_decode_target_calldata_mismatch_fails() {
    let targets = format!("{A}|{B}");
    let result = decode(&params(&[("targets", targets.as_str()), ("calldatas", "0x")]));
    assert!(matches!(
        result,
        Err(Error::LengthMismatch {
            targets: 2,
            calldatas: 1,
            values: None
        })
    ));
}

#[test]
fn test_decode_values_mismatch_fails() {
    let targets = format!("{A}|{B}");
    let result = decode(&params(&[
        ("targets", targets.as_str()),
        ("calldatas", "0x|0x"),
        ("values", "1|2|3"),
    ]));
    assert!(matches!(
        result,
        Err(Error::LengthMismatch {
            values: Some(3),
            ..
        })
    ));
}

#[test]
fn test_decode_empty_values_is_absent() {
    let targets = format!("{A}|{B}");
    let decoded = decode(&params(&[
        ("targets", targets.as_str()),
        ("calldatas", "0x|0x"),
        ("values", ""),
    ]))
    .unwrap()
    .unwrap();
    assert!(decoded.actions.iter().all(|a| a.value == "0"));
}

#[test]
fn test_decode_nonce() {
    let decode_nonce = |nonce: &str| {
        decode(&params(&[("targets", A), ("calldatas", "0x"), ("nonce", nonce)]))
            .unwrap()
            .unwrap()
            .nonce
    };
    assert_eq!(decode_nonce("12"), Some(12));
    assert_eq!(decode_nonce("0"), Some(0));
    assert_eq!(decode_nonce("abc"), None);
    assert_eq!(decode_nonce("-1"), None);
    assert_eq!(decode_nonce("1.5"), None);
}

#[test]
fn test_decode_preserves_field_text() {
    let decoded = decode(&params(&[("targets", "0xAB"), ("calldatas", "garbage")]))
        .unwrap()
        .unwrap();
    assert_eq!(decoded.actions[0].to, "0xAB");
    assert_eq!(decoded.actions[0].data, "garbage");
    assert!(!decoded.validate().is_empty());
}

// ============================================================================
// Query strings
// ============================================================================

#[test]
fn test_query_string_round_trip() {
    let proposal = Proposal::new(vec![
        Action::new(A, "230000000000000000", "0x"),
        Action::new(B, "0", "0xa9059cbb"),
    ])
    .with_nonce(42);

    let query = to_query_string(&proposal).unwrap();
    assert!(query.contains("targets="));
    assert!(query.contains("nonce=42"));

    assert_eq!(load_from_query(&query), Some(proposal.clone()));
    assert_eq!(load_from_query(&format!("?{query}")), Some(proposal));
}

#[test]
fn test_load_from_query_malformed_is_none() {
    let query = format!("targets={A}%7C{B}&calldatas=0x");
    assert_eq!(load_from_query(&query), None);
    assert_eq!(load_from_query(""), None);
}

#[test]
fn test_query_params_first_occurrence_wins() {
    let parsed = QueryParams::parse("nonce=1&nonce=2");
    assert_eq!(parsed.get("nonce"), Some("1"));
}

// ============================================================================
// Property-based round trip
// ============================================================================

fn address() -> impl Strategy<Value = String> {
    "0x[a-fA-F0-9]{40}"
}

fn value() -> impl Strategy<Value = String> {
    "[0-9]{1,30}(\\.[0-9]{1,18})?"
}

fn data() -> impl Strategy<Value = String> {
    prop::collection::vec("[0-9A-Za-z]{2}", 0..40)
        .prop_map(|pairs| format!("0x{}", pairs.concat()))
}

fn action() -> impl Strategy<Value = Action> {
    (address(), value(), data()).prop_map(|(to, value, data)| Action::new(to, value, data))
}

fn proposal() -> impl Strategy<Value = Proposal> {
    (
        prop::collection::vec(action(), 1..8),
        prop::option::of(any::<u64>()),
    )
        .prop_map(|(actions, nonce)| Proposal { nonce, actions })
}

proptest! {
    #[test]
    fn prop_decode_inverts_encode(p in proposal()) {
        let encoded = encode(&p).unwrap();
        prop_assert_eq!(decode(&encoded).unwrap(), Some(p));
    }

    #[test]
    fn prop_query_string_round_trip(p in proposal()) {
        let query = to_query_string(&p).unwrap();
        prop_assert_eq!(load_from_query(&query), Some(p));
    }

    #[test]
    fn prop_generated_proposals_are_valid(p in proposal()) {
        prop_assert!(p.validate().is_empty());
    }

    #[test]
    fn prop_mismatched_lengths_never_decode(
        targets in prop::collection::vec(address(), 1..6),
        extra in 1usize..4,
    ) {
        let calldatas = vec!["0x"; targets.len() + extra].join("|");
        let targets = targets.join("|");
        let params = params(&[("targets", targets.as_str()), ("calldatas", calldatas.as_str())]);
        prop_assert!(decode(&params).is_err());
    }
}
