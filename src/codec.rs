//! Query-string codec for sharing proposals by link.
//!
//! A proposal is flattened into four query parameters:
//!
//! | key         | content                                   |
//! |-------------|-------------------------------------------|
//! | `targets`   | every action's `to`, joined by `\|`       |
//! | `calldatas` | every action's `data`, joined by `\|`     |
//! | `values`    | every action's `value`, joined by `\|`    |
//! | `nonce`     | decimal nonce, omitted when there is none |
//!
//! Encoding neither escapes nor validates; callers validate first. The `|`
//! separator cannot occur in any valid address, calldata or value, so
//! `decode(encode(p)) == p` for every valid proposal with at least one action.
//!
//! # Example
//! ```
//! use safe_proposals::codec::{decode, encode};
//! use safe_proposals::{Action, Proposal};
//!
//! let proposal = Proposal::new(vec![Action::new(
//!     "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
//!     "1000",
//!     "0x",
//! )])
//! .with_nonce(4);
//!
//! let params = encode(&proposal).unwrap();
//! assert_eq!(decode(&params).unwrap(), Some(proposal));
//! ```

use url::form_urlencoded;

use crate::core::constants::{
    ACTION_DELIMITER, DEFAULT_VALUE, QUERY_KEY_CALLDATAS, QUERY_KEY_NONCE, QUERY_KEY_TARGETS,
    QUERY_KEY_VALUES,
};
use crate::error::{Error, Result};
use crate::types::{Action, Proposal};

/// Flat, ordered set of query parameters.
///
/// Lookups return the first occurrence of a key, like `URLSearchParams.get`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` string, with or without a leading `?`
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self(
            form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key`, replacing the first existing occurrence
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialise with form encoding, e.g. `targets=0x..%7C0x..&calldatas=...`
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn join_field(actions: &[Action], field: fn(&Action) -> &str) -> String {
    actions
        .iter()
        .map(field)
        .collect::<Vec<_>>()
        .join(&ACTION_DELIMITER.to_string())
}

/// Flatten a proposal into query parameters.
///
/// Returns `None` for a proposal without actions: there is nothing to share.
pub fn encode(proposal: &Proposal) -> Option<QueryParams> {
    if proposal.actions.is_empty() {
        return None;
    }

    let mut params = QueryParams::new();
    params.insert(
        QUERY_KEY_TARGETS,
        join_field(&proposal.actions, |a| a.to.as_str()),
    );
    params.insert(
        QUERY_KEY_CALLDATAS,
        join_field(&proposal.actions, |a| a.data.as_str()),
    );
    params.insert(
        QUERY_KEY_VALUES,
        join_field(&proposal.actions, |a| a.value.as_str()),
    );
    if let Some(nonce) = proposal.nonce {
        params.insert(QUERY_KEY_NONCE, nonce.to_string());
    }
    Some(params)
}

/// Rebuild a proposal from query parameters.
///
/// - `Ok(None)`: `targets` or `calldatas` is missing, so no proposal is present.
/// - `Err(Error::LengthMismatch)`: the per-action lists disagree in length.
///   Nothing is reconstructed.
/// - `Ok(Some(_))`: one action per index, in order. Missing or empty values
///   default to `"0"`; a nonce that is not a whole number is dropped.
pub fn decode(params: &QueryParams) -> Result<Option<Proposal>> {
    let (Some(targets), Some(calldatas)) = (
        params.get(QUERY_KEY_TARGETS),
        params.get(QUERY_KEY_CALLDATAS),
    ) else {
        return Ok(None);
    };

    let targets: Vec<&str> = targets.split(ACTION_DELIMITER).collect();
    let calldatas: Vec<&str> = calldatas.split(ACTION_DELIMITER).collect();
    let values: Option<Vec<&str>> = params
        .get(QUERY_KEY_VALUES)
        .filter(|v| !v.is_empty())
        .map(|v| v.split(ACTION_DELIMITER).collect());

    let values_mismatch = values
        .as_ref()
        .is_some_and(|values| values.len() != targets.len());
    if targets.len() != calldatas.len() || values_mismatch {
        return Err(Error::LengthMismatch {
            targets: targets.len(),
            calldatas: calldatas.len(),
            values: values.as_ref().map(Vec::len),
        });
    }

    let actions = targets
        .iter()
        .zip(&calldatas)
        .enumerate()
        .map(|(i, (to, data))| {
            let value = values
                .as_ref()
                .map(|values| values[i])
                .filter(|v| !v.is_empty())
                .unwrap_or(DEFAULT_VALUE);
            Action::new(*to, value, *data)
        })
        .collect();

    let nonce = params
        .get(QUERY_KEY_NONCE)
        .and_then(|n| n.parse::<u64>().ok());

    Ok(Some(Proposal { nonce, actions }))
}

/// Load a proposal from a raw query string, as on opening a shared link.
///
/// A malformed link is logged and treated as "no proposal".
pub fn load_from_query(query: &str) -> Option<Proposal> {
    match decode(&QueryParams::parse(query)) {
        Ok(proposal) => {
            if let Some(p) = &proposal {
                crate::safe_debug!(actions = p.actions.len(), nonce = ?p.nonce, "Loaded proposal from query");
            }
            proposal
        }
        Err(e) => {
            crate::safe_warn!(error = %e, "Ignoring malformed proposal link");
            None
        }
    }
}

/// Encode a proposal straight to a query string, `None` when it has no actions
pub fn to_query_string(proposal: &Proposal) -> Option<String> {
    encode(proposal).map(|params| params.to_query_string())
}
