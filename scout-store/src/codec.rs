//! Persisted shape of identifier sets.
//!
//! Durable slots only hold plain JSON (objects, arrays, strings, numbers), so a
//! set is written as a sorted array inside a state envelope:
//!
//! ```text
//! {"state":{"bookmarkedInvestors":["inv-1","inv-42"]}}
//! ```
//!
//! [`encode_set`] / [`decode_set`] convert between the in-memory set and the
//! flat sequence; [`SetCodec`] adds the envelope.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use scout_core::constants::BOOKMARKS_FIELD;
use scout_core::error::{Result, ScoutError};

/// Flattens a set into a sorted sequence.
///
/// Sorting makes the persisted record depend only on the set's contents, not
/// on insertion order.
pub fn encode_set(set: &HashSet<String>) -> Vec<String> {
    let mut items: Vec<String> = set.iter().cloned().collect();
    items.sort_unstable();
    items
}

/// Rebuilds a set from a persisted sequence. Duplicates collapse.
pub fn decode_set(items: Vec<String>) -> HashSet<String> {
    items.into_iter().collect()
}

#[derive(Serialize, Deserialize)]
struct Envelope<S> {
    state: S,
}

/// Encodes a set to and from one enveloped JSON record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetCodec {
    field: String,
}

impl SetCodec {
    /// Creates a codec storing the set under `field` of the state object.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Codec for the investor bookmark record.
    pub fn bookmarks() -> Self {
        Self::new(BOOKMARKS_FIELD)
    }

    /// Name of the state field holding the set.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Serializes `set` into the full record text.
    pub fn encode(&self, set: &HashSet<String>) -> Result<String> {
        let mut state = Map::new();
        state.insert(
            self.field.clone(),
            Value::Array(encode_set(set).into_iter().map(Value::String).collect()),
        );
        Ok(serde_json::to_string(&Envelope { state })?)
    }

    /// Parses a full record back into a set.
    ///
    /// Other members of the state object are ignored.
    pub fn decode(&self, raw: &str) -> Result<HashSet<String>> {
        let Envelope { mut state } = serde_json::from_str::<Envelope<Map<String, Value>>>(raw)
            .map_err(|e| ScoutError::DecodeError(format!("malformed envelope: {e}")))?;

        let items = state
            .remove(&self.field)
            .ok_or_else(|| ScoutError::DecodeError(format!("missing state field '{}'", self.field)))?;

        let items: Vec<String> = serde_json::from_value(items)
            .map_err(|e| ScoutError::DecodeError(format!("field '{}': {e}", self.field)))?;

        Ok(decode_set(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set_of(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_bookmark_record_shape() {
        let record = SetCodec::bookmarks().encode(&set_of(&["inv-42"])).unwrap();
        assert_eq!(record, r#"{"state":{"bookmarkedInvestors":["inv-42"]}}"#);
    }

    #[test]
    fn test_empty_set_shape() {
        let record = SetCodec::bookmarks().encode(&HashSet::new()).unwrap();
        assert_eq!(record, r#"{"state":{"bookmarkedInvestors":[]}}"#);
    }

    #[test]
    fn test_encoding_is_sorted() {
        assert_eq!(encode_set(&set_of(&["c", "a", "b"])), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let set = decode_set(vec!["a".into(), "b".into(), "a".into()]);
        assert_eq!(set, set_of(&["a", "b"]));
    }

    #[test]
    fn test_decode_ignores_other_state_fields() {
        let raw = r#"{"state":{"bookmarkedInvestors":["x"],"sortBy":"name"},"version":0}"#;
        assert_eq!(SetCodec::bookmarks().decode(raw).unwrap(), set_of(&["x"]));
    }

    #[test]
    fn test_decode_rejects_malformed_records() {
        let codec = SetCodec::bookmarks();
        for raw in [
            "",
            "not json",
            "[]",
            r#"{"bookmarkedInvestors":["x"]}"#,
            r#"{"state":{}}"#,
            r#"{"state":{"bookmarkedInvestors":"x"}}"#,
            r#"{"state":{"bookmarkedInvestors":[1,2]}}"#,
            r#"{"state":null}"#,
        ] {
            let err = codec.decode(raw).unwrap_err();
            assert!(matches!(err, ScoutError::DecodeError(_)), "{raw:?} gave {err:?}");
        }
    }

    #[test]
    fn test_custom_field() {
        let codec = SetCodec::new("watchlist");
        let record = codec.encode(&set_of(&["s-1"])).unwrap();
        assert_eq!(record, r#"{"state":{"watchlist":["s-1"]}}"#);
        assert!(SetCodec::bookmarks().decode(&record).is_err());
    }

    proptest! {
        #[test]
        fn prop_set_round_trip(set in proptest::collection::hash_set(".{0,16}", 0..32)) {
            prop_assert_eq!(decode_set(encode_set(&set)), set.clone());

            let codec = SetCodec::bookmarks();
            prop_assert_eq!(codec.decode(&codec.encode(&set).unwrap()).unwrap(), set);
        }

        #[test]
        fn prop_record_independent_of_insertion_order(
            items in proptest::collection::vec("[a-z0-9-]{1,8}", 0..16).prop_shuffle()
        ) {
            let forward: HashSet<String> = items.iter().cloned().collect();
            let backward: HashSet<String> = items.iter().rev().cloned().collect();
            let codec = SetCodec::bookmarks();
            prop_assert_eq!(codec.encode(&forward).unwrap(), codec.encode(&backward).unwrap());
        }
    }
}
