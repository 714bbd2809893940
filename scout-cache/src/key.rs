//! Canonical cache keys for structured queries.
//!
//! A key is the compact JSON object of the query's fields, members sorted by
//! name. Two queries holding the same values produce the same key no matter
//! in which order the search form set them. Whole numbers are written as
//! integers whichever way they were entered, so `1e6` and `1000000` share a key.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Number, Value};

use scout_core::types::{exact_integer, FilterValue, NumericRange, Query};

/// Lookup identity of a cached result set.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Returns the key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Turns queries into [`CacheKey`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyEncoder;

impl KeyEncoder {
    /// Encodes `query` into its canonical key.
    pub fn encode(query: &Query) -> CacheKey {
        let mut object = Map::new();
        for (name, value) in query.sorted_fields() {
            object.insert(name.to_string(), canonical_value(value));
        }
        CacheKey(Value::Object(object).to_string())
    }
}

fn canonical_value(value: &FilterValue) -> Value {
    match value {
        FilterValue::Bool(b) => Value::Bool(*b),
        FilterValue::Integer(i) => Value::from(*i),
        FilterValue::Float(f) => canonical_float(*f),
        FilterValue::Text(s) => Value::String(s.clone()),
        FilterValue::Range(range) => canonical_range(range),
        FilterValue::List(items) => Value::Array(items.iter().cloned().map(Value::String).collect()),
    }
}

fn canonical_range(range: &NumericRange) -> Value {
    let bound = |b: Option<f64>| b.map_or(Value::Null, canonical_float);
    let mut object = Map::new();
    object.insert("max".into(), bound(range.max));
    object.insert("min".into(), bound(range.min));
    Value::Object(object)
}

fn canonical_float(f: f64) -> Value {
    // also folds -0.0 into 0
    if let Some(i) = exact_integer(f) {
        return Value::from(i);
    }
    match Number::from_f64(f) {
        Some(n) => Value::Number(n),
        None => {
            let label = if f.is_nan() {
                "NaN"
            } else if f > 0.0 {
                "inf"
            } else {
                "-inf"
            };
            let mut object = Map::new();
            object.insert("nonFinite".into(), Value::String(label.into()));
            Value::Object(object)
        }
    }
}
