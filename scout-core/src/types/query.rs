//! Structured search queries.
//!
//! A query is an ordered list of named filter fields. The order is whatever
//! the search form produced; it carries no meaning, and equality ignores it.

use serde::ser::{Serialize, Serializer};
use serde::Deserialize;

/// Inclusive numeric bounds. Either side may be open.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, Deserialize)]
pub struct NumericRange {
    /// Lower bound, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl NumericRange {
    /// Creates a closed range.
    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Creates a range with only a lower bound.
    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Creates a range with only an upper bound.
    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }
}

/// Value of a single filter field.
#[derive(Clone, Debug, PartialEq, serde::Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Checkbox-style flag
    Bool(bool),
    /// Whole number (ticket sizes, counts)
    Integer(i64),
    /// Fractional number
    Float(f64),
    /// Free text or a select option
    Text(String),
    /// Numeric range slider
    Range(NumericRange),
    /// Multi-select; element order is significant
    List(Vec<String>),
}

/// 2^53: every whole number up to this magnitude is exact in an `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Returns `f` as an `i64` if it is a whole number within the exact `f64` range.
///
/// `-0.0` maps to `0`.
pub fn exact_integer(f: f64) -> Option<i64> {
    (f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER).then_some(f as i64)
}

impl FilterValue {
    /// Returns the value with whole floats folded into [`FilterValue::Integer`].
    ///
    /// `1e6` and `1_000_000` are the same number and compare equal in a
    /// [`Query`] once normalized.
    pub fn normalized(&self) -> FilterValue {
        match self {
            FilterValue::Float(f) => exact_integer(*f).map_or_else(|| self.clone(), FilterValue::Integer),
            _ => self.clone(),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        FilterValue::Bool(v)
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        FilterValue::Integer(v.into())
    }
}

impl From<u32> for FilterValue {
    fn from(v: u32) -> Self {
        FilterValue::Integer(v.into())
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Integer(v)
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        FilterValue::Float(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Text(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Text(v)
    }
}

impl From<NumericRange> for FilterValue {
    fn from(v: NumericRange) -> Self {
        FilterValue::Range(v)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(v: Vec<String>) -> Self {
        FilterValue::List(v)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(v: Vec<&str>) -> Self {
        FilterValue::List(v.into_iter().map(str::to_string).collect())
    }
}

/// A structured search query: named filter fields.
///
/// Each name appears at most once; setting a name again replaces its value in
/// place. Serializes as a JSON object in construction order. Equality ignores
/// field order and the integer/float spelling of whole numbers.
///
/// ```rust
/// use scout_core::{Query, NumericRange};
///
/// let a = Query::new().with("role", "fund_manager").with("minSize", 1_000_000);
/// let b = Query::new().with("minSize", 1_000_000).with("role", "fund_manager");
/// assert_eq!(a, b);
///
/// let c = a.clone().with("ticket", NumericRange::between(1e5, 5e6));
/// assert_ne!(a, c);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Query {
    fields: Vec<(String, FilterValue)>,
}

impl Query {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the query with `name` set to `value`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets `name` to `value`, replacing any previous value for that name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FilterValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Returns the value of `name`, if set.
    pub fn get(&self, name: &str) -> Option<&FilterValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Iterates fields in construction order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Returns fields sorted by name.
    pub fn sorted_fields(&self) -> Vec<(&str, &FilterValue)> {
        let mut sorted: Vec<_> = self.fields().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        sorted
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if no filter is set.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl PartialEq for Query {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .sorted_fields()
                .into_iter()
                .zip(other.sorted_fields())
                .all(|((a_name, a), (b_name, b))| a_name == b_name && a.normalized() == b.normalized())
    }
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.fields())
    }
}

impl<K, V> FromIterator<(K, V)> for Query
where
    K: Into<String>,
    V: Into<FilterValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Query::new();
        for (name, value) in iter {
            query.set(name, value);
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_in_place() {
        let mut query = Query::new().with("role", "angel").with("stage", "seed");
        query.set("role", "fund_manager");

        assert_eq!(query.len(), 2);
        assert_eq!(query.get("role"), Some(&FilterValue::Text("fund_manager".into())));
        let names: Vec<_> = query.fields().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["role", "stage"]);
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = Query::new().with("a", 1).with("b", true);
        let b = Query::new().with("b", true).with("a", 1);
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_sees_values() {
        let a = Query::new().with("a", 1);
        let b = Query::new().with("a", 2);
        assert_ne!(a, b);
        assert_ne!(a, Query::new());
    }

    #[test]
    fn test_equality_ignores_number_spelling() {
        let a = Query::new().with("role", "fund_manager").with("minSize", 1_000_000);
        let b = Query::new().with("role", "fund_manager").with("minSize", 1e6);
        assert_eq!(a, b);
        assert_eq!(Query::new().with("x", 0), Query::new().with("x", -0.0));
        assert_ne!(a, Query::new().with("role", "fund_manager").with("minSize", 1_000_000.5));
    }

    #[test]
    fn test_normalized_folds_whole_floats() {
        assert_eq!(FilterValue::Float(3.0).normalized(), FilterValue::Integer(3));
        assert_eq!(FilterValue::Float(-0.0).normalized(), FilterValue::Integer(0));
        assert_eq!(FilterValue::Float(2.5).normalized(), FilterValue::Float(2.5));
        assert_eq!(FilterValue::Float(1e20).normalized(), FilterValue::Float(1e20));
        assert_eq!(FilterValue::Float(f64::INFINITY).normalized(), FilterValue::Float(f64::INFINITY));
        assert_eq!(exact_integer(9_007_199_254_740_992.0), Some(9_007_199_254_740_992));
        assert_eq!(exact_integer(f64::NAN), None);
    }

    #[test]
    fn test_serialize_keeps_construction_order() {
        let query = Query::new()
            .with("z", "last")
            .with("a", NumericRange::at_least(10.0));
        let json = serde_json::to_string(&query).unwrap();
        assert_eq!(json, r#"{"z":"last","a":{"min":10.0}}"#);
    }

    #[test]
    fn test_from_iterator() {
        let query: Query = vec![("sector", "fintech"), ("region", "emea")].into_iter().collect();
        assert_eq!(query.len(), 2);
        assert!(query.get("region").is_some());
    }

    #[test]
    fn test_filter_value_untagged_deserialize() {
        let v: FilterValue = serde_json::from_str("42").unwrap();
        assert_eq!(v, FilterValue::Integer(42));
        let v: FilterValue = serde_json::from_str("4.5").unwrap();
        assert_eq!(v, FilterValue::Float(4.5));
        let v: FilterValue = serde_json::from_str(r#"{"max":3.0}"#).unwrap();
        assert_eq!(v, FilterValue::Range(NumericRange::at_most(3.0)));
        let v: FilterValue = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(v, FilterValue::from(vec!["a", "b"]));
    }
}
