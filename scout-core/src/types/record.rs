//! Search result records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row returned by the backend search endpoint.
///
/// Only `id` is interpreted; every other field is carried through untouched
/// and serialized flat next to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Stable identifier of the matched investor or startup
    pub id: String,
    /// Remaining fields as delivered by the backend
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ResultRecord {
    /// Creates a record with no extra fields.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Returns the record with an extra field set.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Returns an extra field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_serialization() {
        let record = ResultRecord::new("inv-7")
            .with_field("name", "Northwind Capital")
            .with_field("ticket", 250_000);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "inv-7");
        assert_eq!(json["name"], "Northwind Capital");
        assert_eq!(json["ticket"], 250_000);
    }

    #[test]
    fn test_deserialize_keeps_unknown_fields() {
        let record: ResultRecord =
            serde_json::from_str(r#"{"id":"a","stage":"seed","verified":true}"#).unwrap();
        assert_eq!(record.id, "a");
        assert_eq!(record.get("stage"), Some(&Value::from("seed")));
        assert_eq!(record.get("verified"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_missing_id_rejected() {
        let result: Result<ResultRecord, _> = serde_json::from_str(r#"{"name":"x"}"#);
        assert!(result.is_err());
    }
}
