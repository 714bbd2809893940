//! In-process search backend used by `scout simulate`.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use scout_cache::SearchBackend;
use scout_core::error::Result;
use scout_core::types::{FilterValue, Query, ResultRecord};

/// Serves a fixed investor directory with an artificial round-trip delay.
pub struct FixtureBackend {
    investors: Vec<ResultRecord>,
    latency: Duration,
}

impl FixtureBackend {
    pub fn new(latency: Duration) -> Self {
        Self {
            investors: directory(),
            latency,
        }
    }
}

#[async_trait]
impl SearchBackend for FixtureBackend {
    type Record = ResultRecord;

    async fn fetch(&self, query: &Query) -> Result<Vec<ResultRecord>> {
        tokio::time::sleep(self.latency).await;
        Ok(self
            .investors
            .iter()
            .filter(|record| matches(record, query))
            .cloned()
            .collect())
    }
}

/// A record matches when every filter it carries a field for agrees.
fn matches(record: &ResultRecord, query: &Query) -> bool {
    query.fields().all(|(name, filter)| match record.get(name) {
        None => true,
        Some(value) => field_matches(value, filter),
    })
}

fn field_matches(value: &Value, filter: &FilterValue) -> bool {
    match filter {
        FilterValue::Bool(b) => value.as_bool() == Some(*b),
        FilterValue::Integer(i) => value.as_i64() == Some(*i),
        FilterValue::Float(f) => value.as_f64() == Some(*f),
        FilterValue::Text(t) => value.as_str() == Some(t.as_str()),
        FilterValue::Range(range) => value.as_f64().is_some_and(|v| {
            range.min.map_or(true, |min| v >= min) && range.max.map_or(true, |max| v <= max)
        }),
        FilterValue::List(options) => value
            .as_str()
            .is_some_and(|v| options.iter().any(|o| o == v)),
    }
}

fn investor(id: &str, name: &str, role: &str, sector: &str, ticket: u64) -> ResultRecord {
    ResultRecord::new(id)
        .with_field("name", name)
        .with_field("role", role)
        .with_field("sector", sector)
        .with_field("ticket", ticket)
}

fn directory() -> Vec<ResultRecord> {
    vec![
        investor("inv-1", "Northwind Capital", "fund_manager", "fintech", 2_000_000),
        investor("inv-7", "Harbor Angels", "angel", "climate", 50_000),
        investor("inv-12", "Lumen Ventures", "fund_manager", "climate", 5_000_000),
        investor("inv-19", "Pine & Partners", "family_office", "health", 750_000),
        investor("inv-42", "Atlas Growth", "fund_manager", "health", 10_000_000),
        investor("inv-55", "Sora Seed", "angel", "fintech", 25_000),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::types::NumericRange;

    #[tokio::test]
    async fn test_filters_directory() {
        let backend = FixtureBackend::new(Duration::ZERO);
        let query = Query::new()
            .with("role", "fund_manager")
            .with("ticket", NumericRange::at_least(3_000_000.0));

        let ids: Vec<_> = backend
            .fetch(&query)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["inv-12", "inv-42"]);
    }

    #[tokio::test]
    async fn test_unknown_fields_ignored() {
        let backend = FixtureBackend::new(Duration::ZERO);
        let query = Query::new().with("page", 2).with("sector", vec!["health", "climate"]);
        assert_eq!(backend.fetch(&query).await.unwrap().len(), 4);
    }
}
