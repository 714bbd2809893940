//! Domain types for Scout.
//!
//! - [`Query`]: Structured search filter built by the dashboard's search forms
//! - [`ResultRecord`]: One search result returned by the backend
//! - [`UsageMetrics`]: Hit/miss/size counters of the result cache

mod metrics;
mod query;
mod record;

pub use metrics::*;
pub use query::*;
pub use record::*;
