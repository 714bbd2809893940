//! TTL result cache for Scout search queries.
//!
//! Sits between the dashboard's search UI and the backend:
//!
//! - [`KeyEncoder`] turns a [`Query`](scout_core::Query) into a canonical [`CacheKey`]
//! - [`ResultCache`] maps keys to expiring result sets and counts hits and misses
//! - [`MetricsPoller`] republishes the counters on a fixed interval
//! - [`CachedSearch`] is the caller-side get-or-fetch loop around a backend
//!
//! ## Example
//!
//! ```rust
//! use scout_cache::ResultCache;
//! use scout_core::{Query, ResultRecord};
//!
//! let cache: ResultCache = ResultCache::new();
//! let query = Query::new().with("role", "fund_manager");
//!
//! assert!(cache.get(&query).is_none());
//! cache.set(&query, vec![ResultRecord::new("a")]);
//! assert_eq!(cache.get(&query).unwrap()[0].id, "a");
//!
//! let metrics = cache.metrics();
//! assert_eq!((metrics.hits, metrics.misses, metrics.size), (1, 1, 1));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;
mod config;
mod key;
mod poller;
mod search;

pub use cache::{ExpiringEntry, ResultCache};
pub use config::{CacheConfig, PollerConfig, MIN_POLL_INTERVAL};
pub use key::{CacheKey, KeyEncoder};
pub use poller::MetricsPoller;
pub use search::{CachedSearch, SearchBackend, SearchOutcome};
