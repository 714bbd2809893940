//! In-memory TTL cache for search results.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use scout_core::clock::SystemClock;
use scout_core::traits::{Clock, MetricsSource};
use scout_core::types::{Query, ResultRecord, UsageMetrics};

use crate::config::CacheConfig;
use crate::key::{CacheKey, KeyEncoder};

/// Cached result set with its creation time and originating query.
///
/// Never mutated after creation; a newer `set` for the same key replaces it.
#[derive(Debug)]
pub struct ExpiringEntry<T> {
    payload: Arc<Vec<T>>,
    created_at: u64,
    source_query: Query,
}

impl<T> ExpiringEntry<T> {
    fn new(payload: Vec<T>, created_at: u64, source_query: Query) -> Self {
        Self {
            payload: Arc::new(payload),
            created_at,
            source_query,
        }
    }

    /// The cached records.
    pub fn payload(&self) -> &Arc<Vec<T>> {
        &self.payload
    }

    /// Creation time in milliseconds since the Unix epoch.
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// The query the records were fetched for.
    pub fn source_query(&self) -> &Query {
        &self.source_query
    }

    /// Age at `now`, in milliseconds. A clock that went backwards reads as zero.
    pub fn age_millis(&self, now: u64) -> u64 {
        now.saturating_sub(self.created_at)
    }

    /// True once the entry is strictly older than `ttl_millis`.
    pub fn is_expired(&self, now: u64, ttl_millis: u64) -> bool {
        self.age_millis(now) > ttl_millis
    }
}

impl<T> Clone for ExpiringEntry<T> {
    fn clone(&self) -> Self {
        Self {
            payload: Arc::clone(&self.payload),
            created_at: self.created_at,
            source_query: self.source_query.clone(),
        }
    }
}

struct CacheState<T> {
    entries: HashMap<CacheKey, ExpiringEntry<T>>,
    metrics: UsageMetrics,
}

impl<T> CacheState<T> {
    fn sync_size(&mut self) {
        self.metrics.size = self.entries.len() as u64;
    }
}

/// Keyed result cache with lazy TTL expiry and hit/miss accounting.
///
/// Entries and counters live under one lock, so `size` always equals the
/// entry count. Staleness is only discovered when a key is read again; there
/// is no background sweep and no capacity bound.
///
/// Share one instance per process through an `Arc`.
pub struct ResultCache<T = ResultRecord> {
    state: Mutex<CacheState<T>>,
    clock: Arc<dyn Clock>,
    config: CacheConfig,
}

impl<T> ResultCache<T> {
    /// Creates a cache with default configuration and the system clock.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Creates a cache with custom configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a cache reading time from `clock`.
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                metrics: UsageMetrics::default(),
            }),
            clock,
            config,
        }
    }

    /// Looks up the results cached for `query`.
    ///
    /// Returns `None` if nothing is cached or the entry outlived the TTL; an
    /// expired entry is evicted on the spot. Every call counts as exactly one
    /// hit or one miss.
    pub fn get(&self, query: &Query) -> Option<Arc<Vec<T>>> {
        let key = KeyEncoder::encode(query);
        let now = self.clock.now_millis();
        let ttl = self.config.ttl_millis();

        let mut state = self.state.lock();
        let lookup = state
            .entries
            .get(&key)
            .map(|entry| (entry.is_expired(now, ttl), Arc::clone(&entry.payload)));

        match lookup {
            None => {
                state.metrics.misses += 1;
                debug!(%key, "Cache miss");
                None
            }
            Some((true, _)) => {
                state.entries.remove(&key);
                state.sync_size();
                state.metrics.misses += 1;
                debug!(%key, "Cache entry expired");
                None
            }
            Some((false, payload)) => {
                state.metrics.hits += 1;
                debug!(%key, "Cache hit");
                Some(payload)
            }
        }
    }

    /// Caches `payload` as the results for `query` and returns the stored copy.
    ///
    /// Overwriting an existing entry resets its age.
    pub fn set(&self, query: &Query, payload: Vec<T>) -> Arc<Vec<T>> {
        let key = KeyEncoder::encode(query);
        let entry = ExpiringEntry::new(payload, self.clock.now_millis(), query.clone());
        let stored = Arc::clone(&entry.payload);

        let mut state = self.state.lock();
        state.entries.insert(key.clone(), entry);
        state.sync_size();
        debug!(%key, records = stored.len(), size = state.metrics.size, "Cached results");
        stored
    }

    /// Returns the entry for `query` without counting a lookup or evicting it.
    pub fn entry(&self, query: &Query) -> Option<ExpiringEntry<T>> {
        let key = KeyEncoder::encode(query);
        self.state.lock().entries.get(&key).cloned()
    }

    /// Drops every entry. Hit and miss counters are kept.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        let dropped = state.entries.len();
        state.entries.clear();
        state.sync_size();
        info!(dropped, "Result cache cleared");
    }

    /// Returns a copy of the usage counters.
    pub fn metrics(&self) -> UsageMetrics {
        self.state.lock().metrics
    }

    /// Returns the number of cached entries, stale ones included.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }
}

impl<T> Default for ResultCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync> MetricsSource for ResultCache<T> {
    fn metrics(&self) -> UsageMetrics {
        ResultCache::metrics(self)
    }
}
