//! Caller-side get-or-fetch loop around the result cache.
//!
//! The cache never talks to the backend itself. `CachedSearch` is the
//! collaborator that does: look up, fetch on a miss, store on success.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use scout_core::error::Result;
use scout_core::types::Query;

use crate::cache::ResultCache;

/// Backend search endpoint.
///
/// Cancellation, retries, and timeouts belong to the implementation.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Record type returned by the endpoint.
    type Record: Send + Sync + 'static;

    /// Runs `query` against the backend.
    async fn fetch(&self, query: &Query) -> Result<Vec<Self::Record>>;
}

/// Result of a search with its provenance.
#[derive(Debug)]
pub struct SearchOutcome<T> {
    /// The matching records
    pub records: Arc<Vec<T>>,
    /// Whether the records came from cache
    pub from_cache: bool,
}

/// Search client that consults a shared [`ResultCache`] before the backend.
pub struct CachedSearch<B: SearchBackend> {
    cache: Arc<ResultCache<B::Record>>,
    backend: B,
}

impl<B: SearchBackend> CachedSearch<B> {
    /// Creates a search client over a shared cache.
    pub fn new(cache: Arc<ResultCache<B::Record>>, backend: B) -> Self {
        Self { cache, backend }
    }

    /// Returns cached results for `query`, fetching and caching them on a miss.
    ///
    /// A failed fetch is returned as-is and nothing is cached, so the next
    /// search for the same query goes to the backend again.
    #[instrument(skip_all, fields(filters = query.len()))]
    pub async fn search(&self, query: &Query) -> Result<SearchOutcome<B::Record>> {
        if let Some(records) = self.cache.get(query) {
            return Ok(SearchOutcome {
                records,
                from_cache: true,
            });
        }

        let records = match self.backend.fetch(query).await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Backend search failed");
                return Err(e);
            }
        };
        debug!(records = records.len(), "Fetched from backend");

        Ok(SearchOutcome {
            records: self.cache.set(query, records),
            from_cache: false,
        })
    }

    /// Returns the shared cache.
    pub fn cache(&self) -> &Arc<ResultCache<B::Record>> {
        &self.cache
    }

    /// Returns the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::error::ScoutError;
    use scout_core::types::ResultRecord;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingBackend {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl SearchBackend for CountingBackend {
        type Record = ResultRecord;

        async fn fetch(&self, query: &Query) -> Result<Vec<ResultRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ScoutError::FetchFailed("503 Service Unavailable".into()));
            }
            Ok(vec![ResultRecord::new(format!("match-{}", query.len()))])
        }
    }

    #[tokio::test]
    async fn test_miss_fetches_then_hits() {
        let search = CachedSearch::new(Arc::new(ResultCache::new()), CountingBackend::default());
        let query = Query::new().with("sector", "fintech");

        let first = search.search(&query).await.unwrap();
        assert!(!first.from_cache);
        assert_eq!(first.records[0].id, "match-1");

        let second = search.search(&query).await.unwrap();
        assert!(second.from_cache);
        assert!(Arc::ptr_eq(&first.records, &second.records));

        assert_eq!(search.backend().calls.load(Ordering::SeqCst), 1);
        let metrics = search.cache().metrics();
        assert_eq!((metrics.hits, metrics.misses, metrics.size), (1, 1, 1));
    }

    #[tokio::test]
    async fn test_fetch_failure_caches_nothing() {
        let backend = CountingBackend {
            fail: true,
            ..Default::default()
        };
        let search = CachedSearch::new(Arc::new(ResultCache::new()), backend);
        let query = Query::new().with("sector", "biotech");

        let err = search.search(&query).await.unwrap_err();
        assert!(err.is_recoverable());
        assert!(search.cache().is_empty());

        assert!(search.search(&query).await.is_err());
        assert_eq!(search.backend().calls.load(Ordering::SeqCst), 2);
        assert_eq!(search.cache().metrics().misses, 2);
    }

    #[tokio::test]
    async fn test_shared_cache_between_clients() {
        let cache = Arc::new(ResultCache::new());
        let a = CachedSearch::new(cache.clone(), CountingBackend::default());
        let b = CachedSearch::new(cache, CountingBackend::default());
        let query = Query::new().with("stage", "seed");

        a.search(&query).await.unwrap();
        assert!(b.search(&query).await.unwrap().from_cache);
        assert_eq!(b.backend().calls.load(Ordering::SeqCst), 0);
    }
}
