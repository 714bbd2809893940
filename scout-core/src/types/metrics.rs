//! Usage counters of the result cache.

use serde::{Deserialize, Serialize};

/// Snapshot of result-cache usage.
///
/// `hits` and `misses` only ever grow during a session; `size` is the current
/// number of cached entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetrics {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that found nothing fresh
    pub misses: u64,
    /// Entries currently held
    pub size: u64,
}

impl UsageMetrics {
    /// Total lookups (hits + misses).
    pub fn total_requests(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups that hit, 0.0 when nothing was looked up yet.
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
