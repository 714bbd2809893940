//! Cache and poller configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use scout_core::constants::{METRICS_POLL_INTERVAL, RESULT_TTL};

/// Result cache configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum age of an entry before a read treats it as absent
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl: RESULT_TTL }
    }
}

impl CacheConfig {
    /// Set the TTL duration
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// TTL in whole milliseconds.
    pub fn ttl_millis(&self) -> u64 {
        self.ttl.as_millis() as u64
    }
}

/// Metrics poller configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollerConfig {
    /// Time between two samples
    pub interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: METRICS_POLL_INTERVAL,
        }
    }
}

/// Shortest sampling interval a poller will run with.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

impl PollerConfig {
    /// Set the sampling interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Interval the poller actually ticks at, never below [`MIN_POLL_INTERVAL`].
    pub fn period(&self) -> Duration {
        self.interval.max(MIN_POLL_INTERVAL)
    }
}
