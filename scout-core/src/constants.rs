//! Constants shared by the Scout cache and persisted stores.

use std::time::Duration;

// ═══════════════════════════════════════════════════════════════════════════════
// RESULT CACHE
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum age of a cached search result, in milliseconds (one hour).
pub const RESULT_TTL_MS: u64 = 3_600_000;

/// [`RESULT_TTL_MS`] as a [`Duration`].
pub const RESULT_TTL: Duration = Duration::from_millis(RESULT_TTL_MS);

// ═══════════════════════════════════════════════════════════════════════════════
// METRICS
// ═══════════════════════════════════════════════════════════════════════════════

/// Interval between two metrics samples published to observers.
pub const METRICS_POLL_INTERVAL_MS: u64 = 1_000;

/// [`METRICS_POLL_INTERVAL_MS`] as a [`Duration`].
pub const METRICS_POLL_INTERVAL: Duration = Duration::from_millis(METRICS_POLL_INTERVAL_MS);

// ═══════════════════════════════════════════════════════════════════════════════
// DURABLE RECORDS
// ═══════════════════════════════════════════════════════════════════════════════

/// Name of the durable record holding bookmarked investors.
pub const BOOKMARKS_RECORD_KEY: &str = "investor-bookmarks";

/// Field of the persisted state object that carries the bookmark set.
pub const BOOKMARKS_FIELD: &str = "bookmarkedInvestors";
