//! Common traits for Scout.
//!
//! These traits define the seams between the cache core and its collaborators,
//! so that time, storage, and telemetry can be swapped in tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::UsageMetrics;

// ═══════════════════════════════════════════════════════════════════════════════
// TIME SOURCE
// ═══════════════════════════════════════════════════════════════════════════════

/// Source of wall-clock time in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    /// Returns the current time in milliseconds.
    fn now_millis(&self) -> u64;
}

// ═══════════════════════════════════════════════════════════════════════════════
// DURABLE STORAGE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// A named-slot key-value store that survives process restarts.
///
/// Values are plain strings; callers own the encoding. Implementations might use:
/// - An in-process map (for testing)
/// - One file per record on local disk
/// - Browser-style local storage behind a bridge
#[async_trait]
pub trait DurableStorage: Send + Sync {
    /// Reads the record stored under `key`, or `None` if the slot is empty.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites the record stored under `key`.
    async fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Empties the slot. Removing an absent record is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// METRICS TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Anything that can report a point-in-time [`UsageMetrics`] snapshot.
pub trait MetricsSource: Send + Sync {
    /// Returns a copy of the current counters.
    fn metrics(&self) -> UsageMetrics;
}
