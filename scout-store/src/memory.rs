//! In-memory storage slots.
//!
//! Fast, thread-safe, and gone when the process exits. Suitable for
//! development, tests, and sessions that must not touch disk.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use scout_core::error::{Result, ScoutError};
use scout_core::traits::DurableStorage;

/// In-memory durable storage.
///
/// Can be switched to read-only to simulate a full or locked storage medium.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    /// Record key → record text
    records: DashMap<String, String>,
    /// Successful writes since creation
    writes: AtomicU64,
    /// Reject writes when set
    read_only: AtomicBool,
}

impl MemoryStorage {
    /// Creates empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage pre-populated with one record.
    pub fn with_record(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.records.insert(key.into(), value.into());
        storage
    }

    /// Returns the current text of a record.
    pub fn get(&self, key: &str) -> Option<String> {
        self.records.get(key).map(|r| r.value().clone())
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    /// Makes every subsequent write fail (or succeed again).
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no record is stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl DurableStorage for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(ScoutError::StorageError(format!(
                "storage is read-only, cannot write '{key}'"
            )));
        }
        self.records.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        debug!(key, bytes = value.len(), "Record written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(ScoutError::StorageError(format!(
                "storage is read-only, cannot remove '{key}'"
            )));
        }
        self.records.remove(key);
        Ok(())
    }
}
