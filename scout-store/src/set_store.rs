//! A set of identifiers kept in one durable record.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use scout_core::constants::BOOKMARKS_RECORD_KEY;
use scout_core::error::Result;
use scout_core::traits::DurableStorage;

use crate::codec::{encode_set, SetCodec};

/// Set of opaque identifiers persisted under a single named record.
///
/// The set is loaded once when the store is opened. Every [`toggle`] re-encodes
/// the whole set and overwrites the record before the change becomes visible
/// to [`contains`], so memory never runs ahead of storage.
///
/// # Thread Safety
///
/// Toggles (and reloads) are serialized by an async mutex held across the
/// durable write, so two concurrent toggles can never interleave their
/// writes. Reads take a short-lived lock and never wait on storage.
///
/// [`toggle`]: PersistedSetStore::toggle
/// [`contains`]: PersistedSetStore::contains
pub struct PersistedSetStore {
    storage: Arc<dyn DurableStorage>,
    record_key: String,
    codec: SetCodec,
    /// Last persisted state of the set
    members: RwLock<HashSet<String>>,
    /// Serializes mutation + persistence
    write_lock: Mutex<()>,
}

impl PersistedSetStore {
    /// Opens the store and loads the record.
    ///
    /// Never fails: an absent, unreadable, or corrupt record yields an empty set.
    pub async fn open(
        storage: Arc<dyn DurableStorage>,
        record_key: impl Into<String>,
        codec: SetCodec,
    ) -> Self {
        let store = Self {
            storage,
            record_key: record_key.into(),
            codec,
            members: RwLock::new(HashSet::new()),
            write_lock: Mutex::new(()),
        };
        store.load().await;
        store
    }

    /// Opens the investor bookmark store.
    pub async fn bookmarks(storage: Arc<dyn DurableStorage>) -> Self {
        Self::open(storage, BOOKMARKS_RECORD_KEY, SetCodec::bookmarks()).await
    }

    /// Replaces the in-memory set with the stored record.
    ///
    /// Falls back to an empty set if the record is absent, unreadable, or does
    /// not decode. Returns the number of members loaded.
    #[instrument(skip(self), fields(record = %self.record_key))]
    pub async fn load(&self) -> usize {
        let _guard = self.write_lock.lock().await;

        let loaded = match self.storage.read(&self.record_key).await {
            Ok(None) => {
                debug!("No stored record, starting empty");
                HashSet::new()
            }
            Ok(Some(raw)) => match self.codec.decode(&raw) {
                Ok(set) => set,
                Err(e) => {
                    warn!(error = %e, "Stored record is corrupt, starting empty");
                    HashSet::new()
                }
            },
            Err(e) => {
                warn!(error = %e, "Stored record is unreadable, starting empty");
                HashSet::new()
            }
        };

        let count = loaded.len();
        *self.members.write() = loaded;
        info!(count, "Persisted set loaded");
        count
    }

    /// Adds `id` if absent, removes it if present, then persists the full set.
    ///
    /// Returns whether `id` is a member afterwards. If the write fails the
    /// error is returned and the set is left as it was.
    #[instrument(skip(self), fields(record = %self.record_key))]
    pub async fn toggle(&self, id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;

        let mut next = self.members.read().clone();
        let member = if next.remove(id) {
            false
        } else {
            next.insert(id.to_string());
            true
        };

        let record = self.codec.encode(&next)?;
        self.storage.write(&self.record_key, &record).await?;

        *self.members.write() = next;
        debug!(id, member, "Toggled membership");
        Ok(member)
    }

    /// Empties the set and deletes its durable record.
    ///
    /// A fresh store over the same storage starts empty. If the record cannot
    /// be removed the error is returned and the set is left as it was.
    #[instrument(skip(self), fields(record = %self.record_key))]
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        self.storage.remove(&self.record_key).await?;

        let removed = std::mem::take(&mut *self.members.write()).len();
        info!(removed, "Persisted set cleared");
        Ok(())
    }

    /// Returns true if `id` is in the set.
    pub fn contains(&self, id: &str) -> bool {
        self.members.read().contains(id)
    }

    /// Returns the members, sorted.
    pub fn ids(&self) -> Vec<String> {
        encode_set(&self.members.read())
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.read().len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.members.read().is_empty()
    }

    /// Name of the durable record.
    pub fn record_key(&self) -> &str {
        &self.record_key
    }
}
