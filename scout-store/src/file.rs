//! File-backed storage slots.
//!
//! Each record lives in its own file, `<dir>/<key>.json`, and is replaced
//! atomically on every write. Suitable for a single user on one machine.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

use scout_core::error::{Result, ScoutError};
use scout_core::traits::DurableStorage;

/// Record file extension
const EXTENSION: &str = "json";

/// File-based durable storage.
///
/// # Layout
///
/// ```text
/// <dir>/
///   investor-bookmarks.json
///   <other-record>.json
/// ```
///
/// The directory is created on first write. Record keys are limited to ASCII
/// letters, digits, `.`, `_` and `-` so a key can never escape the directory.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates storage rooted at `dir`. Nothing is touched on disk yet.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Returns the storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !valid {
            return Err(ScoutError::InvalidRecordKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.{EXTENSION}")))
    }
}

#[async_trait]
impl DurableStorage for FileStorage {
    #[instrument(skip(self))]
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(contents) => {
                debug!(path = ?path, bytes = contents.len(), "Record read");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ScoutError::Io(e)),
        }
    }

    #[instrument(skip(self, value))]
    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).await?;

        // Write atomically (write to temp, then rename)
        let temp_path = path.with_extension(format!("{EXTENSION}.tmp"));
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(value.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, &path).await?;

        debug!(path = ?path, bytes = value.len(), "Record written");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ScoutError::Io(e)),
        }
    }
}
