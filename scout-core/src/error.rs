//! Error types for Scout.
//!
//! This module provides a single error hierarchy using `thiserror`.
//! Most cache paths degrade to "behave as if absent" instead of failing, so
//! these errors surface only at the storage and backend boundaries.

use thiserror::Error;

/// Result type alias using `ScoutError`.
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Main error type for all Scout operations.
#[derive(Debug, Error)]
pub enum ScoutError {
    // ═══════════════════════════════════════════════════════════════════════════
    // STORAGE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Durable slot could not be read or written.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Record key is not usable as a durable slot name.
    #[error("Invalid record key '{0}'")]
    InvalidRecordKey(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Persisted record does not have the expected shape.
    #[error("Decode error: {0}")]
    DecodeError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // BACKEND ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// Backend search request failed.
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ScoutError {
    /// Returns true if this error is recoverable (can retry).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ScoutError::FetchFailed(_) | ScoutError::Io(_))
    }

    /// Returns true if this error originated at the durable storage boundary.
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            ScoutError::Io(_) | ScoutError::StorageError(_) | ScoutError::InvalidRecordKey(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScoutError::InvalidRecordKey("../etc".into());
        assert!(err.to_string().contains("../etc"));
    }

    #[test]
    fn test_error_classification() {
        assert!(ScoutError::FetchFailed("503".into()).is_recoverable());
        assert!(ScoutError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk")).is_recoverable());
        assert!(!ScoutError::ConfigError("ttl".into()).is_recoverable());
        assert!(!ScoutError::DecodeError("bad".into()).is_recoverable());

        assert!(ScoutError::StorageError("full".into()).is_storage_error());
        assert!(ScoutError::InvalidRecordKey("a/b".into()).is_storage_error());
        assert!(!ScoutError::FetchFailed("x".into()).is_storage_error());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_result: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let scout_result: Result<serde_json::Value> = json_result.map_err(ScoutError::from);
        assert!(matches!(scout_result, Err(ScoutError::Json(_))));
    }
}
