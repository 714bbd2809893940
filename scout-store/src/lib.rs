//! # Scout Store
//!
//! Durable client-side state for the Scout dashboard.
//!
//! This crate provides:
//!
//! - **Codec**: The flat persisted shape of a set of identifiers
//! - **Memory**: In-process storage slots for development and testing
//! - **File**: One JSON file per record for single-user deployments
//! - **PersistedSetStore**: A set of identifiers kept in one durable record,
//!   rewritten in full on every change (investor bookmarks)
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use scout_store::{MemoryStorage, PersistedSetStore};
//!
//! # #[tokio::main]
//! # async fn main() -> scout_core::Result<()> {
//! let storage = Arc::new(MemoryStorage::new());
//! let bookmarks = PersistedSetStore::bookmarks(storage.clone()).await;
//!
//! bookmarks.toggle("inv-42").await?;
//! assert!(bookmarks.contains("inv-42"));
//! assert_eq!(
//!     storage.get("investor-bookmarks").as_deref(),
//!     Some(r#"{"state":{"bookmarkedInvestors":["inv-42"]}}"#)
//! );
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod codec;
mod file;
mod memory;
mod set_store;

pub use codec::SetCodec;
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use set_store::PersistedSetStore;

// Re-export the trait from core
pub use scout_core::traits::DurableStorage as Storage;
