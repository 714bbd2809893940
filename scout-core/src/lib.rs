//! # Scout Core
//!
//! Core types, errors, and traits for the Scout dashboard's client-side cache.
//!
//! This crate provides the foundational building blocks used by all other Scout crates:
//!
//! - **Types**: Search queries, result records, usage metrics
//! - **Errors**: A single error hierarchy with classification helpers
//! - **Constants**: TTL, poll interval, and durable record names
//! - **Traits**: Time source, durable storage slot, metrics source
//! - **Clock**: System and manually driven clocks
//!
//! ## Example
//!
//! ```rust
//! use scout_core::{Query, ResultRecord};
//!
//! let query = Query::new()
//!     .with("role", "fund_manager")
//!     .with("minSize", 1_000_000);
//! assert_eq!(query.len(), 2);
//!
//! let record = ResultRecord::new("inv-1");
//! let json = serde_json::to_string(&record).unwrap();
//! assert_eq!(json, r#"{"id":"inv-1"}"#);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod clock;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use clock::{ManualClock, SystemClock};
pub use constants::*;
pub use error::{Result, ScoutError};
pub use traits::*;
pub use types::*;
