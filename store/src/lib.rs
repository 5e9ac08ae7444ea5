//! `arbor-store`: fast-index iteration over the Arbor versioned tree store.
//!
//! The fast index is a flat, key-ordered copy of the latest tree version's
//! live key/value pairs, kept next to the tree nodes in the same keyspace.
//! This crate provides:
//!
//! - `RawCursor` / `FastRangeProvider`: the raw range-scan protocol
//! - `KvStore`: backend keyspace abstraction
//! - `MemDb`: in-memory `KvStore` for testing
//! - `NodeDb`: fast-node access and the fast-index range provider
//! - `FastIterator`: latch-once typed cursor over the fast index
//! - `NodeDbConfig`: key/value size limits
//!
//! Keeping the fast index synchronized with the tree is the write path's
//! job. A `FastIterator` faithfully traverses whatever the index holds;
//! use [`NodeDb::is_fast_index_stale`] to detect an index that lags.

pub mod error;
pub mod config;
pub mod cursor;
pub mod kv_store;
pub mod mem_db;
pub mod node_db;
pub mod fast_iterator;

// Re-export commonly used types at the crate root.
pub use error::{FastIterError, StoreError};
pub use config::NodeDbConfig;
pub use cursor::{BoxedCursor, FastRangeProvider, RawCursor};
pub use kv_store::KvStore;
pub use mem_db::{MemCursor, MemDb};
pub use node_db::NodeDb;
pub use fast_iterator::{Domain, FastEntries, FastIterator, IterState};
