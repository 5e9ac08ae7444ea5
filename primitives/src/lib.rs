//! `arbor-primitives`: storage-level building blocks for the Arbor
//! versioned tree.
//!
//! This crate owns the byte layouts that are shared with stores written by
//! earlier releases:
//!
//! - namespace tag bytes partitioning the shared keyspace
//! - the fast-node value encoding
//! - logical <-> storage key and bound translation
//! - the fast-storage version marker
//!
//! It performs no I/O; the cursor protocol lives in `arbor-store`.

pub mod types;
pub mod error;
pub mod codec;
pub mod domain;
pub mod storage_version;

// Re-export commonly used types at the crate root for convenience.
pub use types::{Version, FAST_TAG, METADATA_TAG, NODE_TAG, ROOT_TAG, MAX_KEY_LEN, MAX_VALUE_LEN};
pub use error::CodecError;
pub use codec::FastNode;
pub use storage_version::StorageVersion;
