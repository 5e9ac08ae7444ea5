//! Backend key/value storage abstraction.
//!
//! `KvStore` is the raw ordered keyspace shared by tree nodes, fast-index
//! entries and metadata. Keys are compared byte-lexicographically.
//!
//! Implementations:
//! - `MemDb` (this crate): in-memory BTreeMap
//! - disk engines plug in behind the same trait

use crate::cursor::BoxedCursor;
use crate::error::StoreError;

/// Abstraction over the raw ordered keyspace.
pub trait KvStore {
    /// Get the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Check if a key exists.
    ///
    /// Default implementation uses `get()`, but backends may optimize this.
    fn has(&self, key: &[u8]) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&mut self, key: &[u8]) -> Result<(), StoreError>;

    /// Open a cursor over `[start, end)`.
    ///
    /// An absent bound is unbounded on that side. Descending cursors visit
    /// the same entries in reverse order. The cursor reads a consistent
    /// snapshot and never observes later writes.
    fn range(
        &self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        ascending: bool,
    ) -> Result<BoxedCursor<'_>, StoreError>;
}
