//! In-memory key/value store.
//!
//! `MemDb` implements `KvStore` using a `BTreeMap` for deterministic key
//! ordering. Its cursors copy the requested range up front, so they read a
//! stable snapshot and hold no borrow of the map.

use std::collections::BTreeMap;
use std::ops::Bound;

use crate::cursor::{BoxedCursor, RawCursor};
use crate::error::StoreError;
use crate::kv_store::KvStore;

/// In-memory ordered store backed by `BTreeMap`.
#[derive(Debug, Clone, Default)]
pub struct MemDb {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemDb {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    /// Create a store pre-populated with data.
    pub fn with_data(data: BTreeMap<Vec<u8>, Vec<u8>>) -> Self {
        Self { data }
    }

    /// Returns the number of entries in the store.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl KvStore for MemDb {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn has(&self, key: &[u8]) -> Result<bool, StoreError> {
        Ok(self.data.contains_key(key))
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) -> Result<(), StoreError> {
        self.data.insert(key, value);
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StoreError> {
        self.data.remove(key);
        Ok(())
    }

    fn range(
        &self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        ascending: bool,
    ) -> Result<BoxedCursor<'_>, StoreError> {
        let mut entries: Vec<(Vec<u8>, Vec<u8>)> = match (start, end) {
            // BTreeMap::range panics on inverted bounds.
            (Some(s), Some(e)) if s >= e => Vec::new(),
            _ => {
                let lower = start.map_or(Bound::Unbounded, Bound::Included);
                let upper = end.map_or(Bound::Unbounded, Bound::Excluded);
                self.data
                    .range::<[u8], _>((lower, upper))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            }
        };
        if !ascending {
            entries.reverse();
        }
        Ok(Box::new(MemCursor {
            entries,
            pos: 0,
            start: start.map(<[u8]>::to_vec),
            end: end.map(<[u8]>::to_vec),
            closed: false,
        }))
    }
}

/// Snapshot cursor over a `MemDb` range.
#[derive(Debug)]
pub struct MemCursor {
    entries: Vec<(Vec<u8>, Vec<u8>)>,
    pos: usize,
    start: Option<Vec<u8>>,
    end: Option<Vec<u8>>,
    closed: bool,
}

impl MemCursor {
    fn current(&self) -> Option<&(Vec<u8>, Vec<u8>)> {
        if self.closed {
            return None;
        }
        self.entries.get(self.pos)
    }
}

impl RawCursor for MemCursor {
    fn valid(&self) -> bool {
        self.current().is_some()
    }

    fn key(&self) -> &[u8] {
        self.current().map(|(k, _)| k.as_slice()).unwrap_or_default()
    }

    fn value(&self) -> &[u8] {
        self.current().map(|(_, v)| v.as_slice()).unwrap_or_default()
    }

    fn next(&mut self) {
        if self.valid() {
            self.pos += 1;
        }
    }

    fn error(&self) -> Option<StoreError> {
        None
    }

    fn domain(&self) -> (Option<&[u8]>, Option<&[u8]>) {
        (self.start.as_deref(), self.end.as_deref())
    }

    fn close(&mut self) -> Result<(), StoreError> {
        if self.closed {
            return Err(StoreError::CursorClosed);
        }
        self.closed = true;
        self.entries = Vec::new();
        Ok(())
    }
}
