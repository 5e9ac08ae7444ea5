//! Shared test helpers for integration tests.
//!
//! Provides seeded fast-index stores, a provider that counts cursor opens
//! and releases, and providers that inject backend faults.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use arbor_primitives::FastNode;
use arbor_store::{
    BoxedCursor, FastIterator, FastRangeProvider, KvStore, MemDb, NodeDb, RawCursor, StoreError,
};

// ── Seeded stores ──

/// A node database whose fast index holds `entries` at version 1.
pub fn fast_db(entries: &[(&str, &str)]) -> NodeDb<MemDb> {
    let mut ndb = NodeDb::new(MemDb::new());
    for (k, v) in entries {
        ndb.save_fast_node(&FastNode::new(k.as_bytes().to_vec(), v.as_bytes().to_vec(), 1))
            .unwrap();
    }
    ndb
}

/// The three-entry index used by the reference scenario.
pub fn abc_db() -> NodeDb<MemDb> {
    fast_db(&[("a", "1"), ("c", "3"), ("b", "2")])
}

/// Overwrite the raw storage value of a fast-index entry.
pub fn corrupt_entry(ndb: &mut NodeDb<MemDb>, key: &str, raw_value: Vec<u8>) {
    let mut storage_key = vec![arbor_primitives::FAST_TAG];
    storage_key.extend_from_slice(key.as_bytes());
    ndb.inner_mut().set(storage_key, raw_value).unwrap();
}

/// Write a raw storage entry, bypassing the fast-node helpers.
pub fn raw_set(ndb: &mut NodeDb<MemDb>, storage_key: &[u8], raw_value: &[u8]) {
    ndb.inner_mut()
        .set(storage_key.to_vec(), raw_value.to_vec())
        .unwrap();
}

/// Owned `(key, value)` pairs from string literals.
pub fn pairs(items: &[(&str, &str)]) -> Vec<(Vec<u8>, Vec<u8>)> {
    items
        .iter()
        .map(|(k, v)| (k.as_bytes().to_vec(), v.as_bytes().to_vec()))
        .collect()
}

/// Walk `iter` until it goes invalid, collecting every entry seen.
pub fn drain(iter: &mut FastIterator<'_>) -> Vec<(Vec<u8>, Vec<u8>)> {
    let mut out = Vec::new();
    while iter.valid() {
        let key = iter.key().expect("valid iterator has a key").to_vec();
        let value = iter.value().expect("valid iterator has a value").to_vec();
        out.push((key, value));
        iter.next();
    }
    out
}

// ── Counting provider ──

/// Counters shared between a [`CountingProvider`] and its cursors.
#[derive(Debug, Default, Clone)]
pub struct Counters {
    pub opens: Rc<Cell<usize>>,
    pub closes: Rc<Cell<usize>>,
}

/// Provider that delegates to a `NodeDb` and counts opens and releases.
pub struct CountingProvider<'a> {
    pub inner: &'a NodeDb<MemDb>,
    pub counters: Counters,
}

impl<'a> CountingProvider<'a> {
    pub fn new(inner: &'a NodeDb<MemDb>) -> Self {
        Self {
            inner,
            counters: Counters::default(),
        }
    }

    pub fn opens(&self) -> usize {
        self.counters.opens.get()
    }

    pub fn closes(&self) -> usize {
        self.counters.closes.get()
    }
}

impl FastRangeProvider for CountingProvider<'_> {
    fn open_fast_range(
        &self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        ascending: bool,
    ) -> Result<BoxedCursor<'_>, StoreError> {
        let inner = self.inner.open_fast_range(start, end, ascending)?;
        self.counters.opens.set(self.counters.opens.get() + 1);
        Ok(Box::new(CountingCursor {
            inner,
            closes: self.counters.closes.clone(),
        }))
    }
}

struct CountingCursor<'a> {
    inner: BoxedCursor<'a>,
    closes: Rc<Cell<usize>>,
}

impl RawCursor for CountingCursor<'_> {
    fn valid(&self) -> bool {
        self.inner.valid()
    }

    fn key(&self) -> &[u8] {
        self.inner.key()
    }

    fn value(&self) -> &[u8] {
        self.inner.value()
    }

    fn next(&mut self) {
        self.inner.next()
    }

    fn error(&self) -> Option<StoreError> {
        self.inner.error()
    }

    fn domain(&self) -> (Option<&[u8]>, Option<&[u8]>) {
        self.inner.domain()
    }

    fn close(&mut self) -> Result<(), StoreError> {
        self.closes.set(self.closes.get() + 1);
        self.inner.close()
    }
}

// ── Fault injection ──

/// Which backend operation should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// `open_fast_range` fails.
    Open,
    /// The cursor opens but reports a fault before any step.
    AtOpen,
    /// The cursor reports a fault after this many successful steps.
    StepAfter(usize),
    /// Releasing the cursor fails.
    Close,
}

/// Provider that delegates to a `NodeDb` and injects one fault.
pub struct FaultyProvider<'a> {
    pub inner: &'a NodeDb<MemDb>,
    pub fault: Fault,
}

pub fn backend_fault(what: &str) -> StoreError {
    StoreError::Backend(format!("injected {} fault", what))
}

impl FastRangeProvider for FaultyProvider<'_> {
    fn open_fast_range(
        &self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        ascending: bool,
    ) -> Result<BoxedCursor<'_>, StoreError> {
        if self.fault == Fault::Open {
            return Err(backend_fault("open"));
        }
        let inner = self.inner.open_fast_range(start, end, ascending)?;
        Ok(Box::new(FaultyCursor {
            inner,
            fault: self.fault,
            steps: 0,
            error: (self.fault == Fault::AtOpen).then(|| backend_fault("cursor")),
        }))
    }
}

struct FaultyCursor<'a> {
    inner: BoxedCursor<'a>,
    fault: Fault,
    steps: usize,
    error: Option<StoreError>,
}

impl RawCursor for FaultyCursor<'_> {
    fn valid(&self) -> bool {
        self.error.is_none() && self.inner.valid()
    }

    fn key(&self) -> &[u8] {
        self.inner.key()
    }

    fn value(&self) -> &[u8] {
        self.inner.value()
    }

    fn next(&mut self) {
        if self.error.is_some() {
            return;
        }
        self.inner.next();
        self.steps += 1;
        if let Fault::StepAfter(n) = self.fault {
            if self.steps > n {
                self.error = Some(backend_fault("step"));
            }
        }
    }

    fn error(&self) -> Option<StoreError> {
        self.error.clone().or_else(|| self.inner.error())
    }

    fn domain(&self) -> (Option<&[u8]>, Option<&[u8]>) {
        self.inner.domain()
    }

    fn close(&mut self) -> Result<(), StoreError> {
        self.inner.close()?;
        match self.fault {
            Fault::Close => Err(backend_fault("close")),
            _ => Ok(()),
        }
    }
}

// ── Clamping provider ──

/// Provider that narrows every requested range to start no lower than
/// `floor` (a tagged storage key).
pub struct ClampingProvider<'a> {
    pub inner: &'a NodeDb<MemDb>,
    pub floor: Vec<u8>,
}

impl FastRangeProvider for ClampingProvider<'_> {
    fn open_fast_range(
        &self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        ascending: bool,
    ) -> Result<BoxedCursor<'_>, StoreError> {
        let start = match start {
            Some(s) if s > self.floor.as_slice() => s,
            _ => self.floor.as_slice(),
        };
        self.inner.open_fast_range(Some(start), end, ascending)
    }
}
