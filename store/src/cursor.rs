//! Raw range-scan cursor protocol.
//!
//! `RawCursor` is the conventional ordered range scan over raw storage
//! bytes: position, step, read, poll for faults, release. Any backend that
//! can produce one can back the fast index; the iterator logic never sees
//! the backend type.

use crate::error::StoreError;

/// An exclusively owned raw cursor.
pub type BoxedCursor<'a> = Box<dyn RawCursor + 'a>;

/// Ordered cursor over raw `(key, value)` storage entries.
///
/// A cursor is created positioned on its first in-range entry (or already
/// invalid if the range is empty). Faults are recorded on the cursor and
/// polled with [`error`](RawCursor::error), never panicked.
pub trait RawCursor {
    /// Returns true while the cursor is positioned on an in-range entry.
    fn valid(&self) -> bool;

    /// Storage key of the current entry. Empty when not [`valid`](RawCursor::valid).
    fn key(&self) -> &[u8];

    /// Storage value of the current entry. Empty when not [`valid`](RawCursor::valid).
    fn value(&self) -> &[u8];

    /// Step to the next entry in the cursor's direction.
    ///
    /// No-op once the cursor is exhausted, faulted, or closed.
    fn next(&mut self);

    /// Fault recorded by the cursor, if any.
    fn error(&self) -> Option<StoreError>;

    /// Effective storage bounds `[start, end)` of this cursor.
    ///
    /// May differ from the requested bounds if the backend clamped them.
    fn domain(&self) -> (Option<&[u8]>, Option<&[u8]>);

    /// Release the cursor and any backend resources it holds.
    fn close(&mut self) -> Result<(), StoreError>;
}

/// Source of raw cursors restricted to the fast-index namespace.
pub trait FastRangeProvider {
    /// Open a raw cursor over tagged storage bounds `[start, end)`.
    ///
    /// Only entries under the fast-index tag are ever returned, whatever
    /// bounds are requested.
    fn open_fast_range(
        &self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        ascending: bool,
    ) -> Result<BoxedCursor<'_>, StoreError>;
}
