//! Fast iterator: a typed cursor over the fast index.
//!
//! `FastIterator` adapts a raw range scan over tagged storage keys into a
//! cursor over logical `(key, value)` pairs. The raw cursor is opened lazily
//! on the first advance, and construction performs that first advance, so a
//! new iterator is already positioned on its first in-range entry.
//!
//! Lifecycle:
//!
//! ```text
//! Unopened -> Positioned <-> (next) -> Exhausted
//!      \__________\________________\___> Errored   (first fault, latched)
//!  any state ---------------------------> Closed    (terminal, idempotent)
//! ```
//!
//! Faults are never returned from `next`. The first one is latched and
//! polled through [`FastIterator::error`]; after that the iterator stays
//! invalid and `next` does nothing.

use core::fmt;
use std::iter::FusedIterator;

use arbor_primitives::domain;
use arbor_primitives::types::display_bytes;
use arbor_primitives::FastNode;
use bytes::Bytes;
use tracing::{debug, trace, warn};

use crate::cursor::{BoxedCursor, FastRangeProvider};
use crate::error::FastIterError;

/// Lifecycle state of a [`FastIterator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterState {
    /// No raw cursor opened yet. Never observable after construction.
    Unopened,
    /// Positioned on a decoded entry.
    Positioned,
    /// Ran past the last in-range entry.
    Exhausted,
    /// A fault was latched.
    Errored,
    /// Released.
    Closed,
}

/// Logical bounds `[start, end)`; `None` is unbounded.
pub type Domain = (Option<Vec<u8>>, Option<Vec<u8>>);

/// Cursor over the fast index.
pub struct FastIterator<'a> {
    start: Option<Vec<u8>>,
    end: Option<Vec<u8>>,
    ascending: bool,
    provider: Option<&'a dyn FastRangeProvider>,
    cursor: Option<BoxedCursor<'a>>,
    /// Effective logical bounds, captured when the raw cursor is opened.
    effective: Option<Domain>,
    current: Option<FastNode>,
    state: IterState,
    error: Option<FastIterError>,
}

impl<'a> FastIterator<'a> {
    /// Create an iterator over logical bounds `[start, end)` and position it
    /// on the first entry.
    ///
    /// Empty bounds are treated as absent. With no provider the iterator is
    /// returned already latched with [`FastIterError::MissingProvider`].
    pub fn new(
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        ascending: bool,
        provider: Option<&'a dyn FastRangeProvider>,
    ) -> Self {
        let mut iter = Self {
            start: domain::normalize(start).map(<[u8]>::to_vec),
            end: domain::normalize(end).map(<[u8]>::to_vec),
            ascending,
            provider,
            cursor: None,
            effective: None,
            current: None,
            state: IterState::Unopened,
            error: None,
        };
        iter.next();
        iter
    }

    /// Returns true while positioned on a successfully decoded entry.
    pub fn valid(&self) -> bool {
        self.state == IterState::Positioned
            && self.error.is_none()
            && self.cursor.as_ref().is_some_and(|c| c.valid())
    }

    /// Logical key of the current entry, or `None` when not valid.
    pub fn key(&self) -> Option<&[u8]> {
        self.current_node().map(|n| &n.key[..])
    }

    /// Value of the current entry, or `None` when not valid.
    pub fn value(&self) -> Option<&[u8]> {
        self.current_node().map(|n| &n.value[..])
    }

    /// The current entry as a fast node, or `None` when not valid.
    pub fn current_node(&self) -> Option<&FastNode> {
        if self.valid() {
            self.current.as_ref()
        } else {
            None
        }
    }

    /// Advance to the next entry.
    ///
    /// Opens the raw cursor on the first call. Does nothing once the
    /// iterator is exhausted, errored, or closed.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        match self.state {
            IterState::Unopened | IterState::Positioned => {}
            IterState::Exhausted | IterState::Errored | IterState::Closed => return,
        }

        let Some(provider) = self.provider else {
            self.latch(FastIterError::MissingProvider);
            return;
        };

        let opening = self.cursor.is_none();
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.next();
        } else {
            let (start, end) =
                domain::to_storage_bounds(self.start.as_deref(), self.end.as_deref());
            let opened =
                provider.open_fast_range(Some(start.as_slice()), Some(end.as_slice()), self.ascending);
            match opened {
                Ok(cursor) => {
                    let (s, e) = cursor.domain();
                    self.effective = Some(domain::to_logical_bounds(s, e));
                    debug!(
                        start = %display_bytes(&start),
                        end = %display_bytes(&end),
                        ascending = self.ascending,
                        "opened fast index cursor"
                    );
                    self.cursor = Some(cursor);
                }
                Err(err) => {
                    self.latch(FastIterError::ProviderOpen(err));
                    return;
                }
            }
        }

        self.settle(opening);
    }

    /// Decode the raw cursor's current entry, or record why there is none.
    ///
    /// A fault reported by a cursor that was just opened is an open fault.
    fn settle(&mut self, opening: bool) {
        let Some(cursor) = self.cursor.as_ref() else {
            return;
        };
        if let Some(err) = cursor.error() {
            let err = if opening {
                FastIterError::ProviderOpen(err)
            } else {
                FastIterError::ProviderStep(err)
            };
            self.latch(err);
            return;
        }
        if !cursor.valid() {
            self.current = None;
            self.state = IterState::Exhausted;
            return;
        }

        let decoded = domain::strip_fast_tag(cursor.key())
            .and_then(|key| FastNode::decode(key, cursor.value()));
        match decoded {
            Ok(node) => {
                self.current = Some(node);
                self.state = IterState::Positioned;
            }
            Err(err) => self.latch(err.into()),
        }
    }

    /// Record `err` unless an error is already latched, and go invalid.
    fn latch(&mut self, err: FastIterError) {
        self.record(err);
        self.current = None;
        if self.state != IterState::Closed {
            self.state = IterState::Errored;
        }
    }

    /// Keep the first error seen. Later ones are dropped.
    fn record(&mut self, err: FastIterError) {
        if self.error.is_none() {
            warn!(error = %err, "fast iterator fault");
            self.error = Some(err);
        }
    }

    /// Latched error, if any.
    pub fn error(&self) -> Option<&FastIterError> {
        self.error.as_ref()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> IterState {
        self.state
    }

    /// Logical bounds of this iterator.
    ///
    /// Before the raw cursor is opened these are the requested bounds. Once
    /// opened they are the raw cursor's effective bounds with the tag
    /// stripped, which may be narrower if the provider clamped them.
    pub fn domain(&self) -> Domain {
        match &self.effective {
            Some(effective) => effective.clone(),
            None => (self.start.clone(), self.end.clone()),
        }
    }

    /// Release the raw cursor.
    ///
    /// Only the first call does any work; later calls return the same
    /// result. Returns the latched error, if any, including a failure to
    /// release the raw cursor.
    pub fn close(&mut self) -> Result<(), FastIterError> {
        if self.state != IterState::Closed {
            if let Some(err) = self.release() {
                self.record(err);
            }
            self.current = None;
            self.state = IterState::Closed;
        }
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Close the raw cursor, if one is held, and drop it.
    fn release(&mut self) -> Option<FastIterError> {
        // take() clears the slot in the same step that hands us the cursor.
        let mut cursor = self.cursor.take()?;
        trace!("releasing fast index cursor");
        cursor.close().err().map(FastIterError::ProviderClose)
    }

    /// Consume the iterator as a standard [`Iterator`] of entries.
    pub fn entries(self) -> FastEntries<'a> {
        FastEntries {
            iter: self,
            done: false,
        }
    }
}

impl Drop for FastIterator<'_> {
    fn drop(&mut self) {
        if let Some(err) = self.release() {
            warn!(error = %err, "fast iterator dropped with a failing cursor");
        }
    }
}

impl fmt::Debug for FastIterator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FastIterator")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("ascending", &self.ascending)
            .field("has_provider", &self.provider.is_some())
            .field("cursor_open", &self.cursor.is_some())
            .field("state", &self.state)
            .field("current", &self.current)
            .field("error", &self.error)
            .finish()
    }
}

/// [`Iterator`] adapter over a [`FastIterator`].
///
/// Yields `(key, value)` pairs in cursor order. A latched error is yielded
/// once as the final item; the underlying cursor is closed when iteration
/// ends or the adapter is dropped.
#[derive(Debug)]
pub struct FastEntries<'a> {
    iter: FastIterator<'a>,
    done: bool,
}

impl Iterator for FastEntries<'_> {
    type Item = Result<(Bytes, Bytes), FastIterError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if let Some(node) = self.iter.current_node() {
            let item = (node.key.clone(), node.value.clone());
            self.iter.next();
            return Some(Ok(item));
        }
        self.done = true;
        self.iter.close().err().map(Err)
    }
}

impl FusedIterator for FastEntries<'_> {}
