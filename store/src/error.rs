//! Store and iterator error types.
//!
//! `StoreError` covers faults raised by a storage backend or its cursors.
//! `FastIterError` is the closed set of kinds a fast iterator can latch;
//! callers match on the variant, never on the message.

use arbor_primitives::CodecError;

/// Fault raised by a key/value backend or one of its raw cursors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Backend I/O or engine failure.
    #[error("backend error: {0}")]
    Backend(String),

    /// Operation on a cursor that was already released.
    #[error("cursor already closed")]
    CursorClosed,

    /// Empty keys cannot be stored.
    #[error("key is empty")]
    EmptyKey,

    /// Key exceeds the configured limit.
    #[error("key length {len} exceeds limit {max}")]
    KeyTooLarge { len: usize, max: usize },

    /// Value exceeds the configured limit.
    #[error("value length {len} exceeds limit {max}")]
    ValueTooLarge { len: usize, max: usize },

    /// A stored entry could not be decoded.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

/// Error latched by a [`FastIterator`](crate::FastIterator).
///
/// Every kind is terminal: once latched the iterator stays invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FastIterError {
    /// The iterator was built without a range provider.
    #[error("fast iterator has no index provider")]
    MissingProvider,

    /// The provider failed to open the underlying range, or the raw cursor
    /// reported a fault as soon as it was opened.
    #[error("failed to open fast index range: {0}")]
    ProviderOpen(StoreError),

    /// The underlying raw cursor reported a fault after stepping.
    #[error("fast index cursor fault: {0}")]
    ProviderStep(StoreError),

    /// A raw entry could not be decoded as a fast node.
    #[error("malformed fast node: {0}")]
    Decode(#[from] CodecError),

    /// Releasing the underlying raw cursor failed.
    #[error("failed to release fast index cursor: {0}")]
    ProviderClose(StoreError),
}
