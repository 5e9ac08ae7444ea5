//! Error types for the Arbor storage primitives.

/// Failure to decode a persisted storage entry.
///
/// Decoding never panics and never truncates silently: every malformed
/// input maps to exactly one of these kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// A varint field was empty, truncated, or longer than ten bytes.
    #[error("invalid varint in {field}")]
    Varint { field: &'static str },

    /// A length-prefixed field claims more bytes than remain in the buffer.
    #[error("truncated {field}: expected {expected} bytes, {available} available")]
    Truncated {
        field: &'static str,
        expected: u64,
        available: usize,
    },

    /// Bytes remain after the last field of the layout.
    #[error("{0} trailing bytes after fast node value")]
    TrailingBytes(usize),

    /// The encoded version is negative.
    #[error("negative fast node version {0}")]
    NegativeVersion(i64),

    /// A storage key had no tag byte at all.
    #[error("storage key is empty, missing namespace tag")]
    MissingTag,

    /// A storage key belongs to a namespace other than the one expected.
    #[error("storage key tag {found:#04x} does not match namespace {expected:#04x}")]
    ForeignTag { expected: u8, found: u8 },

    /// The storage version marker could not be parsed.
    #[error("invalid storage version {0:?}")]
    InvalidStorageVersion(String),
}
