//! Core type aliases and key-layout constants for the Arbor storage layer.
//!
//! Tree nodes, fast-index entries and metadata all share one ordered
//! keyspace. A single leading tag byte partitions that keyspace into
//! disjoint namespaces; these byte values are a persisted compatibility
//! surface and must never change.

/// Tree version number. Versions start at 1; 0 means "never saved".
pub type Version = i64;

/// Namespace tag for fast-index entries (`f`).
pub const FAST_TAG: u8 = b'f';

/// Namespace tag for tree nodes (`n`).
pub const NODE_TAG: u8 = b'n';

/// Namespace tag for store metadata (`m`).
pub const METADATA_TAG: u8 = b'm';

/// Namespace tag for version roots (`r`).
pub const ROOT_TAG: u8 = b'r';

/// Maximum logical key length accepted by the default store configuration.
pub const MAX_KEY_LEN: usize = 256;

/// Maximum logical value length accepted by the default store configuration.
pub const MAX_VALUE_LEN: usize = 65_536; // 64 KiB

/// Render a byte string for log output: printable ASCII verbatim, anything
/// else as `0x`-prefixed hex.
pub fn display_bytes(bytes: &[u8]) -> String {
    if !bytes.is_empty() && bytes.iter().all(|b| b.is_ascii_graphic()) {
        return String::from_utf8_lossy(bytes).into_owned();
    }
    let mut s = String::with_capacity(2 + bytes.len() * 2);
    s.push_str("0x");
    for byte in bytes {
        use core::fmt::Write;
        let _ = write!(s, "{:02x}", byte);
    }
    s
}
