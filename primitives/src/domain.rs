//! Translation between logical keys and tagged storage keys.
//!
//! Logical keys are what callers see. Storage keys are the same bytes with
//! the namespace tag in front. Bounds cross this boundary in both
//! directions: logical bounds are tagged before a range is opened, and the
//! range's effective bounds are untagged before they are reported back.
//!
//! An empty bound and an absent bound mean the same thing ("no limit on
//! this side") and always normalize to `None`.

use crate::error::CodecError;
use crate::types::FAST_TAG;

/// Storage key for a fast-index entry: `[FAST_TAG] ++ key`.
pub fn fast_key(key: &[u8]) -> Vec<u8> {
    tagged_key(FAST_TAG, key)
}

/// Storage key `[tag] ++ key`.
pub fn tagged_key(tag: u8, key: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + key.len());
    out.push(tag);
    out.extend_from_slice(key);
    out
}

/// Strip the fast-index tag from a storage key.
///
/// Fails if the key is empty or belongs to another namespace.
pub fn strip_fast_tag(storage_key: &[u8]) -> Result<&[u8], CodecError> {
    match storage_key.split_first() {
        None => Err(CodecError::MissingTag),
        Some((&FAST_TAG, rest)) => Ok(rest),
        Some((&found, _)) => Err(CodecError::ForeignTag {
            expected: FAST_TAG,
            found,
        }),
    }
}

/// The lowest storage key of the fast namespace, `[FAST_TAG]`.
pub fn fast_namespace_start() -> Vec<u8> {
    vec![FAST_TAG]
}

/// The exclusive upper limit of the fast namespace, `[FAST_TAG + 1]`.
pub fn fast_namespace_end() -> Vec<u8> {
    vec![FAST_TAG + 1]
}

/// Translate logical bounds `[start, end)` into storage bounds.
///
/// Storage bounds are always closed over the fast namespace: an absent
/// start becomes `[FAST_TAG]` and an absent end becomes `[FAST_TAG + 1]`,
/// so a range never spills into a neighbouring namespace.
pub fn to_storage_bounds(start: Option<&[u8]>, end: Option<&[u8]>) -> (Vec<u8>, Vec<u8>) {
    let start = match normalize(start) {
        Some(key) => fast_key(key),
        None => fast_namespace_start(),
    };
    let end = match normalize(end) {
        Some(key) => fast_key(key),
        None => fast_namespace_end(),
    };
    (start, end)
}

/// Translate storage bounds back into logical bounds.
///
/// Exactly one leading byte is dropped from each bound. A bound that is
/// empty after stripping (a bare tag) reports as unbounded.
pub fn to_logical_bounds(
    start: Option<&[u8]>,
    end: Option<&[u8]>,
) -> (Option<Vec<u8>>, Option<Vec<u8>>) {
    (strip_bound(start), strip_bound(end))
}

fn strip_bound(bound: Option<&[u8]>) -> Option<Vec<u8>> {
    bound
        .and_then(|b| b.get(1..))
        .filter(|rest| !rest.is_empty())
        .map(<[u8]>::to_vec)
}

/// Collapse `Some(b"")` to `None`.
pub fn normalize(bound: Option<&[u8]>) -> Option<&[u8]> {
    bound.filter(|b| !b.is_empty())
}
