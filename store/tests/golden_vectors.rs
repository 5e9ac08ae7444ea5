//! Golden vector tests: load JSON vectors, decode or scan, compare.
//!
//! The fast-node byte layout is shared with every store already on disk.
//! Any change that alters these encodings or scan results breaks existing
//! databases and must be reviewed carefully.

mod common;

use arbor_primitives::{CodecError, FastNode};
use arbor_store::{FastIterError, MemDb, NodeDb};
use serde::Deserialize;

use common::*;

#[derive(Deserialize)]
struct Vectors {
    encodings: Vec<EncodingVector>,
    malformed: Vec<MalformedVector>,
    scans: Vec<ScanVector>,
}

/// A well-formed fast node and its exact storage value.
#[derive(Deserialize)]
struct EncodingVector {
    name: String,
    key: String,
    value: String,
    version: i64,
    /// Storage value as lowercase hex, no 0x prefix.
    raw: String,
}

/// A storage value that must fail to decode.
#[derive(Deserialize)]
struct MalformedVector {
    name: String,
    raw: String,
    /// One of: varint, truncated, trailing, negative_version
    kind: String,
}

/// A raw store image and the entries a scan over it must produce.
#[derive(Deserialize)]
struct ScanVector {
    name: String,
    /// Storage entries: [[ascii storage key, hex value], ...]
    store: Vec<(String, String)>,
    start: Option<String>,
    end: Option<String>,
    ascending: bool,
    /// Expected logical entries: [[key, value], ...]
    expected: Vec<(String, String)>,
    /// Expected latched error kind, if any (only "decode" is used).
    error: Option<String>,
}

fn load() -> Vectors {
    let json = include_str!("vectors/fast_nodes.json");
    serde_json::from_str(json).unwrap()
}

fn hex_to_bytes(hex: &str) -> Vec<u8> {
    assert_eq!(hex.len() % 2, 0, "hex string must have even length");
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .unwrap_or_else(|_| panic!("invalid hex at position {}", i))
        })
        .collect()
}

fn error_kind(err: &CodecError) -> &'static str {
    match err {
        CodecError::Varint { .. } => "varint",
        CodecError::Truncated { .. } => "truncated",
        CodecError::TrailingBytes(_) => "trailing",
        CodecError::NegativeVersion(_) => "negative_version",
        CodecError::MissingTag => "missing_tag",
        CodecError::ForeignTag { .. } => "foreign_tag",
        CodecError::InvalidStorageVersion(_) => "storage_version",
    }
}

// ── Test: encodings ──

#[test]
fn test_golden_encodings() {
    for vector in load().encodings {
        let raw = hex_to_bytes(&vector.raw);
        let node = FastNode::new(
            vector.key.as_bytes().to_vec(),
            vector.value.as_bytes().to_vec(),
            vector.version,
        );

        assert_eq!(node.encode(), raw, "[{}] encoding mismatch", vector.name);
        assert_eq!(
            node.encoded_len(),
            raw.len(),
            "[{}] encoded_len mismatch",
            vector.name
        );
        assert_eq!(
            FastNode::decode(vector.key.as_bytes(), &raw),
            Ok(node),
            "[{}] decode mismatch",
            vector.name
        );
    }
}

// ── Test: malformed values ──

#[test]
fn test_golden_malformed() {
    for vector in load().malformed {
        let raw = hex_to_bytes(&vector.raw);
        let err = FastNode::decode(b"k", &raw)
            .expect_err(&format!("[{}] malformed value decoded", vector.name));
        assert_eq!(
            error_kind(&err),
            vector.kind,
            "[{}] error kind mismatch",
            vector.name
        );
    }
}

// ── Test: scans over raw store images ──

#[test]
fn test_golden_scans() {
    for vector in load().scans {
        let mut ndb = NodeDb::new(MemDb::new());
        for (storage_key, hex_value) in &vector.store {
            raw_set(&mut ndb, storage_key.as_bytes(), &hex_to_bytes(hex_value));
        }

        let mut iter = ndb.fast_iterator(
            vector.start.as_deref().map(str::as_bytes),
            vector.end.as_deref().map(str::as_bytes),
            vector.ascending,
        );
        let got = drain(&mut iter);
        let expected: Vec<(&str, &str)> = vector
            .expected
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(got, pairs(&expected), "[{}] entries mismatch", vector.name);

        match vector.error.as_deref() {
            None => assert!(
                iter.error().is_none(),
                "[{}] unexpected error {:?}",
                vector.name,
                iter.error()
            ),
            Some("decode") => assert!(
                matches!(iter.error(), Some(FastIterError::Decode(_))),
                "[{}] expected decode error, got {:?}",
                vector.name,
                iter.error()
            ),
            Some(other) => panic!("[{}] unknown error kind {}", vector.name, other),
        }
    }
}
