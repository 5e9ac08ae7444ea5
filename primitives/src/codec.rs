//! Fast-node codec.
//!
//! A fast node is stored under `[FAST_TAG] ++ key`; the storage value holds
//! everything else. Layout of the storage value:
//!
//! - `version_last_updated_at`: signed zig-zag LEB128 varint
//! - `value`: unsigned LEB128 length prefix, then the raw value bytes
//!
//! The key is never repeated inside the value. Decoding is pure and rejects
//! truncated, overlong, or trailing input instead of guessing.

use bytes::{Buf, BufMut, Bytes};
use prost::encoding::{decode_varint, encode_varint, encoded_len_varint};

use crate::error::CodecError;
use crate::types::Version;

/// The latest live value of a key, as cached in the fast index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastNode {
    /// Logical (untagged) key.
    pub key: Bytes,
    /// Logical value.
    pub value: Bytes,
    /// Tree version at which this key was last written.
    pub version_last_updated_at: Version,
}

impl FastNode {
    /// Create a fast node.
    pub fn new(key: impl Into<Bytes>, value: impl Into<Bytes>, version: Version) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            version_last_updated_at: version,
        }
    }

    /// Number of bytes produced by [`encode`](Self::encode).
    pub fn encoded_len(&self) -> usize {
        encoded_len_varint(zigzag_encode(self.version_last_updated_at))
            + encoded_len_varint(self.value.len() as u64)
            + self.value.len()
    }

    /// Encode the storage value for this node.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        encode_varint(zigzag_encode(self.version_last_updated_at), &mut buf);
        encode_varint(self.value.len() as u64, &mut buf);
        buf.put_slice(&self.value);
        buf
    }

    /// Decode a fast node from its untagged key and raw storage value.
    ///
    /// `key` becomes the logical key verbatim.
    pub fn decode(key: &[u8], raw_value: &[u8]) -> Result<Self, CodecError> {
        let mut r = Reader::new(raw_value);

        let version = r.read_varint("version")?;
        if version < 0 {
            return Err(CodecError::NegativeVersion(version));
        }
        let value = r.read_var_bytes("value")?;
        r.finish()?;

        Ok(Self {
            key: Bytes::copy_from_slice(key),
            value,
            version_last_updated_at: version,
        })
    }
}

/// A cursor for reading fields during decoding.
struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    fn read_uvarint(&mut self, field: &'static str) -> Result<u64, CodecError> {
        decode_varint(&mut self.buf).map_err(|_| CodecError::Varint { field })
    }

    fn read_varint(&mut self, field: &'static str) -> Result<i64, CodecError> {
        self.read_uvarint(field).map(zigzag_decode)
    }

    fn read_var_bytes(&mut self, field: &'static str) -> Result<Bytes, CodecError> {
        let len = self.read_uvarint(field)?;
        let available = self.buf.remaining();
        if len > available as u64 {
            return Err(CodecError::Truncated {
                field,
                expected: len,
                available,
            });
        }
        Ok(self.buf.copy_to_bytes(len as usize))
    }

    fn finish(self) -> Result<(), CodecError> {
        match self.buf.remaining() {
            0 => Ok(()),
            n => Err(CodecError::TrailingBytes(n)),
        }
    }
}

fn zigzag_encode(v: i64) -> u64 {
    ((v << 1) ^ (v >> 63)) as u64
}

fn zigzag_decode(u: u64) -> i64 {
    ((u >> 1) as i64) ^ -((u & 1) as i64)
}
