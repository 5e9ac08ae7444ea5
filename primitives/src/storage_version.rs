//! Fast-storage version marker.
//!
//! The store records which on-disk layout it uses under the metadata key
//! `[METADATA_TAG] ++ "storage_version"`. Stores that predate the fast
//! index carry `1.0.0`. Once the fast index exists the marker becomes
//! `1.1.0-<version>`, where `<version>` is the tree version the fast index
//! was last synchronized with.

use core::fmt;

use crate::domain::tagged_key;
use crate::error::CodecError;
use crate::types::{Version, METADATA_TAG};

/// Metadata key name for the storage version marker.
pub const STORAGE_VERSION_KEY: &[u8] = b"storage_version";

/// Storage version of stores without a fast index.
pub const DEFAULT_STORAGE_VERSION: &str = "1.0.0";

/// First storage version that carries a fast index.
pub const FAST_STORAGE_VERSION: &str = "1.1.0";

const DELIMITER: char = '-';

/// Full storage key of the version marker.
pub fn storage_version_key() -> Vec<u8> {
    tagged_key(METADATA_TAG, STORAGE_VERSION_KEY)
}

/// Parsed storage version marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageVersion {
    /// Layout version, e.g. `1.0.0` or `1.1.0`.
    pub base: String,
    /// Tree version the fast index was last synchronized with, if recorded.
    pub fast_synced_at: Option<Version>,
}

impl Default for StorageVersion {
    fn default() -> Self {
        Self {
            base: DEFAULT_STORAGE_VERSION.into(),
            fast_synced_at: None,
        }
    }
}

impl StorageVersion {
    /// Marker for a fast index synchronized at `synced_at`.
    ///
    /// Keeps the current base if it already supports fast storage.
    pub fn with_fast_sync(&self, synced_at: Version) -> Self {
        let base = if self.has_fast_storage() {
            self.base.clone()
        } else {
            FAST_STORAGE_VERSION.into()
        };
        Self {
            base,
            fast_synced_at: Some(synced_at),
        }
    }

    /// Returns true if this layout includes a fast index.
    ///
    /// Versions compare lexically, matching how prior stores wrote them.
    pub fn has_fast_storage(&self) -> bool {
        self.base.as_str() >= FAST_STORAGE_VERSION
    }

    /// Returns true if a fast index is recorded for a tree version other
    /// than `latest`.
    pub fn is_stale(&self, latest: Version) -> bool {
        matches!(self.fast_synced_at, Some(synced) if synced != latest)
    }

    /// Encode the marker as stored.
    pub fn encode(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Parse a stored marker.
    pub fn decode(raw: &[u8]) -> Result<Self, CodecError> {
        let text = core::str::from_utf8(raw)
            .map_err(|_| CodecError::InvalidStorageVersion(String::from_utf8_lossy(raw).into()))?;
        let invalid = || CodecError::InvalidStorageVersion(text.into());

        let mut parts = text.split(DELIMITER);
        let base = parts.next().filter(|b| !b.is_empty()).ok_or_else(invalid)?;
        let fast_synced_at = match parts.next() {
            None => None,
            Some(v) => Some(v.parse::<Version>().map_err(|_| invalid())?),
        };
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self {
            base: base.into(),
            fast_synced_at,
        })
    }
}

impl fmt::Display for StorageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fast_synced_at {
            Some(v) => write!(f, "{}{}{}", self.base, DELIMITER, v),
            None => write!(f, "{}", self.base),
        }
    }
}
