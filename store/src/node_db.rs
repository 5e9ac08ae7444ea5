//! Node database: the tree's view of the shared keyspace.
//!
//! `NodeDb` wraps a `KvStore` and owns the fast-index namespace within it.
//! It provides point access to fast nodes, the storage version marker, and
//! the range provider that fast iterators read through.

use arbor_primitives::domain::{self, fast_key};
use arbor_primitives::storage_version::storage_version_key;
use arbor_primitives::types::display_bytes;
use arbor_primitives::{CodecError, FastNode, StorageVersion, Version};
use tracing::debug;

use crate::config::NodeDbConfig;
use crate::cursor::{BoxedCursor, FastRangeProvider};
use crate::error::StoreError;
use crate::fast_iterator::FastIterator;
use crate::kv_store::KvStore;

/// Tree storage over a raw key/value backend.
#[derive(Debug, Clone)]
pub struct NodeDb<S> {
    db: S,
    config: NodeDbConfig,
}

impl<S: KvStore> NodeDb<S> {
    /// Wrap a backend with the default configuration.
    pub fn new(db: S) -> Self {
        Self::with_config(db, NodeDbConfig::default())
    }

    /// Wrap a backend with an explicit configuration.
    pub fn with_config(db: S, config: NodeDbConfig) -> Self {
        Self { db, config }
    }

    /// Active configuration.
    pub fn config(&self) -> &NodeDbConfig {
        &self.config
    }

    /// The underlying backend.
    pub fn inner(&self) -> &S {
        &self.db
    }

    /// Mutable access to the underlying backend.
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.db
    }

    // ── Fast nodes ──

    /// Read the fast node for `key`, if present.
    pub fn get_fast_node(&self, key: &[u8]) -> Result<Option<FastNode>, StoreError> {
        match self.db.get(&fast_key(key))? {
            Some(raw) => Ok(Some(FastNode::decode(key, &raw)?)),
            None => Ok(None),
        }
    }

    /// Write a fast node, replacing any previous value for its key.
    pub fn save_fast_node(&mut self, node: &FastNode) -> Result<(), StoreError> {
        if node.key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        if node.version_last_updated_at < 0 {
            return Err(CodecError::NegativeVersion(node.version_last_updated_at).into());
        }
        if node.key.len() > self.config.max_key_len {
            return Err(StoreError::KeyTooLarge {
                len: node.key.len(),
                max: self.config.max_key_len,
            });
        }
        if node.value.len() > self.config.max_value_len {
            return Err(StoreError::ValueTooLarge {
                len: node.value.len(),
                max: self.config.max_value_len,
            });
        }
        self.db.set(fast_key(&node.key), node.encode())
    }

    /// Remove the fast node for `key`.
    pub fn delete_fast_node(&mut self, key: &[u8]) -> Result<(), StoreError> {
        self.db.delete(&fast_key(key))
    }

    /// Iterate the fast index over logical bounds `[start, end)`.
    pub fn fast_iterator(
        &self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        ascending: bool,
    ) -> FastIterator<'_> {
        let provider: &dyn FastRangeProvider = self;
        FastIterator::new(start, end, ascending, Some(provider))
    }

    // ── Storage version ──

    /// Current storage version marker. Stores without one are legacy.
    pub fn storage_version(&self) -> Result<StorageVersion, StoreError> {
        match self.db.get(&storage_version_key())? {
            Some(raw) => Ok(StorageVersion::decode(&raw)?),
            None => Ok(StorageVersion::default()),
        }
    }

    /// Record that the fast index is synchronized with tree version `latest`.
    pub fn set_fast_storage_version(&mut self, latest: Version) -> Result<(), StoreError> {
        let version = self.storage_version()?.with_fast_sync(latest);
        debug!(storage_version = %version, "updating fast storage version");
        self.db.set(storage_version_key(), version.encode())
    }

    /// Returns true if this store carries a fast index.
    pub fn has_upgraded_to_fast_storage(&self) -> Result<bool, StoreError> {
        Ok(self.storage_version()?.has_fast_storage())
    }

    /// Returns true if the fast index was last synchronized with a tree
    /// version other than `latest`.
    ///
    /// A stale index still iterates; callers needing strict consistency
    /// with `latest` must check this first.
    pub fn is_fast_index_stale(&self, latest: Version) -> Result<bool, StoreError> {
        Ok(self.storage_version()?.is_stale(latest))
    }
}

impl<S: KvStore> FastRangeProvider for NodeDb<S> {
    fn open_fast_range(
        &self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        ascending: bool,
    ) -> Result<BoxedCursor<'_>, StoreError> {
        let ns_start = domain::fast_namespace_start();
        let ns_end = domain::fast_namespace_end();

        // Clamp into the fast namespace.
        let start = match start {
            Some(s) if s > ns_start.as_slice() => s.to_vec(),
            _ => ns_start,
        };
        let end = match end {
            Some(e) if e < ns_end.as_slice() => e.to_vec(),
            _ => ns_end,
        };

        debug!(
            start = %display_bytes(&start),
            end = %display_bytes(&end),
            ascending,
            "opening fast index range"
        );
        self.db.range(Some(start.as_slice()), Some(end.as_slice()), ascending)
    }
}
