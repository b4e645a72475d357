//! In-memory implementation of `KeyValueStorage`.

use std::sync::Arc;

use dashmap::DashMap;
use domains::{KeyValueStorage, StorageError};

/// DashMap-backed key-value store.
///
/// Clones share the same map, so a test can drop a `ReviewStore` and load a
/// new one over the same backend to simulate a restart.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    entries: Arc<DashMap<String, Vec<u8>>>,
    quota: Option<usize>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects any single value larger than `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            quota: Some(quota),
        }
    }

    /// Seeds a raw value, bypassing the quota. Handy for loading fixtures.
    pub fn insert_raw(&self, key: &str, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(key.to_string(), bytes.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStorage for InMemoryStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        crate::check_quota(key, bytes.len(), self.quota)?;
        self.entries.insert(key.to_string(), bytes.to_vec());
        tracing::trace!(key, size = bytes.len(), "memory storage write");
        Ok(())
    }
}
