//! In-memory blob store

use rustc_hash::FxHashMap;

use super::{BlobStore, StorageError};

/// Blob store backed by a hash map; contents live as long as the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    slots: FxHashMap<String, String>,
}

impl MemoryBlobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with slot contents.
    pub fn with_slots<I, K, V>(slots: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            slots: slots
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(name).cloned())
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(name.to_string(), value.to_string());

        Ok(())
    }
}
