//! In-memory storage backend.

use parking_lot::RwLock;

use crate::error::Result;

use super::entries::Entries;
use super::KeyValueStorage;

/// Process-local key-value storage
///
/// `with_quota(0)` behaves like a browser in private mode: it reports zero
/// entries and rejects every write with `QuotaExceeded`.
#[derive(Debug)]
pub struct MemoryStorage {
    entries: RwLock<Entries>,
}

impl MemoryStorage {
    /// Unbounded storage
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Entries::new(None)),
        }
    }

    /// Storage that refuses writes beyond `quota` bytes
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: RwLock::new(Entries::new(Some(quota))),
        }
    }

    /// Bytes currently used (keys + values)
    pub fn used_bytes(&self) -> usize {
        self.entries.read().used()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().insert(key, value)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }

    fn keys(&self) -> Vec<String> {
        self.entries.read().keys()
    }
}
