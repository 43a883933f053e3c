//! Quota-aware entry map shared by the storage backends.

use std::collections::BTreeMap;

use crate::error::{Result, StoreError};

/// Key/value map that tracks its own footprint
#[derive(Debug, Default)]
pub(crate) struct Entries {
    map: BTreeMap<String, String>,
    /// Sum of key + value lengths (bytes)
    used: usize,
    quota: Option<usize>,
}

impl Entries {
    pub(crate) fn new(quota: Option<usize>) -> Self {
        Self {
            map: BTreeMap::new(),
            used: 0,
            quota,
        }
    }

    /// Rebuild from a loaded map. Usage is recomputed; the quota is not
    /// checked against data that is already on disk.
    pub(crate) fn from_map(map: BTreeMap<String, String>, quota: Option<usize>) -> Self {
        let used = map.iter().map(|(k, v)| k.len() + v.len()).sum();
        Self { map, used, quota }
    }

    pub(crate) fn get(&self, key: &str) -> Option<&String> {
        self.map.get(key)
    }

    /// Insert, failing without side effects if the quota would be exceeded.
    /// Returns the previous value.
    pub(crate) fn insert(&mut self, key: &str, value: &str) -> Result<Option<String>> {
        let previous = self.map.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
        let requested = key.len() + value.len();
        let next = self.used - previous + requested;

        if let Some(quota) = self.quota {
            if next > quota {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    requested,
                    quota,
                });
            }
        }

        self.used = next;
        Ok(self.map.insert(key.to_string(), value.to_string()))
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<String> {
        let removed = self.map.remove(key);
        if let Some(value) = &removed {
            self.used -= key.len() + value.len();
        }
        removed
    }

    /// Put back a value taken out by `insert`/`remove` (used to undo a
    /// mutation whose flush failed)
    pub(crate) fn restore(&mut self, key: &str, previous: Option<String>) {
        self.remove(key);
        if let Some(value) = previous {
            self.used += key.len() + value.len();
            self.map.insert(key.to_string(), value);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    pub(crate) fn keys(&self) -> Vec<String> {
        self.map.keys().cloned().collect()
    }

    pub(crate) fn used(&self) -> usize {
        self.used
    }

    pub(crate) fn map(&self) -> &BTreeMap<String, String> {
        &self.map
    }
}
