//! Storage Module
//!
//! The synchronous key-value primitive that stores are built on.
//!
//! ## Responsibilities
//! - `getItem` / `setItem` / `removeItem` / `length` / key enumeration
//! - Enforce an optional byte quota (writes past it fail with `QuotaExceeded`)
//! - Flush every mutation before returning (no write-behind)
//!
//! ## Backends
//! - `MemoryStorage`: BTreeMap behind a RwLock, nothing survives the process
//! - `FileStorage`: same map, mirrored to a checksummed snapshot after every write
//!
//! ## Snapshot Format (FileStorage)
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Header (18 bytes)                                        │
//! │   Magic: "LSKV" (4) | Version: u16 (2)                   │
//! │   PayloadLen: u64 (8) | PayloadCRC: u32 (4)              │
//! ├──────────────────────────────────────────────────────────┤
//! │ Payload (PayloadLen bytes)                               │
//! │   bincode(BTreeMap<String, String>)                      │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod entries;
mod file;
mod memory;

use std::sync::Arc;

use crate::error::Result;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Shared handle to a storage backend
pub type SharedStorage = Arc<dyn KeyValueStorage>;

/// A synchronous string-to-string store with localStorage semantics
///
/// Implementations serialize their own operations; callers never need
/// an outer lock.
pub trait KeyValueStorage: Send + Sync {
    /// Value stored under `key`, if any
    fn get_item(&self, key: &str) -> Option<String>;

    /// Insert or overwrite `key`
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` (absent keys are a no-op)
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Total number of entries, across every collection
    fn len(&self) -> usize;

    /// All keys currently stored
    fn keys(&self) -> Vec<String>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
