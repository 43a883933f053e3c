//! # localstore
//!
//! A localStorage-style persistence adapter for model/collection layers:
//! - JSON records kept in a synchronous key-value storage
//! - A per-collection id index under the collection's own key
//! - A `sync(method, model, options)` dispatcher with callback + promise delivery
//! - Per-model routing between local persistence and a host-supplied fallback
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Host model / collection                     │
//! │              (implements the Model trait)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ sync(method, model, options)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Router                                │
//! │            (Local / Collection / Remote persistence)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  LocalSync  │          │  Fallback   │
//!   │ (callbacks) │          │  (remote)   │
//!   └──────┬──────┘          └─────────────┘
//!          │
//!          ▼
//!   ┌─────────────┐          ┌─────────────────────────────┐
//!   │    Store    │─────────▶│  KeyValueStorage            │
//!   │ (id index)  │          │  (MemoryStorage/FileStorage)│
//!   └─────────────┘          └─────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod storage;
pub mod guid;
pub mod model;
pub mod store;
pub mod sync;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StoreError, QUOTA_EXCEEDED_ERR};
pub use config::{Config, Delivery};
pub use model::{Collection, Model, Persistence, Record};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, SharedStorage};
pub use store::Store;
pub use sync::{LocalSync, Method, Router, SyncOptions, SyncPromise, SyncStrategy};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of localstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
