//! Error types for localstore
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// DOM exception code raised when a write exceeds the storage quota
pub const QUOTA_EXCEEDED_ERR: u16 = 22;

/// Unified error type for localstore operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // Storage Primitive Errors
    // -------------------------------------------------------------------------
    #[error("localStorage not supported")]
    StorageUnavailable,

    #[error("QuotaExceededError: writing '{key}' needs {requested} bytes, quota is {quota} bytes")]
    QuotaExceeded {
        key: String,
        requested: usize,
        quota: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot corruption detected: {0}")]
    Corruption(String),

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    #[error("Model in collection '{collection}' has no id")]
    MissingId { collection: String },

    #[error("Malformed record at '{key}': {source}")]
    MalformedRecord {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    // -------------------------------------------------------------------------
    // Sync Errors
    // -------------------------------------------------------------------------
    #[error("Model has no local store")]
    NoStore,

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Exception code in the DOM sense, if this error has one
    pub fn code(&self) -> Option<u16> {
        match self {
            StoreError::QuotaExceeded { .. } => Some(QUOTA_EXCEEDED_ERR),
            _ => None,
        }
    }

    /// Whether the backend refused a write for lack of space
    pub fn is_quota_exceeded(&self) -> bool {
        self.code() == Some(QUOTA_EXCEEDED_ERR)
    }
}
