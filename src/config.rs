//! Configuration for localstore
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, StoreError};

/// Main configuration for a localstore instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Snapshot file backing `FileStorage`
    pub data_file: PathBuf,

    /// Byte budget shared by every collection in the storage (`None` = unbounded)
    pub quota_bytes: Option<usize>,

    // -------------------------------------------------------------------------
    // Sync Configuration
    // -------------------------------------------------------------------------
    /// How the dispatcher hands results back to callers
    pub delivery: Delivery,
}

/// Result delivery mode of the sync dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Only the success/error/complete callbacks fire
    CallbacksOnly,

    /// Callbacks fire and a settled `SyncPromise` is returned as well
    CallbacksAndPromise,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("./localstore.db"),
            quota_bytes: Some(5 * 1024 * 1024), // 5 MB, the usual browser limit
            delivery: Delivery::CallbacksAndPromise,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,

    /// First invalid setting seen, reported by `build`
    invalid: Option<String>,
}

impl ConfigBuilder {
    /// Set the snapshot file path
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = path.into();
        self
    }

    /// Set the storage quota (in bytes)
    pub fn quota_bytes(mut self, bytes: usize) -> Self {
        self.config.quota_bytes = Some(bytes);
        self
    }

    /// Set the storage quota (in KB)
    pub fn quota_kb(mut self, kb: usize) -> Self {
        match kb.checked_mul(1024) {
            Some(bytes) => self.config.quota_bytes = Some(bytes),
            None if self.invalid.is_none() => {
                self.invalid = Some(format!("quota of {} KB overflows usize", kb));
            }
            None => {}
        }
        self
    }

    /// Remove the storage quota
    pub fn unbounded(mut self) -> Self {
        self.config.quota_bytes = None;
        self
    }

    /// Set the result delivery mode
    pub fn delivery(mut self, delivery: Delivery) -> Self {
        self.config.delivery = delivery;
        self
    }

    pub fn build(self) -> Result<Config> {
        if let Some(reason) = self.invalid {
            return Err(StoreError::Config(reason));
        }
        if self.config.data_file.as_os_str().is_empty() {
            return Err(StoreError::Config("data_file must not be empty".to_string()));
        }
        Ok(self.config)
    }
}
