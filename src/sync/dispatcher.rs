//! Local sync dispatcher
//!
//! Maps CRUD intents onto a `Store` and normalizes the outcome into the
//! success/error/complete callback contract.

use serde_json::Value;

use crate::config::{Config, Delivery};
use crate::error::{Result, StoreError};
use crate::model::Model;
use crate::store::Store;

use super::{Method, SyncOptions, SyncPromise, SyncStrategy};

/// Error message for an operation that produced nothing
pub const RECORD_NOT_FOUND_MESSAGE: &str = "Record Not Found";

/// Error message for a quota failure on a storage with no entries at all
pub const PRIVATE_BROWSING_MESSAGE: &str = "Private browsing is unsupported";

/// Sync strategy backed by the model's (or its collection's) store
#[derive(Debug, Clone, Copy)]
pub struct LocalSync {
    delivery: Delivery,
}

impl LocalSync {
    pub fn new(delivery: Delivery) -> Self {
        Self { delivery }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.delivery)
    }

    pub fn delivery(&self) -> Delivery {
        self.delivery
    }

    /// Run the store operation for `method`
    fn dispatch(method: Method, store: &Store, model: &mut dyn Model) -> Result<Option<Value>> {
        match method {
            Method::Read => {
                if model.id().is_none() {
                    Ok(Some(Value::Array(store.find_all()?)))
                } else {
                    store.find(model)
                }
            }
            Method::Create => store.create(model),
            Method::Update => store.update(model),
            Method::Delete => Ok(store.destroy(model)?.map(|destroyed| destroyed.to_json())),
        }
    }

    /// Turn a store error into the message handed to callers
    ///
    /// A quota failure on a storage holding zero entries means writes are
    /// blocked outright, which is what private browsing modes do.
    fn error_message(err: &StoreError, store: &Store) -> String {
        if err.is_quota_exceeded() {
            let size = store.storage_size();
            tracing::warn!(collection = %store.name(), storage_size = size, error = %err, "Storage quota exceeded");
            if size == 0 {
                return PRIVATE_BROWSING_MESSAGE.to_string();
            }
        }
        err.to_string()
    }
}

impl Default for LocalSync {
    fn default() -> Self {
        Self::new(Delivery::CallbacksAndPromise)
    }
}

impl SyncStrategy for LocalSync {
    fn sync(
        &self,
        method: Method,
        model: &mut dyn Model,
        options: SyncOptions<'_>,
    ) -> Option<SyncPromise> {
        let persistence = model.persistence();

        let (response, error_message) = match persistence.store() {
            Some(store) => {
                tracing::debug!(collection = %store.name(), %method, id = ?model.id(), "Local sync");
                match Self::dispatch(method, store, model) {
                    Ok(response) => (response, None),
                    Err(err) => (None, Some(Self::error_message(&err, store))),
                }
            }
            None => (None, Some(StoreError::NoStore.to_string())),
        };

        let SyncOptions {
            success,
            error,
            complete,
        } = options;

        let promise = match &response {
            Some(result) => {
                if let Some(success) = success {
                    success(result);
                }
                SyncPromise::resolved(result.clone())
            }
            None => {
                let message =
                    error_message.unwrap_or_else(|| RECORD_NOT_FOUND_MESSAGE.to_string());
                tracing::debug!(%method, error = %message, "Local sync failed");
                if let Some(error) = error {
                    error(&message);
                }
                SyncPromise::rejected(message)
            }
        };

        if let Some(complete) = complete {
            complete(response.as_ref());
        }

        match self.delivery {
            Delivery::CallbacksAndPromise => Some(promise),
            Delivery::CallbacksOnly => None,
        }
    }
}
