//! Sync Module
//!
//! Routes CRUD intents from models to stores and hands results back through
//! callbacks and/or a settled promise.
//!
//! ## Flow
//! ```text
//!   host calls sync(method, model, options)
//!                │
//!         ┌──────▼──────┐
//!         │   Router    │  model.persistence()
//!         └──┬───────┬──┘
//!  Local /   │       │  Remote
//!  Collection│       │
//!     ┌──────▼───┐ ┌─▼──────────────┐
//!     │LocalSync │ │fallback strategy│
//!     └──────┬───┘ └────────────────┘
//!            ▼
//!          Store ── success / error / complete + SyncPromise
//! ```

mod dispatcher;
mod method;
mod options;
mod promise;
mod router;

pub use dispatcher::{LocalSync, PRIVATE_BROWSING_MESSAGE, RECORD_NOT_FOUND_MESSAGE};
pub use method::Method;
pub use options::SyncOptions;
pub use promise::SyncPromise;
pub use router::Router;

use crate::model::Model;

/// A synchronization strategy a host installs for its models
pub trait SyncStrategy {
    fn sync(
        &self,
        method: Method,
        model: &mut dyn Model,
        options: SyncOptions<'_>,
    ) -> Option<SyncPromise>;
}

impl<F> SyncStrategy for F
where
    F: Fn(Method, &mut dyn Model, SyncOptions<'_>) -> Option<SyncPromise>,
{
    fn sync(
        &self,
        method: Method,
        model: &mut dyn Model,
        options: SyncOptions<'_>,
    ) -> Option<SyncPromise> {
        self(method, model, options)
    }
}
