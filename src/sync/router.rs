//! Strategy selection per model

use crate::model::Model;

use super::{LocalSync, Method, SyncOptions, SyncPromise, SyncStrategy};

/// Picks `LocalSync` for locally persisted models and the fallback otherwise
///
/// Install one `Router` as the host's sync hook; the fallback is the host's
/// own (remote) strategy and stays reachable through `fallback()`.
#[derive(Debug, Clone)]
pub struct Router<F> {
    local: LocalSync,
    fallback: F,
}

impl<F: SyncStrategy> Router<F> {
    pub fn new(local: LocalSync, fallback: F) -> Self {
        Self { local, fallback }
    }

    pub fn local(&self) -> &LocalSync {
        &self.local
    }

    /// The strategy used for models without a store
    pub fn fallback(&self) -> &F {
        &self.fallback
    }

    /// Strategy that will handle `model`
    pub fn strategy_for(&self, model: &dyn Model) -> &dyn SyncStrategy {
        if model.persistence().is_local() {
            &self.local
        } else {
            &self.fallback
        }
    }
}

impl<F: SyncStrategy> SyncStrategy for Router<F> {
    fn sync(
        &self,
        method: Method,
        model: &mut dyn Model,
        options: SyncOptions<'_>,
    ) -> Option<SyncPromise> {
        self.strategy_for(model).sync(method, model, options)
    }
}
