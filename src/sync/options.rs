//! Callback options for a sync call

use std::fmt;

use serde_json::Value;

type SuccessFn<'a> = Box<dyn FnOnce(&Value) + 'a>;
type ErrorFn<'a> = Box<dyn FnOnce(&str) + 'a>;
type CompleteFn<'a> = Box<dyn FnOnce(Option<&Value>) + 'a>;

/// Optional callbacks; each fires at most once per sync
#[derive(Default)]
pub struct SyncOptions<'a> {
    pub(crate) success: Option<SuccessFn<'a>>,
    pub(crate) error: Option<ErrorFn<'a>>,
    pub(crate) complete: Option<CompleteFn<'a>>,
}

impl<'a> SyncOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the result when the operation produced one
    pub fn success(mut self, f: impl FnOnce(&Value) + 'a) -> Self {
        self.success = Some(Box::new(f));
        self
    }

    /// Called with a message when the operation failed or found nothing
    pub fn error(mut self, f: impl FnOnce(&str) + 'a) -> Self {
        self.error = Some(Box::new(f));
        self
    }

    /// Always called last, with the result if there was one
    pub fn complete(mut self, f: impl FnOnce(Option<&Value>) + 'a) -> Self {
        self.complete = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for SyncOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncOptions")
            .field("success", &self.success.is_some())
            .field("error", &self.error.is_some())
            .field("complete", &self.complete.is_some())
            .finish()
    }
}
