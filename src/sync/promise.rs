//! Settled promise returned by a sync call

use std::future::{self, IntoFuture, Ready};

use serde_json::Value;

/// Outcome of a sync call, already resolved or rejected when handed out
///
/// Awaiting it completes immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncPromise {
    outcome: Result<Value, String>,
}

impl SyncPromise {
    pub fn resolved(value: Value) -> Self {
        Self { outcome: Ok(value) }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            outcome: Err(reason.into()),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn is_rejected(&self) -> bool {
        self.outcome.is_err()
    }

    /// Resolved value, if any
    pub fn value(&self) -> Option<&Value> {
        self.outcome.as_ref().ok()
    }

    /// Rejection message, if any
    pub fn reason(&self) -> Option<&str> {
        self.outcome.as_ref().err().map(String::as_str)
    }

    pub fn into_result(self) -> Result<Value, String> {
        self.outcome
    }
}

impl IntoFuture for SyncPromise {
    type Output = Result<Value, String>;
    type IntoFuture = Ready<Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        future::ready(self.outcome)
    }
}
