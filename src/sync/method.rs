//! Sync method definitions

use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

/// CRUD intent passed to a sync strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Read,
    Create,
    Update,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Read => "read",
            Method::Create => "create",
            Method::Update => "update",
            Method::Delete => "delete",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Method::Read),
            "create" => Ok(Method::Create),
            "update" => Ok(Method::Update),
            "delete" => Ok(Method::Delete),
            other => Err(StoreError::Config(format!("Unknown sync method: {}", other))),
        }
    }
}
