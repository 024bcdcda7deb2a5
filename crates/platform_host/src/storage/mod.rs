//! Storage contracts for session-scoped and durable key/value backends.

pub mod key_value;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifetime class of a key/value backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageScope {
    /// Cleared when the browsing session ends (`sessionStorage`).
    Session,
    /// Survives reloads and restarts (`localStorage`).
    Durable,
}

impl StorageScope {
    /// Returns the browser API name backing this scope.
    pub fn label(self) -> &'static str {
        match self {
            Self::Session => "sessionStorage",
            Self::Durable => "localStorage",
        }
    }
}

/// Failures surfaced by key/value backends and typed helpers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backend does not exist in the current environment.
    #[error("{0} unavailable")]
    Unavailable(&'static str),
    /// The backend rejected the operation (quota, privacy mode, ...).
    #[error("{scope} {operation} failed: {message}")]
    Backend {
        /// Backend that failed.
        scope: &'static str,
        /// Operation name (`set_item`, `remove_item`, ...).
        operation: &'static str,
        /// Backend-provided detail.
        message: String,
    },
    /// A stored value could not be (de)serialized.
    #[error("invalid stored JSON for key `{key}`: {message}")]
    Serde {
        /// Key holding the value.
        key: String,
        /// Parser detail.
        message: String,
    },
}
