//! `localStorage` / `sessionStorage` backed key/value store.
//!
//! The browser `Storage` API is synchronous, so this adapter maps one-to-one onto
//! [`platform_host::KeyValueStore`].

use platform_host::{KeyValueStore, StorageError, StorageScope};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Browser key/value store backed by `window.localStorage` or `window.sessionStorage`.
pub struct WebStorage {
    scope: StorageScope,
}

impl WebStorage {
    /// Store backed by `window.localStorage`.
    pub const fn durable() -> Self {
        Self {
            scope: StorageScope::Durable,
        }
    }

    /// Store backed by `window.sessionStorage`.
    pub const fn session() -> Self {
        Self {
            scope: StorageScope::Session,
        }
    }

    /// Scope this store writes to.
    pub const fn scope(self) -> StorageScope {
        self.scope
    }

    /// Returns whether the underlying browser store can be reached.
    pub fn is_available(self) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            self.backend().is_ok()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            false
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn backend(self) -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable(self.scope.label()))?;
        let storage = match self.scope {
            StorageScope::Durable => window.local_storage(),
            StorageScope::Session => window.session_storage(),
        };
        storage
            .ok()
            .flatten()
            .ok_or(StorageError::Unavailable(self.scope.label()))
    }
}

impl KeyValueStore for WebStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            self.backend()?
                .get_item(key)
                .map_err(|e| StorageError::Backend {
                    scope: self.scope.label(),
                    operation: "get_item",
                    message: format!("{e:?}"),
                })
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Err(StorageError::Unavailable(self.scope.label()))
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            self.backend()?
                .set_item(key, value)
                .map_err(|e| StorageError::Backend {
                    scope: self.scope.label(),
                    operation: "set_item",
                    message: format!("{e:?}"),
                })
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable(self.scope.label()))
        }
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            self.backend()?
                .remove_item(key)
                .map_err(|e| StorageError::Backend {
                    scope: self.scope.label(),
                    operation: "remove_item",
                    message: format!("{e:?}"),
                })
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Err(StorageError::Unavailable(self.scope.label()))
        }
    }
}
