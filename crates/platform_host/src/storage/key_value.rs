//! Synchronous key/value storage contract mirroring the browser `Storage` API.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

use super::StorageError;

/// Host service for string values stored per key.
///
/// Implementations are single-threaded and synchronous, matching `localStorage` and
/// `sessionStorage` semantics.
pub trait KeyValueStore {
    /// Loads the raw string stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes `key`. Deleting a missing key succeeds.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Default)]
/// In-memory store keyed by string.
///
/// Clones share the same map, so a test can keep a handle while the runtime owns another.
pub struct MemoryKeyValueStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    /// Returns whether `key` currently holds a value.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.borrow().contains_key(key)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

/// Loads and deserializes a typed JSON value through a [`KeyValueStore`].
///
/// # Errors
///
/// Returns an error when the store read or JSON deserialization fails.
pub fn load_json_with<S: KeyValueStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get_item(key)? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|e| StorageError::Serde {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    Ok(Some(value))
}

/// Serializes and saves a typed JSON value through a [`KeyValueStore`].
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub fn save_json_with<S: KeyValueStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|e| StorageError::Serde {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    store.set_item(key, &raw)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn memory_store_round_trip_and_remove() {
        let store = MemoryKeyValueStore::default();
        let store_obj: &dyn KeyValueStore = &store;

        store_obj.set_item("layout", "{\"k\":1}").expect("set");
        assert_eq!(
            store_obj.get_item("layout").expect("get"),
            Some("{\"k\":1}".to_string())
        );
        store_obj.remove_item("layout").expect("remove");
        assert_eq!(store_obj.get_item("layout").expect("get"), None);
        store_obj.remove_item("layout").expect("removing twice is fine");
    }

    #[test]
    fn memory_store_clones_share_backing_map() {
        let store = MemoryKeyValueStore::default();
        let handle = store.clone();
        store.set_item("fs", "{}").expect("set");
        assert!(handle.contains("fs"));
        assert_eq!(handle.len(), 1);
    }

    #[test]
    fn typed_helpers_round_trip() {
        let store = MemoryKeyValueStore::default();
        let mut files = BTreeMap::new();
        files.insert("/home/user/a.txt".to_string(), "hola".to_string());

        save_json_with(&store, "fs", &files).expect("save typed");
        let loaded: Option<BTreeMap<String, String>> =
            load_json_with(&store, "fs").expect("load typed");
        assert_eq!(loaded, Some(files));
    }

    #[test]
    fn typed_load_reports_malformed_json() {
        let store = MemoryKeyValueStore::default();
        store.set_item("fs", "{not json").expect("set");
        let err = load_json_with::<_, BTreeMap<String, String>>(&store, "fs")
            .expect_err("malformed payload");
        assert!(matches!(err, StorageError::Serde { ref key, .. } if key == "fs"));
    }
}
