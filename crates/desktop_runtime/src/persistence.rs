//! Window-state snapshot persistence over session-scoped and durable key/value backends.

use std::rc::Rc;

use platform_host::{load_json_with, save_json_with, KeyValueStore, StorageError, StorageScope};

use crate::model::LayoutSnapshot;

/// Persists [`LayoutSnapshot`] values under one key in either backend.
///
/// Writes go to the durable backend while the user-controlled persistence flag is on and to the
/// session backend otherwise. Reads follow the backend this adapter wrote last; before any write
/// they try durable, then session. The two backends are never kept in sync.
pub struct WindowStateStorage {
    durable: Rc<dyn KeyValueStore>,
    session: Rc<dyn KeyValueStore>,
    key: String,
    persist_enabled: bool,
    last_written: Option<StorageScope>,
}

impl WindowStateStorage {
    pub fn new(
        durable: Rc<dyn KeyValueStore>,
        session: Rc<dyn KeyValueStore>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            durable,
            session,
            key: key.into(),
            persist_enabled: false,
            last_written: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn persist_enabled(&self) -> bool {
        self.persist_enabled
    }

    /// Backend written by the most recent successful [`Self::save`].
    pub fn last_written(&self) -> Option<StorageScope> {
        self.last_written
    }

    /// Backend the next [`Self::save`] writes to.
    pub fn target_scope(&self) -> StorageScope {
        if self.persist_enabled {
            StorageScope::Durable
        } else {
            StorageScope::Session
        }
    }

    /// Flips the persistence flag. Turning it off clears the durable entry so stale state cannot
    /// reappear in a later session.
    pub fn set_persist_enabled(&mut self, enabled: bool) {
        self.persist_enabled = enabled;
        if !enabled {
            if let Err(err) = self.durable.remove_item(&self.key) {
                log::warn!("failed to clear durable window state: {err}");
            }
            if self.last_written == Some(StorageScope::Durable) {
                self.last_written = None;
            }
        }
    }

    /// Writes `snapshot` to the target backend. Failures are logged, never returned.
    pub fn save(&mut self, snapshot: &LayoutSnapshot) {
        let scope = self.target_scope();
        match save_json_with(self.backend(scope), &self.key, snapshot) {
            Ok(()) => self.last_written = Some(scope),
            Err(err) => log::warn!("failed to save window state to {}: {err}", scope.label()),
        }
    }

    /// Reads the saved snapshot. Missing, unreadable, or malformed data yields `None`.
    pub fn load(&self) -> Option<LayoutSnapshot> {
        let order: &[StorageScope] = match &self.last_written {
            Some(scope) => std::slice::from_ref(scope),
            None => &[StorageScope::Durable, StorageScope::Session],
        };
        for &scope in order {
            match load_json_with::<_, LayoutSnapshot>(self.backend(scope), &self.key) {
                Ok(Some(snapshot)) => return Some(snapshot),
                Ok(None) => continue,
                Err(StorageError::Serde { message, .. }) => {
                    log::warn!(
                        "ignoring malformed window state in {}: {message}",
                        scope.label()
                    );
                    return None;
                }
                Err(err) => {
                    log::warn!("failed to read window state from {}: {err}", scope.label());
                }
            }
        }
        None
    }

    fn backend(&self, scope: StorageScope) -> &dyn KeyValueStore {
        match scope {
            StorageScope::Durable => self.durable.as_ref(),
            StorageScope::Session => self.session.as_ref(),
        }
    }
}

impl std::fmt::Debug for WindowStateStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowStateStorage")
            .field("key", &self.key)
            .field("persist_enabled", &self.persist_enabled)
            .field("last_written", &self.last_written)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use platform_host::MemoryKeyValueStore;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::SnapshotEntry;

    const KEY: &str = "mi_os_windows_state";

    fn storage() -> (WindowStateStorage, MemoryKeyValueStore, MemoryKeyValueStore) {
        let durable = MemoryKeyValueStore::default();
        let session = MemoryKeyValueStore::default();
        let storage =
            WindowStateStorage::new(Rc::new(durable.clone()), Rc::new(session.clone()), KEY);
        (storage, durable, session)
    }

    fn snapshot(left: &str) -> LayoutSnapshot {
        let mut snapshot = LayoutSnapshot::default();
        snapshot.entries.insert(
            "media".to_string(),
            SnapshotEntry {
                left: left.to_string(),
                top: "40px".to_string(),
                display: "block".to_string(),
            },
        );
        snapshot
    }

    #[test]
    fn save_goes_to_session_until_persistence_is_enabled() {
        let (mut storage, durable, session) = storage();

        storage.save(&snapshot("10px"));
        assert!(session.contains(KEY));
        assert!(!durable.contains(KEY));
        assert_eq!(storage.last_written(), Some(StorageScope::Session));

        storage.set_persist_enabled(true);
        storage.save(&snapshot("20px"));
        assert!(durable.contains(KEY));
        assert_eq!(storage.load(), Some(snapshot("20px")));
    }

    #[test]
    fn load_returns_exactly_what_was_saved() {
        let (mut storage, _, _) = storage();
        let saved = snapshot("123px");
        storage.save(&saved);
        assert_eq!(storage.load(), Some(saved));
    }

    #[test]
    fn disabling_persistence_clears_durable_entry() {
        let (mut storage, durable, session) = storage();
        storage.set_persist_enabled(true);
        storage.save(&snapshot("20px"));
        assert!(durable.contains(KEY));

        storage.set_persist_enabled(false);
        assert!(!durable.contains(KEY));

        storage.save(&snapshot("30px"));
        assert!(session.contains(KEY));
        assert_eq!(storage.load(), Some(snapshot("30px")));
    }

    #[test]
    fn load_follows_last_written_backend_not_both() {
        let (mut storage, durable, _) = storage();
        durable
            .set_item(KEY, &serde_json::to_string(&snapshot("1px")).expect("json"))
            .expect("seed durable");

        storage.save(&snapshot("2px"));
        assert_eq!(storage.load(), Some(snapshot("2px")));
    }

    #[test]
    fn fresh_adapter_prefers_durable_then_session() {
        let (storage, durable, session) = storage();
        assert_eq!(storage.load(), None);

        session
            .set_item(KEY, &serde_json::to_string(&snapshot("5px")).expect("json"))
            .expect("seed session");
        assert_eq!(storage.load(), Some(snapshot("5px")));

        durable
            .set_item(KEY, &serde_json::to_string(&snapshot("6px")).expect("json"))
            .expect("seed durable");
        assert_eq!(storage.load(), Some(snapshot("6px")));
    }

    #[test]
    fn malformed_data_is_treated_as_absent() {
        let (storage, durable, _) = storage();
        durable.set_item(KEY, "{\"media\": [").expect("seed");
        assert_eq!(storage.load(), None);
    }
}
