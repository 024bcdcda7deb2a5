use std::rc::Rc;

use platform_host::{KeyValueStore, MemoryKeyValueStore};

use crate::storage::web_storage::WebStorage;

/// Name of the storage strategy compiled into this build.
pub fn storage_strategy_name() -> &'static str {
    if cfg!(target_arch = "wasm32") {
        "browser-web-storage"
    } else {
        "in-memory"
    }
}

/// Durable backend: `localStorage` in the browser, an in-memory map elsewhere.
pub fn durable_store() -> Rc<dyn KeyValueStore> {
    pick(WebStorage::durable())
}

/// Session backend: `sessionStorage` in the browser, an in-memory map elsewhere.
pub fn session_store() -> Rc<dyn KeyValueStore> {
    pick(WebStorage::session())
}

fn pick(web: WebStorage) -> Rc<dyn KeyValueStore> {
    if web.is_available() {
        Rc::new(web)
    } else {
        Rc::new(MemoryKeyValueStore::default())
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn native_factories_fall_back_to_independent_memory_stores() {
        assert_eq!(storage_strategy_name(), "in-memory");
        let durable = durable_store();
        let session = session_store();
        durable.set_item("k", "durable").expect("set durable");
        assert_eq!(session.get_item("k").expect("get session"), None);
        assert_eq!(
            durable.get_item("k").expect("get durable"),
            Some("durable".to_string())
        );
    }
}
