//! Browser (`wasm32`) implementations of [`platform_host`] storage contracts.
//!
//! `localStorage` and `sessionStorage` are exposed through one [`WebStorage`] type parameterized
//! by [`platform_host::StorageScope`]. On native targets the browser stores are absent; the
//! adapter factories fall back to in-memory stores so the desktop runtime stays usable headless.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod storage;

pub use adapters::{durable_store, session_store, storage_strategy_name};
pub use storage::web_storage::WebStorage;
