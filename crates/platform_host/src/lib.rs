//! Typed host-domain contracts shared by the desktop runtime, its apps, and browser adapters.
//!
//! This crate is the API-first boundary for platform services. It exposes the key/value storage
//! contract used for window-state snapshots and terminal exports, plus time helpers. Concrete
//! browser adapters live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;
pub mod time;

pub use storage::key_value::{
    load_json_with, save_json_with, KeyValueStore, MemoryKeyValueStore,
};
pub use storage::{StorageError, StorageScope};
pub use time::{local_datetime_string, unix_time_ms_now};
