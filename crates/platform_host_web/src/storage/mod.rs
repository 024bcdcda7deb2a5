//! Browser storage adapters.

pub mod web_storage;
