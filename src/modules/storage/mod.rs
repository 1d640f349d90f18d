//! Storage module for uploaded files
//!
//! Provides a local-disk store for attachment uploads.

mod local_storage;

pub use local_storage::LocalStorage;
