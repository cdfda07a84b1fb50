//! Per-user preference storage implementations.
//!
//! The trait lives in [`crate::domain::gateways::PreferenceStore`]; this
//! module provides a JSON-file store for real use and an in-memory store
//! for tests and ephemeral sessions.

pub mod json_store;
pub mod memory_store;

pub use json_store::JsonFileStore;
pub use memory_store::MemoryStore;
