//! Infrastructure layer: HTTP clients and local preference storage.

pub mod http;
pub mod preferences;
