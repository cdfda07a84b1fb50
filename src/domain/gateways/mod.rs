//! Gateway trait definitions for the domain layer.
//!
//! Gateways abstract the two REST microservices and the auth-token source
//! behind traits, so services can be exercised against mocks and the HTTP
//! plumbing stays in `crate::infrastructure::http`.
//!
//! # Available Gateways
//!
//! - [`LinksGateway`] - link CRUD, expiry and analytics round trips
//! - [`UserGateway`] - user-identity microservice boundary
//! - [`TokenProvider`] - fresh bearer tokens per operation
//!
//! Mock implementations are auto-generated via `mockall` for testing.

pub mod links_gateway;
pub mod preference_store;
pub mod token_provider;
pub mod user_gateway;

pub use links_gateway::LinksGateway;
pub use preference_store::{DELETE_EXPIRED_FLAG, PreferenceStore};
pub use token_provider::TokenProvider;
pub use user_gateway::UserGateway;

#[cfg(test)]
pub use links_gateway::MockLinksGateway;
#[cfg(test)]
pub use preference_store::MockPreferenceStore;
#[cfg(test)]
pub use token_provider::MockTokenProvider;
#[cfg(test)]
pub use user_gateway::MockUserGateway;
