//! # Tinitron Client
//!
//! Client-side service layer for the Tinitron URL-shortening platform:
//! link management, per-link analytics, account administration, and the
//! local view state (pinned links, day grouping, expired filter) that a
//! frontend renders.
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles with clear layer
//! separation:
//!
//! - **Domain Layer** ([`domain`]) - Core entities and gateway traits
//! - **Application Layer** ([`application`]) - Services and view-state helpers
//! - **Infrastructure Layer** ([`infrastructure`]) - HTTP gateways and
//!   preference storage
//!
//! ## Quick Start
//!
//! ```bash
//! # Set required environment variables
//! export LINKS_API_URL="https://links.tinitron.example"
//! export USERS_API_URL="https://users.tinitron.example"
//! export TINITRON_ID_TOKEN="<bearer token>"
//! export TINITRON_UID="<user id>"
//!
//! # Inspect your links
//! cargo run --bin tinitron -- links list
//! ```
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

pub use error::AppError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::sections::{LinkSection, SectionedLinks};
    pub use crate::application::services::{AccountService, LinksService};
    pub use crate::domain::entities::{Link, LinkAnalytics, LinkDraft, Page};
    pub use crate::domain::gateways::{
        LinksGateway, PreferenceStore, TokenProvider, UserGateway,
    };
    pub use crate::error::AppError;
}
