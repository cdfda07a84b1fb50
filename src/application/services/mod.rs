//! Application services built on the domain gateway traits.

pub mod account_service;
pub mod links_service;

pub use account_service::AccountService;
pub use links_service::LinksService;
