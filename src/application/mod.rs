//! Application layer: services and view-state helpers.

pub mod sections;
pub mod services;

pub use sections::{LinkSection, SectionedLinks};
pub use services::{AccountService, LinksService};
