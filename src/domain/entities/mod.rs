//! Core domain entities representing the client-side data model.
//!
//! Entities are plain data structures without network or storage concerns.
//!
//! # Entity Types
//!
//! - [`Link`] - A shortened URL and its lifecycle metadata
//! - [`LinkDraft`] - Creation input, following the "New Type" pattern
//! - [`LinkAnalytics`] - Aggregated click statistics for one link
//! - [`Page`] - Server pagination metadata around a listing
//!
//! Identity note: [`Link`] equality compares the short URL only, and
//! [`LinkAnalytics::id`] points back at that short URL without any enforced
//! referential integrity. The service layer is responsible for purging
//! analytics when links are deleted.

pub mod analytics;
pub mod link;
pub mod page;

pub use analytics::{BROWSERS, LinkAnalytics, MONTHS, OS_FAMILIES, complete_counts, zero_counts};
pub use link::{DEFAULT_TTL_DAYS, Link, LinkDraft};
pub use page::Page;
