//! Gateway trait for the links microservice.

use crate::domain::entities::{Link, LinkAnalytics, LinkDraft, Page};
use crate::error::AppError;
use async_trait::async_trait;

/// Remote interface of the links microservice.
///
/// Every method is one authenticated round trip. Implementations obtain a
/// fresh bearer token per call and surface failures through [`AppError`];
/// none of them touches local state — reconciliation belongs to
/// [`crate::application::services::LinksService`].
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpLinksGateway`] - reqwest-backed implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinksGateway: Send + Sync {
    /// Creates a link from a draft and returns the canonical entity.
    ///
    /// The server assigns the short URL unless the draft carries a custom
    /// alias, in which case the response echoes it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Status`] when the server rejects the draft (for
    /// example an alias collision), [`AppError::Decode`] on a malformed
    /// response.
    async fn create_link(&self, draft: &LinkDraft) -> Result<Link, AppError>;

    /// Updates title, short URL, expiration date and password.
    ///
    /// `key` is the link's short URL *before* the update; a renamed short URL
    /// travels in the body while the old value addresses the resource.
    async fn update_link(&self, key: &str, link: &Link) -> Result<(), AppError>;

    /// Batch-deletes links by short URL.
    async fn delete_links(&self, keys: &[String]) -> Result<(), AppError>;

    /// Batch-expires links: the server forces their expiration date to now.
    async fn expire_links(&self, keys: &[String]) -> Result<(), AppError>;

    /// Fetches one zero-based page of the user's links.
    ///
    /// A null server-side title falls back to the original URL during decode.
    async fn fetch_links(&self, uid: &str, page: u32) -> Result<Page<Link>, AppError>;

    /// Fetches a single link in its authoritative server state.
    async fn fetch_link(&self, key: &str) -> Result<Link, AppError>;

    /// Fetches one zero-based page of per-link analytics.
    ///
    /// Paginated items carry only monthly counters; highlight fields are
    /// zero-filled placeholders until [`Self::fetch_analytics`] is called for
    /// the individual link.
    async fn fetch_analytics_page(
        &self,
        uid: &str,
        page: u32,
    ) -> Result<Page<LinkAnalytics>, AppError>;

    /// Fetches full analytics for one link, including browser and OS splits.
    async fn fetch_analytics(&self, key: &str) -> Result<LinkAnalytics, AppError>;
}
