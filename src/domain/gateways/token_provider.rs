//! Bearer token acquisition for authenticated requests.

use crate::error::AppError;
use async_trait::async_trait;

/// Source of fresh bearer tokens for the signed-in principal.
///
/// Called once per networked operation so a stale token never rides an
/// otherwise healthy request. When acquisition fails the operation resolves
/// with [`AppError::Auth`] before any network call is made — callers always
/// get a terminal answer instead of a request that silently never completes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns a freshly forced ID token for the current session.
    async fn id_token(&self) -> Result<String, AppError>;
}
