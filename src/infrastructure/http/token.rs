//! Fixed-token provider.

use crate::domain::gateways::TokenProvider;
use crate::error::AppError;
use async_trait::async_trait;

/// Serves one pre-obtained ID token for every request.
///
/// Used by the CLI (token passed via environment or prompt) and by tests.
/// Production apps plug in a provider backed by their identity SDK that
/// force-refreshes per call.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn id_token(&self) -> Result<String, AppError> {
        if self.token.is_empty() {
            return Err(AppError::Auth("no ID token configured".to_string()));
        }
        Ok(self.token.clone())
    }
}
