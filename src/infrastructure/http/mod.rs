//! HTTP-backed gateway implementations and their wire DTOs.
//!
//! - [`dto`] - request/response shapes with typed decode into entities
//! - [`HttpLinksGateway`] - links microservice client
//! - [`HttpUserGateway`] - user-identity microservice client
//! - [`StaticTokenProvider`] - fixed-token provider for CLI use and tests

pub mod dto;
pub mod links_client;
pub mod token;
pub mod users_client;

pub use links_client::HttpLinksGateway;
pub use token::StaticTokenProvider;
pub use users_client::HttpUserGateway;

use crate::error::AppError;

/// Promotes a non-2xx response to [`AppError::Status`], carrying the body
/// text as the user-facing message.
pub(crate) async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, AppError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = resp.text().await.unwrap_or_else(|_| String::new());
    tracing::warn!(code = status.as_u16(), %message, "request rejected");
    Err(AppError::Status {
        code: status.as_u16(),
        message,
    })
}

/// Builds a reqwest client with the configured request timeout.
pub(crate) fn build_client(timeout: std::time::Duration) -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::Transport(format!("failed to build HTTP client: {e}")))
}
