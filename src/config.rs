//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at CLI startup and validated before any
//! request is made.
//!
//! ## Required Variables
//!
//! - `LINKS_API_URL` - Base URL of the links/analytics microservice
//! - `USERS_API_URL` - Base URL of the user-identity microservice
//!
//! ## Optional Variables
//!
//! - `TINITRON_ID_TOKEN` - Bearer token sent with every request
//! - `TINITRON_UID` - User id whose links are managed
//! - `REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 30, max: 600)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub links_api_url: String,
    pub users_api_url: String,
    /// Bearer token for the `Authorization` header. Commands that talk to
    /// the network refuse to run without it.
    pub id_token: Option<String>,
    /// User id whose links and account are managed.
    pub uid: Option<String>,
    pub request_timeout_secs: u64,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required API base URL is missing.
    pub fn from_env() -> Result<Self> {
        let links_api_url = env::var("LINKS_API_URL").context("LINKS_API_URL must be set")?;
        let users_api_url = env::var("USERS_API_URL").context("USERS_API_URL must be set")?;

        let id_token = env::var("TINITRON_ID_TOKEN").ok().filter(|t| !t.is_empty());
        let uid = env::var("TINITRON_UID").ok().filter(|u| !u.is_empty());

        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            links_api_url,
            users_api_url,
            id_token,
            uid,
            request_timeout_secs,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - an API base URL does not start with `http://` or `https://`
    /// - `REQUEST_TIMEOUT_SECS` is 0 or above 600
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("LINKS_API_URL", &self.links_api_url),
            ("USERS_API_URL", &self.users_api_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with 'http://' or 'https://', got '{}'", name, url);
            }
        }

        if self.request_timeout_secs == 0 || self.request_timeout_secs > 600 {
            anyhow::bail!(
                "REQUEST_TIMEOUT_SECS must be between 1 and 600, got {}",
                self.request_timeout_secs
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!("LOG_FORMAT must be 'text' or 'json', got '{}'", self.log_format);
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Links API: {}", self.links_api_url);
        tracing::info!("  Users API: {}", self.users_api_url);

        match &self.id_token {
            Some(token) => tracing::info!("  Token: {}", mask_token(token)),
            None => tracing::info!("  Token: not set"),
        }
        match &self.uid {
            Some(uid) => tracing::info!("  User id: {}", uid),
            None => tracing::info!("  User id: not set"),
        }

        tracing::info!("  Request timeout: {}s", self.request_timeout_secs);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Masks a bearer token for logging, keeping only a short prefix.
fn mask_token(token: &str) -> String {
    if token.len() <= 8 {
        return "***".to_string();
    }
    format!("{}***", &token[..8])
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in the binary).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
