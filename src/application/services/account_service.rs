//! Account management against the user-identity microservice.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use validator::ValidateEmail;

use crate::domain::gateways::UserGateway;
use crate::error::AppError;

const MIN_PASSWORD_LEN: usize = 8;

/// Service for the signed-in user's account record.
///
/// Input validation happens here so invalid requests never reach the
/// network; the gateway only sees data the server would accept.
pub struct AccountService<U: UserGateway> {
    gateway: Arc<U>,
}

impl<U: UserGateway> AccountService<U> {
    pub fn new(gateway: Arc<U>) -> Self {
        Self { gateway }
    }

    /// Registers the user record backing a fresh sign-up.
    ///
    /// # Errors
    ///
    /// [`AppError::Validation`] for a malformed email or empty username.
    pub async fn register(&self, uid: &str, email: &str, username: &str) -> Result<(), AppError> {
        if !email.validate_email() {
            return Err(AppError::bad_request(
                "Email address is not valid",
                json!({ "email": email }),
            ));
        }
        if username.trim().is_empty() {
            return Err(AppError::bad_request(
                "Username must not be empty",
                json!({ "field": "username" }),
            ));
        }

        self.gateway.create_user(uid, email, username).await?;
        info!(uid = %uid, "user registered");
        Ok(())
    }

    pub async fn change_username(&self, uid: &str, username: &str) -> Result<(), AppError> {
        if username.trim().is_empty() {
            return Err(AppError::bad_request(
                "Username must not be empty",
                json!({ "field": "username" }),
            ));
        }

        self.gateway.update_user(uid, Some(username), None).await?;
        info!(uid = %uid, "username changed");
        Ok(())
    }

    /// Changes the password after checking length, character classes and the
    /// confirmation match.
    pub async fn change_password(
        &self,
        uid: &str,
        new_password: &str,
        confirmation: &str,
    ) -> Result<(), AppError> {
        validate_password_strength(new_password)?;
        if new_password != confirmation {
            return Err(AppError::bad_request(
                "Passwords do not match",
                json!({ "field": "confirmation" }),
            ));
        }

        self.gateway.update_user(uid, None, Some(new_password)).await?;
        info!(uid = %uid, "password changed");
        Ok(())
    }

    pub async fn delete_account(&self, uid: &str) -> Result<(), AppError> {
        self.gateway.delete_user(uid).await?;
        info!(uid = %uid, "account deleted");
        Ok(())
    }
}

/// At least 8 characters with an uppercase letter, a lowercase letter and a
/// digit.
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::bad_request(
            "Password must be at least 8 characters long",
            json!({ "field": "password" }),
        ));
    }

    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_upper && has_lower && has_digit) {
        return Err(AppError::bad_request(
            "Password needs an uppercase letter, a lowercase letter and a digit",
            json!({ "field": "password" }),
        ));
    }

    Ok(())
}
