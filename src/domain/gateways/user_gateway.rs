//! Gateway trait for the user-identity microservice.

use crate::error::AppError;
use async_trait::async_trait;

/// Remote interface of the user-identity microservice.
///
/// Mirror of the account records kept next to the links store. Credential
/// handling (sign-in, re-authentication) lives in the identity provider and
/// is not part of this boundary.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserGateway: Send + Sync {
    /// Registers the user record after first sign-up.
    async fn create_user(&self, uid: &str, email: &str, username: &str) -> Result<(), AppError>;

    /// Updates username and/or password; `None` fields are sent as nulls and
    /// left unchanged server-side.
    async fn update_user<'a>(
        &self,
        uid: &'a str,
        username: Option<&'a str>,
        password: Option<&'a str>,
    ) -> Result<(), AppError>;

    /// Deletes the user record and everything keyed by it.
    async fn delete_user(&self, uid: &str) -> Result<(), AppError>;
}
