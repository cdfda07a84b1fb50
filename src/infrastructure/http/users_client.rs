//! reqwest-backed implementation of [`UserGateway`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::gateways::{TokenProvider, UserGateway};
use crate::error::AppError;
use crate::infrastructure::http::{build_client, check_status};

/// Body of `POST /users/create`.
#[derive(Debug, Serialize)]
struct CreateUserRequest<'a> {
    id: &'a str,
    email: &'a str,
    username: &'a str,
}

/// Body of `PUT /users/{uid}`. Absent fields travel as explicit nulls and
/// are left unchanged server-side.
#[derive(Debug, Serialize)]
struct UpdateUserRequest<'a> {
    id: &'a str,
    username: Option<&'a str>,
    password: Option<&'a str>,
}

/// User-identity microservice client.
///
/// Same contract as [`super::HttpLinksGateway`]: fresh token per call,
/// typed errors, no retries.
pub struct HttpUserGateway<T: TokenProvider> {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<T>,
}

impl<T: TokenProvider> HttpUserGateway<T> {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        tokens: Arc<T>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            http: build_client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl<T: TokenProvider> UserGateway for HttpUserGateway<T> {
    async fn create_user(&self, uid: &str, email: &str, username: &str) -> Result<(), AppError> {
        let token = self.tokens.id_token().await?;
        tracing::debug!(%uid, "registering user record");

        let resp = self
            .http
            .post(self.url("/users/create"))
            .bearer_auth(&token)
            .json(&CreateUserRequest {
                id: uid,
                email,
                username,
            })
            .send()
            .await?;

        check_status(resp).await?;
        Ok(())
    }

    async fn update_user<'a>(
        &self,
        uid: &'a str,
        username: Option<&'a str>,
        password: Option<&'a str>,
    ) -> Result<(), AppError> {
        let token = self.tokens.id_token().await?;
        tracing::debug!(%uid, "updating user record");

        let resp = self
            .http
            .put(self.url(&format!("/users/{uid}")))
            .bearer_auth(&token)
            .json(&UpdateUserRequest {
                id: uid,
                username,
                password,
            })
            .send()
            .await?;

        check_status(resp).await?;
        Ok(())
    }

    async fn delete_user(&self, uid: &str) -> Result<(), AppError> {
        let token = self.tokens.id_token().await?;
        tracing::debug!(%uid, "deleting user record");

        let resp = self
            .http
            .delete(self.url(&format!("/users/{uid}")))
            .bearer_auth(&token)
            .send()
            .await?;

        check_status(resp).await?;
        Ok(())
    }
}
