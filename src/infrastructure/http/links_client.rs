//! reqwest-backed implementation of [`LinksGateway`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::entities::{Link, LinkAnalytics, LinkDraft, Page};
use crate::domain::gateways::{LinksGateway, TokenProvider};
use crate::error::AppError;
use crate::infrastructure::http::dto::{
    AnalyticsDto, CreateLinkRequest, LinkDto, LinkKeysRequest, PagedAnalyticsDto, PagedLinksDto,
    UpdateLinkRequest,
};
use crate::infrastructure::http::{build_client, check_status};

/// Links microservice client.
///
/// Each operation resolves a fresh bearer token first; a failed token refresh
/// aborts the operation with [`AppError::Auth`] and never reaches the wire.
/// No operation retries or mutates anything locally.
pub struct HttpLinksGateway<T: TokenProvider> {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<T>,
}

impl<T: TokenProvider> HttpLinksGateway<T> {
    /// Creates a client for the given base URL, e.g. `https://api.tinitron.ml`.
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
impl<T: TokenProvider> LinksGateway for HttpLinksGateway<T> {
    async fn create_link(&self, draft: &LinkDraft) -> Result<Link, AppError> {
        let token = self.tokens.id_token().await?;
        tracing::debug!(alias = %draft.short_url, "creating link");

        let resp = self
            .http
            .post(self.url("/links"))
            .bearer_auth(&token)
            .json(&CreateLinkRequest::from_draft(draft))
            .send()
            .await?;

        let dto: LinkDto = check_status(resp).await?.json().await?;
        dto.into_link()
    }

    async fn update_link(&self, key: &str, link: &Link) -> Result<(), AppError> {
        let token = self.tokens.id_token().await?;
        tracing::debug!(%key, new_key = %link.short_url, "updating link");

        let resp = self
            .http
            .put(self.url(&format!("/links/{key}")))
            .bearer_auth(&token)
            .json(&UpdateLinkRequest::from_link(link))
            .send()
            .await?;

        check_status(resp).await?;
        Ok(())
    }

    async fn delete_links(&self, keys: &[String]) -> Result<(), AppError> {
        let token = self.tokens.id_token().await?;
        tracing::debug!(count = keys.len(), "deleting links");

        let resp = self
            .http
            .delete(self.url("/links/delete"))
            .bearer_auth(&token)
            .json(&LinkKeysRequest {
                links: keys.to_vec(),
            })
            .send()
            .await?;

        check_status(resp).await?;
        Ok(())
    }

    async fn expire_links(&self, keys: &[String]) -> Result<(), AppError> {
        let token = self.tokens.id_token().await?;
        tracing::debug!(count = keys.len(), "expiring links");

        let resp = self
            .http
            .post(self.url("/links/expire"))
            .bearer_auth(&token)
            .json(&LinkKeysRequest {
                links: keys.to_vec(),
            })
            .send()
            .await?;

        check_status(resp).await?;
        Ok(())
    }

    async fn fetch_links(&self, uid: &str, page: u32) -> Result<Page<Link>, AppError> {
        let token = self.tokens.id_token().await?;

        let resp = self
            .http
            .get(self.url(&format!("/links/users/{uid}")))
            .query(&[("pageNo", page)])
            .bearer_auth(&token)
            .send()
            .await?;

        let dto: PagedLinksDto = check_status(resp).await?.json().await?;
        dto.into_page()
    }

    async fn fetch_link(&self, key: &str) -> Result<Link, AppError> {
        let token = self.tokens.id_token().await?;

        let resp = self
            .http
            .get(self.url(&format!("/links/{key}")))
            .bearer_auth(&token)
            .send()
            .await?;

        let dto: LinkDto = check_status(resp).await?.json().await?;
        dto.into_link()
    }

    async fn fetch_analytics_page(
        &self,
        uid: &str,
        page: u32,
    ) -> Result<Page<LinkAnalytics>, AppError> {
        let token = self.tokens.id_token().await?;

        let resp = self
            .http
            .get(self.url(&format!("/analytics/users/{uid}")))
            .query(&[("pageNo", page)])
            .bearer_auth(&token)
            .send()
            .await?;

        let dto: PagedAnalyticsDto = check_status(resp).await?.json().await?;
        dto.into_page()
    }

    async fn fetch_analytics(&self, key: &str) -> Result<LinkAnalytics, AppError> {
        let token = self.tokens.id_token().await?;

        let resp = self
            .http
            .get(self.url(&format!("/analytics/{key}")))
            .bearer_auth(&token)
            .send()
            .await?;

        let dto: AnalyticsDto = check_status(resp).await?.json().await?;
        dto.into_analytics(key)
    }
}
