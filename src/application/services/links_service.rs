//! Link management service: owns the locally cached link and analytics
//! collections and keeps them reconciled with the remote gateway.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{Link, LinkAnalytics, LinkDraft, Page};
use crate::domain::gateways::LinksGateway;
use crate::error::AppError;
use crate::utils::{validate_custom_alias, validate_original_url};

/// Application service for the links collection of one signed-in user.
///
/// All mutating operations call the gateway first and only touch the local
/// collections after the gateway succeeds, so a failed call never leaves the
/// cache diverged from the server. `&mut self` on every mutator keeps the
/// single-writer assumption in the type system.
pub struct LinksService<G: LinksGateway> {
    gateway: Arc<G>,
    uid: String,
    links: Vec<Link>,
    analytics_data: Vec<LinkAnalytics>,
}

impl<G: LinksGateway> LinksService<G> {
    pub fn new(gateway: Arc<G>, uid: impl Into<String>) -> Self {
        Self {
            gateway,
            uid: uid.into(),
            links: Vec::new(),
            analytics_data: Vec::new(),
        }
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn analytics_data(&self) -> &[LinkAnalytics] {
        &self.analytics_data
    }

    /// Local lookup by short-URL key.
    pub fn link_for(&self, key: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.short_url == key)
    }

    /// Local analytics lookup; joins on the link's short-URL key.
    pub fn analytics_for(&self, key: &str) -> Option<&LinkAnalytics> {
        self.analytics_data.iter().find(|a| a.id == key)
    }

    /// Appends a link the caller obtained elsewhere (typically the result of
    /// [`Self::create_new_link`]). Returns false when it is already present.
    pub fn append_link(&mut self, link: Link) -> bool {
        if self.links.contains(&link) {
            return false;
        }
        self.links.push(link);
        true
    }

    /// Validates the draft and creates the link remotely.
    ///
    /// Returns the canonical link as the server stored it; a custom alias is
    /// echoed back in `short_url`. The local collection is not touched: the
    /// caller decides whether the new link belongs in the current view.
    ///
    /// # Errors
    ///
    /// [`AppError::Validation`] when the title, destination URL or alias is
    /// invalid; otherwise whatever the gateway reports.
    pub async fn create_new_link(&self, draft: &LinkDraft) -> Result<Link, AppError> {
        if draft.title.trim().is_empty() {
            return Err(AppError::bad_request(
                "Title must not be empty",
                json!({ "field": "title" }),
            ));
        }
        validate_original_url(&draft.original_url)?;
        validate_custom_alias(&draft.short_url)?;

        let link = self.gateway.create_link(draft).await?;
        info!(key = %link.short_url, "link created");
        Ok(link)
    }

    /// Updates the link currently stored under `key`, then replaces the local
    /// entry. The updated link may carry a different short URL (rename), so
    /// the old key identifies which entry to replace.
    pub async fn update_link(&mut self, key: &str, link: &Link) -> Result<(), AppError> {
        validate_custom_alias(&link.short_url)?;

        self.gateway.update_link(key, link).await?;
        if let Some(pos) = self.links.iter().position(|l| l.short_url == key) {
            self.links[pos] = link.clone();
        }
        info!(old_key = %key, new_key = %link.short_url, "link updated");
        Ok(())
    }

    /// Deletes the given links remotely, then drops them and their analytics
    /// locally. Analytics for a deleted link are purged right away rather
    /// than waiting for the next refresh.
    pub async fn delete_links(&mut self, keys: &[String]) -> Result<(), AppError> {
        self.gateway.delete_links(keys).await?;
        self.links.retain(|l| !keys.contains(&l.short_url));
        self.analytics_data.retain(|a| !keys.contains(&a.id));
        info!(count = keys.len(), "links deleted");
        Ok(())
    }

    /// Expires the given links remotely, then marks the local copies expired
    /// by setting their expiration date to the time of the call. No other
    /// field changes.
    pub async fn expire_links(&mut self, keys: &[String]) -> Result<(), AppError> {
        let stamp = Utc::now();
        self.gateway.expire_links(keys).await?;
        for link in self.links.iter_mut().filter(|l| keys.contains(&l.short_url)) {
            link.expiration_date = stamp;
        }
        info!(count = keys.len(), "links expired");
        Ok(())
    }

    /// Fetches page zero and replaces the local collection with it.
    pub async fn refresh_links(&mut self) -> Result<Page<Link>, AppError> {
        let page = self.gateway.fetch_links(&self.uid, 0).await?;
        self.links = page.items.clone();
        debug!(count = page.items.len(), total_pages = page.total_pages, "links refreshed");
        Ok(page)
    }

    /// Fetches a further page and appends any link not already held.
    pub async fn fetch_more_links(&mut self, page_no: u32) -> Result<Page<Link>, AppError> {
        let page = self.gateway.fetch_links(&self.uid, page_no).await?;
        for link in &page.items {
            if !self.links.contains(link) {
                self.links.push(link.clone());
            }
        }
        debug!(page = page_no, held = self.links.len(), "links page merged");
        Ok(page)
    }

    /// Authoritative single-link fetch; does not touch the local collection.
    pub async fn fetch_link(&self, key: &str) -> Result<Link, AppError> {
        self.gateway.fetch_link(key).await
    }

    /// Fetches analytics page zero and replaces the local analytics data.
    pub async fn refresh_analytics(&mut self) -> Result<Page<LinkAnalytics>, AppError> {
        let page = self.gateway.fetch_analytics_page(&self.uid, 0).await?;
        self.analytics_data = page.items.clone();
        debug!(count = page.items.len(), "analytics refreshed");
        Ok(page)
    }

    /// Fetches a further analytics page and appends unseen entries.
    pub async fn fetch_more_analytics(
        &mut self,
        page_no: u32,
    ) -> Result<Page<LinkAnalytics>, AppError> {
        let page = self.gateway.fetch_analytics_page(&self.uid, page_no).await?;
        for entry in &page.items {
            if !self.analytics_data.iter().any(|a| a.id == entry.id) {
                self.analytics_data.push(entry.clone());
            }
        }
        Ok(page)
    }

    /// Fetches the full analytics record for one link and upserts it into
    /// the local data, replacing any summary entry from the paged listing.
    pub async fn fetch_link_analytic(&mut self, key: &str) -> Result<LinkAnalytics, AppError> {
        let analytics = match self.gateway.fetch_analytics(key).await {
            Ok(a) => a,
            Err(e) => {
                warn!(key = %key, error = %e, "analytics fetch failed");
                return Err(e);
            }
        };
        match self.analytics_data.iter_mut().find(|a| a.id == analytics.id) {
            Some(slot) => *slot = analytics.clone(),
            None => self.analytics_data.push(analytics.clone()),
        }
        Ok(analytics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::MockLinksGateway;
    use chrono::Duration;
    use mockall::predicate::eq;

    fn link(key: &str) -> Link {
        let now = Utc::now();
        Link::new(
            format!("Title {key}"),
            now,
            format!("https://example.com/{key}"),
            key.to_string(),
            now + Duration::days(30),
            None,
        )
    }

    fn service_with(gateway: MockLinksGateway) -> LinksService<MockLinksGateway> {
        LinksService::new(Arc::new(gateway), "user-1")
    }

    fn seeded(gateway: MockLinksGateway, links: Vec<Link>) -> LinksService<MockLinksGateway> {
        let mut service = service_with(gateway);
        service.links = links;
        service
    }

    #[tokio::test]
    async fn test_create_rejects_bad_alias_before_network() {
        let mut gateway = MockLinksGateway::new();
        gateway.expect_create_link().times(0);
        let service = service_with(gateway);

        let draft = LinkDraft::new("My link", "https://example.com").with_alias("bad alias");
        let err = service.create_new_link(&draft).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_title_and_bad_url() {
        let mut gateway = MockLinksGateway::new();
        gateway.expect_create_link().times(0);
        let service = service_with(gateway);

        let blank = LinkDraft::new("   ", "https://example.com");
        assert!(service.create_new_link(&blank).await.is_err());

        let relative = LinkDraft::new("ok", "example.com/page");
        assert!(service.create_new_link(&relative).await.is_err());
    }

    #[tokio::test]
    async fn test_create_returns_canonical_link_without_local_mutation() {
        let mut gateway = MockLinksGateway::new();
        let canonical = link("abc1234");
        let echoed = canonical.clone();
        gateway
            .expect_create_link()
            .times(1)
            .returning(move |_| Ok(echoed.clone()));
        let mut service = service_with(gateway);

        let draft = LinkDraft::new("Title abc1234", "https://example.com/abc1234");
        let created = service.create_new_link(&draft).await.unwrap();
        assert_eq!(created, canonical);
        assert!(service.links().is_empty());

        assert!(service.append_link(created.clone()));
        assert!(!service.append_link(created));
        assert_eq!(service.links().len(), 1);
    }

    #[tokio::test]
    async fn test_update_replaces_entry_under_old_key() {
        let mut gateway = MockLinksGateway::new();
        gateway
            .expect_update_link()
            .with(eq("old1234"), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Ok(()));
        let mut service = seeded(gateway, vec![link("old1234"), link("other77")]);

        let mut renamed = link("new5678");
        renamed.title = "Renamed".to_string();
        service.update_link("old1234", &renamed).await.unwrap();

        assert!(service.link_for("old1234").is_none());
        assert_eq!(service.link_for("new5678").map(|l| l.title.as_str()), Some("Renamed"));
        assert!(service.link_for("other77").is_some());
    }

    #[tokio::test]
    async fn test_update_failure_leaves_cache_untouched() {
        let mut gateway = MockLinksGateway::new();
        gateway
            .expect_update_link()
            .returning(|_, _| Err(AppError::Transport("connection reset".to_string())));
        let original = link("old1234");
        let mut service = seeded(gateway, vec![original.clone()]);

        let err = service.update_link("old1234", &link("new5678")).await.unwrap_err();
        assert!(matches!(err, AppError::Transport(_)));
        assert_eq!(service.links().len(), 1);
        assert_eq!(service.links()[0].short_url, "old1234");
        assert_eq!(service.links()[0].title, original.title);
    }

    #[tokio::test]
    async fn test_delete_purges_links_and_analytics() {
        let mut gateway = MockLinksGateway::new();
        gateway.expect_delete_links().times(1).returning(|_| Ok(()));
        let mut service = seeded(gateway, vec![link("aaa1111"), link("bbb2222")]);
        service.analytics_data = vec![
            LinkAnalytics::zeroed("aaa1111"),
            LinkAnalytics::zeroed("bbb2222"),
        ];

        service.delete_links(&["aaa1111".to_string()]).await.unwrap();

        assert!(service.link_for("aaa1111").is_none());
        assert!(service.analytics_for("aaa1111").is_none());
        assert!(service.link_for("bbb2222").is_some());
        assert!(service.analytics_for("bbb2222").is_some());
    }

    #[tokio::test]
    async fn test_delete_failure_mutates_nothing() {
        let mut gateway = MockLinksGateway::new();
        gateway
            .expect_delete_links()
            .returning(|_| Err(AppError::Status { code: 500, message: "boom".to_string() }));
        let mut service = seeded(gateway, vec![link("aaa1111")]);
        service.analytics_data = vec![LinkAnalytics::zeroed("aaa1111")];

        assert!(service.delete_links(&["aaa1111".to_string()]).await.is_err());
        assert_eq!(service.links().len(), 1);
        assert_eq!(service.analytics_data().len(), 1);
    }

    #[tokio::test]
    async fn test_expire_sets_only_the_expiration_date() {
        let mut gateway = MockLinksGateway::new();
        gateway.expect_expire_links().times(1).returning(|_| Ok(()));
        let target = link("aaa1111");
        let before = target.clone();
        let mut service = seeded(gateway, vec![target, link("bbb2222")]);

        let called_at = Utc::now();
        service.expire_links(&["aaa1111".to_string()]).await.unwrap();

        let expired = service.link_for("aaa1111").unwrap();
        assert!(expired.is_expired());
        assert!(expired.expiration_date >= called_at - Duration::seconds(1));
        assert!(expired.expiration_date <= Utc::now());
        assert_eq!(expired.title, before.title);
        assert_eq!(expired.creation_date, before.creation_date);
        assert_eq!(expired.original_url, before.original_url);
        assert!(!service.link_for("bbb2222").unwrap().is_expired());
    }

    #[tokio::test]
    async fn test_refresh_replaces_and_fetch_more_appends_unseen() {
        let mut gateway = MockLinksGateway::new();
        gateway
            .expect_fetch_links()
            .with(eq("user-1"), eq(0))
            .times(1)
            .returning(|_, _| Ok(Page::new(0, 2, vec![link("aaa1111"), link("bbb2222")])));
        gateway
            .expect_fetch_links()
            .with(eq("user-1"), eq(1))
            .times(1)
            .returning(|_, _| Ok(Page::new(1, 2, vec![link("bbb2222"), link("ccc3333")])));
        let mut service = seeded(gateway, vec![link("stale99")]);

        let first = service.refresh_links().await.unwrap();
        assert!(first.has_more());
        assert_eq!(service.links().len(), 2);
        assert!(service.link_for("stale99").is_none());

        let second = service.fetch_more_links(1).await.unwrap();
        assert!(!second.has_more());
        let keys: Vec<&str> = service.links().iter().map(|l| l.short_url.as_str()).collect();
        assert_eq!(keys, vec!["aaa1111", "bbb2222", "ccc3333"]);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_current_links() {
        let mut gateway = MockLinksGateway::new();
        gateway
            .expect_fetch_links()
            .returning(|_, _| Err(AppError::Transport("timed out".to_string())));
        let mut service = seeded(gateway, vec![link("aaa1111")]);

        assert!(service.refresh_links().await.is_err());
        assert_eq!(service.links().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_link_analytic_upserts_by_id() {
        let mut gateway = MockLinksGateway::new();
        gateway.expect_fetch_analytics().times(2).returning(|key| {
            let mut a = LinkAnalytics::zeroed(key);
            a.total_per_year = 42;
            Ok(a)
        });
        let mut service = service_with(gateway);
        service.analytics_data = vec![LinkAnalytics::zeroed("aaa1111")];

        service.fetch_link_analytic("aaa1111").await.unwrap();
        assert_eq!(service.analytics_data().len(), 1);
        assert_eq!(service.analytics_for("aaa1111").unwrap().total_per_year, 42);

        service.fetch_link_analytic("bbb2222").await.unwrap();
        assert_eq!(service.analytics_data().len(), 2);
    }

    #[tokio::test]
    async fn test_analytics_pages_merge_by_id() {
        let mut gateway = MockLinksGateway::new();
        gateway
            .expect_fetch_analytics_page()
            .with(eq("user-1"), eq(0))
            .returning(|_, _| {
                Ok(Page::new(0, 2, vec![LinkAnalytics::zeroed("aaa1111")]))
            });
        gateway
            .expect_fetch_analytics_page()
            .with(eq("user-1"), eq(1))
            .returning(|_, _| {
                Ok(Page::new(
                    1,
                    2,
                    vec![LinkAnalytics::zeroed("aaa1111"), LinkAnalytics::zeroed("bbb2222")],
                ))
            });
        let mut service = service_with(gateway);

        service.refresh_analytics().await.unwrap();
        service.fetch_more_analytics(1).await.unwrap();
        let ids: Vec<&str> = service.analytics_data().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["aaa1111", "bbb2222"]);
    }
}
