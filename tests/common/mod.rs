//! Shared fixtures for integration tests: link/analytics builders and an
//! in-memory gateway that behaves like the links microservice.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::json;

use tinitron_client::domain::entities::{Link, LinkAnalytics, LinkDraft, Page};
use tinitron_client::domain::gateways::LinksGateway;
use tinitron_client::error::AppError;
use tinitron_client::utils::sample;

pub fn link_created_days_ago(key: &str, days_ago: i64) -> Link {
    let created = Utc::now() - Duration::days(days_ago);
    Link::new(
        format!("Link {key}"),
        created,
        format!("https://example.com/{key}"),
        key.to_string(),
        created + Duration::days(30),
        None,
    )
}

pub fn expired_link(key: &str, days_ago: i64) -> Link {
    let mut link = link_created_days_ago(key, days_ago);
    link.expiration_date = Utc::now() - Duration::days(1);
    link
}

/// In-memory stand-in for the links microservice.
///
/// Serves pages of the configured size, assigns aliases for drafts that
/// leave the short URL to the server, and can be switched into a failing
/// mode to exercise the error paths. Every call is counted so tests can
/// assert that validation failures never reach the gateway.
pub struct FakeLinksGateway {
    links: Mutex<Vec<Link>>,
    analytics: Mutex<Vec<LinkAnalytics>>,
    page_size: usize,
    failing: AtomicBool,
    calls: AtomicUsize,
    next_alias: AtomicUsize,
}

impl FakeLinksGateway {
    pub fn new(page_size: usize) -> Self {
        Self {
            links: Mutex::new(Vec::new()),
            analytics: Mutex::new(Vec::new()),
            page_size,
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            next_alias: AtomicUsize::new(1),
        }
    }

    pub fn seeded(page_size: usize, links: Vec<Link>) -> Self {
        let gateway = Self::new(page_size);
        {
            let mut analytics = gateway.analytics.lock().unwrap();
            *analytics = sample::analytics_for_links(&links);
        }
        *gateway.links.lock().unwrap() = links;
        gateway
    }

    /// All further calls fail with a 503 until switched back.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn server_links(&self) -> Vec<Link> {
        self.links.lock().unwrap().clone()
    }

    fn enter(&self) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Status {
                code: 503,
                message: "service unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn page_of<T: Clone>(&self, items: &[T], page: u32) -> Page<T> {
        let total_pages = items.len().div_ceil(self.page_size) as u32;
        let chunk = items
            .chunks(self.page_size)
            .nth(page as usize)
            .unwrap_or(&[])
            .to_vec();
        Page::new(page, total_pages, chunk)
    }
}

#[async_trait]
impl LinksGateway for FakeLinksGateway {
    async fn create_link(&self, draft: &LinkDraft) -> Result<Link, AppError> {
        self.enter()?;
        let mut links = self.links.lock().unwrap();

        let alias = if draft.has_custom_alias() {
            if links.iter().any(|l| l.short_url == draft.short_url) {
                return Err(AppError::Status {
                    code: 409,
                    message: "alias already taken".to_string(),
                });
            }
            draft.short_url.clone()
        } else {
            format!("srv{:04}", self.next_alias.fetch_add(1, Ordering::SeqCst))
        };

        let link = Link::new(
            draft.title.clone(),
            draft.creation_date,
            draft.original_url.clone(),
            alias,
            draft.expiration_date,
            draft.password.clone(),
        );
        links.push(link.clone());
        Ok(link)
    }

    async fn update_link(&self, key: &str, link: &Link) -> Result<(), AppError> {
        self.enter()?;
        let mut links = self.links.lock().unwrap();
        match links.iter_mut().find(|l| l.short_url == key) {
            Some(slot) => {
                *slot = link.clone();
                Ok(())
            }
            None => Err(AppError::not_found("no such link", json!({ "key": key }))),
        }
    }

    async fn delete_links(&self, keys: &[String]) -> Result<(), AppError> {
        self.enter()?;
        self.links
            .lock()
            .unwrap()
            .retain(|l| !keys.contains(&l.short_url));
        self.analytics.lock().unwrap().retain(|a| !keys.contains(&a.id));
        Ok(())
    }

    async fn expire_links(&self, keys: &[String]) -> Result<(), AppError> {
        self.enter()?;
        let now = Utc::now();
        for link in self.links.lock().unwrap().iter_mut() {
            if keys.contains(&link.short_url) {
                link.expiration_date = now;
            }
        }
        Ok(())
    }

    async fn fetch_links(&self, _uid: &str, page: u32) -> Result<Page<Link>, AppError> {
        self.enter()?;
        let links = self.links.lock().unwrap();
        Ok(self.page_of(&links, page))
    }

    async fn fetch_link(&self, key: &str) -> Result<Link, AppError> {
        self.enter()?;
        self.links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.short_url == key)
            .cloned()
            .ok_or_else(|| AppError::not_found("no such link", json!({ "key": key })))
    }

    async fn fetch_analytics_page(
        &self,
        _uid: &str,
        page: u32,
    ) -> Result<Page<LinkAnalytics>, AppError> {
        self.enter()?;
        // Listings only carry monthly counters, like the real service.
        let summaries: Vec<LinkAnalytics> = self
            .analytics
            .lock()
            .unwrap()
            .iter()
            .map(|full| {
                let mut summary = LinkAnalytics::zeroed(full.id.as_str());
                summary.per_month_clicks = full.per_month_clicks.clone();
                summary
            })
            .collect();
        Ok(self.page_of(&summaries, page))
    }

    async fn fetch_analytics(&self, key: &str) -> Result<LinkAnalytics, AppError> {
        self.enter()?;
        self.analytics
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == key)
            .cloned()
            .ok_or_else(|| AppError::not_found("no analytics", json!({ "key": key })))
    }
}
