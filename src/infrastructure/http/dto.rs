//! Wire DTOs for the links and analytics endpoints.
//!
//! Every response field decodes through `Option` and is promoted to the
//! domain entity with a typed [`AppError::Decode`] when a required field is
//! missing, so malformed server payloads surface as errors instead of
//! panics. Request bodies keep the service's JSON field casing
//! (`originalURL`, `shortURL`, `linkDTOList`).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    BROWSERS, Link, LinkAnalytics, LinkDraft, MONTHS, OS_FAMILIES, Page, complete_counts,
};
use crate::error::{AppError, missing_field};

/// Wire format for timestamps: `yyyy-MM-dd'T'HH:mm:ss.SSSZ` with a numeric
/// offset, e.g. `2026-08-29T10:30:00.000+0000`.
const WIRE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Formats a timestamp the way the service expects it.
pub fn format_wire_date(date: &DateTime<Utc>) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}

/// Parses a wire timestamp, tolerating plain RFC 3339 as a fallback.
pub fn parse_wire_date(raw: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_str(raw, WIRE_DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::decode(format!("unparseable date '{raw}': {e}")))
}

// ── Requests ────────────────────────────────────────────────────────────────

/// Body of `POST /links`.
#[derive(Debug, Serialize)]
pub struct CreateLinkRequest {
    pub title: String,
    #[serde(rename = "originalURL")]
    pub original_url: String,
    #[serde(rename = "creationDate")]
    pub creation_date: String,
    #[serde(rename = "expirationDate")]
    pub expiration_date: String,
    #[serde(rename = "shortURL", skip_serializing_if = "Option::is_none")]
    pub short_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl CreateLinkRequest {
    pub fn from_draft(draft: &LinkDraft) -> Self {
        Self {
            title: draft.title.clone(),
            original_url: draft.original_url.clone(),
            creation_date: format_wire_date(&draft.creation_date),
            expiration_date: format_wire_date(&draft.expiration_date),
            short_url: draft.has_custom_alias().then(|| draft.short_url.clone()),
            password: draft.password.clone().filter(|p| !p.is_empty()),
        }
    }
}

/// Body of `PUT /links/{shortURL}`. Password travels only when set.
#[derive(Debug, Serialize)]
pub struct UpdateLinkRequest {
    pub title: String,
    #[serde(rename = "shortURL")]
    pub short_url: String,
    #[serde(rename = "expirationDate")]
    pub expiration_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UpdateLinkRequest {
    pub fn from_link(link: &Link) -> Self {
        Self {
            title: link.title.clone(),
            short_url: link.short_url.clone(),
            expiration_date: format_wire_date(&link.expiration_date),
            password: link.password.clone(),
        }
    }
}

/// Body of `DELETE /links/delete` and `POST /links/expire`.
#[derive(Debug, Serialize)]
pub struct LinkKeysRequest {
    pub links: Vec<String>,
}

// ── Responses ───────────────────────────────────────────────────────────────

/// One link as the server serializes it.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkDto {
    pub title: Option<String>,
    #[serde(rename = "creationDate")]
    pub creation_date: Option<String>,
    #[serde(rename = "originalURL")]
    pub original_url: Option<String>,
    #[serde(rename = "shortURL")]
    pub short_url: Option<String>,
    #[serde(rename = "expirationDate")]
    pub expiration_date: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "maxAllowedClicks")]
    pub max_allowed_clicks: Option<i64>,
}

impl LinkDto {
    /// Promotes the DTO to a [`Link`].
    ///
    /// A null or empty title falls back to the original URL. The server
    /// encodes "no password" either as a JSON null or the literal string
    /// `"null"`; both decode to `None`.
    pub fn into_link(self) -> Result<Link, AppError> {
        let original_url = self.original_url.ok_or_else(|| missing_field("originalURL"))?;
        let short_url = self.short_url.ok_or_else(|| missing_field("shortURL"))?;
        let creation_raw = self.creation_date.ok_or_else(|| missing_field("creationDate"))?;
        let expiration_raw = self
            .expiration_date
            .ok_or_else(|| missing_field("expirationDate"))?;

        let title = match self.title {
            Some(t) if !t.is_empty() => t,
            _ => original_url.clone(),
        };

        let password = self
            .password
            .filter(|p| !p.is_empty() && p != "null");

        let mut link = Link::new(
            title,
            parse_wire_date(&creation_raw)?,
            original_url,
            short_url,
            parse_wire_date(&expiration_raw)?,
            password,
        );
        link.max_allowed_clicks = self.max_allowed_clicks;
        Ok(link)
    }
}

/// Response of `GET /links/users/{uid}?pageNo=N`.
#[derive(Debug, Deserialize)]
pub struct PagedLinksDto {
    #[serde(rename = "pageNumber")]
    pub page_number: Option<u32>,
    #[serde(rename = "totalPages")]
    pub total_pages: Option<u32>,
    #[serde(rename = "linkDTOList", default)]
    pub links: Option<Vec<LinkDto>>,
}

impl PagedLinksDto {
    pub fn into_page(self) -> Result<Page<Link>, AppError> {
        let page_number = self.page_number.ok_or_else(|| missing_field("pageNumber"))?;
        let total_pages = self.total_pages.ok_or_else(|| missing_field("totalPages"))?;

        let items = self
            .links
            .unwrap_or_default()
            .into_iter()
            .map(LinkDto::into_link)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(page_number, total_pages, items))
    }
}

/// One item of the paginated analytics listing: key plus monthly counters.
#[derive(Debug, Deserialize)]
pub struct AnalyticsSummaryDto {
    #[serde(rename = "shortURL")]
    pub short_url: Option<String>,
    #[serde(rename = "perMonth", default)]
    pub per_month: Option<BTreeMap<String, i64>>,
}

impl AnalyticsSummaryDto {
    /// Builds placeholder analytics: monthly counters from the payload,
    /// every highlight zero-filled until a full single-link fetch.
    pub fn into_analytics(self) -> Result<LinkAnalytics, AppError> {
        let id = self.short_url.ok_or_else(|| missing_field("shortURL"))?;

        let mut analytics = LinkAnalytics::zeroed(id);
        if let Some(per_month) = self.per_month {
            analytics.per_month_clicks = complete_counts(&MONTHS, &per_month);
        }
        Ok(analytics)
    }
}

/// Response of `GET /analytics/users/{uid}?pageNo=N`.
#[derive(Debug, Deserialize)]
pub struct PagedAnalyticsDto {
    #[serde(rename = "pageNumber")]
    pub page_number: Option<u32>,
    #[serde(rename = "totalPages")]
    pub total_pages: Option<u32>,
    #[serde(rename = "analyticsDTOList", default)]
    pub analytics: Option<Vec<AnalyticsSummaryDto>>,
}

impl PagedAnalyticsDto {
    pub fn into_page(self) -> Result<Page<LinkAnalytics>, AppError> {
        let page_number = self.page_number.ok_or_else(|| missing_field("pageNumber"))?;
        let total_pages = self.total_pages.ok_or_else(|| missing_field("totalPages"))?;

        let items = self
            .analytics
            .unwrap_or_default()
            .into_iter()
            .map(AnalyticsSummaryDto::into_analytics)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(page_number, total_pages, items))
    }
}

/// Response of `GET /analytics/{shortURL}`.
///
/// Counter maps and highlights default to zero when the server omits them;
/// `lastAccessDate` stays `None` for links that were never opened.
#[derive(Debug, Deserialize)]
pub struct AnalyticsDto {
    pub title: Option<String>,
    #[serde(rename = "lastAccessDate")]
    pub last_access_date: Option<String>,
    #[serde(rename = "dailyAverage")]
    pub daily_average: Option<f64>,
    pub max: Option<i64>,
    pub min: Option<i64>,
    #[serde(rename = "totalPerYear")]
    pub total_per_year: Option<i64>,
    #[serde(rename = "perMonth", default)]
    pub per_month: Option<BTreeMap<String, i64>>,
    #[serde(rename = "byBrowsers", default)]
    pub by_browsers: Option<BTreeMap<String, i64>>,
    #[serde(rename = "byOs", default)]
    pub by_os: Option<BTreeMap<String, i64>>,
}

impl AnalyticsDto {
    /// Promotes the DTO, keyed by the short URL the request was made for.
    pub fn into_analytics(self, id: impl Into<String>) -> Result<LinkAnalytics, AppError> {
        let last_access_date = match self.last_access_date {
            Some(raw) if !raw.is_empty() && raw != "null" => Some(parse_wire_date(&raw)?),
            _ => None,
        };

        let mut analytics = LinkAnalytics::zeroed(id);
        analytics.title = self.title.filter(|t| !t.is_empty());
        analytics.last_access_date = last_access_date;
        analytics.daily_average = self.daily_average.unwrap_or(0.0);
        analytics.max = self.max.unwrap_or(0);
        analytics.min = self.min.unwrap_or(0);
        analytics.total_per_year = self.total_per_year.unwrap_or(0);
        if let Some(per_month) = self.per_month {
            analytics.per_month_clicks = complete_counts(&MONTHS, &per_month);
        }
        if let Some(by_browsers) = self.by_browsers {
            analytics.browser_counts = complete_counts(&BROWSERS, &by_browsers);
        }
        if let Some(by_os) = self.by_os {
            analytics.os_counts = complete_counts(&OS_FAMILIES, &by_os);
        }
        Ok(analytics)
    }
}
