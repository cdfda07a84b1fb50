//! Link entity representing a shortened URL and its lifecycle metadata.

use chrono::{DateTime, Duration, Utc};

/// Number of days a link stays alive when no expiration date is chosen.
pub const DEFAULT_TTL_DAYS: i64 = 30;

/// A shortened URL with its lifecycle metadata.
///
/// The `short_url` field is the entity identity: two links are equal iff
/// their short URLs match, regardless of every other field. The server owns
/// short URL assignment unless the creator supplied a custom alias.
#[derive(Debug, Clone)]
pub struct Link {
    pub title: String,
    pub creation_date: DateTime<Utc>,
    pub original_url: String,
    pub short_url: String,
    pub expiration_date: DateTime<Utc>,
    pub password: Option<String>,
    pub max_allowed_clicks: Option<i64>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        title: String,
        creation_date: DateTime<Utc>,
        original_url: String,
        short_url: String,
        expiration_date: DateTime<Utc>,
        password: Option<String>,
    ) -> Self {
        Self {
            title,
            creation_date,
            original_url,
            short_url,
            expiration_date,
            password,
            max_allowed_clicks: None,
        }
    }

    /// Returns true if the link's expiration date is at or before now.
    pub fn is_expired(&self) -> bool {
        self.expiration_date <= Utc::now()
    }

    /// Signed whole-day distance from now to the expiration date.
    ///
    /// Negative once the link is past its expiration.
    pub fn days_until_expiration(&self) -> i64 {
        (self.expiration_date - Utc::now()).num_days()
    }

    /// True when both links fall on the same creation calendar day (UTC).
    pub fn shares_creation_day(&self, other: &Link) -> bool {
        self.creation_date.date_naive() == other.creation_date.date_naive()
    }
}

impl PartialEq for Link {
    fn eq(&self, other: &Self) -> bool {
        self.short_url == other.short_url
    }
}

impl Eq for Link {}

/// Input data for creating a new link.
///
/// `short_url` empty means "let the server choose"; `password` empty or absent
/// means "no password". The server answers with the canonical [`Link`].
#[derive(Debug, Clone)]
pub struct LinkDraft {
    pub title: String,
    pub creation_date: DateTime<Utc>,
    pub original_url: String,
    pub short_url: String,
    pub expiration_date: DateTime<Utc>,
    pub password: Option<String>,
}

impl LinkDraft {
    /// Creates a draft with the default expiration of now + 30 days.
    pub fn new(title: impl Into<String>, original_url: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            title: title.into(),
            creation_date: now,
            original_url: original_url.into(),
            short_url: String::new(),
            expiration_date: now + Duration::days(DEFAULT_TTL_DAYS),
            password: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.short_url = alias.into();
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_expiration(mut self, expiration_date: DateTime<Utc>) -> Self {
        self.expiration_date = expiration_date;
        self
    }

    /// Whether the creator picked their own alias instead of deferring to
    /// the server.
    pub fn has_custom_alias(&self) -> bool {
        !self.short_url.is_empty()
    }
}
