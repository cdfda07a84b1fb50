//! Per-link click analytics aggregated by month, browser and OS.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

/// Fixed key set for monthly click counters.
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Fixed key set for browser click counters.
pub const BROWSERS: [&str; 6] = ["ie", "firefox", "chrome", "opera", "safari", "others"];

/// Fixed key set for operating system click counters.
pub const OS_FAMILIES: [&str; 6] = ["windows", "macOs", "linux", "android", "ios", "others"];

/// Click statistics for one link.
///
/// `id` equals the owning link's short URL. It is a weak back-reference used
/// for joins, not ownership: nothing here keeps the counters in sync when the
/// link itself changes.
///
/// All three counter maps always carry their full fixed key set; missing keys
/// in server payloads are zero-filled at decode time. `total_per_year` is
/// advisory: locally generated data computes it from the monthly counters,
/// server-provided values are taken as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkAnalytics {
    pub id: String,
    pub title: Option<String>,
    pub last_access_date: Option<DateTime<Utc>>,
    pub daily_average: f64,
    pub max: i64,
    pub min: i64,
    pub total_per_year: i64,
    pub per_month_clicks: BTreeMap<String, i64>,
    pub browser_counts: BTreeMap<String, i64>,
    pub os_counts: BTreeMap<String, i64>,
}

impl LinkAnalytics {
    /// Analytics with every highlight and counter zeroed.
    ///
    /// Paginated listings only carry monthly counters, so the remaining
    /// fields start from this placeholder until a full fetch fills them in.
    pub fn zeroed(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            last_access_date: None,
            daily_average: 0.0,
            max: 0,
            min: 0,
            total_per_year: 0,
            per_month_clicks: zero_counts(&MONTHS),
            browser_counts: zero_counts(&BROWSERS),
            os_counts: zero_counts(&OS_FAMILIES),
        }
    }

    /// Sum of the twelve monthly counters.
    pub fn month_total(&self) -> i64 {
        self.per_month_clicks.values().sum()
    }

    /// Clicks recorded for a single month, zero for unknown names.
    pub fn clicks_in(&self, month: &str) -> i64 {
        self.per_month_clicks.get(month).copied().unwrap_or(0)
    }
}

/// Builds a counter map with every key from `keys` set to zero.
pub fn zero_counts(keys: &[&str]) -> BTreeMap<String, i64> {
    keys.iter().map(|k| (k.to_string(), 0)).collect()
}

/// Overlays `provided` onto the fixed key set, zero-filling missing keys.
///
/// Keys outside the fixed set are dropped so the map shape stays stable for
/// consumers that render all slots.
pub fn complete_counts(keys: &[&str], provided: &BTreeMap<String, i64>) -> BTreeMap<String, i64> {
    keys.iter()
        .map(|k| (k.to_string(), provided.get(*k).copied().unwrap_or(0)))
        .collect()
}
