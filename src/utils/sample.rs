//! Random sample data for the `demo` command and test fixtures.

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use rand::distr::Alphanumeric;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::domain::entities::{Link, LinkAnalytics, BROWSERS, MONTHS, OS_FAMILIES};

const CONSONANTS: &[char] = &[
    'b', 'c', 'd', 'f', 'g', 'h', 'k', 'l', 'm', 'n', 'p', 'r', 's', 't', 'v', 'z',
];
const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

/// Pronounceable lowercase word built from alternating consonant/vowel pairs.
pub fn random_word(syllables: usize) -> String {
    let mut rng = rand::rng();
    let mut word = String::with_capacity(syllables * 2);
    for _ in 0..syllables {
        if let Some(c) = CONSONANTS.choose(&mut rng) {
            word.push(*c);
        }
        if let Some(v) = VOWELS.choose(&mut rng) {
            word.push(*v);
        }
    }
    word
}

/// Random alphanumeric string, used for server-style short aliases.
pub fn random_alias(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generates `count` plausible links: created within the past two weeks,
/// roughly one in five already expired.
pub fn random_links(count: usize) -> Vec<Link> {
    let mut rng = rand::rng();
    let now = Utc::now();
    (0..count)
        .map(|_| {
            let created = now
                - Duration::days(rng.random_range(0..14))
                - Duration::minutes(rng.random_range(0..24 * 60));
            let expiration = if rng.random_range(0..5) == 0 {
                created - Duration::days(5)
            } else {
                created + Duration::days(30)
            };
            let word = random_word(rng.random_range(2..4));
            Link::new(
                word.clone(),
                created,
                format!("https://example.com/{word}"),
                random_alias(7),
                expiration,
                None,
            )
        })
        .collect()
}

/// Random analytics for one link; `total_per_year` is the sum of the
/// per-month counters so the generated data is internally consistent.
pub fn random_analytics(id: &str) -> LinkAnalytics {
    let mut rng = rand::rng();

    let per_month: BTreeMap<String, i64> = MONTHS
        .iter()
        .map(|m| (m.to_string(), rng.random_range(0..=100)))
        .collect();
    let total: i64 = per_month.values().sum();
    let max = per_month.values().copied().max().unwrap_or(0);
    let min = per_month.values().copied().min().unwrap_or(0);

    let mut analytics = LinkAnalytics::zeroed(id);
    analytics.last_access_date = Some(Utc::now() - Duration::hours(rng.random_range(1..72)));
    analytics.daily_average = total as f64 / 365.0;
    analytics.max = max;
    analytics.min = min;
    analytics.total_per_year = total;
    analytics.per_month_clicks = per_month;
    analytics.browser_counts = BROWSERS
        .iter()
        .map(|b| (b.to_string(), rng.random_range(0..=100)))
        .collect();
    analytics.os_counts = OS_FAMILIES
        .iter()
        .map(|o| (o.to_string(), rng.random_range(0..=100)))
        .collect();
    analytics
}

/// One analytics record per link, titled after the link.
pub fn analytics_for_links(links: &[Link]) -> Vec<LinkAnalytics> {
    links
        .iter()
        .map(|link| {
            let mut analytics = random_analytics(&link.short_url);
            analytics.title = Some(link.title.clone());
            analytics
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_word_alternates_letters() {
        let word = random_word(3);
        assert_eq!(word.len(), 6);
        assert!(word.chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_random_links_have_thirty_day_or_expired_ttl() {
        for link in random_links(50) {
            let ttl = link.expiration_date - link.creation_date;
            assert!(ttl == Duration::days(30) || ttl == Duration::days(-5));
            assert_eq!(link.short_url.len(), 7);
        }
    }

    #[test]
    fn test_total_per_year_matches_month_sum() {
        let analytics = random_analytics("abc1234");
        let sum: i64 = analytics.per_month_clicks.values().sum();
        assert_eq!(analytics.total_per_year, sum);
        assert_eq!(analytics.per_month_clicks.len(), MONTHS.len());
        assert_eq!(analytics.browser_counts.len(), BROWSERS.len());
        assert_eq!(analytics.os_counts.len(), OS_FAMILIES.len());
    }

    #[test]
    fn test_analytics_for_links_join_on_short_url() {
        let links = random_links(5);
        let analytics = analytics_for_links(&links);
        assert_eq!(analytics.len(), links.len());
        for (link, entry) in links.iter().zip(&analytics) {
            assert_eq!(entry.id, link.short_url);
            assert_eq!(entry.title.as_deref(), Some(link.title.as_str()));
        }
    }
}
