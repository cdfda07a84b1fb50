//! Grouping of links into displayable sections: pinned links first, the rest
//! bucketed by creation day, with an optional expired-links filter on top.
//!
//! The struct keeps the unfiltered grouping as its source of truth and
//! derives the filtered view from it, so toggling the filter off always
//! restores exactly what was shown before. Concatenating the visible
//! sections always yields the same multiset of links that went in.

use chrono::NaiveDate;

use crate::domain::entities::Link;
use crate::domain::gateways::PreferenceStore;

pub const PINNED_TITLE: &str = "Pinned Links";
pub const EXPIRED_TITLE: &str = "Expired Links";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Pinned,
    Day(NaiveDate),
}

#[derive(Debug, Clone, PartialEq)]
struct Section {
    kind: SectionKind,
    links: Vec<Link>,
}

/// A materialized, display-ready section.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkSection {
    pub title: String,
    pub links: Vec<Link>,
}

/// Section state for the links list.
///
/// Section 0 is always the pinned section (section 1 while the expired
/// filter is active, behind the synthetic expired section). Date sections
/// are ordered newest day first.
#[derive(Debug)]
pub struct SectionedLinks {
    base: Vec<Section>,
    filter_expired: bool,
}

impl Default for SectionedLinks {
    fn default() -> Self {
        Self::new()
    }
}

fn day_title(day: NaiveDate) -> String {
    day.format("%b %-d, %Y").to_string()
}

impl SectionedLinks {
    pub fn new() -> Self {
        Self {
            base: vec![Section {
                kind: SectionKind::Pinned,
                links: Vec::new(),
            }],
            filter_expired: false,
        }
    }

    /// Rebuilds the grouping from a fresh link list.
    ///
    /// Links whose key appears in `pinned_keys` land in the pinned section
    /// (in list order); everything else is grouped by creation day, newest
    /// day first. The expired-filter flag survives a rebuild.
    pub fn rebuild(&mut self, links: &[Link], pinned_keys: &[String]) {
        let mut pinned = Vec::new();
        let mut days: Vec<(NaiveDate, Vec<Link>)> = Vec::new();

        for link in links {
            if pinned_keys.contains(&link.short_url) {
                pinned.push(link.clone());
                continue;
            }
            let day = link.creation_date.date_naive();
            match days.iter_mut().find(|(d, _)| *d == day) {
                Some((_, group)) => group.push(link.clone()),
                None => days.push((day, vec![link.clone()])),
            }
        }
        days.sort_by(|(a, _), (b, _)| b.cmp(a));

        self.base = Vec::with_capacity(days.len() + 1);
        self.base.push(Section {
            kind: SectionKind::Pinned,
            links: pinned,
        });
        self.base.extend(days.into_iter().map(|(day, links)| Section {
            kind: SectionKind::Day(day),
            links,
        }));
    }

    /// Moves the link with the given key into the pinned section.
    /// Returns false when the key is unknown or already pinned.
    pub fn pin(&mut self, key: &str) -> bool {
        let mut moved = None;
        for section in self.base.iter_mut().skip(1) {
            if let Some(pos) = section.links.iter().position(|l| l.short_url == key) {
                moved = Some(section.links.remove(pos));
                break;
            }
        }
        self.base.retain(|s| s.kind == SectionKind::Pinned || !s.links.is_empty());

        match moved {
            Some(link) => {
                self.base[0].links.push(link);
                true
            }
            None => false,
        }
    }

    /// Moves a pinned link back into the date section matching its creation
    /// day, or a new trailing section when no such day is shown.
    pub fn unpin(&mut self, key: &str) -> bool {
        let Some(pos) = self.base[0].links.iter().position(|l| l.short_url == key) else {
            return false;
        };
        let link = self.base[0].links.remove(pos);
        let day = link.creation_date.date_naive();

        match self
            .base
            .iter_mut()
            .find(|s| s.kind == SectionKind::Day(day))
        {
            Some(section) => section.links.push(link),
            None => self.base.push(Section {
                kind: SectionKind::Day(day),
                links: vec![link],
            }),
        }
        true
    }

    /// Persists the current pinned keys for `uid`.
    pub fn save_pins(&self, uid: &str, store: &dyn PreferenceStore) {
        store.set_pinned_links(uid, &self.pinned_keys());
    }

    pub fn set_expired_filter(&mut self, on: bool) {
        self.filter_expired = on;
    }

    pub fn expired_filter(&self) -> bool {
        self.filter_expired
    }

    /// Index of the pinned section in the visible sections.
    pub fn pinned_index(&self) -> usize {
        usize::from(self.filter_expired)
    }

    pub fn pinned_keys(&self) -> Vec<String> {
        self.base[0].links.iter().map(|l| l.short_url.clone()).collect()
    }

    /// The visible sections, with the expired filter applied when active.
    pub fn sections(&self) -> Vec<LinkSection> {
        if !self.filter_expired {
            return self
                .base
                .iter()
                .map(|s| LinkSection {
                    title: self.title_for(s.kind),
                    links: s.links.clone(),
                })
                .collect();
        }

        let mut expired = Vec::new();
        let mut visible = Vec::with_capacity(self.base.len() + 1);
        for section in &self.base {
            let (gone, kept): (Vec<Link>, Vec<Link>) =
                section.links.iter().cloned().partition(Link::is_expired);
            expired.extend(gone);
            if section.kind == SectionKind::Pinned || !kept.is_empty() {
                visible.push(LinkSection {
                    title: self.title_for(section.kind),
                    links: kept,
                });
            }
        }
        visible.insert(
            0,
            LinkSection {
                title: EXPIRED_TITLE.to_string(),
                links: expired,
            },
        );
        visible
    }

    pub fn section_title(&self, index: usize) -> Option<String> {
        self.sections().get(index).map(|s| s.title.clone())
    }

    /// Every link currently held, regardless of the filter.
    pub fn flatten(&self) -> Vec<Link> {
        self.base.iter().flat_map(|s| s.links.iter().cloned()).collect()
    }

    fn title_for(&self, kind: SectionKind) -> String {
        match kind {
            SectionKind::Pinned => PINNED_TITLE.to_string(),
            SectionKind::Day(day) => day_title(day),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn link_at(key: &str, created: chrono::DateTime<Utc>, expired: bool) -> Link {
        let expiration = if expired {
            created - Duration::days(1)
        } else {
            Utc::now() + Duration::days(30)
        };
        Link::new(
            key.to_uppercase(),
            created,
            format!("https://example.com/{key}"),
            key.to_string(),
            expiration,
            None,
        )
    }

    fn sample_board() -> (SectionedLinks, Vec<Link>) {
        let d1 = Utc.with_ymd_and_hms(2026, 8, 20, 9, 0, 0).single().unwrap();
        let d2 = Utc.with_ymd_and_hms(2026, 8, 18, 14, 0, 0).single().unwrap();
        let links = vec![
            link_at("aaa1", d1, false),
            link_at("bbb2", d1, true),
            link_at("ccc3", d2, false),
            link_at("ddd4", d2, false),
        ];
        let mut board = SectionedLinks::new();
        board.rebuild(&links, &["ccc3".to_string()]);
        (board, links)
    }

    fn keys(board: &SectionedLinks) -> Vec<String> {
        board.flatten().into_iter().map(|l| l.short_url).collect()
    }

    #[test]
    fn test_rebuild_groups_by_day_newest_first() {
        let (board, _) = sample_board();
        let sections = board.sections();

        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].title, PINNED_TITLE);
        assert_eq!(sections[0].links[0].short_url, "ccc3");
        assert_eq!(sections[1].title, "Aug 20, 2026");
        assert_eq!(sections[2].title, "Aug 18, 2026");
        assert_eq!(sections[2].links.len(), 1);
    }

    #[test]
    fn test_sections_partition_the_links() {
        let (board, links) = sample_board();
        let mut shown: Vec<String> = board
            .sections()
            .iter()
            .flat_map(|s| s.links.iter().map(|l| l.short_url.clone()))
            .collect();
        let mut expected: Vec<String> = links.iter().map(|l| l.short_url.clone()).collect();
        shown.sort();
        expected.sort();
        assert_eq!(shown, expected);
    }

    #[test]
    fn test_pin_then_unpin_restores_day_group() {
        let (mut board, _) = sample_board();

        assert!(board.pin("aaa1"));
        assert_eq!(board.pinned_keys(), vec!["ccc3", "aaa1"]);

        assert!(board.unpin("aaa1"));
        let sections = board.sections();
        assert!(sections[1].links.iter().any(|l| l.short_url == "aaa1"));
        assert_eq!(board.pinned_keys(), vec!["ccc3"]);
    }

    #[test]
    fn test_pin_drops_emptied_day_section() {
        let (mut board, _) = sample_board();
        assert!(board.pin("ddd4"));
        let titles: Vec<String> = board.sections().iter().map(|s| s.title.clone()).collect();
        assert_eq!(titles, vec![PINNED_TITLE, "Aug 20, 2026"]);
    }

    #[test]
    fn test_unpin_without_matching_day_appends_trailing_section() {
        let created = Utc.with_ymd_and_hms(2026, 7, 1, 8, 0, 0).single().unwrap();
        let lone = link_at("zzz9", created, false);
        let mut board = SectionedLinks::new();
        board.rebuild(std::slice::from_ref(&lone), &["zzz9".to_string()]);

        assert!(board.unpin("zzz9"));
        let sections = board.sections();
        assert_eq!(sections.last().map(|s| s.title.clone()), Some("Jul 1, 2026".to_string()));
    }

    #[test]
    fn test_expired_filter_is_lossless_and_reversible() {
        let (mut board, _) = sample_board();
        let before = board.sections();

        board.set_expired_filter(true);
        let filtered = board.sections();
        assert_eq!(filtered[0].title, EXPIRED_TITLE);
        assert_eq!(filtered[0].links[0].short_url, "bbb2");
        assert_eq!(board.pinned_index(), 1);
        assert_eq!(filtered[1].title, PINNED_TITLE);
        assert!(filtered
            .iter()
            .skip(1)
            .all(|s| s.links.iter().all(|l| !l.is_expired())));

        // Still the same multiset of links.
        assert_eq!(keys(&board).len(), 4);

        board.set_expired_filter(false);
        assert_eq!(board.sections(), before);
        assert_eq!(board.pinned_index(), 0);
    }

    #[test]
    fn test_pin_while_filtered_survives_toggle() {
        let (mut board, _) = sample_board();
        board.set_expired_filter(true);
        assert!(board.pin("aaa1"));
        board.set_expired_filter(false);
        assert!(board.pinned_keys().contains(&"aaa1".to_string()));
    }

    #[test]
    fn test_save_pins_writes_through_store() {
        use crate::infrastructure::preferences::MemoryStore;

        let (board, _) = sample_board();
        let store = MemoryStore::new();
        board.save_pins("user-1", &store);
        assert_eq!(store.pinned_links("user-1"), vec!["ccc3"]);
    }
}
