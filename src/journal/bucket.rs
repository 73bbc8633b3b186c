use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::trace;

use super::{entities::LocalizedEntry, format::format_entry};

/// Journal page of a single local day. Entries keep the order in which runs were discovered, which
/// follows the input ordering (activity first, time second) rather than the time of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalPage {
    pub date: NaiveDate,
    pub entries: Vec<String>,
}

impl JournalPage {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            entries: vec![],
        }
    }
}

/// Sorts localized entries into day pages. Pages are created the first time their day is seen.
#[derive(Debug, Default)]
pub struct JournalBucketer {
    pages: BTreeMap<NaiveDate, JournalPage>,
}

impl JournalBucketer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: &LocalizedEntry) {
        let line = format_entry(&entry.category, &entry.class, &entry.duration_text);
        trace!("{}: {line}", entry.local_day);
        self.pages
            .entry(entry.local_day)
            .or_insert_with(|| JournalPage::new(entry.local_day))
            .entries
            .push(line);
    }

    pub fn page(&self, date: NaiveDate) -> Option<&JournalPage> {
        self.pages.get(&date)
    }

    /// Pages ordered by date.
    pub fn into_pages(self) -> Vec<JournalPage> {
        self.pages.into_values().collect()
    }
}

#[cfg(test)]
mod bucket_tests {
    use chrono::{DateTime, NaiveDate};

    use super::JournalBucketer;
    use crate::journal::entities::LocalizedEntry;

    fn entry(category: &str, class: &str, instant: &str, text: &str) -> LocalizedEntry {
        let local_instant = DateTime::parse_from_rfc3339(instant).unwrap();
        LocalizedEntry {
            category: category.into(),
            class: class.into(),
            local_day: local_instant.date_naive(),
            local_instant,
            duration_text: text.into(),
        }
    }

    #[test]
    fn test_groups_by_day_in_discovery_order() {
        let mut bucketer = JournalBucketer::new();
        bucketer.append(&entry("Work", "Coding", "2024-01-02T15:00:00+02:00", "1 hour"));
        bucketer.append(&entry("Work", "Coding", "2024-01-01T09:00:00+02:00", "5 minutes"));
        bucketer.append(&entry("Leisure", "Games", "2024-01-02T08:00:00+02:00", "2 hours"));

        let first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let second = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        assert_eq!(
            bucketer.page(second).unwrap().entries,
            vec![
                "[[Work]] [[Coding]] for 1 hour".to_string(),
                "[[Leisure]] [[Games]] for 2 hours".to_string(),
            ]
        );

        let pages = bucketer.into_pages();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].date, first);
        assert_eq!(pages[0].entries, vec!["[[Work]] [[Coding]] for 5 minutes"]);
        assert_eq!(pages[1].date, second);
    }

    #[test]
    fn test_empty() {
        let bucketer = JournalBucketer::new();
        assert!(bucketer.into_pages().is_empty());
    }
}
