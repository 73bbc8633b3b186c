//! Sources of raw activity records.
//!
//! A source hands out records sorted by category, class and timestamp, with every
//! (category, class, timestamp) key appearing only once. [aggregate_records] can be used to bring
//! arbitrary records into that shape.

pub mod record_storage;

use std::{collections::BTreeMap, sync::Arc};

use anyhow::Result;
use chrono::{DateTime, FixedOffset};

use crate::journal::entities::RawRecord;

/// Interface for anything that can feed records into consolidation.
#[cfg_attr(test, mockall::automock)]
pub trait RecordSource {
    /// Returns at most `max` of the next records, or `None` once the source is exhausted.
    fn next_chunk(&mut self, max: usize) -> Result<Option<Vec<RawRecord>>>;
}

/// Sums durations of records sharing category, class and timestamp and sorts the result.
/// Timestamps are compared as instants, the offset of the first record with a given key is kept.
pub fn aggregate_records(records: impl IntoIterator<Item = RawRecord>) -> Vec<RawRecord> {
    let mut aggregated = BTreeMap::<(Arc<str>, Arc<str>, DateTime<FixedOffset>), u64>::new();
    for RawRecord {
        category,
        class,
        timestamp,
        duration,
    } in records
    {
        let sum = aggregated.entry((category, class, timestamp)).or_default();
        *sum = sum.saturating_add(duration);
    }

    aggregated
        .into_iter()
        .map(|((category, class, timestamp), duration)| RawRecord {
            category,
            class,
            timestamp,
            duration,
        })
        .collect()
}

/// Serves records that are already in memory.
#[derive(Debug)]
pub struct VecSource {
    records: std::vec::IntoIter<RawRecord>,
}

impl VecSource {
    /// Aggregates and sorts `records`, so any order is accepted.
    pub fn new(records: impl IntoIterator<Item = RawRecord>) -> Self {
        Self {
            records: aggregate_records(records).into_iter(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.records.len()
    }
}

impl RecordSource for VecSource {
    fn next_chunk(&mut self, max: usize) -> Result<Option<Vec<RawRecord>>> {
        let chunk = self.records.by_ref().take(max.max(1)).collect::<Vec<_>>();
        Ok((!chunk.is_empty()).then_some(chunk))
    }
}

#[cfg(test)]
mod source_tests {
    use anyhow::Result;
    use chrono::{DateTime, FixedOffset};

    use super::{aggregate_records, RecordSource, VecSource};
    use crate::journal::entities::RawRecord;

    fn at(timestamp: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(timestamp).unwrap()
    }

    #[test]
    fn test_aggregate_sums_and_sorts() {
        let records = vec![
            RawRecord::new("Work", "Email", at("2024-01-01T10:00:00Z"), 60),
            RawRecord::new("Work", "Coding", at("2024-01-01T11:00:00Z"), 100),
            RawRecord::new("Leisure", "Games", at("2024-01-01T09:00:00Z"), 30),
            RawRecord::new("Work", "Coding", at("2024-01-01T10:00:00Z"), 200),
            RawRecord::new("Work", "Coding", at("2024-01-01T11:00:00Z"), 50),
        ];

        let aggregated = aggregate_records(records);

        assert_eq!(
            aggregated,
            vec![
                RawRecord::new("Leisure", "Games", at("2024-01-01T09:00:00Z"), 30),
                RawRecord::new("Work", "Coding", at("2024-01-01T10:00:00Z"), 200),
                RawRecord::new("Work", "Coding", at("2024-01-01T11:00:00Z"), 150),
                RawRecord::new("Work", "Email", at("2024-01-01T10:00:00Z"), 60),
            ]
        );
    }

    #[test]
    fn test_aggregate_compares_instants() {
        let records = vec![
            RawRecord::new("Work", "Coding", at("2024-01-01T10:00:00+01:00"), 100),
            RawRecord::new("Work", "Coding", at("2024-01-01T09:00:00Z"), 100),
        ];

        let aggregated = aggregate_records(records);

        assert_eq!(aggregated.len(), 1);
        assert_eq!(aggregated[0].duration, 200);
        assert_eq!(aggregated[0].timestamp.offset().local_minus_utc(), 3600);
    }

    #[test]
    fn test_aggregate_saturates() {
        let records = vec![
            RawRecord::new("A", "X", at("2024-01-01T10:00:00Z"), u64::MAX),
            RawRecord::new("A", "X", at("2024-01-01T10:00:00Z"), 10),
        ];

        assert_eq!(aggregate_records(records)[0].duration, u64::MAX);
    }

    #[test]
    fn test_vec_source_chunks() -> Result<()> {
        let mut source = VecSource::new(vec![
            RawRecord::new("A", "X", at("2024-01-01T10:00:00Z"), 1),
            RawRecord::new("A", "X", at("2024-01-01T11:00:00Z"), 1),
            RawRecord::new("A", "X", at("2024-01-01T12:00:00Z"), 1),
        ]);

        assert_eq!(source.next_chunk(2)?.map(|v| v.len()), Some(2));
        assert_eq!(source.remaining(), 1);
        assert_eq!(source.next_chunk(2)?.map(|v| v.len()), Some(1));
        assert_eq!(source.next_chunk(2)?, None);
        Ok(())
    }
}
