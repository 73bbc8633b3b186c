use chrono::DateTime;
use chrono::Duration;
use chrono::FixedOffset;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use std::sync::Arc;

/// A single activity record as produced by a tracker export. Records are expected to be
/// aggregated per hour, so one record usually represents the time spent on an activity during the
/// hour starting at `timestamp`.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct RawRecord {
    pub category: Arc<str>,
    pub class: Arc<str>,
    /// Keeps the offset the tracker recorded the activity with.
    pub timestamp: DateTime<FixedOffset>,
    /// Seconds spent on the activity.
    pub duration: u64,
}

impl RawRecord {
    pub fn new(
        category: impl Into<Arc<str>>,
        class: impl Into<Arc<str>>,
        timestamp: DateTime<FixedOffset>,
        duration: u64,
    ) -> Self {
        Self {
            category: category.into(),
            class: class.into(),
            timestamp,
            duration,
        }
    }

    pub fn with_timestamp(self, timestamp: DateTime<FixedOffset>) -> Self {
        Self { timestamp, ..self }
    }

    /// Whether both records describe the same activity.
    pub fn same_activity(&self, category: &str, class: &str) -> bool {
        *self.category == *category && *self.class == *class
    }
}

/// Consecutive hourly records of the same activity collapsed into one. `timestamp` is the start of
/// the first absorbed record and `duration` the sum of all of them.
#[derive(PartialEq, Eq, Debug, Serialize, Clone)]
pub struct MergedRun {
    pub category: Arc<str>,
    pub class: Arc<str>,
    pub timestamp: DateTime<FixedOffset>,
    pub duration: u64,
}

impl MergedRun {
    /// Moment at which a record `steps` hours after the start of the run is expected.
    pub fn expected_at(&self, steps: u32) -> DateTime<FixedOffset> {
        self.timestamp + Duration::hours(steps as i64)
    }
}

impl From<RawRecord> for MergedRun {
    fn from(
        RawRecord {
            category,
            class,
            timestamp,
            duration,
        }: RawRecord,
    ) -> Self {
        MergedRun {
            category,
            class,
            timestamp,
            duration,
        }
    }
}

/// A run that passed filtering, expressed in the timezone of the viewer.
#[derive(PartialEq, Eq, Debug, Serialize, Clone)]
pub struct LocalizedEntry {
    pub category: Arc<str>,
    pub class: Arc<str>,
    pub local_day: NaiveDate,
    pub local_instant: DateTime<FixedOffset>,
    pub duration_text: String,
}
