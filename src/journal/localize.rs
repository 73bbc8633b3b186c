use chrono::FixedOffset;
use tracing::trace;

use super::{
    entities::{LocalizedEntry, MergedRun},
    format::format_seconds,
};

/// Runs shorter than this are considered noise and never make it into the journal.
pub const MIN_RUN_DURATION: u64 = 5 * 60;

/// Moves runs into the viewer's timezone and drops the ones that are too short to matter.
///
/// The viewer offset is the one in effect when consolidation started. It's applied to every run,
/// even to those recorded while a different offset (e.g. daylight saving time) was in effect
/// locally.
#[derive(Debug, Clone, Copy)]
pub struct Localizer {
    viewer_offset: FixedOffset,
    min_duration: u64,
}

impl Localizer {
    pub fn new(viewer_offset: FixedOffset, min_duration: u64) -> Self {
        Self {
            viewer_offset,
            min_duration,
        }
    }

    pub fn localize(&self, run: MergedRun) -> Option<LocalizedEntry> {
        if run.duration < self.min_duration {
            trace!(
                "Dropping {} {} at {}: {}s is below {}s",
                run.category,
                run.class,
                run.timestamp,
                run.duration,
                self.min_duration
            );
            return None;
        }

        let duration_text = format_seconds(run.duration);
        if duration_text.is_empty() {
            trace!(
                "Dropping {} {} at {}: {}s rounds to nothing",
                run.category,
                run.class,
                run.timestamp,
                run.duration
            );
            return None;
        }

        let local_instant = run.timestamp.to_utc().with_timezone(&self.viewer_offset);

        Some(LocalizedEntry {
            local_day: local_instant.date_naive(),
            local_instant,
            duration_text,
            category: run.category,
            class: run.class,
        })
    }
}
