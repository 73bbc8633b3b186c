use tracing::trace;

use super::entities::{MergedRun, RawRecord};

/// Collapses hourly records of the same activity into runs.
///
/// Adjacency is measured in steps rather than wall time: every record pushed after the pending run
/// started advances the step counter by one, and a record only extends the run when it lands
/// exactly `steps` hours after the run's start. Both the pending run and the counter live in the
/// merger, so splitting the input into chunks never changes the produced runs.
#[derive(Debug, Default)]
pub struct RunMerger {
    pending: Option<MergedRun>,
    steps: u32,
}

impl RunMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the next record in stream order. Returns a run when the record closed it.
    pub fn push(&mut self, record: RawRecord) -> Option<MergedRun> {
        let Some(pending) = self.pending.as_mut() else {
            self.start(record);
            return None;
        };

        self.steps += 1;

        if record.same_activity(&pending.category, &pending.class)
            && pending.expected_at(self.steps) == record.timestamp
        {
            trace!(
                "Extending {} {} started at {} by {}s",
                pending.category,
                pending.class,
                pending.timestamp,
                record.duration
            );
            pending.duration = pending.duration.saturating_add(record.duration);
            return None;
        }

        let closed = self.pending.take();
        self.start(record);
        closed
    }

    /// Closes the pending run, if there is one. Should be called once the stream has ended.
    pub fn finish(&mut self) -> Option<MergedRun> {
        self.steps = 0;
        self.pending.take()
    }

    fn start(&mut self, record: RawRecord) {
        self.pending = Some(record.into());
        self.steps = 0;
    }
}
