//! Consolidation of activity records into a day by day journal.
//!
//! Records flow through the following stages:
//!   - [merger::RunMerger] collapses consecutive hourly records of one activity into a run.
//!   - [localize::Localizer] drops short runs and moves the rest into the viewer's timezone.
//!   - [taxonomy::TaxonomyCollector] remembers every category and class that made it through.
//!   - [bucket::JournalBucketer] appends a formatted line to the page of the run's local day.
//!
//! [ConsolidationSession] owns all of the state for a single pass.

pub mod bucket;
pub mod entities;
pub mod format;
pub mod localize;
pub mod merger;
pub mod taxonomy;

use anyhow::Result;
use bucket::{JournalBucketer, JournalPage};
use chrono::FixedOffset;
use entities::{MergedRun, RawRecord};
use futures::{Stream, StreamExt};
use localize::{Localizer, MIN_RUN_DURATION};
use merger::RunMerger;
use serde::Serialize;
use taxonomy::{TaxonomyCollector, TaxonomyTag};
use tracing::{debug, info, instrument};

use crate::source::RecordSource;

/// Amount of records requested from a source at once.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalConfig {
    /// Runs shorter than this amount of seconds are dropped.
    pub min_duration: u64,
    pub chunk_size: usize,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            min_duration: MIN_RUN_DURATION,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Result of a consolidation pass.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Journal {
    /// Pages ordered by date.
    pub pages: Vec<JournalPage>,
    /// Categories and classes in the order they were first seen.
    pub tags: Vec<TaxonomyTag>,
}

/// State of a single consolidation pass. Records have to be pushed sorted by category, class and
/// timestamp. Dropping the session without calling [ConsolidationSession::finish] discards the run
/// that's still being merged.
#[derive(Debug)]
pub struct ConsolidationSession {
    merger: RunMerger,
    localizer: Localizer,
    taxonomy: TaxonomyCollector,
    journal: JournalBucketer,
}

impl ConsolidationSession {
    pub fn new(config: &JournalConfig, viewer_offset: FixedOffset) -> Self {
        Self {
            merger: RunMerger::new(),
            localizer: Localizer::new(viewer_offset, config.min_duration),
            taxonomy: TaxonomyCollector::new(),
            journal: JournalBucketer::new(),
        }
    }

    pub fn push_chunk(&mut self, chunk: impl IntoIterator<Item = RawRecord>) {
        for record in chunk {
            if let Some(run) = self.merger.push(record) {
                self.accept(run);
            }
        }
    }

    pub fn finish(mut self) -> Journal {
        if let Some(run) = self.merger.finish() {
            self.accept(run);
        }
        Journal {
            pages: self.journal.into_pages(),
            tags: self.taxonomy.into_tags(),
        }
    }

    fn accept(&mut self, run: MergedRun) {
        let Some(entry) = self.localizer.localize(run) else {
            return;
        };
        self.taxonomy.observe(&entry.category, &entry.class);
        self.journal.append(&entry);
    }
}

/// Consolidates chunks coming from an iterator. The first error stops consolidation and is
/// returned as is.
pub fn consolidate<E>(
    chunks: impl IntoIterator<Item = std::result::Result<Vec<RawRecord>, E>>,
    config: &JournalConfig,
    viewer_offset: FixedOffset,
) -> std::result::Result<Journal, E> {
    let mut session = ConsolidationSession::new(config, viewer_offset);
    for chunk in chunks {
        session.push_chunk(chunk?);
    }
    Ok(session.finish())
}

/// Pulls chunks out of a [RecordSource] until it's exhausted.
#[instrument(skip(source))]
pub fn consolidate_source(
    source: &mut impl RecordSource,
    config: &JournalConfig,
    viewer_offset: FixedOffset,
) -> Result<Journal> {
    let mut session = ConsolidationSession::new(config, viewer_offset);
    let mut chunk_count = 0usize;
    while let Some(chunk) = source.next_chunk(config.chunk_size)? {
        debug!("Consolidating chunk {chunk_count} of {} records", chunk.len());
        session.push_chunk(chunk);
        chunk_count += 1;
    }
    let journal = session.finish();
    info!(
        "Consolidated {chunk_count} chunks into {} pages and {} tags",
        journal.pages.len(),
        journal.tags.len()
    );
    Ok(journal)
}

/// Same as [consolidate_source] but for sources exposed as streams.
#[instrument(skip(chunks))]
pub async fn consolidate_stream(
    chunks: impl Stream<Item = Result<Vec<RawRecord>>>,
    config: &JournalConfig,
    viewer_offset: FixedOffset,
) -> Result<Journal> {
    let mut chunks = std::pin::pin!(chunks);
    let mut session = ConsolidationSession::new(config, viewer_offset);
    while let Some(chunk) = chunks.next().await.transpose()? {
        session.push_chunk(chunk);
    }
    Ok(session.finish())
}
