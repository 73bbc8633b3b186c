use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{AsyncBufReadExt, BufReader},
};
use tracing::{debug, info, warn};

use crate::journal::entities::RawRecord;

use super::{RecordSource, VecSource};

/// Records stored as JSON lines, one [RawRecord] per line:
///
/// ```text
/// {"category":"Work","class":"Coding","timestamp":"2024-01-01T09:00:00-05:00","duration":1800}
/// ```
///
/// The whole file is read on [JsonLinesSource::open] because records have to be aggregated and
/// sorted before they can be consolidated.
#[derive(Debug)]
pub struct JsonLinesSource {
    path: PathBuf,
    records: VecSource,
}

impl JsonLinesSource {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = read_records(&path)
            .await
            .with_context(|| format!("Failed to read records from {path:?}"))?;
        let records = VecSource::new(records);
        info!("Loaded {} records from {path:?}", records.remaining());
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for JsonLinesSource {
    fn next_chunk(&mut self, max: usize) -> Result<Option<Vec<RawRecord>>> {
        self.records.next_chunk(max)
    }
}

/// Reads every legal record from the file. Lines that can't be parsed are skipped.
pub async fn read_records(path: &Path) -> Result<Vec<RawRecord>, std::io::Error> {
    debug!("Extracting {path:?}");
    let file = File::open(path).await?;
    file.lock_shared()?;
    let buffer = BufReader::new(file);
    let mut lines = buffer.lines();
    let mut records = vec![];
    let mut line_number = 0usize;
    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<RawRecord>(&line) {
            Ok(v) => records.push(v),
            Err(e) => {
                warn!("Skipping illegal record at {path:?}:{line_number} {line}: {e}")
            }
        }
    }

    lines.into_inner().into_inner().unlock_async().await?;

    Ok(records)
}
