
use anyhow::{Context, Result};
use chrono::{FixedOffset, NaiveDate, Offset, Utc};

/// This is the standard way of converting a date to a string in dayjournal.
pub fn date_to_record_name(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses offsets like `Z`, `+02:00` or `-0530`.
pub fn parse_offset(value: &str) -> Result<FixedOffset> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("z") || value.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }

    value
        .parse::<FixedOffset>()
        .with_context(|| format!("Failed to parse offset {value}"))
}
