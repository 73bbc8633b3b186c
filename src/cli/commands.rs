use std::{
    fmt::Display,
    io::{stdout, IsTerminal},
    path::PathBuf,
};

use ansi_term::Colour;
use anyhow::Result;
use chrono::{FixedOffset, NaiveDate};
use chrono_english::parse_date_string;
use clap::{CommandFactory, Parser, ValueEnum};
use tracing::{debug, info};

use crate::{
    export::{
        page_lines, render_journal,
        writer::{write_journal, write_journal_json},
        RenderMode,
    },
    journal::{
        consolidate_source, localize::MIN_RUN_DURATION, Journal, JournalConfig, DEFAULT_CHUNK_SIZE,
    },
    source::record_storage::JsonLinesSource,
    utils::{
        clock::{Clock, DefaultClock, OffsetClock},
        time::{date_to_record_name, parse_offset},
    },
};

use super::Args;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Options shared by every command that builds a journal.
#[derive(Debug, Clone, clap::Args)]
pub struct JournalArgs {
    #[arg(
        long,
        short,
        help = "File with activity records, one JSON object per line"
    )]
    input: PathBuf,
    #[arg(
        long,
        value_parser = parse_offset,
        allow_hyphen_values = true,
        help = "Timezone offset of the journal, e.g. \"+02:00\" or \"Z\". Defaults to the current offset of this machine"
    )]
    offset: Option<FixedOffset>,
    #[arg(
        long,
        default_value_t = MIN_RUN_DURATION,
        help = "Runs shorter than this amount of seconds are left out"
    )]
    min_duration: u64,
    #[arg(
        long,
        default_value_t = DEFAULT_CHUNK_SIZE,
        value_parser = parse_batch_size,
        help = "Amount of records consolidated at once"
    )]
    batch_size: usize,
    #[arg(
        long,
        value_enum,
        default_value_t = RenderMode::Separate,
        help = "Whether runs of a day are listed separately or joined into a single line"
    )]
    render: RenderMode,
}

impl JournalArgs {
    fn config(&self) -> JournalConfig {
        JournalConfig {
            min_duration: self.min_duration,
            chunk_size: self.batch_size,
        }
    }

    fn clock(&self) -> Box<dyn Clock> {
        match self.offset {
            Some(offset) => Box::new(OffsetClock(offset)),
            None => Box::new(DefaultClock),
        }
    }
}

fn parse_batch_size(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("Batch size should be at least 1".into()),
        Ok(v) => Ok(v),
        Err(e) => Err(e.to_string()),
    }
}

#[derive(Debug, Parser)]
pub struct ExportCommand {
    #[command(flatten)]
    journal: JournalArgs,
    #[arg(
        long,
        short,
        help = "Output directory for markdown pages, or output file for json"
    )]
    out: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
pub struct ShowCommand {
    #[command(flatten)]
    journal: JournalArgs,
    #[arg(
        long = "start",
        short,
        help = "First day to show. Examples are \"yesterday\", \"1 week ago\", \"15/03/2025\""
    )]
    start_date: Option<String>,
    #[arg(
        long = "end",
        short,
        help = "Last day to show. Examples are \"yesterday\", \"1 week ago\", \"15/03/2025\""
    )]
    end_date: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

/// Reads records from the input file and consolidates them using the viewer's current offset.
pub async fn build_journal(args: &JournalArgs, clock: &dyn Clock) -> Result<Journal> {
    let mut source = JsonLinesSource::open(&args.input).await?;
    let offset = clock.local_offset();
    debug!("Consolidating {:?} for offset {offset}", source.path());
    consolidate_source(&mut source, &args.config(), offset)
}

/// Command to process `export` command. Writes markdown pages or a json document.
pub async fn process_export_command(
    ExportCommand {
        journal: args,
        out,
        format,
    }: ExportCommand,
) -> Result<()> {
    let clock = args.clock();
    let journal = build_journal(&args, clock.as_ref()).await?;

    match format {
        OutputFormat::Markdown => {
            let written = write_journal(&journal, &out, args.render).await?;
            println!("Wrote {} pages into {}", written.len(), out.display());
        }
        OutputFormat::Json => {
            write_journal_json(&journal, &out).await?;
            println!("Wrote journal into {}", out.display());
        }
    }
    Ok(())
}

/// Command to process `show` command. Prints day pages between `start_date` and `end_date`.
pub async fn process_show_command(
    ShowCommand {
        journal: args,
        start_date,
        end_date,
        date_style,
    }: ShowCommand,
) -> Result<()> {
    let clock = args.clock();
    let DayRange { start, end } = parse_range(start_date, end_date, date_style, clock.as_ref())?;

    let journal = filter_pages(build_journal(&args, clock.as_ref()).await?, start, end);
    info!("Showing {} pages", journal.pages.len());

    if stdout().is_terminal() {
        print_pages(&journal, args.render);
    } else {
        print!("{}", render_journal(&journal, args.render));
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
struct DayRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

fn parse_range(
    start_date: Option<String>,
    end_date: Option<String>,
    date_style: DateStyle,
    clock: &dyn Clock,
) -> Result<DayRange> {
    let now = clock.local_time();
    let dialect: chrono_english::Dialect = date_style.into();
    let parse = |value: Option<String>, name: &str| -> Result<Option<NaiveDate>> {
        match value.map(|s| parse_date_string(&s, now, dialect)) {
            Some(Ok(v)) => Ok(Some(v.date_naive())),
            Some(Err(e)) => Err(Args::command()
                .error(
                    clap::error::ErrorKind::ValueValidation,
                    format!("Failed to validate {name} date {e}"),
                )
                .into()),
            None => Ok(None),
        }
    };

    Ok(DayRange {
        start: parse(start_date, "start")?,
        end: parse(end_date, "end")?,
    })
}

/// Leaves only pages between `start` and `end` inclusive. Tags are left untouched.
fn filter_pages(mut journal: Journal, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Journal {
    journal.pages.retain(|page| {
        start.map_or(true, |start| page.date >= start) && end.map_or(true, |end| page.date <= end)
    });
    journal
}

fn print_pages(journal: &Journal, mode: RenderMode) {
    for page in &journal.pages {
        println!("{}", Colour::Cyan.bold().paint(date_to_record_name(page.date)));
        for line in page_lines(page, mode) {
            println!("  {line}");
        }
        println!();
    }
}
