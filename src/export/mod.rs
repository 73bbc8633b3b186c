//! Turns a [Journal] into markdown pages. Every day gets a page named after its date, every
//! category and class gets a page named after its label so that `[[links]]` in entries resolve.

pub mod writer;

use std::{collections::BTreeMap, fmt::Display, sync::Arc};

use clap::ValueEnum;

use crate::{
    journal::{
        bucket::JournalPage,
        taxonomy::{TagKind, TaxonomyTag},
        Journal,
    },
    utils::time::date_to_record_name,
};

/// How the entries of a day end up on its page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RenderMode {
    /// One bullet per run.
    #[default]
    Separate,
    /// All runs of the day in a single bullet, separated by commas.
    Joined,
}

impl Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Separate => write!(f, "separate"),
            RenderMode::Joined => write!(f, "joined"),
        }
    }
}

/// Entries of the page as they should be listed.
pub fn page_lines(page: &JournalPage, mode: RenderMode) -> Vec<String> {
    match mode {
        RenderMode::Separate => page.entries.clone(),
        RenderMode::Joined if page.entries.is_empty() => vec![],
        RenderMode::Joined => vec![page.entries.join(", ")],
    }
}

pub fn render_page(page: &JournalPage, mode: RenderMode) -> String {
    let mut result = format!("# {}\n\n", date_to_record_name(page.date));
    for line in page_lines(page, mode) {
        result.push_str("- ");
        result.push_str(&line);
        result.push('\n');
    }
    result
}

pub fn render_tag_page(label: &str, kinds: &[TagKind]) -> String {
    let kinds = kinds
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("# {label}\n\ntags:: {kinds}\n")
}

/// Groups tags by label. A label that's used both as a category and as a class gets one page.
pub fn tag_pages(tags: &[TaxonomyTag]) -> BTreeMap<Arc<str>, Vec<TagKind>> {
    let mut pages = BTreeMap::<Arc<str>, Vec<TagKind>>::new();
    for tag in tags {
        let kinds = pages.entry(tag.label.clone()).or_default();
        if !kinds.contains(&tag.kind) {
            kinds.push(tag.kind);
        }
    }
    pages
}

/// Renders the journal as a single markdown document. Used for printing.
pub fn render_journal(journal: &Journal, mode: RenderMode) -> String {
    journal
        .pages
        .iter()
        .map(|v| render_page(v, mode))
        .collect::<Vec<_>>()
        .join("\n")
}
