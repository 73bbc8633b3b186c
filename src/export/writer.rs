use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{debug, info, instrument};

use crate::{journal::Journal, utils::time::date_to_record_name};

use super::{render_page, render_tag_page, tag_pages, RenderMode};

const PAGE_EXTENSION: &str = "md";
const TAGS_DIR: &str = "tags";

/// Writes every day page into `dir` and every tag page into its `tags` subdirectory. Existing pages
/// with the same names are overwritten. Labels that end up with the same file name get a numeric
/// suffix. Returns paths of written files.
#[instrument(skip(journal))]
pub async fn write_journal(journal: &Journal, dir: &Path, mode: RenderMode) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create {dir:?}"))?;

    let mut written = vec![];
    for page in &journal.pages {
        let path = page_path(dir, &date_to_record_name(page.date));
        write_page(&path, &render_page(page, mode)).await?;
        written.push(path);
    }

    let tags_dir = dir.join(TAGS_DIR);
    fs::create_dir_all(&tags_dir)
        .await
        .with_context(|| format!("Failed to create {tags_dir:?}"))?;

    let mut used_names = HashSet::new();
    for (label, kinds) in tag_pages(&journal.tags) {
        let path = page_path(&tags_dir, &unique_file_name(&label, &mut used_names));
        write_page(&path, &render_tag_page(&label, &kinds)).await?;
        written.push(path);
    }

    info!("Wrote {} pages into {dir:?}", written.len());
    Ok(written)
}

/// Writes the journal as a single JSON document.
pub async fn write_journal_json(journal: &Journal, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|v| !v.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let data = serde_json::to_vec_pretty(journal)?;
    fs::write(path, data)
        .await
        .with_context(|| format!("Failed to write {path:?}"))?;
    info!("Wrote journal into {path:?}");
    Ok(())
}

async fn write_page(path: &Path, content: &str) -> Result<()> {
    debug!("Writing {path:?}");
    fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write {path:?}"))
}

fn page_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{PAGE_EXTENSION}"))
}

/// Labels come from user data, so anything that could escape the directory is replaced.
fn sanitize_file_name(label: &str) -> String {
    let sanitized = label
        .chars()
        .map(|v| match v {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            v if v.is_control() => '_',
            v => v,
        })
        .collect::<String>();
    match sanitized.trim() {
        "" | "." | ".." => "_".into(),
        v => v.to_string(),
    }
}

/// File name for `label` that wasn't handed out yet. Names are compared ignoring case, since
/// `Work.md` and `work.md` are the same file on some filesystems.
fn unique_file_name(label: &str, used: &mut HashSet<String>) -> String {
    let base = sanitize_file_name(label);
    let mut name = base.clone();
    let mut suffix = 1;
    while !used.insert(name.to_lowercase()) {
        suffix += 1;
        name = format!("{base}-{suffix}");
    }
    name
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use anyhow::Result;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use super::{sanitize_file_name, unique_file_name, write_journal, write_journal_json};
    use crate::{
        export::RenderMode,
        journal::{
            bucket::JournalPage,
            taxonomy::{TagKind, TaxonomyTag},
            Journal,
        },
    };

    fn test_journal() -> Journal {
        Journal {
            pages: vec![JournalPage {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                entries: vec!["[[Work]] [[Coding/Rust]] for 1 hour".into()],
            }],
            tags: vec![
                TaxonomyTag {
                    label: "Work".into(),
                    kind: TagKind::Category,
                },
                TaxonomyTag {
                    label: "Coding/Rust".into(),
                    kind: TagKind::Class,
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_write_pages() -> Result<()> {
        let dir = tempdir()?;
        let written = write_journal(&test_journal(), dir.path(), RenderMode::Separate).await?;

        assert_eq!(written.len(), 3);
        let day = std::fs::read_to_string(dir.path().join("2024-01-01.md"))?;
        assert_eq!(day, "# 2024-01-01\n\n- [[Work]] [[Coding/Rust]] for 1 hour\n");

        let class = std::fs::read_to_string(dir.path().join("tags").join("Coding_Rust.md"))?;
        assert_eq!(class, "# Coding/Rust\n\ntags:: class\n");
        assert!(dir.path().join("tags").join("Work.md").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_colliding_names_keep_every_page() -> Result<()> {
        let mut journal = test_journal();
        journal.tags = ["2024-01-01", "a/b", "a_b"]
            .into_iter()
            .map(|label| TaxonomyTag {
                label: label.into(),
                kind: TagKind::Class,
            })
            .collect();

        let dir = tempdir()?;
        let written = write_journal(&journal, dir.path(), RenderMode::Separate).await?;
        assert_eq!(written.len(), 4);
        assert!(written.iter().all(|v| v.exists()));
        assert_eq!(written.iter().collect::<HashSet<_>>().len(), 4);

        let day = std::fs::read_to_string(dir.path().join("2024-01-01.md"))?;
        assert_eq!(day, "# 2024-01-01\n\n- [[Work]] [[Coding/Rust]] for 1 hour\n");

        let tags = dir.path().join("tags");
        assert_eq!(
            std::fs::read_to_string(tags.join("2024-01-01.md"))?,
            "# 2024-01-01\n\ntags:: class\n"
        );
        assert_eq!(
            std::fs::read_to_string(tags.join("a_b.md"))?,
            "# a/b\n\ntags:: class\n"
        );
        assert_eq!(
            std::fs::read_to_string(tags.join("a_b-2.md"))?,
            "# a_b\n\ntags:: class\n"
        );
        Ok(())
    }

    #[test]
    fn test_unique_file_name() {
        let mut used = HashSet::new();
        assert_eq!(unique_file_name("Work", &mut used), "Work");
        assert_eq!(unique_file_name("work", &mut used), "work-2");
        assert_eq!(unique_file_name("WORK", &mut used), "WORK-3");
        assert_eq!(unique_file_name("a/b", &mut used), "a_b");
    }

    #[tokio::test]
    async fn test_write_json() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("journal.json");
        write_journal_json(&test_journal(), &path).await?;

        let value: serde_json::Value = serde_json::from_slice(&std::fs::read(&path)?)?;
        assert_eq!(value["pages"][0]["date"], "2024-01-01");
        assert_eq!(value["tags"][1]["kind"], "class");
        Ok(())
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_file_name("Work"), "Work");
        assert_eq!(sanitize_file_name("a/b\\c"), "a_b_c");
        assert_eq!(sanitize_file_name(".."), "_");
        assert_eq!(sanitize_file_name("  "), "_");
    }
}
