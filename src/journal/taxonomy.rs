use std::{collections::HashSet, fmt::Display, sync::Arc};

use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Category,
    Class,
}

impl Display for TagKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagKind::Category => write!(f, "category"),
            TagKind::Class => write!(f, "class"),
        }
    }
}

/// Cross-reference page for a category or a class mentioned in the journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxonomyTag {
    pub label: Arc<str>,
    pub kind: TagKind,
}

/// Remembers which categories and classes were already seen. Each label gets a single tag per kind,
/// in the order it was first observed.
#[derive(Debug, Default)]
pub struct TaxonomyCollector {
    categories: HashSet<Arc<str>>,
    classes: HashSet<Arc<str>>,
    tags: Vec<TaxonomyTag>,
}

impl TaxonomyCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the labels of an activity. Returns how many new tags were created.
    pub fn observe(&mut self, category: &Arc<str>, class: &Arc<str>) -> usize {
        usize::from(self.register(category, TagKind::Category))
            + usize::from(self.register(class, TagKind::Class))
    }

    /// Returns `false` if the label was already registered for this kind.
    pub fn register(&mut self, label: &Arc<str>, kind: TagKind) -> bool {
        let seen = match kind {
            TagKind::Category => &mut self.categories,
            TagKind::Class => &mut self.classes,
        };
        if !seen.insert(label.clone()) {
            return false;
        }

        debug!("New {kind} {label}");
        self.tags.push(TaxonomyTag {
            label: label.clone(),
            kind,
        });
        true
    }

    pub fn tags(&self) -> &[TaxonomyTag] {
        &self.tags
    }

    pub fn into_tags(self) -> Vec<TaxonomyTag> {
        self.tags
    }
}
