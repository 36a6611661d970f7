use serde::{Deserialize, Serialize};

/// Structural signals extracted from a content item by the (out-of-scope)
/// extraction pipeline. Input to the baseline builder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSignals {
    pub title: String,
    pub toc: Vec<TocEntry>,
    pub glossary: Vec<GlossaryTerm>,
}

/// A table-of-contents entry. Hierarchy becomes PART_OF edges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TocEntry {
    pub title: String,
    pub page: Option<u32>,
    pub children: Vec<TocEntry>,
}

impl TocEntry {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            page: None,
            children: Vec::new(),
        }
    }
}

/// A glossary term. Becomes a flat node, no edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlossaryTerm {
    pub term: String,
    #[serde(default)]
    pub definition: Option<String>,
}
