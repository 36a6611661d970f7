//! Structural extraction: content signals → node and edge specs.
//!
//! Pure functions — the builder owns all storage work.

use parallax_core::graph::slugify;
use parallax_core::models::{ContentSignals, TocEntry};

/// Confidence for nodes taken from TOC entries.
pub const TOC_NODE_CONFIDENCE: f64 = 0.9;
/// Confidence for PART_OF hierarchy edges.
pub const PART_OF_CONFIDENCE: f64 = 0.9;
/// Confidence for glossary term nodes.
pub const GLOSSARY_NODE_CONFIDENCE: f64 = 0.8;
/// Confidence for the title fallback node.
pub const TITLE_NODE_CONFIDENCE: f64 = 0.5;

/// A node to find-or-create, identified by its label's slug.
#[derive(Debug, Clone)]
pub struct NodeSpec {
    pub label: String,
    pub confidence: f64,
    pub page: Option<u32>,
}

/// A PART_OF edge between two node specs (parent → child).
#[derive(Debug, Clone)]
pub struct EdgeSpec {
    pub parent: usize,
    pub child: usize,
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub nodes: Vec<NodeSpec>,
    pub edges: Vec<EdgeSpec>,
}

/// Extract node/edge specs with priority: TOC entries (hierarchy becomes
/// PART_OF), then glossary terms (flat), then — only when both are empty —
/// a single node from the title.
pub fn extract(signals: &ContentSignals) -> Extraction {
    let mut extraction = Extraction::default();

    for entry in &signals.toc {
        walk_toc(entry, None, &mut extraction);
    }

    for term in &signals.glossary {
        if slugify(&term.term).is_empty() {
            continue;
        }
        extraction.nodes.push(NodeSpec {
            label: term.term.clone(),
            confidence: GLOSSARY_NODE_CONFIDENCE,
            page: None,
        });
    }

    if extraction.nodes.is_empty() && !slugify(&signals.title).is_empty() {
        extraction.nodes.push(NodeSpec {
            label: signals.title.clone(),
            confidence: TITLE_NODE_CONFIDENCE,
            page: None,
        });
    }

    extraction
}

fn walk_toc(entry: &TocEntry, parent: Option<usize>, extraction: &mut Extraction) {
    if slugify(&entry.title).is_empty() {
        // Untitled entries contribute nothing, but their children might.
        for child in &entry.children {
            walk_toc(child, parent, extraction);
        }
        return;
    }

    let index = extraction.nodes.len();
    extraction.nodes.push(NodeSpec {
        label: entry.title.clone(),
        confidence: TOC_NODE_CONFIDENCE,
        page: entry.page,
    });
    if let Some(parent) = parent {
        extraction.edges.push(EdgeSpec {
            parent,
            child: index,
            page: entry.page,
        });
    }

    for child in &entry.children {
        walk_toc(child, Some(index), extraction);
    }
}
