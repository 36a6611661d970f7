use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_EVIDENCE_EXCERPT_CHARS;

/// Kind of proof backing an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceType {
    Highlight,
    CornellSummary,
    Timestamp,
    PageArea,
}

impl EvidenceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Highlight => "HIGHLIGHT",
            Self::CornellSummary => "CORNELL_SUMMARY",
            Self::Timestamp => "TIMESTAMP",
            Self::PageArea => "PAGE_AREA",
        }
    }

    pub fn from_str_name(s: &str) -> Option<Self> {
        match s {
            "HIGHLIGHT" => Some(Self::Highlight),
            "CORNELL_SUMMARY" => Some(Self::CornellSummary),
            "TIMESTAMP" => Some(Self::Timestamp),
            "PAGE_AREA" => Some(Self::PageArea),
            _ => None,
        }
    }
}

/// Provenance record owned by an edge. Never mutated after creation —
/// accumulates as more proof arrives for the same edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicEdgeEvidence {
    /// UUID v4 identifier.
    pub id: String,
    pub edge_id: String,
    pub evidence_type: EvidenceType,
    pub source_highlight_id: Option<String>,
    pub source_note_id: Option<String>,
    pub page: Option<u32>,
    /// External reference for TIMESTAMP evidence (e.g. a transfer-attempt id).
    pub timestamp_ref: Option<String>,
    /// Excerpt of the source text, truncated to 200 characters.
    pub excerpt: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TopicEdgeEvidence {
    pub fn new(edge_id: impl Into<String>, evidence_type: EvidenceType) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            edge_id: edge_id.into(),
            evidence_type,
            source_highlight_id: None,
            source_note_id: None,
            page: None,
            timestamp_ref: None,
            excerpt: None,
            created_at: Utc::now(),
        }
    }

    /// Set the excerpt, truncating on a char boundary at 200 characters.
    pub fn with_excerpt(mut self, text: &str) -> Self {
        self.excerpt = Some(truncate_chars(text, MAX_EVIDENCE_EXCERPT_CHARS));
        self
    }

    pub fn with_highlight(mut self, highlight_id: impl Into<String>) -> Self {
        self.source_highlight_id = Some(highlight_id.into());
        self
    }

    pub fn with_note(mut self, note_id: impl Into<String>) -> Self {
        self.source_note_id = Some(note_id.into());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_timestamp_ref(mut self, reference: impl Into<String>) -> Self {
        self.timestamp_ref = Some(reference.into());
        self
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
