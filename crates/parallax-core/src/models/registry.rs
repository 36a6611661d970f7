use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::graph::{Confidence, GraphScope};

/// Registry entry lifecycle. Entries are born CANDIDATE and promoted by an
/// out-of-scope curation process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistryStatus {
    Active,
    Candidate,
}

impl RegistryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Candidate => "CANDIDATE",
        }
    }

    pub fn from_str_name(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(Self::Active),
            "CANDIDATE" => Some(Self::Candidate),
            _ => None,
        }
    }
}

/// A canonical topic in the global, deduplicated catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// UUID v4 identifier.
    pub id: String,
    pub canonical_label: String,
    pub slug: String,
    /// Normalized alias strings.
    pub aliases: Vec<String>,
    pub scope: GraphScope,
    pub status: RegistryStatus,
    pub confidence: Confidence,
    /// Free-form stats (e.g. which content first produced this candidate).
    pub stats: Value,
    pub created_at: DateTime<Utc>,
}

impl RegistryEntry {
    /// New CANDIDATE entry at the tentative confidence.
    pub fn candidate(label: impl Into<String>, slug: impl Into<String>, stats: Value) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            canonical_label: label.into(),
            slug: slug.into(),
            aliases: Vec::new(),
            scope: GraphScope::global(),
            status: RegistryStatus::Candidate,
            confidence: Confidence::new(Confidence::TENTATIVE),
            stats,
            created_at: Utc::now(),
        }
    }

    /// Whether any of the given terms hits this entry's slug or aliases.
    pub fn matches_terms(&self, terms: &[String]) -> bool {
        terms
            .iter()
            .any(|t| *t == self.slug || self.aliases.iter().any(|a| a == t))
    }
}
