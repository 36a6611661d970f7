use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::confidence::Confidence;
use super::slug::slugify;

/// Where a node or edge came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeSource {
    /// Structural extraction (TOC, glossary, title).
    Deterministic,
    /// Derived from a learner's own action.
    User,
    /// Produced by an external model-backed classifier.
    Llm,
}

impl NodeSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deterministic => "DETERMINISTIC",
            Self::User => "USER",
            Self::Llm => "LLM",
        }
    }

    pub fn from_str_name(s: &str) -> Option<Self> {
        match s {
            "DETERMINISTIC" => Some(Self::Deterministic),
            "USER" => Some(Self::User),
            "LLM" => Some(Self::Llm),
            _ => None,
        }
    }
}

/// A topic node. Belongs to exactly one graph; slug is unique within it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicNode {
    /// UUID v4 identifier.
    pub id: String,
    pub graph_id: String,
    pub canonical_label: String,
    /// Normalized matching key, unique within the graph.
    pub slug: String,
    /// Normalized alias strings.
    pub aliases: Vec<String>,
    pub confidence: Confidence,
    pub source: NodeSource,
    /// Last time learner activity touched this node (drives decay elsewhere).
    pub last_reinforced_at: DateTime<Utc>,
    /// Free-form attributes. May carry `registry_id` / `registry_label` /
    /// `registry_status` back-references and navigation metadata.
    pub attributes: Map<String, Value>,
}

impl TopicNode {
    /// Build a node from a label, deriving the slug.
    pub fn new(
        graph_id: impl Into<String>,
        label: impl Into<String>,
        confidence: f64,
        source: NodeSource,
    ) -> Self {
        let label = label.into();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            graph_id: graph_id.into(),
            slug: slugify(&label),
            canonical_label: label,
            aliases: Vec::new(),
            confidence: Confidence::new(confidence),
            source,
            last_reinforced_at: Utc::now(),
            attributes: Map::new(),
        }
    }

    /// The node's slug plus its normalized aliases — the search-term set
    /// used for registry matching.
    pub fn search_terms(&self) -> Vec<String> {
        let mut terms = vec![self.slug.clone()];
        for alias in &self.aliases {
            let normalized = slugify(alias);
            if !normalized.is_empty() && !terms.contains(&normalized) {
                terms.push(normalized);
            }
        }
        terms
    }

    /// Registry id back-reference, if this node has been linked.
    pub fn registry_id(&self) -> Option<&str> {
        self.attributes.get("registry_id").and_then(Value::as_str)
    }
}

/// Identity equality on id (DDD entity pattern).
impl PartialEq for TopicNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
