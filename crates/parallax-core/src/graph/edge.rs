use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::confidence::Confidence;
use super::evidence::TopicEdgeEvidence;
use super::node::NodeSource;

/// Relation semantics between two topic nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeType {
    Prerequisite,
    Explains,
    PartOf,
    AppliesIn,
    Analogy,
    Causes,
    LinksTo,
    Supports,
}

impl EdgeType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prerequisite => "PREREQUISITE",
            Self::Explains => "EXPLAINS",
            Self::PartOf => "PART_OF",
            Self::AppliesIn => "APPLIES_IN",
            Self::Analogy => "ANALOGY",
            Self::Causes => "CAUSES",
            Self::LinksTo => "LINKS_TO",
            Self::Supports => "SUPPORTS",
        }
    }

    pub fn from_str_name(s: &str) -> Option<Self> {
        match s {
            "PREREQUISITE" => Some(Self::Prerequisite),
            "EXPLAINS" => Some(Self::Explains),
            "PART_OF" => Some(Self::PartOf),
            "APPLIES_IN" => Some(Self::AppliesIn),
            "ANALOGY" => Some(Self::Analogy),
            "CAUSES" => Some(Self::Causes),
            "LINKS_TO" => Some(Self::LinksTo),
            "SUPPORTS" => Some(Self::Supports),
            _ => None,
        }
    }
}

/// A directed edge between two nodes of the same graph. Evidence is owned by
/// the edge and loaded with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicEdge {
    /// UUID v4 identifier.
    pub id: String,
    pub graph_id: String,
    pub from_node: String,
    pub to_node: String,
    pub edge_type: EdgeType,
    pub confidence: Confidence,
    pub source: NodeSource,
    /// Free-form rationale payload (`{"gap": true}`, analogy mappings,
    /// causal sign, ...).
    pub rationale: Value,
    pub created_at: DateTime<Utc>,
    pub evidence: Vec<TopicEdgeEvidence>,
}

impl TopicEdge {
    pub fn new(
        graph_id: impl Into<String>,
        from_node: impl Into<String>,
        to_node: impl Into<String>,
        edge_type: EdgeType,
        confidence: f64,
        source: NodeSource,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            graph_id: graph_id.into(),
            from_node: from_node.into(),
            to_node: to_node.into(),
            edge_type,
            confidence: Confidence::new(confidence),
            source,
            rationale: Value::Null,
            created_at: Utc::now(),
            evidence: Vec::new(),
        }
    }

    /// Attach a rationale payload (builder style).
    pub fn with_rationale(mut self, rationale: Value) -> Self {
        self.rationale = rationale;
        self
    }

    /// A self-loop PREREQUISITE edge is the reserved doubt/gap marker, not a
    /// real relation. Excluded from every rendered edge list.
    pub fn is_doubt_marker(&self) -> bool {
        self.edge_type == EdgeType::Prerequisite && self.from_node == self.to_node
    }
}

/// Identity equality on id (DDD entity pattern).
impl PartialEq for TopicEdge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubt_marker_requires_prerequisite_self_loop() {
        let marker = TopicEdge::new("g", "n1", "n1", EdgeType::Prerequisite, 0.3, NodeSource::User);
        assert!(marker.is_doubt_marker());

        let self_links = TopicEdge::new("g", "n1", "n1", EdgeType::LinksTo, 0.3, NodeSource::User);
        assert!(!self_links.is_doubt_marker());

        let real = TopicEdge::new("g", "n1", "n2", EdgeType::Prerequisite, 0.3, NodeSource::User);
        assert!(!real.is_doubt_marker());
    }
}
