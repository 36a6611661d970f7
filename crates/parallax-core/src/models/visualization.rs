use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::graph::{Confidence, EdgeType};

/// Learner-facing status of a topic node in the merged view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeStatus {
    /// Baseline node with no learner counterpart.
    Unvisited,
    /// Learner node flagged by a doubt marker.
    Doubt,
    /// Learner confidence above the mastery threshold.
    Mastered,
    /// Learner node below mastery, no doubt flag.
    Visited,
}

/// A node in the merged baseline/learner view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewNode {
    pub id: String,
    pub label: String,
    pub slug: String,
    pub status: NodeStatus,
    pub confidence: Confidence,
    /// True for learner nodes with no baseline slug match.
    pub discovery: bool,
    pub annotation_count: u64,
    /// Navigation metadata lifted from node attributes, if present.
    pub navigation: Option<Value>,
}

/// A rendered edge. Doubt markers never appear here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewEdge {
    pub from: String,
    pub to: String,
    pub edge_type: EdgeType,
    pub confidence: Confidence,
}

/// Aggregate counts plus the source graph ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewMetadata {
    pub total: usize,
    pub mastered: usize,
    pub doubt: usize,
    pub visited: usize,
    pub unvisited: usize,
    pub baseline_graph_id: Option<String>,
    pub learner_graph_id: Option<String>,
}

/// The merged visualization returned to clients and cached for 5 minutes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<ViewNode>,
    pub edges: Vec<ViewEdge>,
    pub metadata: ViewMetadata,
}

impl GraphView {
    /// Explicit empty shape for content with no baseline graph yet.
    pub fn empty() -> Self {
        Self::default()
    }
}
