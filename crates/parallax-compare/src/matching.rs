//! Node and edge matching between the indexed baseline and learner graphs.

use std::collections::HashMap;

use parallax_core::graph::{EdgeType, TopicEdge};
use parallax_core::models::NodeDiffEntry;

use crate::index::IndexedTopicGraph;

/// Outcome of slug-based node matching.
#[derive(Debug, Default)]
pub struct NodeMatches {
    /// baseline node id → learner node id.
    pub match_map: HashMap<String, String>,
    pub missing_in_learner: Vec<NodeDiffEntry>,
    pub extra_in_learner: Vec<NodeDiffEntry>,
}

impl NodeMatches {
    pub fn matched_count(&self) -> usize {
        self.match_map.len()
    }
}

/// Every baseline node either pairs with a learner node (by slug) or is
/// missing; leftover learner nodes are extra (discovery candidates).
pub fn match_nodes(baseline: &IndexedTopicGraph, learner: &IndexedTopicGraph) -> NodeMatches {
    let mut matches = NodeMatches::default();

    for node in baseline.nodes() {
        match learner.node_by_slug(&node.slug) {
            Some(counterpart) => {
                matches
                    .match_map
                    .insert(node.id.clone(), counterpart.id.clone());
            }
            None => matches.missing_in_learner.push(node_entry(node)),
        }
    }

    let matched_learner_ids: std::collections::HashSet<&str> =
        matches.match_map.values().map(String::as_str).collect();
    for node in learner.nodes() {
        if !matched_learner_ids.contains(node.id.as_str()) {
            matches.extra_in_learner.push(node_entry(node));
        }
    }

    matches
}

fn node_entry(node: &parallax_core::graph::TopicNode) -> NodeDiffEntry {
    NodeDiffEntry {
        node_id: node.id.clone(),
        slug: node.slug.clone(),
        label: node.canonical_label.clone(),
        confidence: node.confidence,
    }
}

/// Outcome of signature-based edge matching.
#[derive(Debug, Default)]
pub struct EdgeMatches<'a> {
    pub matched: usize,
    pub baseline_only: Vec<&'a TopicEdge>,
    pub learner_only: Vec<&'a TopicEdge>,
}

/// Signature `from:to:type` with baseline endpoints remapped through the
/// node match map. An edge matches on an identical signature, or — the one
/// controlled relaxation — a baseline SUPPORTS edge matches a learner
/// LINKS_TO edge at the same endpoints. Doubt markers are sentinels, not
/// relations, and never take part.
pub fn match_edges<'a>(
    baseline: &'a IndexedTopicGraph,
    learner: &'a IndexedTopicGraph,
    match_map: &HashMap<String, String>,
) -> EdgeMatches<'a> {
    let mut matches = EdgeMatches::default();

    let mut learner_by_signature: HashMap<String, &TopicEdge> = learner
        .edges()
        .filter(|e| !e.is_doubt_marker())
        .map(|e| (signature(&e.from_node, &e.to_node, e.edge_type), e))
        .collect();

    for edge in baseline.edges().filter(|e| !e.is_doubt_marker()) {
        let from = remap(&edge.from_node, match_map);
        let to = remap(&edge.to_node, match_map);

        let exact = signature(from, to, edge.edge_type);
        if learner_by_signature.remove(&exact).is_some() {
            matches.matched += 1;
            continue;
        }

        if edge.edge_type == EdgeType::Supports {
            let weak = signature(from, to, EdgeType::LinksTo);
            if learner_by_signature.remove(&weak).is_some() {
                matches.matched += 1;
                continue;
            }
        }

        matches.baseline_only.push(edge);
    }

    let mut leftover: Vec<&TopicEdge> = learner_by_signature.into_values().collect();
    // HashMap drain order is arbitrary; restore storage order for
    // deterministic diffs.
    leftover.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    matches.learner_only = leftover;

    matches
}

fn signature(from: &str, to: &str, edge_type: EdgeType) -> String {
    format!("{from}:{to}:{}", edge_type.as_str())
}

fn remap<'a>(node_id: &'a str, match_map: &'a HashMap<String, String>) -> &'a str {
    match_map.get(node_id).map(String::as_str).unwrap_or(node_id)
}
