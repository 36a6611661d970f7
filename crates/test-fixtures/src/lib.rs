//! Shared builders for integration tests across the workspace: graphs,
//! nodes, edges, evidence, and a migrated in-memory storage engine.

use std::sync::Arc;

use parallax_core::graph::{
    EdgeType, EvidenceType, GraphScope, NodeSource, TopicEdge, TopicEdgeEvidence, TopicGraph,
    TopicNode,
};
use parallax_core::traits::IGraphStore;
use parallax_storage::StorageEngine;

/// Fresh in-memory storage engine with migrations applied.
///
/// # Panics
/// Panics on open/migration failure — acceptable in tests.
pub fn engine() -> Arc<StorageEngine> {
    Arc::new(StorageEngine::open_in_memory().expect("in-memory engine"))
}

/// Create and persist a BASELINE graph at GLOBAL scope.
pub fn seed_baseline(store: &dyn IGraphStore, content_id: &str) -> TopicGraph {
    let graph = TopicGraph::baseline(content_id, GraphScope::global());
    store.create_graph(&graph).expect("create baseline graph");
    graph
}

/// Create and persist a LEARNER graph.
pub fn seed_learner(store: &dyn IGraphStore, user_id: &str, content_id: &str) -> TopicGraph {
    let graph = TopicGraph::learner(user_id, content_id);
    store.create_graph(&graph).expect("create learner graph");
    graph
}

/// Create and persist a node from a label.
pub fn seed_node(
    store: &dyn IGraphStore,
    graph_id: &str,
    label: &str,
    confidence: f64,
    source: NodeSource,
) -> TopicNode {
    let node = TopicNode::new(graph_id, label, confidence, source);
    store.create_node(&node).expect("create node");
    node
}

/// Create and persist an edge.
pub fn seed_edge(
    store: &dyn IGraphStore,
    graph_id: &str,
    from: &str,
    to: &str,
    edge_type: EdgeType,
    confidence: f64,
    source: NodeSource,
) -> TopicEdge {
    let edge = TopicEdge::new(graph_id, from, to, edge_type, confidence, source);
    store.create_edge(&edge).expect("create edge");
    edge
}

/// Attach `count` pieces of HIGHLIGHT evidence to an edge.
pub fn seed_evidence(store: &dyn IGraphStore, edge_id: &str, count: usize) {
    for i in 0..count {
        let evidence = TopicEdgeEvidence::new(edge_id, EvidenceType::Highlight)
            .with_highlight(format!("h-{i}"))
            .with_excerpt("seeded evidence");
        store.add_evidence(&evidence).expect("add evidence");
    }
}

/// Raw highlight event payload, as the ingress would deliver it.
pub fn highlight_payload(user: &str, content: &str, kind: &str, text: &str) -> serde_json::Value {
    serde_json::json!({
        "userId": user,
        "contentId": content,
        "eventType": "HIGHLIGHT",
        "eventData": {
            "kind": kind,
            "text": text,
            "highlightId": uuid::Uuid::new_v4().to_string(),
            "page": 1,
        },
    })
}

/// Raw Cornell synthesis payload.
pub fn synthesis_payload(user: &str, content: &str, text: &str) -> serde_json::Value {
    serde_json::json!({
        "userId": user,
        "contentId": content,
        "eventType": "CORNELL_SYNTHESIS",
        "eventData": {
            "text": text,
            "noteId": uuid::Uuid::new_v4().to_string(),
        },
    })
}
