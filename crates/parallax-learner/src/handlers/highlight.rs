//! Highlight handling: main ideas become nodes, evidence attaches to the
//! most recent edge, doubts plant the self-loop PREREQUISITE marker.

use serde_json::json;
use tracing::debug;

use parallax_core::errors::ParallaxResult;
use parallax_core::events::{HighlightEvent, HighlightKind};
use parallax_core::graph::{
    EdgeType, EvidenceType, NodeSource, TopicEdge, TopicEdgeEvidence,
};
use parallax_core::traits::IGraphStore;

use super::{upsert_node, Mutation};

/// Confidence assigned to the doubt marker edge.
const DOUBT_CONFIDENCE: f64 = 0.3;

pub fn apply(
    store: &dyn IGraphStore,
    graph_id: &str,
    event: &HighlightEvent,
) -> ParallaxResult<Mutation> {
    match event.kind {
        HighlightKind::MainIdea => {
            upsert_node(store, graph_id, &event.text)?;
            Ok(Mutation {
                nodes_touched: 1,
                ..Default::default()
            })
        }
        HighlightKind::Evidence => apply_evidence(store, graph_id, event),
        HighlightKind::Doubt => apply_doubt(store, graph_id, event),
    }
}

/// EVIDENCE attaches to the most recently created edge. With no edge to
/// attach to, it falls back to a standalone node — a known-weak path kept
/// exactly as the reference behavior requires, surfaced as a warning.
fn apply_evidence(
    store: &dyn IGraphStore,
    graph_id: &str,
    event: &HighlightEvent,
) -> ParallaxResult<Mutation> {
    match store.most_recent_edge(graph_id)? {
        Some(edge) => {
            store.add_evidence(&highlight_evidence(&edge.id, event))?;
            Ok(Mutation {
                edges_touched: 1,
                ..Default::default()
            })
        }
        None => {
            upsert_node(store, graph_id, &event.text)?;
            debug!(graph_id = %graph_id, "evidence highlight with no recent edge");
            Ok(Mutation {
                nodes_touched: 1,
                warnings: vec![
                    "evidence highlight found no recent edge; created standalone node".into(),
                ],
                ..Default::default()
            })
        }
    }
}

/// DOUBT upserts the node, plants the self-loop PREREQUISITE marker on it,
/// and attaches the highlight as evidence of the confusion.
fn apply_doubt(
    store: &dyn IGraphStore,
    graph_id: &str,
    event: &HighlightEvent,
) -> ParallaxResult<Mutation> {
    let node = upsert_node(store, graph_id, &event.text)?;

    let marker = match store.find_edge(graph_id, &node.id, &node.id, EdgeType::Prerequisite)? {
        Some(existing) => existing,
        None => {
            let edge = TopicEdge::new(
                graph_id,
                node.id.clone(),
                node.id.clone(),
                EdgeType::Prerequisite,
                DOUBT_CONFIDENCE,
                NodeSource::User,
            )
            .with_rationale(json!({ "gap": true }));
            store.create_edge(&edge)?;
            edge
        }
    };
    store.add_evidence(&highlight_evidence(&marker.id, event))?;

    Ok(Mutation {
        nodes_touched: 1,
        edges_touched: 1,
        ..Default::default()
    })
}

fn highlight_evidence(edge_id: &str, event: &HighlightEvent) -> TopicEdgeEvidence {
    let mut evidence = TopicEdgeEvidence::new(edge_id, EvidenceType::Highlight)
        .with_highlight(event.highlight_id.clone())
        .with_excerpt(&event.text);
    if let Some(page) = event.page {
        evidence = evidence.with_page(page);
    }
    evidence
}
