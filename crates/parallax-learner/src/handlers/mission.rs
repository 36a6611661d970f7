//! Mission handling: each completed transfer mission maps to one edge with
//! fixed semantics, confidence 0.7, and TIMESTAMP evidence referencing the
//! transfer attempt.

use serde_json::{json, Value};

use parallax_core::errors::ParallaxResult;
use parallax_core::events::MissionEvent;
use parallax_core::graph::{EdgeType, EvidenceType, NodeSource, TopicEdge, TopicEdgeEvidence};
use parallax_core::traits::IGraphStore;

use super::{upsert_node, Mutation};

/// Confidence for mission-derived edges.
const MISSION_CONFIDENCE: f64 = 0.7;

pub fn apply(
    store: &dyn IGraphStore,
    graph_id: &str,
    event: &MissionEvent,
) -> ParallaxResult<Mutation> {
    let (from_label, to_label, edge_type, rationale) = match event {
        MissionEvent::Hugging { topic, domain, .. } => {
            (topic, domain, EdgeType::AppliesIn, Value::Null)
        }
        MissionEvent::Bridging { topic, principle, .. } => {
            (topic, principle, EdgeType::Explains, Value::Null)
        }
        MissionEvent::Analogy {
            topic_a,
            topic_b,
            mapping,
            ..
        } => (
            topic_a,
            topic_b,
            EdgeType::Analogy,
            json!({ "mapping": mapping }),
        ),
        MissionEvent::Iceberg {
            cause,
            effect,
            positive,
            ..
        }
        | MissionEvent::ConnectionCircle {
            cause,
            effect,
            positive,
            ..
        } => (
            cause,
            effect,
            EdgeType::Causes,
            json!({ "sign": if *positive { "+" } else { "-" } }),
        ),
    };

    let from = upsert_node(store, graph_id, from_label)?;
    let to = upsert_node(store, graph_id, to_label)?;

    let edge = match store.find_edge(graph_id, &from.id, &to.id, edge_type)? {
        Some(existing) => existing,
        None => {
            let edge = TopicEdge::new(
                graph_id,
                from.id.clone(),
                to.id.clone(),
                edge_type,
                MISSION_CONFIDENCE,
                NodeSource::User,
            )
            .with_rationale(rationale);
            store.create_edge(&edge)?;
            edge
        }
    };

    let evidence = TopicEdgeEvidence::new(&edge.id, EvidenceType::Timestamp)
        .with_timestamp_ref(event.transfer_attempt_id().to_string());
    store.add_evidence(&evidence)?;

    Ok(Mutation {
        nodes_touched: 2,
        edges_touched: 1,
        ..Default::default()
    })
}
