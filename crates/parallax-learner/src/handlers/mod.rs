//! Per-event-kind handlers. Each takes the learner graph plus a typed
//! payload and returns what it touched.

pub mod highlight;
pub mod mission;
pub mod synthesis;

use chrono::Utc;

use parallax_core::errors::{ParallaxError, ParallaxResult};
use parallax_core::graph::{Confidence, NodeSource, TopicNode};
use parallax_core::traits::IGraphStore;

/// Confidence for nodes created from learner actions.
pub(crate) const LEARNER_NODE_CONFIDENCE: f64 = 0.5;
/// Confidence bump when an existing node is reinforced by new activity.
pub(crate) const REINFORCEMENT_BOOST: f64 = 0.05;

/// What a handler touched.
#[derive(Debug, Default)]
pub struct Mutation {
    pub nodes_touched: usize,
    pub edges_touched: usize,
    pub warnings: Vec<String>,
}

/// Find a node by the label's slug or create it. Reinforcement bumps the
/// existing node's confidence and `last_reinforced_at`.
pub(crate) fn upsert_node(
    store: &dyn IGraphStore,
    graph_id: &str,
    label: &str,
) -> ParallaxResult<TopicNode> {
    let candidate = TopicNode::new(graph_id, label, LEARNER_NODE_CONFIDENCE, NodeSource::User);
    if candidate.slug.is_empty() {
        return Err(ParallaxError::validation("topic label yields an empty slug"));
    }
    match store.find_node_by_slug(graph_id, &candidate.slug)? {
        Some(mut existing) => {
            existing.confidence =
                Confidence::new(existing.confidence.value() + REINFORCEMENT_BOOST);
            existing.last_reinforced_at = Utc::now();
            store.update_node(&existing)?;
            Ok(existing)
        }
        None => {
            store.create_node(&candidate)?;
            Ok(candidate)
        }
    }
}
