//! CompareEngine: orchestrates load → match → classify → persist.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use parallax_cache::CacheFacade;
use parallax_core::errors::{CompareError, ParallaxResult};
use parallax_core::models::{DiffPayload, DiffSummary, DiscoveryEntry, GapEntry, GraphDiff};
use parallax_core::traits::IGraphStore;

use crate::classify;
use crate::index::IndexedTopicGraph;
use crate::matching;

/// Diffs BASELINE vs LEARNER for a (user, content) pair and persists the
/// result, replacing any prior diff for the pair.
pub struct CompareEngine {
    store: Arc<dyn IGraphStore>,
    cache: Arc<CacheFacade>,
}

impl CompareEngine {
    pub fn new(store: Arc<dyn IGraphStore>, cache: Arc<CacheFacade>) -> Self {
        Self { store, cache }
    }

    /// Compare the two graphs. Both must already exist — the comparator
    /// never builds graphs on demand.
    pub fn compare(&self, user_id: &str, content_id: &str) -> ParallaxResult<GraphDiff> {
        let baseline_graph = self
            .store
            .find_any_baseline_graph(content_id)?
            .ok_or_else(|| CompareError::BaselineNotFound {
                content_id: content_id.to_string(),
            })?;
        let learner_graph = self
            .store
            .find_learner_graph(user_id, content_id)?
            .ok_or_else(|| CompareError::LearnerNotFound {
                user_id: user_id.to_string(),
                content_id: content_id.to_string(),
            })?;

        let baseline = IndexedTopicGraph::load(self.store.as_ref(), &baseline_graph.id)?;
        let learner = IndexedTopicGraph::load(self.store.as_ref(), &learner_graph.id)?;

        let nodes = matching::match_nodes(&baseline, &learner);
        let edges = matching::match_edges(&baseline, &learner, &nodes.match_map);

        let baseline_only_edges: Vec<GapEntry> = edges
            .baseline_only
            .iter()
            .map(|edge| GapEntry {
                edge_id: edge.id.clone(),
                from_slug: baseline.slug_of(&edge.from_node).unwrap_or_default().to_string(),
                to_slug: baseline.slug_of(&edge.to_node).unwrap_or_default().to_string(),
                edge_type: edge.edge_type,
                confidence: edge.confidence,
                class: classify::classify_gap(edge.confidence.value()),
            })
            .collect();

        let learner_only_edges: Vec<DiscoveryEntry> = edges
            .learner_only
            .iter()
            .map(|edge| {
                let from_slug = learner.slug_of(&edge.from_node).unwrap_or_default();
                let to_slug = learner.slug_of(&edge.to_node).unwrap_or_default();
                DiscoveryEntry {
                    edge_id: edge.id.clone(),
                    from_slug: from_slug.to_string(),
                    to_slug: to_slug.to_string(),
                    edge_type: edge.edge_type,
                    confidence: edge.confidence,
                    evidence_count: edge.evidence.len(),
                    class: classify::classify_learner_edge(edge, from_slug, to_slug, &self.cache),
                }
            })
            .collect();

        let payload = DiffPayload {
            nodes_matched: nodes.matched_count(),
            missing_in_learner: nodes.missing_in_learner,
            extra_in_learner: nodes.extra_in_learner,
            edges_matched: edges.matched,
            baseline_only_edges,
            learner_only_edges,
        };
        let summary = DiffSummary::from_payload(&payload);

        let diff = GraphDiff {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            content_id: content_id.to_string(),
            baseline_graph_id: baseline_graph.id,
            learner_graph_id: learner_graph.id,
            payload,
            summary,
            computed_at: Utc::now(),
        };
        self.store.replace_diff(&diff)?;

        info!(
            user_id = %user_id,
            content_id = %content_id,
            nodes_matched = diff.payload.nodes_matched,
            changes = diff.payload.change_count(),
            "graph comparison persisted"
        );
        Ok(diff)
    }
}
