//! Recommendation assembly: run both strategies, merge, dedup, rank.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use parallax_core::errors::ParallaxResult;
use parallax_core::graph::TopicEdge;
use parallax_core::models::Recommendation;
use parallax_core::traits::IGraphStore;

/// Score for content that covers a missing topic.
const GAP_SCORE: u32 = 10;
/// Score for content that covers a prerequisite of a weak node.
const PREREQUISITE_SCORE: u32 = 7;

/// Fan-out caps, applied at every step to bound storage work.
const MISSING_TOPICS_CAP: usize = 10;
const GRAPHS_PER_TOPIC_CAP: usize = 5;
const LEARNER_NODES_CAP: usize = 20;
const WEAK_NODES_CAP: usize = 5;
const PRIORS_PER_SLUG_CAP: usize = 2;
const GRAPHS_PER_PRIOR_CAP: usize = 2;
const RESULTS_CAP: usize = 5;

/// Evidence total below which a learner node counts as weak.
const WEAK_EVIDENCE_FLOOR: usize = 2;

pub struct RecommendEngine {
    store: Arc<dyn IGraphStore>,
}

impl RecommendEngine {
    pub fn new(store: Arc<dyn IGraphStore>) -> Self {
        Self { store }
    }

    /// Top-5 recommendations for a user, optionally scoped to the content
    /// they are currently working through.
    pub fn recommendations(
        &self,
        user_id: &str,
        context_content_id: Option<&str>,
    ) -> ParallaxResult<Vec<Recommendation>> {
        let diff = self.store.latest_diff(user_id, context_content_id)?;

        let mut merged = Vec::new();
        if let Some(diff) = &diff {
            merged.extend(self.gap_recovery(diff)?);
        }

        // Prerequisites run against the learner graph of the context
        // content, falling back to the diffed content.
        let prereq_content = context_content_id
            .map(str::to_string)
            .or_else(|| diff.as_ref().map(|d| d.content_id.clone()));
        if let Some(content_id) = prereq_content {
            merged.extend(self.prerequisites(user_id, &content_id)?);
        }

        // Dedup by target content, first occurrence wins, then rank.
        let mut seen = HashSet::new();
        merged.retain(|r| seen.insert(r.content_id.clone()));
        merged.sort_by(|a, b| b.score.cmp(&a.score));
        merged.truncate(RESULTS_CAP);

        debug!(user_id = %user_id, count = merged.len(), "recommendations assembled");
        Ok(merged)
    }

    /// Strategy 1: content whose baseline covers topics missing from the
    /// learner graph.
    fn gap_recovery(
        &self,
        diff: &parallax_core::models::GraphDiff,
    ) -> ParallaxResult<Vec<Recommendation>> {
        let mut results = Vec::new();
        for missing in diff.payload.missing_in_learner.iter().take(MISSING_TOPICS_CAP) {
            let graphs = self.store.baseline_graphs_with_slug(
                &missing.slug,
                Some(&diff.content_id),
                GRAPHS_PER_TOPIC_CAP,
            )?;
            for graph in graphs {
                let Some(content_id) = graph.content_id else {
                    continue;
                };
                results.push(Recommendation {
                    content_id,
                    score: GAP_SCORE,
                    reason: format!("covers missing topic: {}", missing.label),
                });
            }
        }
        Ok(results)
    }

    /// Strategy 2: content covering global prerequisite priors of the
    /// learner's weakly-evidenced nodes.
    fn prerequisites(
        &self,
        user_id: &str,
        content_id: &str,
    ) -> ParallaxResult<Vec<Recommendation>> {
        let Some(learner) = self.store.find_learner_graph(user_id, content_id)? else {
            return Ok(Vec::new());
        };

        let nodes = self.store.nodes_in_graph(&learner.id)?;
        let edges = self.store.edges_in_graph(&learner.id)?;
        let evidence_totals = incident_evidence_totals(&edges);

        let weak_nodes: Vec<_> = nodes
            .iter()
            .take(LEARNER_NODES_CAP)
            .filter(|n| evidence_totals.get(n.id.as_str()).copied().unwrap_or(0) < WEAK_EVIDENCE_FLOOR)
            .take(WEAK_NODES_CAP)
            .collect();

        let mut results = Vec::new();
        for node in weak_nodes {
            let priors = self
                .store
                .prerequisite_priors(&node.slug, PRIORS_PER_SLUG_CAP)?;
            for prior_slug in priors {
                let graphs = self.store.baseline_graphs_with_slug(
                    &prior_slug,
                    Some(content_id),
                    GRAPHS_PER_PRIOR_CAP,
                )?;
                for graph in graphs {
                    let Some(target) = graph.content_id else {
                        continue;
                    };
                    results.push(Recommendation {
                        content_id: target,
                        score: PREREQUISITE_SCORE,
                        reason: format!("prerequisite for {}", node.canonical_label),
                    });
                }
            }
        }
        Ok(results)
    }
}

/// Total evidence per node across its incident edges.
fn incident_evidence_totals(edges: &[TopicEdge]) -> HashMap<&str, usize> {
    let mut totals: HashMap<&str, usize> = HashMap::new();
    for edge in edges {
        *totals.entry(edge.from_node.as_str()).or_default() += edge.evidence.len();
        if edge.to_node != edge.from_node {
            *totals.entry(edge.to_node.as_str()).or_default() += edge.evidence.len();
        }
    }
    totals
}
