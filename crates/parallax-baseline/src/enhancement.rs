//! Edge enhancement: optionally refine coarse PART_OF edges into
//! finer-grained types via a pluggable classifier, with a per-signature
//! cache consult so external classification cost stays bounded.

use parallax_cache::CacheFacade;
use tracing::debug;

use parallax_core::errors::ParallaxResult;
use parallax_core::graph::{EdgeType, TopicEdge, TopicNode};
use parallax_core::traits::IGraphStore;

/// Decides a finer-grained edge type for a candidate relation. The default
/// implementation never decides anything — classification is an external,
/// possibly model-backed concern.
pub trait EdgeClassifier: Send + Sync {
    fn classify(&self, from_label: &str, to_label: &str) -> Option<EdgeType>;
}

/// Classifier that declines every edge.
pub struct NoOpClassifier;

impl EdgeClassifier for NoOpClassifier {
    fn classify(&self, _from_label: &str, _to_label: &str) -> Option<EdgeType> {
        None
    }
}

/// Run the enhancement pass over a set of edges. Cache hits apply the
/// cached decision and skip re-classification; misses consult the
/// classifier and cache any decision it makes.
///
/// Returns the number of edges whose type changed.
pub fn enhance_edges(
    store: &dyn IGraphStore,
    cache: &CacheFacade,
    classifier: &dyn EdgeClassifier,
    edges: &[TopicEdge],
    nodes: &[TopicNode],
) -> ParallaxResult<usize> {
    let mut changed = 0;

    for edge in edges {
        let Some(from) = nodes.iter().find(|n| n.id == edge.from_node) else {
            continue;
        };
        let Some(to) = nodes.iter().find(|n| n.id == edge.to_node) else {
            continue;
        };

        let decided = match cache.edge_decision(&from.slug, &to.slug) {
            Some(cached) => {
                debug!(from = %from.slug, to = %to.slug, "edge decision cache hit");
                Some(cached)
            }
            None => {
                let decision = classifier.classify(&from.canonical_label, &to.canonical_label);
                if let Some(edge_type) = decision {
                    cache.store_edge_decision(&from.slug, &to.slug, edge_type);
                }
                decision
            }
        };

        if let Some(edge_type) = decided {
            if edge_type != edge.edge_type {
                let mut updated = edge.clone();
                updated.edge_type = edge_type;
                store.update_edge(&updated)?;
                changed += 1;
            }
        }
    }

    Ok(changed)
}
