//! Registry linking: connect every node of a baseline graph to the global
//! topic catalogue.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use parallax_core::errors::ParallaxResult;
use parallax_core::graph::{ScopeType, TopicGraph, TopicNode};
use parallax_core::models::{LinkReport, RegistryEntry, RegistryStatus};
use parallax_core::traits::IGraphStore;

/// Matches and dedupes topic labels against the global registry.
pub struct RegistryLinker {
    store: Arc<dyn IGraphStore>,
}

impl RegistryLinker {
    pub fn new(store: Arc<dyn IGraphStore>) -> Self {
        Self { store }
    }

    /// Link every node of a baseline graph to the registry.
    ///
    /// A match records `{registry_id, registry_label}` on the node's
    /// attributes — no structural graph change. A miss creates a CANDIDATE
    /// entry (confidence 0.3, stats noting the originating content) and
    /// links the node with `registry_status = "CANDIDATE"`. Already-linked
    /// nodes are left alone so repeated builds stay idempotent.
    pub fn link_topics(&self, content_id: &str, graph_id: &str) -> ParallaxResult<LinkReport> {
        let nodes = self.store.nodes_in_graph(graph_id)?;
        let mut report = LinkReport::default();

        for mut node in nodes {
            if node.registry_id().is_some() {
                report.matched += 1;
                continue;
            }

            let terms = node.search_terms();
            match self
                .store
                .find_registry_entry(ScopeType::Global, RegistryStatus::Active, &terms)?
            {
                Some(entry) => {
                    link_node(&mut node, &entry, None);
                    self.store.update_node(&node)?;
                    report.matched += 1;
                    debug!(slug = %node.slug, registry_id = %entry.id, "linked to registry");
                }
                None => {
                    let entry = RegistryEntry::candidate(
                        node.canonical_label.clone(),
                        node.slug.clone(),
                        json!({ "origin_content_id": content_id }),
                    );
                    self.store.create_registry_entry(&entry)?;
                    link_node(&mut node, &entry, Some(RegistryStatus::Candidate));
                    self.store.update_node(&node)?;
                    report.candidates_created += 1;
                    debug!(slug = %node.slug, registry_id = %entry.id, "created registry candidate");
                }
            }
        }

        info!(
            content_id = %content_id,
            matched = report.matched,
            candidates = report.candidates_created,
            "registry linking complete"
        );
        Ok(report)
    }

    /// Lazily create the singleton CURATED/GLOBAL graph used as the anchor
    /// for registry-level graph operations.
    pub fn ensure_global_graph(&self) -> ParallaxResult<TopicGraph> {
        if let Some(graph) = self.store.find_global_graph()? {
            return Ok(graph);
        }
        let graph = TopicGraph::curated_global();
        self.store.create_graph(&graph)?;
        info!(graph_id = %graph.id, "created global curated graph");
        Ok(graph)
    }
}

fn link_node(node: &mut TopicNode, entry: &RegistryEntry, status: Option<RegistryStatus>) {
    node.attributes
        .insert("registry_id".into(), json!(entry.id));
    node.attributes
        .insert("registry_label".into(), json!(entry.canonical_label));
    if let Some(status) = status {
        node.attributes
            .insert("registry_status".into(), json!(status.as_str()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parallax_core::graph::NodeSource;
    use test_fixtures as fx;

    #[test]
    fn match_records_back_reference() {
        let store = fx::engine();
        let graph = fx::seed_baseline(store.as_ref(), "c1");
        let node = fx::seed_node(store.as_ref(), &graph.id, "Photosynthesis", 0.9, NodeSource::Deterministic);

        let mut entry =
            RegistryEntry::candidate("Photosynthesis", "photosynthesis", json!({}));
        entry.status = RegistryStatus::Active;
        store.create_registry_entry(&entry).unwrap();

        let linker = RegistryLinker::new(store.clone());
        let report = linker.link_topics("c1", &graph.id).unwrap();
        assert_eq!(report.matched, 1);
        assert_eq!(report.candidates_created, 0);

        let linked = store.get_node(&node.id).unwrap().unwrap();
        assert_eq!(linked.registry_id(), Some(entry.id.as_str()));
        assert!(linked.attributes.get("registry_status").is_none());
    }

    #[test]
    fn miss_creates_candidate_and_links() {
        let store = fx::engine();
        let graph = fx::seed_baseline(store.as_ref(), "c1");
        let node = fx::seed_node(store.as_ref(), &graph.id, "Krebs Cycle", 0.9, NodeSource::Deterministic);

        let linker = RegistryLinker::new(store.clone());
        let report = linker.link_topics("c1", &graph.id).unwrap();
        assert_eq!(report.matched, 0);
        assert_eq!(report.candidates_created, 1);

        let linked = store.get_node(&node.id).unwrap().unwrap();
        assert!(linked.registry_id().is_some());
        assert_eq!(
            linked.attributes.get("registry_status").and_then(|v| v.as_str()),
            Some("CANDIDATE")
        );

        // The created candidate carries origin stats and tentative confidence.
        let created = store
            .find_registry_entry(
                ScopeType::Global,
                RegistryStatus::Candidate,
                &["krebs-cycle".to_string()],
            )
            .unwrap()
            .unwrap();
        assert_eq!(created.stats["origin_content_id"], "c1");
        assert!((created.confidence.value() - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn candidate_entries_do_not_match_active_lookup() {
        let store = fx::engine();
        let graph = fx::seed_baseline(store.as_ref(), "c1");
        fx::seed_node(store.as_ref(), &graph.id, "Entropy", 0.9, NodeSource::Deterministic);

        // A CANDIDATE with the same slug must not count as a match.
        store
            .create_registry_entry(&RegistryEntry::candidate("Entropy", "entropy", json!({})))
            .unwrap();

        let linker = RegistryLinker::new(store.clone());
        let report = linker.link_topics("c1", &graph.id).unwrap();
        assert_eq!(report.matched, 0);
        assert_eq!(report.candidates_created, 1);
    }

    #[test]
    fn relinking_is_idempotent() {
        let store = fx::engine();
        let graph = fx::seed_baseline(store.as_ref(), "c1");
        fx::seed_node(store.as_ref(), &graph.id, "Mitosis", 0.9, NodeSource::Deterministic);

        let linker = RegistryLinker::new(store.clone());
        let first = linker.link_topics("c1", &graph.id).unwrap();
        assert_eq!(first.candidates_created, 1);

        let second = linker.link_topics("c1", &graph.id).unwrap();
        assert_eq!(second.candidates_created, 0);
        assert_eq!(second.matched, 1);
    }

    #[test]
    fn alias_intersection_matches() {
        let store = fx::engine();
        let graph = fx::seed_baseline(store.as_ref(), "c1");
        let mut node =
            TopicNode::new(&graph.id, "Cell Respiration", 0.9, NodeSource::Deterministic);
        node.aliases = vec!["cellular respiration".into()];
        store.create_node(&node).unwrap();

        let mut entry = RegistryEntry::candidate(
            "Cellular Respiration",
            "cellular-respiration",
            json!({}),
        );
        entry.status = RegistryStatus::Active;
        store.create_registry_entry(&entry).unwrap();

        let linker = RegistryLinker::new(store.clone());
        let report = linker.link_topics("c1", &graph.id).unwrap();
        assert_eq!(report.matched, 1);
    }

    #[test]
    fn ensure_global_graph_is_a_singleton() {
        let store = fx::engine();
        let linker = RegistryLinker::new(store.clone());

        let first = linker.ensure_global_graph().unwrap();
        let second = linker.ensure_global_graph().unwrap();
        assert_eq!(first.id, second.id);
    }
}
