//! BaselineBuilder: find-or-create the BASELINE graph and populate it from
//! structural signals. Idempotent — a rebuild with unchanged signals
//! creates nothing new.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use parallax_cache::CacheFacade;
use parallax_core::errors::ParallaxResult;
use parallax_core::graph::{
    EdgeType, EvidenceType, GraphScope, NodeSource, TopicEdge, TopicEdgeEvidence, TopicGraph,
    TopicNode,
};
use parallax_core::models::{BuildReport, ContentSignals};
use parallax_core::traits::IGraphStore;
use parallax_registry::RegistryLinker;

use crate::enhancement::{self, EdgeClassifier, NoOpClassifier};
use crate::extraction::{self, PART_OF_CONFIDENCE};

/// Input to a baseline build.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub content_id: String,
    pub scope: GraphScope,
    pub signals: ContentSignals,
}

impl BuildRequest {
    /// Build at GLOBAL scope — the common case.
    pub fn global(content_id: impl Into<String>, signals: ContentSignals) -> Self {
        Self {
            content_id: content_id.into(),
            scope: GraphScope::global(),
            signals,
        }
    }
}

/// Constructs the deterministic BASELINE graph for a content item.
pub struct BaselineBuilder {
    store: Arc<dyn IGraphStore>,
    linker: RegistryLinker,
    cache: Option<Arc<CacheFacade>>,
    classifier: Box<dyn EdgeClassifier>,
}

impl BaselineBuilder {
    pub fn new(store: Arc<dyn IGraphStore>) -> Self {
        let linker = RegistryLinker::new(store.clone());
        Self {
            store,
            linker,
            cache: None,
            classifier: Box::new(NoOpClassifier),
        }
    }

    /// Enable the edge-enhancement cache consult.
    pub fn with_cache(mut self, cache: Arc<CacheFacade>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Plug in a real edge classifier.
    pub fn with_classifier(mut self, classifier: Box<dyn EdgeClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Find-or-create the BASELINE graph for the request's scope key and
    /// populate it. Registry linking and edge enhancement are best-effort:
    /// their failures land in `report.warnings`, never fail the build.
    pub fn build(&self, request: &BuildRequest) -> ParallaxResult<BuildReport> {
        let graph = self.find_or_create_graph(&request.content_id, &request.scope)?;
        let mut report = BuildReport {
            graph_id: graph.id.clone(),
            ..Default::default()
        };

        let extraction = extraction::extract(&request.signals);

        // Nodes first: slug-keyed find-or-create, keeping extraction index → node id.
        let mut node_ids: HashMap<usize, String> = HashMap::new();
        for (index, spec) in extraction.nodes.iter().enumerate() {
            let node = TopicNode::new(
                &graph.id,
                spec.label.clone(),
                spec.confidence,
                NodeSource::Deterministic,
            );
            match self.store.find_node_by_slug(&graph.id, &node.slug)? {
                Some(existing) => {
                    node_ids.insert(index, existing.id);
                }
                None => {
                    self.store.create_node(&node)?;
                    report.nodes_created += 1;
                    node_ids.insert(index, node.id);
                }
            }
        }

        // Hierarchy edges: parent → child PART_OF with PAGE_AREA evidence.
        // Existing edges are matched by endpoints regardless of type, so a
        // rebuild never undoes an enhancement pass that retyped one.
        let existing_edges: HashMap<(String, String), TopicEdge> = self
            .store
            .edges_in_graph(&graph.id)?
            .into_iter()
            .map(|e| ((e.from_node.clone(), e.to_node.clone()), e))
            .collect();

        let mut touched_edges = Vec::new();
        for spec in &extraction.edges {
            let (Some(from), Some(to)) = (node_ids.get(&spec.parent), node_ids.get(&spec.child))
            else {
                continue;
            };
            match existing_edges.get(&(from.clone(), to.clone())) {
                Some(existing) => touched_edges.push(existing.clone()),
                None => {
                    let mut edge = TopicEdge::new(
                        &graph.id,
                        from.clone(),
                        to.clone(),
                        EdgeType::PartOf,
                        PART_OF_CONFIDENCE,
                        NodeSource::Deterministic,
                    );
                    let mut evidence =
                        TopicEdgeEvidence::new(&edge.id, EvidenceType::PageArea);
                    if let Some(page) = spec.page {
                        evidence = evidence.with_page(page);
                    }
                    edge.evidence.push(evidence);
                    self.store.create_edge(&edge)?;
                    report.edges_created += 1;
                    touched_edges.push(edge);
                }
            }
        }

        // Optional enhancement pass, cache-gated per edge signature.
        if let Some(cache) = &self.cache {
            let nodes = self.store.nodes_in_graph(&graph.id)?;
            if let Err(e) = enhancement::enhance_edges(
                self.store.as_ref(),
                cache,
                self.classifier.as_ref(),
                &touched_edges,
                &nodes,
            ) {
                warn!(content_id = %request.content_id, error = %e, "edge enhancement failed");
                report.warnings.push(format!("edge enhancement failed: {e}"));
            }
        }

        // Registry linking is best-effort; the build succeeds regardless.
        match self.linker.link_topics(&request.content_id, &graph.id) {
            Ok(link) => {
                report.linked = link.matched;
                report.candidates_created = link.candidates_created;
            }
            Err(e) => {
                warn!(content_id = %request.content_id, error = %e, "registry linking failed");
                report.warnings.push(format!("registry linking failed: {e}"));
            }
        }

        report.nodes_total = self.store.nodes_in_graph(&graph.id)?.len();
        info!(
            content_id = %request.content_id,
            graph_id = %report.graph_id,
            nodes_created = report.nodes_created,
            edges_created = report.edges_created,
            "baseline build complete"
        );
        Ok(report)
    }

    fn find_or_create_graph(
        &self,
        content_id: &str,
        scope: &GraphScope,
    ) -> ParallaxResult<TopicGraph> {
        if let Some(graph) = self.store.find_baseline_graph(content_id, scope)? {
            return Ok(graph);
        }
        let graph = TopicGraph::baseline(content_id, scope.clone());
        self.store.create_graph(&graph)?;
        Ok(graph)
    }
}
