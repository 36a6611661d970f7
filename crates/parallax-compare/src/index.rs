//! In-memory indexed view of a stored topic graph: petgraph StableDiGraph
//! plus id and slug side maps for O(1) lookups during matching.

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use tracing::warn;

use parallax_core::errors::ParallaxResult;
use parallax_core::graph::{TopicEdge, TopicNode};
use parallax_core::traits::IGraphStore;

pub struct IndexedTopicGraph {
    pub graph_id: String,
    graph: StableDiGraph<TopicNode, TopicEdge>,
    by_id: HashMap<String, NodeIndex>,
    by_slug: HashMap<String, NodeIndex>,
}

impl IndexedTopicGraph {
    /// Load a stored graph into memory. Edges referencing unknown nodes are
    /// dropped with a warning rather than failing the whole comparison.
    pub fn load(store: &dyn IGraphStore, graph_id: &str) -> ParallaxResult<Self> {
        let mut indexed = Self {
            graph_id: graph_id.to_string(),
            graph: StableDiGraph::new(),
            by_id: HashMap::new(),
            by_slug: HashMap::new(),
        };

        for node in store.nodes_in_graph(graph_id)? {
            let id = node.id.clone();
            let slug = node.slug.clone();
            let index = indexed.graph.add_node(node);
            indexed.by_id.insert(id, index);
            indexed.by_slug.insert(slug, index);
        }

        for edge in store.edges_in_graph(graph_id)? {
            let (Some(&from), Some(&to)) = (
                indexed.by_id.get(&edge.from_node),
                indexed.by_id.get(&edge.to_node),
            ) else {
                warn!(graph_id = %graph_id, edge_id = %edge.id, "edge references unknown node, skipping");
                continue;
            };
            indexed.graph.add_edge(from, to, edge);
        }

        Ok(indexed)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_by_id(&self, id: &str) -> Option<&TopicNode> {
        self.by_id.get(id).map(|&i| &self.graph[i])
    }

    pub fn node_by_slug(&self, slug: &str) -> Option<&TopicNode> {
        self.by_slug.get(slug).map(|&i| &self.graph[i])
    }

    /// Slug of a node id, when the node exists in this graph.
    pub fn slug_of(&self, id: &str) -> Option<&str> {
        self.node_by_id(id).map(|n| n.slug.as_str())
    }

    /// Nodes in insertion (storage) order — keeps comparison deterministic.
    pub fn nodes(&self) -> impl Iterator<Item = &TopicNode> {
        self.graph.node_weights()
    }

    /// Edges in insertion (storage) order.
    pub fn edges(&self) -> impl Iterator<Item = &TopicEdge> {
        self.graph.edge_weights()
    }
}
