use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::errors::ParallaxResult;
use crate::graph::{EdgeType, GraphScope, ScopeType, TopicEdge, TopicEdgeEvidence, TopicGraph, TopicNode};
use crate::models::{GraphDiff, RegistryEntry, RegistryStatus, ThresholdOutcome};

/// Full graph-store interface: find-first-matching + create as separate
/// primitives (no native upsert assumed), plus the simple aggregations the
/// engines need. All methods block on I/O; callers own cancellation.
pub trait IGraphStore: Send + Sync {
    // --- Graphs ---
    fn create_graph(&self, graph: &TopicGraph) -> ParallaxResult<()>;
    fn get_graph(&self, id: &str) -> ParallaxResult<Option<TopicGraph>>;
    /// BASELINE graph for a content item at an exact scope.
    fn find_baseline_graph(
        &self,
        content_id: &str,
        scope: &GraphScope,
    ) -> ParallaxResult<Option<TopicGraph>>;
    /// First BASELINE graph for a content item at any scope.
    fn find_any_baseline_graph(&self, content_id: &str) -> ParallaxResult<Option<TopicGraph>>;
    fn find_learner_graph(
        &self,
        user_id: &str,
        content_id: &str,
    ) -> ParallaxResult<Option<TopicGraph>>;
    /// The singleton CURATED/GLOBAL graph, if it exists.
    fn find_global_graph(&self) -> ParallaxResult<Option<TopicGraph>>;
    fn set_last_compared_at(&self, graph_id: &str, at: DateTime<Utc>) -> ParallaxResult<()>;

    // --- Nodes ---
    fn create_node(&self, node: &TopicNode) -> ParallaxResult<()>;
    fn update_node(&self, node: &TopicNode) -> ParallaxResult<()>;
    fn get_node(&self, id: &str) -> ParallaxResult<Option<TopicNode>>;
    fn find_node_by_slug(&self, graph_id: &str, slug: &str) -> ParallaxResult<Option<TopicNode>>;
    fn nodes_in_graph(&self, graph_id: &str) -> ParallaxResult<Vec<TopicNode>>;

    // --- Edges (evidence eagerly loaded) ---
    fn create_edge(&self, edge: &TopicEdge) -> ParallaxResult<()>;
    fn update_edge(&self, edge: &TopicEdge) -> ParallaxResult<()>;
    fn find_edge(
        &self,
        graph_id: &str,
        from_node: &str,
        to_node: &str,
        edge_type: EdgeType,
    ) -> ParallaxResult<Option<TopicEdge>>;
    /// Most recently created edge in a graph, doubt markers included.
    fn most_recent_edge(&self, graph_id: &str) -> ParallaxResult<Option<TopicEdge>>;
    fn edges_in_graph(&self, graph_id: &str) -> ParallaxResult<Vec<TopicEdge>>;
    fn add_evidence(&self, evidence: &TopicEdgeEvidence) -> ParallaxResult<()>;

    // --- Registry ---
    fn create_registry_entry(&self, entry: &RegistryEntry) -> ParallaxResult<()>;
    /// First entry at the given scope type and status whose slug or alias
    /// set intersects `terms`.
    fn find_registry_entry(
        &self,
        scope_type: ScopeType,
        status: RegistryStatus,
        terms: &[String],
    ) -> ParallaxResult<Option<RegistryEntry>>;

    // --- Diffs ---
    /// Replace any existing diff for (user_id, content_id) with this one.
    fn replace_diff(&self, diff: &GraphDiff) -> ParallaxResult<()>;
    /// Most recent diff for a user, optionally scoped to one content item.
    fn latest_diff(
        &self,
        user_id: &str,
        content_id: Option<&str>,
    ) -> ParallaxResult<Option<GraphDiff>>;

    // --- Threshold outcomes ---
    fn record_outcome(&self, outcome: &ThresholdOutcome) -> ParallaxResult<()>;
    /// Most recent outcomes since `since`, newest first, capped at `limit`.
    fn recent_outcomes(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
        limit: usize,
    ) -> ParallaxResult<Vec<ThresholdOutcome>>;

    // --- Cross-graph search ---
    /// BASELINE graphs containing a node with this slug, excluding one
    /// content item.
    fn baseline_graphs_with_slug(
        &self,
        slug: &str,
        exclude_content_id: Option<&str>,
        limit: usize,
    ) -> ParallaxResult<Vec<TopicGraph>>;
    /// Prerequisite slugs from the CURATED/GLOBAL graph: sources of
    /// PREREQUISITE edges targeting a node with this slug.
    fn prerequisite_priors(&self, slug: &str, limit: usize) -> ParallaxResult<Vec<String>>;

    // --- Aggregation ---
    /// Annotation counts per node id for a (user, content) pair.
    fn annotation_counts(
        &self,
        user_id: &str,
        content_id: &str,
    ) -> ParallaxResult<HashMap<String, u64>>;
    fn record_annotation(
        &self,
        user_id: &str,
        content_id: &str,
        node_id: &str,
    ) -> ParallaxResult<()>;
}
