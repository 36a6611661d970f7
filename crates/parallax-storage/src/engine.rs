//! StorageEngine — owns the ConnectionPool, implements IGraphStore,
//! runs migrations on open.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};

use parallax_core::errors::ParallaxResult;
use parallax_core::graph::{
    EdgeType, GraphScope, ScopeType, TopicEdge, TopicEdgeEvidence, TopicGraph, TopicNode,
};
use parallax_core::models::{GraphDiff, RegistryEntry, RegistryStatus, ThresholdOutcome};
use parallax_core::traits::IGraphStore;

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries;

/// The main storage engine. Owns the connection pool and provides the full
/// IGraphStore interface.
pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> ParallaxResult<Self> {
        let pool = ConnectionPool::open(path)?;
        let engine = Self { pool };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> ParallaxResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        let engine = Self { pool };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> ParallaxResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| migrations::run_migrations(conn))
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }
}

impl IGraphStore for StorageEngine {
    fn create_graph(&self, graph: &TopicGraph) -> ParallaxResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::graph_ops::insert_graph(conn, graph))
    }

    fn get_graph(&self, id: &str) -> ParallaxResult<Option<TopicGraph>> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::graph_ops::get_graph(conn, id))
    }

    fn find_baseline_graph(
        &self,
        content_id: &str,
        scope: &GraphScope,
    ) -> ParallaxResult<Option<TopicGraph>> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::graph_ops::find_baseline(conn, content_id, scope))
    }

    fn find_any_baseline_graph(&self, content_id: &str) -> ParallaxResult<Option<TopicGraph>> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::graph_ops::find_any_baseline(conn, content_id))
    }

    fn find_learner_graph(
        &self,
        user_id: &str,
        content_id: &str,
    ) -> ParallaxResult<Option<TopicGraph>> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::graph_ops::find_learner(conn, user_id, content_id))
    }

    fn find_global_graph(&self) -> ParallaxResult<Option<TopicGraph>> {
        self.pool
            .writer
            .with_conn_sync(queries::graph_ops::find_global)
    }

    fn set_last_compared_at(&self, graph_id: &str, at: DateTime<Utc>) -> ParallaxResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::graph_ops::set_last_compared_at(conn, graph_id, at))
    }

    fn create_node(&self, node: &TopicNode) -> ParallaxResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::node_ops::insert_node(conn, node))
    }

    fn update_node(&self, node: &TopicNode) -> ParallaxResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::node_ops::update_node(conn, node))
    }

    fn get_node(&self, id: &str) -> ParallaxResult<Option<TopicNode>> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::node_ops::get_node(conn, id))
    }

    fn find_node_by_slug(&self, graph_id: &str, slug: &str) -> ParallaxResult<Option<TopicNode>> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::node_ops::find_by_slug(conn, graph_id, slug))
    }

    fn nodes_in_graph(&self, graph_id: &str) -> ParallaxResult<Vec<TopicNode>> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::node_ops::nodes_in_graph(conn, graph_id))
    }

    fn create_edge(&self, edge: &TopicEdge) -> ParallaxResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::edge_ops::insert_edge(conn, edge))
    }

    fn update_edge(&self, edge: &TopicEdge) -> ParallaxResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::edge_ops::update_edge(conn, edge))
    }

    fn find_edge(
        &self,
        graph_id: &str,
        from_node: &str,
        to_node: &str,
        edge_type: EdgeType,
    ) -> ParallaxResult<Option<TopicEdge>> {
        self.pool.writer.with_conn_sync(|conn| {
            queries::edge_ops::find_edge(conn, graph_id, from_node, to_node, edge_type)
        })
    }

    fn most_recent_edge(&self, graph_id: &str) -> ParallaxResult<Option<TopicEdge>> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::edge_ops::most_recent_edge(conn, graph_id))
    }

    fn edges_in_graph(&self, graph_id: &str) -> ParallaxResult<Vec<TopicEdge>> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::edge_ops::edges_in_graph(conn, graph_id))
    }

    fn add_evidence(&self, evidence: &TopicEdgeEvidence) -> ParallaxResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::edge_ops::insert_evidence(conn, evidence))
    }

    fn create_registry_entry(&self, entry: &RegistryEntry) -> ParallaxResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::registry_ops::insert_entry(conn, entry))
    }

    fn find_registry_entry(
        &self,
        scope_type: ScopeType,
        status: RegistryStatus,
        terms: &[String],
    ) -> ParallaxResult<Option<RegistryEntry>> {
        self.pool.writer.with_conn_sync(|conn| {
            queries::registry_ops::find_matching(conn, scope_type, status, terms)
        })
    }

    fn replace_diff(&self, diff: &GraphDiff) -> ParallaxResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::diff_ops::replace_diff(conn, diff))
    }

    fn latest_diff(
        &self,
        user_id: &str,
        content_id: Option<&str>,
    ) -> ParallaxResult<Option<GraphDiff>> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::diff_ops::latest_diff(conn, user_id, content_id))
    }

    fn record_outcome(&self, outcome: &ThresholdOutcome) -> ParallaxResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::outcome_ops::insert_outcome(conn, outcome))
    }

    fn recent_outcomes(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
        limit: usize,
    ) -> ParallaxResult<Vec<ThresholdOutcome>> {
        self.pool.writer.with_conn_sync(|conn| {
            queries::outcome_ops::recent_outcomes(conn, user_id, since, limit)
        })
    }

    fn baseline_graphs_with_slug(
        &self,
        slug: &str,
        exclude_content_id: Option<&str>,
        limit: usize,
    ) -> ParallaxResult<Vec<TopicGraph>> {
        self.pool.writer.with_conn_sync(|conn| {
            queries::graph_ops::baseline_graphs_with_slug(conn, slug, exclude_content_id, limit)
        })
    }

    fn prerequisite_priors(&self, slug: &str, limit: usize) -> ParallaxResult<Vec<String>> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::edge_ops::prerequisite_priors(conn, slug, limit))
    }

    fn annotation_counts(
        &self,
        user_id: &str,
        content_id: &str,
    ) -> ParallaxResult<HashMap<String, u64>> {
        self.pool.writer.with_conn_sync(|conn| {
            queries::annotation_ops::counts_by_node(conn, user_id, content_id)
        })
    }

    fn record_annotation(
        &self,
        user_id: &str,
        content_id: &str,
        node_id: &str,
    ) -> ParallaxResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            queries::annotation_ops::insert_annotation(conn, user_id, content_id, node_id)
        })
    }
}
