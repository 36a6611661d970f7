//! Merged baseline/learner view assembly.
//!
//! Baseline nodes get a status from their learner counterpart (matched by
//! slug); learner-only nodes render as discoveries. Doubt markers drive the
//! DOUBT status and are excluded from the rendered edge list.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use parallax_core::errors::ParallaxResult;
use parallax_core::graph::{TopicEdge, TopicNode};
use parallax_core::models::{GraphView, NodeStatus, ViewEdge, ViewMetadata, ViewNode};
use parallax_core::traits::IGraphStore;

/// Render the merged view. Returns the explicit empty shape when the
/// content has no baseline graph.
pub fn render(store: &dyn IGraphStore, user_id: &str, content_id: &str) -> ParallaxResult<GraphView> {
    let Some(baseline) = store.find_any_baseline_graph(content_id)? else {
        return Ok(GraphView::empty());
    };
    let learner = store.find_learner_graph(user_id, content_id)?;

    let baseline_nodes = store.nodes_in_graph(&baseline.id)?;
    let baseline_edges = store.edges_in_graph(&baseline.id)?;
    let (learner_nodes, learner_edges) = match &learner {
        Some(graph) => (
            store.nodes_in_graph(&graph.id)?,
            store.edges_in_graph(&graph.id)?,
        ),
        None => (Vec::new(), Vec::new()),
    };

    // Annotation counts are an external aggregation; a failure there must
    // not take down the view.
    let annotations = store
        .annotation_counts(user_id, content_id)
        .unwrap_or_else(|e| {
            warn!(user_id = %user_id, content_id = %content_id, error = %e, "annotation counts unavailable");
            HashMap::new()
        });

    let learner_by_slug: HashMap<&str, &TopicNode> =
        learner_nodes.iter().map(|n| (n.slug.as_str(), n)).collect();
    let doubt_ids: HashSet<&str> = learner_edges
        .iter()
        .filter(|e| e.is_doubt_marker())
        .map(|e| e.to_node.as_str())
        .collect();

    let mut nodes = Vec::new();
    let mut metadata = ViewMetadata {
        baseline_graph_id: Some(baseline.id.clone()),
        learner_graph_id: learner.as_ref().map(|g| g.id.clone()),
        ..Default::default()
    };

    // Baseline nodes, with status derived from the slug-matched learner node.
    let mut matched_slugs: HashSet<&str> = HashSet::new();
    for node in &baseline_nodes {
        let matched = learner_by_slug.get(node.slug.as_str()).copied();
        let status = match matched {
            None => NodeStatus::Unvisited,
            Some(learner_node) => learner_status(learner_node, &doubt_ids),
        };
        if matched.is_some() {
            matched_slugs.insert(node.slug.as_str());
        }
        let annotation_count = annotations
            .get(&node.id)
            .or_else(|| matched.and_then(|m| annotations.get(&m.id)))
            .copied()
            .unwrap_or(0);
        nodes.push(view_node(
            node,
            matched.map_or(node.confidence.value(), |m| m.confidence.value()),
            status,
            false,
            annotation_count,
        ));
    }

    // Learner nodes with no baseline counterpart render as discoveries.
    for node in &learner_nodes {
        if matched_slugs.contains(node.slug.as_str()) {
            continue;
        }
        let status = learner_status(node, &doubt_ids);
        let annotation_count = annotations.get(&node.id).copied().unwrap_or(0);
        nodes.push(view_node(
            node,
            node.confidence.value(),
            status,
            true,
            annotation_count,
        ));
    }

    metadata.total = nodes.len();
    for node in &nodes {
        match node.status {
            NodeStatus::Mastered => metadata.mastered += 1,
            NodeStatus::Doubt => metadata.doubt += 1,
            NodeStatus::Visited => metadata.visited += 1,
            NodeStatus::Unvisited => metadata.unvisited += 1,
        }
    }

    // Edges: baseline as-is, learner remapped through slug matches,
    // deduplicated by signature, doubt markers excluded.
    let baseline_by_slug: HashMap<&str, &TopicNode> =
        baseline_nodes.iter().map(|n| (n.slug.as_str(), n)).collect();
    let learner_by_id: HashMap<&str, &TopicNode> =
        learner_nodes.iter().map(|n| (n.id.as_str(), n)).collect();

    let mut edges = Vec::new();
    let mut seen = HashSet::new();
    for edge in baseline_edges.iter().filter(|e| !e.is_doubt_marker()) {
        push_edge(&mut edges, &mut seen, edge, &edge.from_node, &edge.to_node);
    }
    for edge in learner_edges.iter().filter(|e| !e.is_doubt_marker()) {
        let from = remap(&edge.from_node, &learner_by_id, &baseline_by_slug);
        let to = remap(&edge.to_node, &learner_by_id, &baseline_by_slug);
        push_edge(&mut edges, &mut seen, edge, from, to);
    }

    Ok(GraphView {
        nodes,
        edges,
        metadata,
    })
}

fn learner_status(node: &TopicNode, doubt_ids: &HashSet<&str>) -> NodeStatus {
    if doubt_ids.contains(node.id.as_str()) {
        NodeStatus::Doubt
    } else if node.confidence.is_mastered() {
        NodeStatus::Mastered
    } else {
        NodeStatus::Visited
    }
}

fn view_node(
    node: &TopicNode,
    confidence: f64,
    status: NodeStatus,
    discovery: bool,
    annotation_count: u64,
) -> ViewNode {
    ViewNode {
        id: node.id.clone(),
        label: node.canonical_label.clone(),
        slug: node.slug.clone(),
        status,
        confidence: confidence.into(),
        discovery,
        annotation_count,
        navigation: node.attributes.get("navigation").cloned(),
    }
}

/// Learner node ids remap onto the slug-matched baseline node; discovery
/// nodes keep their own id.
fn remap<'a>(
    node_id: &'a str,
    learner_by_id: &HashMap<&str, &'a TopicNode>,
    baseline_by_slug: &HashMap<&str, &'a TopicNode>,
) -> &'a str {
    match learner_by_id
        .get(node_id)
        .and_then(|n| baseline_by_slug.get(n.slug.as_str()))
    {
        Some(baseline_node) => baseline_node.id.as_str(),
        None => node_id,
    }
}

fn push_edge(
    edges: &mut Vec<ViewEdge>,
    seen: &mut HashSet<String>,
    edge: &TopicEdge,
    from: &str,
    to: &str,
) {
    let signature = format!("{from}:{to}:{}", edge.edge_type.as_str());
    if seen.insert(signature) {
        edges.push(ViewEdge {
            from: from.to_string(),
            to: to.to_string(),
            edge_type: edge.edge_type,
            confidence: edge.confidence,
        });
    }
}
