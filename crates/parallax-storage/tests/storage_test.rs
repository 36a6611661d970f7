//! Integration tests for the SQLite storage engine.

use chrono::{Duration, Utc};

use parallax_core::graph::{
    EdgeType, EvidenceType, GraphScope, NodeSource, TopicEdgeEvidence, TopicGraph,
};
use parallax_core::models::{
    DiffPayload, DiffSummary, GraphDiff, RegistryEntry, RegistryStatus, ThresholdOutcome,
};
use parallax_core::graph::ScopeType;
use parallax_core::traits::IGraphStore;
use parallax_storage::StorageEngine;
use test_fixtures as fx;

#[test]
fn graph_round_trip() {
    let store = fx::engine();
    let graph = fx::seed_baseline(store.as_ref(), "content-1");

    let loaded = store.get_graph(&graph.id).unwrap().unwrap();
    assert_eq!(loaded.id, graph.id);
    assert_eq!(loaded.content_id.as_deref(), Some("content-1"));
    assert!(loaded.last_compared_at.is_none());

    let found = store
        .find_baseline_graph("content-1", &GraphScope::global())
        .unwrap();
    assert!(found.is_some());
    assert!(store
        .find_baseline_graph("content-2", &GraphScope::global())
        .unwrap()
        .is_none());
}

#[test]
fn learner_graph_lookup_by_user_and_content() {
    let store = fx::engine();
    let graph = fx::seed_learner(store.as_ref(), "u1", "c1");

    let found = store.find_learner_graph("u1", "c1").unwrap().unwrap();
    assert_eq!(found.id, graph.id);
    assert!(store.find_learner_graph("u2", "c1").unwrap().is_none());
}

#[test]
fn duplicate_baseline_identity_is_rejected() {
    let store = fx::engine();
    fx::seed_baseline(store.as_ref(), "c1");

    let dup = TopicGraph::baseline("c1", GraphScope::global());
    assert!(store.create_graph(&dup).is_err());
}

#[test]
fn node_slug_lookup_and_uniqueness() {
    let store = fx::engine();
    let graph = fx::seed_baseline(store.as_ref(), "c1");
    let node = fx::seed_node(store.as_ref(), &graph.id, "Cell Division", 0.9, NodeSource::Deterministic);
    assert_eq!(node.slug, "cell-division");

    let found = store
        .find_node_by_slug(&graph.id, "cell-division")
        .unwrap()
        .unwrap();
    assert_eq!(found.id, node.id);

    // Same slug in the same graph violates the unique index.
    let dup = parallax_core::graph::TopicNode::new(&graph.id, "cell division", 0.5, NodeSource::User);
    assert!(store.create_node(&dup).is_err());

    // Same slug in a different graph is fine.
    let other = fx::seed_baseline(store.as_ref(), "c2");
    fx::seed_node(store.as_ref(), &other.id, "Cell Division", 0.9, NodeSource::Deterministic);
}

#[test]
fn edges_load_with_evidence() {
    let store = fx::engine();
    let graph = fx::seed_learner(store.as_ref(), "u1", "c1");
    let a = fx::seed_node(store.as_ref(), &graph.id, "A", 0.5, NodeSource::User);
    let b = fx::seed_node(store.as_ref(), &graph.id, "B", 0.5, NodeSource::User);
    let edge = fx::seed_edge(
        store.as_ref(),
        &graph.id,
        &a.id,
        &b.id,
        EdgeType::LinksTo,
        0.6,
        NodeSource::User,
    );
    fx::seed_evidence(store.as_ref(), &edge.id, 2);

    let edges = store.edges_in_graph(&graph.id).unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].evidence.len(), 2);
    assert_eq!(edges[0].evidence[0].evidence_type, EvidenceType::Highlight);

    let found = store
        .find_edge(&graph.id, &a.id, &b.id, EdgeType::LinksTo)
        .unwrap()
        .unwrap();
    assert_eq!(found.evidence.len(), 2);
}

#[test]
fn most_recent_edge_prefers_latest() {
    let store = fx::engine();
    let graph = fx::seed_learner(store.as_ref(), "u1", "c1");
    let a = fx::seed_node(store.as_ref(), &graph.id, "A", 0.5, NodeSource::User);
    let b = fx::seed_node(store.as_ref(), &graph.id, "B", 0.5, NodeSource::User);
    let c = fx::seed_node(store.as_ref(), &graph.id, "C", 0.5, NodeSource::User);

    fx::seed_edge(store.as_ref(), &graph.id, &a.id, &b.id, EdgeType::LinksTo, 0.6, NodeSource::User);
    let second = fx::seed_edge(
        store.as_ref(),
        &graph.id,
        &b.id,
        &c.id,
        EdgeType::LinksTo,
        0.6,
        NodeSource::User,
    );

    let recent = store.most_recent_edge(&graph.id).unwrap().unwrap();
    assert_eq!(recent.id, second.id);
}

#[test]
fn evidence_appended_after_creation_is_loaded() {
    let store = fx::engine();
    let graph = fx::seed_learner(store.as_ref(), "u1", "c1");
    let a = fx::seed_node(store.as_ref(), &graph.id, "A", 0.5, NodeSource::User);
    let edge = fx::seed_edge(
        store.as_ref(),
        &graph.id,
        &a.id,
        &a.id,
        EdgeType::Prerequisite,
        0.3,
        NodeSource::User,
    );

    let evidence = TopicEdgeEvidence::new(&edge.id, EvidenceType::Highlight)
        .with_excerpt("I don't get this part")
        .with_highlight("h-9");
    store.add_evidence(&evidence).unwrap();

    let loaded = store.most_recent_edge(&graph.id).unwrap().unwrap();
    assert_eq!(loaded.evidence.len(), 1);
    assert_eq!(loaded.evidence[0].excerpt.as_deref(), Some("I don't get this part"));
}

#[test]
fn registry_match_by_slug_and_alias() {
    let store = fx::engine();
    let mut entry = RegistryEntry::candidate("Photosynthesis", "photosynthesis", serde_json::json!({}));
    entry.status = RegistryStatus::Active;
    entry.aliases = vec!["light-reaction".into()];
    store.create_registry_entry(&entry).unwrap();

    let by_slug = store
        .find_registry_entry(
            ScopeType::Global,
            RegistryStatus::Active,
            &["photosynthesis".to_string()],
        )
        .unwrap();
    assert!(by_slug.is_some());

    let by_alias = store
        .find_registry_entry(
            ScopeType::Global,
            RegistryStatus::Active,
            &["light-reaction".to_string()],
        )
        .unwrap();
    assert_eq!(by_alias.unwrap().id, entry.id);

    let miss = store
        .find_registry_entry(
            ScopeType::Global,
            RegistryStatus::Active,
            &["calvin-cycle".to_string()],
        )
        .unwrap();
    assert!(miss.is_none());
}

#[test]
fn diff_replacement_keeps_one_row_per_pair() {
    let store = fx::engine();
    let payload = DiffPayload::default();
    let summary = DiffSummary::from_payload(&payload);

    let mut diff = GraphDiff {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: "u1".into(),
        content_id: "c1".into(),
        baseline_graph_id: "bg".into(),
        learner_graph_id: "lg".into(),
        payload: payload.clone(),
        summary: summary.clone(),
        computed_at: Utc::now(),
    };
    store.replace_diff(&diff).unwrap();

    diff.id = uuid::Uuid::new_v4().to_string();
    diff.computed_at = Utc::now();
    store.replace_diff(&diff).unwrap();

    let latest = store.latest_diff("u1", Some("c1")).unwrap().unwrap();
    assert_eq!(latest.id, diff.id);

    // Unscoped lookup returns the same single row.
    let any = store.latest_diff("u1", None).unwrap().unwrap();
    assert_eq!(any.id, diff.id);
}

#[test]
fn recent_outcomes_window_and_cap() {
    let store = fx::engine();
    let now = Utc::now();

    for i in 0..5 {
        let outcome = ThresholdOutcome {
            user_id: "u1".into(),
            had_changes: i % 2 == 0,
            recorded_at: now - Duration::days(i),
        };
        store.record_outcome(&outcome).unwrap();
    }
    // One stale outcome outside a 3-day window.
    store
        .record_outcome(&ThresholdOutcome {
            user_id: "u1".into(),
            had_changes: true,
            recorded_at: now - Duration::days(40),
        })
        .unwrap();

    let recent = store
        .recent_outcomes("u1", now - Duration::days(3), 50)
        .unwrap();
    assert_eq!(recent.len(), 4);
    assert!(recent[0].recorded_at >= recent[1].recorded_at);

    let capped = store
        .recent_outcomes("u1", now - Duration::days(30), 2)
        .unwrap();
    assert_eq!(capped.len(), 2);
}

#[test]
fn baseline_graphs_with_slug_excludes_content() {
    let store = fx::engine();
    let g1 = fx::seed_baseline(store.as_ref(), "c1");
    let g2 = fx::seed_baseline(store.as_ref(), "c2");
    fx::seed_node(store.as_ref(), &g1.id, "Osmosis", 0.9, NodeSource::Deterministic);
    fx::seed_node(store.as_ref(), &g2.id, "Osmosis", 0.9, NodeSource::Deterministic);

    let all = store.baseline_graphs_with_slug("osmosis", None, 10).unwrap();
    assert_eq!(all.len(), 2);

    let excluded = store
        .baseline_graphs_with_slug("osmosis", Some("c1"), 10)
        .unwrap();
    assert_eq!(excluded.len(), 1);
    assert_eq!(excluded[0].id, g2.id);
}

#[test]
fn prerequisite_priors_come_from_global_graph() {
    let store = fx::engine();
    let global = TopicGraph::curated_global();
    store.create_graph(&global).unwrap();
    let algebra = fx::seed_node(store.as_ref(), &global.id, "Algebra", 0.9, NodeSource::Deterministic);
    let calculus = fx::seed_node(store.as_ref(), &global.id, "Calculus", 0.9, NodeSource::Deterministic);
    fx::seed_edge(
        store.as_ref(),
        &global.id,
        &algebra.id,
        &calculus.id,
        EdgeType::Prerequisite,
        0.9,
        NodeSource::Deterministic,
    );

    let priors = store.prerequisite_priors("calculus", 2).unwrap();
    assert_eq!(priors, vec!["algebra"]);
    assert!(store.prerequisite_priors("algebra", 2).unwrap().is_empty());
}

#[test]
fn annotation_counts_group_by_node() {
    let store = fx::engine();
    store.record_annotation("u1", "c1", "n1").unwrap();
    store.record_annotation("u1", "c1", "n1").unwrap();
    store.record_annotation("u1", "c1", "n2").unwrap();
    store.record_annotation("u2", "c1", "n1").unwrap();

    let counts = store.annotation_counts("u1", "c1").unwrap();
    assert_eq!(counts.get("n1"), Some(&2));
    assert_eq!(counts.get("n2"), Some(&1));
    assert_eq!(counts.len(), 2);
}

#[test]
fn file_backed_engine_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parallax.db");

    let graph_id = {
        let store = StorageEngine::open(&path).unwrap();
        let graph = fx::seed_baseline(&store, "c1");
        graph.id
    };

    let store = StorageEngine::open(&path).unwrap();
    let loaded = store.get_graph(&graph_id).unwrap();
    assert!(loaded.is_some());
}
