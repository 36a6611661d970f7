//! Integration tests for the graph comparator.

use std::sync::Arc;

use parallax_cache::{CacheFacade, MokaStore};
use parallax_compare::CompareEngine;
use parallax_core::config::CacheConfig;
use parallax_core::errors::{CompareError, ParallaxError};
use parallax_core::graph::{EdgeType, NodeSource};
use parallax_core::models::{EdgeClass, GapClass};
use parallax_core::traits::IGraphStore;
use test_fixtures as fx;

fn engine_on(store: Arc<parallax_storage::StorageEngine>) -> CompareEngine {
    CompareEngine::new(store, Arc::new(CacheFacade::disabled()))
}

#[test]
fn missing_baseline_is_not_found() {
    let store = fx::engine();
    fx::seed_learner(store.as_ref(), "u1", "c1");
    let engine = engine_on(store);

    match engine.compare("u1", "c1") {
        Err(ParallaxError::Compare(CompareError::BaselineNotFound { content_id })) => {
            assert_eq!(content_id, "c1")
        }
        other => panic!("expected BaselineNotFound, got {other:?}"),
    }
}

#[test]
fn missing_learner_is_not_found() {
    let store = fx::engine();
    fx::seed_baseline(store.as_ref(), "c1");
    let engine = engine_on(store);

    assert!(matches!(
        engine.compare("u1", "c1"),
        Err(ParallaxError::Compare(CompareError::LearnerNotFound { .. }))
    ));
}

#[test]
fn photosynthesis_respiration_scenario() {
    let store = fx::engine();
    let baseline = fx::seed_baseline(store.as_ref(), "c1");
    let a = fx::seed_node(store.as_ref(), &baseline.id, "Photosynthesis", 0.9, NodeSource::Deterministic);
    let b = fx::seed_node(store.as_ref(), &baseline.id, "Respiration", 0.9, NodeSource::Deterministic);
    fx::seed_edge(store.as_ref(), &baseline.id, &a.id, &b.id, EdgeType::Supports, 0.9, NodeSource::Deterministic);

    let learner = fx::seed_learner(store.as_ref(), "u1", "c1");
    fx::seed_node(store.as_ref(), &learner.id, "Photosynthesis", 0.5, NodeSource::User);

    let diff = engine_on(store).compare("u1", "c1").unwrap();
    assert_eq!(diff.payload.nodes_matched, 1);
    assert_eq!(diff.payload.missing_in_learner.len(), 1);
    assert_eq!(diff.payload.missing_in_learner[0].slug, "respiration");
    assert_eq!(diff.payload.extra_in_learner.len(), 0);
    // The A→B edge cannot match (B has no learner counterpart).
    assert_eq!(diff.payload.baseline_only_edges.len(), 1);
    assert_eq!(diff.payload.baseline_only_edges[0].class, GapClass::GapCritical);
}

#[test]
fn identical_signature_edges_match() {
    let store = fx::engine();
    let baseline = fx::seed_baseline(store.as_ref(), "c1");
    let ba = fx::seed_node(store.as_ref(), &baseline.id, "A", 0.9, NodeSource::Deterministic);
    let bb = fx::seed_node(store.as_ref(), &baseline.id, "B", 0.9, NodeSource::Deterministic);
    fx::seed_edge(store.as_ref(), &baseline.id, &ba.id, &bb.id, EdgeType::PartOf, 0.9, NodeSource::Deterministic);

    let learner = fx::seed_learner(store.as_ref(), "u1", "c1");
    let la = fx::seed_node(store.as_ref(), &learner.id, "A", 0.5, NodeSource::User);
    let lb = fx::seed_node(store.as_ref(), &learner.id, "B", 0.5, NodeSource::User);
    fx::seed_edge(store.as_ref(), &learner.id, &la.id, &lb.id, EdgeType::PartOf, 0.6, NodeSource::User);

    let diff = engine_on(store).compare("u1", "c1").unwrap();
    assert_eq!(diff.payload.edges_matched, 1);
    assert!(diff.payload.baseline_only_edges.is_empty());
    assert!(diff.payload.learner_only_edges.is_empty());
}

#[test]
fn supports_weakly_matches_links_to() {
    let store = fx::engine();
    let baseline = fx::seed_baseline(store.as_ref(), "c1");
    let ba = fx::seed_node(store.as_ref(), &baseline.id, "A", 0.9, NodeSource::Deterministic);
    let bb = fx::seed_node(store.as_ref(), &baseline.id, "B", 0.9, NodeSource::Deterministic);
    fx::seed_edge(store.as_ref(), &baseline.id, &ba.id, &bb.id, EdgeType::Supports, 0.9, NodeSource::Deterministic);

    let learner = fx::seed_learner(store.as_ref(), "u1", "c1");
    let la = fx::seed_node(store.as_ref(), &learner.id, "A", 0.5, NodeSource::User);
    let lb = fx::seed_node(store.as_ref(), &learner.id, "B", 0.5, NodeSource::User);
    fx::seed_edge(store.as_ref(), &learner.id, &la.id, &lb.id, EdgeType::LinksTo, 0.6, NodeSource::User);

    let diff = engine_on(store).compare("u1", "c1").unwrap();
    assert_eq!(diff.payload.edges_matched, 1);
    assert!(diff.payload.baseline_only_edges.is_empty());
    assert!(diff.payload.learner_only_edges.is_empty());

    // The relaxation is one-way: LINKS_TO in the baseline does not match
    // SUPPORTS in the learner.
    let store = fx::engine();
    let baseline = fx::seed_baseline(store.as_ref(), "c1");
    let ba = fx::seed_node(store.as_ref(), &baseline.id, "A", 0.9, NodeSource::Deterministic);
    let bb = fx::seed_node(store.as_ref(), &baseline.id, "B", 0.9, NodeSource::Deterministic);
    fx::seed_edge(store.as_ref(), &baseline.id, &ba.id, &bb.id, EdgeType::LinksTo, 0.9, NodeSource::Deterministic);

    let learner = fx::seed_learner(store.as_ref(), "u1", "c1");
    let la = fx::seed_node(store.as_ref(), &learner.id, "A", 0.5, NodeSource::User);
    let lb = fx::seed_node(store.as_ref(), &learner.id, "B", 0.5, NodeSource::User);
    fx::seed_edge(store.as_ref(), &learner.id, &la.id, &lb.id, EdgeType::Supports, 0.6, NodeSource::User);

    let diff = engine_on(store).compare("u1", "c1").unwrap();
    assert_eq!(diff.payload.edges_matched, 0);
}

#[test]
fn learner_only_edge_classification() {
    let store = fx::engine();
    let baseline = fx::seed_baseline(store.as_ref(), "c1");
    fx::seed_node(store.as_ref(), &baseline.id, "Anchor", 0.9, NodeSource::Deterministic);

    let learner = fx::seed_learner(store.as_ref(), "u1", "c1");
    let a = fx::seed_node(store.as_ref(), &learner.id, "A", 0.5, NodeSource::User);
    let b = fx::seed_node(store.as_ref(), &learner.id, "B", 0.5, NodeSource::User);
    let c = fx::seed_node(store.as_ref(), &learner.id, "C", 0.5, NodeSource::User);

    // Three pieces of evidence, USER, 0.7 → DISCOVERY_PLAUSIBLE.
    let discovery = fx::seed_edge(store.as_ref(), &learner.id, &a.id, &b.id, EdgeType::LinksTo, 0.7, NodeSource::User);
    fx::seed_evidence(store.as_ref(), &discovery.id, 3);
    // Same evidence but confidence 0.4 → ERROR_LIKELY.
    let error = fx::seed_edge(store.as_ref(), &learner.id, &b.id, &c.id, EdgeType::LinksTo, 0.4, NodeSource::User);
    fx::seed_evidence(store.as_ref(), &error.id, 3);

    let diff = engine_on(store).compare("u1", "c1").unwrap();
    let class_of = |edge_id: &str| {
        diff.payload
            .learner_only_edges
            .iter()
            .find(|e| e.edge_id == edge_id)
            .map(|e| e.class)
            .unwrap()
    };
    assert_eq!(class_of(&discovery.id), EdgeClass::DiscoveryPlausible);
    assert_eq!(class_of(&error.id), EdgeClass::ErrorLikely);
}

#[test]
fn undecided_edge_uses_cached_resolution() {
    let store = fx::engine();
    let baseline = fx::seed_baseline(store.as_ref(), "c1");
    fx::seed_node(store.as_ref(), &baseline.id, "Anchor", 0.9, NodeSource::Deterministic);

    let learner = fx::seed_learner(store.as_ref(), "u1", "c1");
    let a = fx::seed_node(store.as_ref(), &learner.id, "A", 0.5, NodeSource::User);
    let b = fx::seed_node(store.as_ref(), &learner.id, "B", 0.5, NodeSource::User);
    // Evidence ≥2, LLM source, confidence 0.7: neither rule fires.
    let edge = fx::seed_edge(store.as_ref(), &learner.id, &a.id, &b.id, EdgeType::LinksTo, 0.7, NodeSource::Llm);
    fx::seed_evidence(store.as_ref(), &edge.id, 2);

    // Without a resolution: UNDECIDED.
    let diff = engine_on(store.clone()).compare("u1", "c1").unwrap();
    assert_eq!(diff.payload.learner_only_edges[0].class, EdgeClass::Undecided);

    // With a cached resolution under the stable slug signature: resolved.
    let cache = Arc::new(CacheFacade::new(
        Arc::new(MokaStore::new(100)),
        CacheConfig::default(),
    ));
    cache.store_diff_resolution("a:b:LINKS_TO", EdgeClass::DiscoveryPlausible);
    let engine = CompareEngine::new(store, cache);
    let diff = engine.compare("u1", "c1").unwrap();
    assert_eq!(
        diff.payload.learner_only_edges[0].class,
        EdgeClass::DiscoveryPlausible
    );
}

#[test]
fn doubt_markers_never_appear_in_diffs() {
    let store = fx::engine();
    let baseline = fx::seed_baseline(store.as_ref(), "c1");
    fx::seed_node(store.as_ref(), &baseline.id, "Topic", 0.9, NodeSource::Deterministic);

    let learner = fx::seed_learner(store.as_ref(), "u1", "c1");
    let node = fx::seed_node(store.as_ref(), &learner.id, "Topic", 0.5, NodeSource::User);
    fx::seed_edge(store.as_ref(), &learner.id, &node.id, &node.id, EdgeType::Prerequisite, 0.3, NodeSource::User);

    let diff = engine_on(store).compare("u1", "c1").unwrap();
    assert!(diff.payload.learner_only_edges.is_empty());
    assert_eq!(diff.payload.change_count(), 0);
}

#[test]
fn comparison_is_deterministic() {
    let store = fx::engine();
    let baseline = fx::seed_baseline(store.as_ref(), "c1");
    let nodes: Vec<_> = (0..6)
        .map(|i| fx::seed_node(store.as_ref(), &baseline.id, &format!("Topic {i}"), 0.9, NodeSource::Deterministic))
        .collect();
    for pair in nodes.windows(2) {
        fx::seed_edge(store.as_ref(), &baseline.id, &pair[0].id, &pair[1].id, EdgeType::PartOf, 0.9, NodeSource::Deterministic);
    }

    let learner = fx::seed_learner(store.as_ref(), "u1", "c1");
    for i in [0, 2, 4] {
        fx::seed_node(store.as_ref(), &learner.id, &format!("Topic {i}"), 0.5, NodeSource::User);
    }

    let engine = engine_on(store);
    let first = engine.compare("u1", "c1").unwrap();
    let second = engine.compare("u1", "c1").unwrap();

    assert_eq!(first.payload.nodes_matched, second.payload.nodes_matched);
    assert_eq!(
        first.payload.missing_in_learner.len(),
        second.payload.missing_in_learner.len()
    );
    assert_eq!(first.payload.edges_matched, second.payload.edges_matched);
    assert_eq!(
        first.payload.baseline_only_edges.len(),
        second.payload.baseline_only_edges.len()
    );
    let slugs = |diff: &parallax_core::models::GraphDiff| {
        diff.payload
            .missing_in_learner
            .iter()
            .map(|n| n.slug.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(slugs(&first), slugs(&second));
}

#[test]
fn recomputation_replaces_the_stored_diff() {
    let store = fx::engine();
    let baseline = fx::seed_baseline(store.as_ref(), "c1");
    fx::seed_node(store.as_ref(), &baseline.id, "Topic", 0.9, NodeSource::Deterministic);
    fx::seed_learner(store.as_ref(), "u1", "c1");

    let engine = engine_on(store.clone());
    let first = engine.compare("u1", "c1").unwrap();
    let second = engine.compare("u1", "c1").unwrap();
    assert_ne!(first.id, second.id);

    let stored = store.latest_diff("u1", Some("c1")).unwrap().unwrap();
    assert_eq!(stored.id, second.id);
    assert_eq!(stored.summary.nodes_missing, 1);
}
