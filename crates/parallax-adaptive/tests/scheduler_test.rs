//! Integration tests for the activity scheduler.

use std::sync::Arc;

use parallax_adaptive::{ActivityScheduler, ThresholdController};
use parallax_cache::CacheFacade;
use parallax_compare::CompareEngine;
use parallax_core::bus::{ChannelBus, ISignalBus, Signal};
use parallax_core::graph::NodeSource;
use parallax_core::traits::IGraphStore;
use parallax_storage::StorageEngine;
use test_fixtures as fx;

fn scheduler_on(store: Arc<StorageEngine>) -> Arc<ActivityScheduler> {
    let controller = Arc::new(ThresholdController::new(store.clone()));
    let compare = Arc::new(CompareEngine::new(
        store.clone(),
        Arc::new(CacheFacade::disabled()),
    ));
    Arc::new(ActivityScheduler::new(store, controller, compare))
}

/// Baseline with one node the learner lacks, so every comparison has
/// changes.
fn seed_pair(store: &dyn IGraphStore) {
    let baseline = fx::seed_baseline(store, "c1");
    fx::seed_node(store, &baseline.id, "Topic", 0.9, NodeSource::Deterministic);
    fx::seed_learner(store, "u1", "c1");
}

#[test]
fn fires_exactly_once_per_threshold_events() {
    let store = fx::engine();
    seed_pair(store.as_ref());
    let scheduler = scheduler_on(store.clone());

    // Four events: counter rises, nothing fires.
    for i in 1..=4 {
        scheduler.on_learner_updated("u1", "c1");
        assert_eq!(scheduler.counter("u1", "c1"), i);
        assert!(store.latest_diff("u1", Some("c1")).unwrap().is_none());
    }

    // Fifth event triggers the comparison and resets the counter.
    scheduler.on_learner_updated("u1", "c1");
    assert_eq!(scheduler.counter("u1", "c1"), 0);
    let first = store.latest_diff("u1", Some("c1")).unwrap().unwrap();

    // Four more events stay quiet.
    for _ in 0..4 {
        scheduler.on_learner_updated("u1", "c1");
    }
    assert_eq!(store.latest_diff("u1", Some("c1")).unwrap().unwrap().id, first.id);

    // The tenth fires again, replacing the stored diff.
    scheduler.on_learner_updated("u1", "c1");
    let second = store.latest_diff("u1", Some("c1")).unwrap().unwrap();
    assert_ne!(second.id, first.id);
}

#[test]
fn trigger_records_outcome_and_stamps_graph() {
    let store = fx::engine();
    seed_pair(store.as_ref());
    let scheduler = scheduler_on(store.clone());

    for _ in 0..5 {
        scheduler.on_learner_updated("u1", "c1");
    }

    let outcomes = store
        .recent_outcomes("u1", chrono::Utc::now() - chrono::Duration::days(1), 10)
        .unwrap();
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].had_changes);

    let learner = store.find_learner_graph("u1", "c1").unwrap().unwrap();
    assert!(learner.last_compared_at.is_some());
}

#[test]
fn comparator_failure_still_resets_counter() {
    // No baseline graph: every comparison fails with NotFound.
    let store = fx::engine();
    fx::seed_learner(store.as_ref(), "u1", "c1");
    let scheduler = scheduler_on(store.clone());

    for _ in 0..5 {
        scheduler.on_learner_updated("u1", "c1");
    }
    // The failed trigger consumed the burst; the next event starts at 1.
    assert_eq!(scheduler.counter("u1", "c1"), 0);
    scheduler.on_learner_updated("u1", "c1");
    assert_eq!(scheduler.counter("u1", "c1"), 1);
    assert!(store.latest_diff("u1", Some("c1")).unwrap().is_none());
    // No outcome is recorded for a failed comparison.
    assert!(store
        .recent_outcomes("u1", chrono::Utc::now() - chrono::Duration::days(1), 10)
        .unwrap()
        .is_empty());
}

#[test]
fn counters_are_per_user_content_key() {
    let store = fx::engine();
    seed_pair(store.as_ref());
    let scheduler = scheduler_on(store);

    scheduler.on_learner_updated("u1", "c1");
    scheduler.on_learner_updated("u1", "c2");
    scheduler.on_learner_updated("u2", "c1");

    assert_eq!(scheduler.counter("u1", "c1"), 1);
    assert_eq!(scheduler.counter("u1", "c2"), 1);
    assert_eq!(scheduler.counter("u2", "c1"), 1);
}

#[test]
fn cleanup_clears_all_counters() {
    let store = fx::engine();
    seed_pair(store.as_ref());
    let scheduler = scheduler_on(store.clone());

    for _ in 0..3 {
        scheduler.on_learner_updated("u1", "c1");
    }
    scheduler.clear_counters();
    assert_eq!(scheduler.counter("u1", "c1"), 0);

    // After the sweep a full burst is needed again.
    for _ in 0..4 {
        scheduler.on_learner_updated("u1", "c1");
    }
    assert!(store.latest_diff("u1", Some("c1")).unwrap().is_none());
    scheduler.on_learner_updated("u1", "c1");
    assert!(store.latest_diff("u1", Some("c1")).unwrap().is_some());
}

#[test]
fn listener_consumes_bus_signals() {
    let store = fx::engine();
    seed_pair(store.as_ref());
    let scheduler = scheduler_on(store.clone());

    let bus = ChannelBus::new();
    let handle = scheduler.spawn_listener(bus.subscribe());

    for _ in 0..5 {
        bus.publish(Signal::LearnerGraphUpdated {
            user_id: "u1".into(),
            content_id: "c1".into(),
        });
    }
    drop(bus);
    handle.join().unwrap();

    assert!(store.latest_diff("u1", Some("c1")).unwrap().is_some());
}
