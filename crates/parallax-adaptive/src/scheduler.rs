//! Activity scheduler: counts learner-graph updates per (user, content)
//! key and triggers the comparator when the user's threshold is reached.
//!
//! Counters are in-memory and non-durable — a restart loses counts, which
//! the design accepts. The counter resets *before* the compare call, so a
//! failed comparison waits for a fresh burst of activity instead of
//! re-firing on every subsequent event.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::Utc;
use crossbeam_channel::{tick, Receiver};
use dashmap::DashMap;
use tracing::{info, warn};

use parallax_compare::CompareEngine;
use parallax_core::bus::Signal;
use parallax_core::traits::IGraphStore;

use crate::threshold::ThresholdController;

/// Listens for learner-graph updates and decides when to compare.
pub struct ActivityScheduler {
    store: Arc<dyn IGraphStore>,
    controller: Arc<ThresholdController>,
    compare: Arc<CompareEngine>,
    counters: DashMap<String, u64>,
}

impl ActivityScheduler {
    pub fn new(
        store: Arc<dyn IGraphStore>,
        controller: Arc<ThresholdController>,
        compare: Arc<CompareEngine>,
    ) -> Self {
        Self {
            store,
            controller,
            compare,
            counters: DashMap::new(),
        }
    }

    /// Handle one learner-graph-updated signal. Comparator failures are
    /// caught and logged — they never propagate to the event producer.
    pub fn on_learner_updated(&self, user_id: &str, content_id: &str) {
        let threshold = u64::from(self.controller.threshold(user_id));
        let key = counter_key(user_id, content_id);

        let count = {
            let mut entry = self.counters.entry(key.clone()).or_insert(0);
            *entry += 1;
            *entry
        };
        if count < threshold {
            return;
        }

        // Reset first: a concurrent event starts a fresh count, and a
        // failed compare does not re-fire on the very next event.
        self.counters.remove(&key);
        self.run_comparison(user_id, content_id);
    }

    fn run_comparison(&self, user_id: &str, content_id: &str) {
        match self.compare.compare(user_id, content_id) {
            Ok(diff) => {
                let had_changes = diff.payload.change_count() > 0;
                self.controller.record_outcome(user_id, had_changes);
                if let Err(e) = self
                    .store
                    .set_last_compared_at(&diff.learner_graph_id, Utc::now())
                {
                    warn!(user_id = %user_id, content_id = %content_id, error = %e, "failed to stamp last_compared_at");
                }
                info!(
                    user_id = %user_id,
                    content_id = %content_id,
                    had_changes = had_changes,
                    "threshold-triggered comparison complete"
                );
            }
            Err(e) => {
                warn!(user_id = %user_id, content_id = %content_id, error = %e, "triggered comparison failed");
            }
        }
    }

    /// Current counter value for a key (observability and tests).
    pub fn counter(&self, user_id: &str, content_id: &str) -> u64 {
        self.counters
            .get(&counter_key(user_id, content_id))
            .map(|c| *c)
            .unwrap_or(0)
    }

    /// Unconditionally drop all counters. Bounds memory growth from
    /// abandoned (user, content) pairs; run daily.
    pub fn clear_counters(&self) {
        let dropped = self.counters.len();
        self.counters.clear();
        info!(dropped = dropped, "activity counters cleared");
    }

    /// Consume learner-updated signals from a bus subscription on a
    /// dedicated thread. Exits when the sending side hangs up.
    pub fn spawn_listener(self: &Arc<Self>, receiver: Receiver<Signal>) -> JoinHandle<()> {
        let scheduler = Arc::clone(self);
        thread::spawn(move || {
            for signal in receiver.iter() {
                if let Signal::LearnerGraphUpdated {
                    user_id,
                    content_id,
                } = signal
                {
                    scheduler.on_learner_updated(&user_id, &content_id);
                }
            }
        })
    }

    /// Periodic counter sweep on a dedicated thread.
    pub fn spawn_cleanup(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let scheduler = Arc::clone(self);
        let ticker = tick(interval);
        thread::spawn(move || {
            for _ in ticker.iter() {
                scheduler.clear_counters();
            }
        })
    }
}

fn counter_key(user_id: &str, content_id: &str) -> String {
    format!("{user_id}:{content_id}")
}
