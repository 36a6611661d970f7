//! Typed helpers over the raw key/value store. Keys are namespaced by a
//! stable prefix plus a blake3 signature hash; values are JSON strings.
//! Every backend error is logged at warn and treated as a miss.

use std::sync::Arc;

use tracing::warn;

use parallax_core::config::CacheConfig;
use parallax_core::graph::EdgeType;
use parallax_core::models::{EdgeClass, GraphView};
use parallax_core::traits::ICacheStore;

use crate::null_store::NullStore;

const EDGE_DECISION_PREFIX: &str = "edge-decision";
const DIFF_RESOLUTION_PREFIX: &str = "diff-resolution";
const VISUALIZATION_PREFIX: &str = "graph-viz";

/// Facade over an `ICacheStore` with one keyspace per concern.
pub struct CacheFacade {
    store: Arc<dyn ICacheStore>,
    config: CacheConfig,
}

impl CacheFacade {
    pub fn new(store: Arc<dyn ICacheStore>, config: CacheConfig) -> Self {
        Self { store, config }
    }

    /// Facade over the always-miss store — for deployments without a cache.
    pub fn disabled() -> Self {
        Self::new(Arc::new(NullStore), CacheConfig::default())
    }

    // ── Edge-type decisions (30-day TTL) ──────────────────────────────────

    /// Cached edge-type decision for an edge signature, if any.
    pub fn edge_decision(&self, from_slug: &str, to_slug: &str) -> Option<EdgeType> {
        let key = self.edge_decision_key(from_slug, to_slug);
        self.get_json(&key)
    }

    pub fn store_edge_decision(&self, from_slug: &str, to_slug: &str, edge_type: EdgeType) {
        let key = self.edge_decision_key(from_slug, to_slug);
        self.set_json(&key, &edge_type, self.config.edge_decision_ttl_secs);
    }

    // ── Undecided-diff resolutions (7-day TTL) ────────────────────────────

    /// Prior resolution for an undecided learner-only edge, keyed by its
    /// stable signature.
    pub fn diff_resolution(&self, signature: &str) -> Option<EdgeClass> {
        let key = self.resolution_key(signature);
        self.get_json(&key)
    }

    pub fn store_diff_resolution(&self, signature: &str, class: EdgeClass) {
        let key = self.resolution_key(signature);
        self.set_json(&key, &class, self.config.diff_resolution_ttl_secs);
    }

    // ── Rendered visualizations (5-minute TTL) ────────────────────────────

    pub fn visualization(&self, user_id: &str, content_id: &str) -> Option<GraphView> {
        let key = self.visualization_key(user_id, content_id);
        self.get_json(&key)
    }

    pub fn store_visualization(&self, user_id: &str, content_id: &str, view: &GraphView) {
        let key = self.visualization_key(user_id, content_id);
        self.set_json(&key, view, self.config.visualization_ttl_secs);
    }

    /// Drop the cached visualization — called on every learner-graph
    /// mutation.
    pub fn invalidate_visualization(&self, user_id: &str, content_id: &str) {
        let key = self.visualization_key(user_id, content_id);
        if let Err(e) = self.store.del(&key) {
            warn!(key = %key, error = %e, "cache del failed");
        }
    }

    // ── Keys ──────────────────────────────────────────────────────────────

    fn edge_decision_key(&self, from_slug: &str, to_slug: &str) -> String {
        let signature = blake3::hash(format!("{from_slug}:{to_slug}").as_bytes());
        format!("{EDGE_DECISION_PREFIX}:{}", signature.to_hex())
    }

    fn resolution_key(&self, signature: &str) -> String {
        let hash = blake3::hash(signature.as_bytes());
        format!("{DIFF_RESOLUTION_PREFIX}:{}", hash.to_hex())
    }

    fn visualization_key(&self, user_id: &str, content_id: &str) -> String {
        format!("{VISUALIZATION_PREFIX}:{user_id}:{content_id}")
    }

    // ── Degrading JSON helpers ────────────────────────────────────────────

    fn get_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key = %key, error = %e, "cache get failed, treating as miss");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = %key, error = %e, "cached value undecodable, treating as miss");
                None
            }
        }
    }

    fn set_json<T: serde::Serialize>(&self, key: &str, value: &T, ttl_secs: u64) {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(key = %key, error = %e, "cache encode failed, skipping set");
                return;
            }
        };
        if let Err(e) = self.store.set(key, &encoded, ttl_secs) {
            warn!(key = %key, error = %e, "cache set failed");
        }
    }
}
