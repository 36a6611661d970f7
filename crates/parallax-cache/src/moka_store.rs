//! In-process cache backend using moka.
//!
//! TinyLFU admission policy, size-aware eviction, per-entry TTL via the
//! `Expiry` hook (the facade passes a different TTL per keyspace).

use std::time::{Duration, Instant};

use moka::sync::Cache;
use moka::Expiry;

use parallax_core::errors::ParallaxResult;
use parallax_core::traits::ICacheStore;

#[derive(Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// Moka-backed `ICacheStore`. Keys are namespaced strings, values opaque
/// JSON strings.
pub struct MokaStore {
    cache: Cache<String, Entry>,
}

impl MokaStore {
    /// Create a store with the given max entry count.
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(PerEntryTtl)
            .build();
        Self { cache }
    }

    /// Number of entries currently cached.
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invalidate all entries.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

impl Default for MokaStore {
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl ICacheStore for MokaStore {
    fn get(&self, key: &str) -> ParallaxResult<Option<String>> {
        Ok(self.cache.get(key).map(|entry| entry.value))
    }

    fn set(&self, key: &str, value: &str, ttl_secs: u64) -> ParallaxResult<()> {
        self.cache.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                ttl: Duration::from_secs(ttl_secs.max(1)),
            },
        );
        Ok(())
    }

    fn del(&self, key: &str) -> ParallaxResult<()> {
        self.cache.invalidate(key);
        Ok(())
    }
}
