//! Always-miss backend for cache-less deployments.

use parallax_core::errors::ParallaxResult;
use parallax_core::traits::ICacheStore;

/// Accepts every write, remembers nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl ICacheStore for NullStore {
    fn get(&self, _key: &str) -> ParallaxResult<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str, _ttl_secs: u64) -> ParallaxResult<()> {
        Ok(())
    }

    fn del(&self, _key: &str) -> ParallaxResult<()> {
        Ok(())
    }
}
