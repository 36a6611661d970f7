//! # parallax-cache
//!
//! Cache facade with three independent keyspaces (edge-type decisions,
//! undecided-diff resolutions, rendered visualizations), each with its own
//! TTL. Caching is strictly an optimization: every backend failure degrades
//! to a miss or a no-op, never an error.

pub mod facade;
pub mod moka_store;
pub mod null_store;

pub use facade::CacheFacade;
pub use moka_store::MokaStore;
pub use null_store::NullStore;
