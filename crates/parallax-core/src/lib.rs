//! # parallax-core
//!
//! Foundation crate for the Parallax knowledge-gap engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod bus;
pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod graph;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ParallaxConfig;
pub use errors::{ParallaxError, ParallaxResult};
pub use graph::{
    Confidence, EdgeType, GraphKind, NodeSource, ScopeType, TopicEdge, TopicEdgeEvidence,
    TopicGraph, TopicNode,
};
