//! # parallax-learner
//!
//! Incrementally builds the per-(user, content) LEARNER graph from
//! behavioral events — highlights, Cornell syntheses, completed transfer
//! missions — and renders the merged baseline/learner visualization.

pub mod engine;
pub mod handlers;
pub mod visualization;

pub use engine::LearnerEngine;
