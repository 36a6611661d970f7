//! # parallax-compare
//!
//! Diffs a BASELINE graph against a LEARNER graph: slug-based node
//! matching, signature-based edge matching with one controlled relaxation
//! (SUPPORTS ↔ LINKS_TO), heuristic classification of gaps and discoveries,
//! and upsert persistence of the result.

pub mod classify;
pub mod engine;
pub mod index;
pub mod matching;

pub use engine::CompareEngine;
pub use index::IndexedTopicGraph;
