//! # parallax-baseline
//!
//! Builds the deterministic BASELINE graph for a content item from
//! structural signals: TOC hierarchy (PART_OF edges), glossary terms, and a
//! title fallback. Idempotent on node/edge counts. Connects new nodes to
//! the global topic registry best-effort.

pub mod builder;
pub mod enhancement;
pub mod extraction;
pub mod listener;

pub use builder::{BaselineBuilder, BuildRequest};
pub use enhancement::{EdgeClassifier, NoOpClassifier};
pub use listener::ContentSource;
