//! # parallax-registry
//!
//! Links baseline topic nodes to the global registry: match against ACTIVE
//! entries by slug/alias intersection, or mint a CANDIDATE entry when
//! nothing matches.

pub mod linker;

pub use linker::RegistryLinker;
