//! Topic graph model: graphs, nodes, edges, evidence, and the slug
//! normalization that keys node matching across graphs.

mod base;
mod confidence;
mod edge;
mod evidence;
mod node;
pub mod slug;

pub use base::{GraphKind, GraphScope, ScopeType, TopicGraph};
pub use confidence::Confidence;
pub use edge::{EdgeType, TopicEdge};
pub use evidence::{EvidenceType, TopicEdgeEvidence};
pub use node::{NodeSource, TopicNode};
pub use slug::slugify;
