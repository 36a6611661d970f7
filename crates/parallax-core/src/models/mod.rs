//! Cross-crate result and payload models.

mod content;
mod diff;
mod recommendation;
mod registry;
mod reports;
mod threshold;
mod visualization;

pub use content::{ContentSignals, GlossaryTerm, TocEntry};
pub use diff::{
    DiffPayload, DiffSummary, DiscoveryEntry, EdgeClass, GapClass, GapEntry, GraphDiff,
    NodeDiffEntry,
};
pub use recommendation::Recommendation;
pub use registry::{RegistryEntry, RegistryStatus};
pub use reports::{BuildReport, EventReceipt, LinkReport};
pub use threshold::{ThresholdOutcome, ThresholdStatistics};
pub use visualization::{GraphView, NodeStatus, ViewEdge, ViewMetadata, ViewNode};
