//! Classification heuristics for unmatched edges.

use parallax_cache::CacheFacade;
use parallax_core::graph::{Confidence, NodeSource, TopicEdge};
use parallax_core::models::{EdgeClass, GapClass};

/// Minimum evidence for a plausible discovery.
const DISCOVERY_MIN_EVIDENCE: usize = 2;

/// Classify a learner-only edge.
///
/// DISCOVERY_PLAUSIBLE needs evidence ≥2, USER source, and confidence ≥0.6.
/// ERROR_LIKELY fires on thin evidence or confidence <0.5. Anything else is
/// UNDECIDED unless a prior resolution is cached under the edge's stable
/// slug signature — there is no blocking external classification call.
pub fn classify_learner_edge(
    edge: &TopicEdge,
    from_slug: &str,
    to_slug: &str,
    cache: &CacheFacade,
) -> EdgeClass {
    let evidence_count = edge.evidence.len();
    let confidence = edge.confidence.value();

    if evidence_count >= DISCOVERY_MIN_EVIDENCE
        && edge.source == NodeSource::User
        && confidence >= Confidence::DISCOVERY_FLOOR
    {
        return EdgeClass::DiscoveryPlausible;
    }
    if evidence_count < DISCOVERY_MIN_EVIDENCE || confidence < Confidence::ERROR_CEILING {
        return EdgeClass::ErrorLikely;
    }

    let signature = format!("{from_slug}:{to_slug}:{}", edge.edge_type.as_str());
    cache
        .diff_resolution(&signature)
        .unwrap_or(EdgeClass::Undecided)
}

/// Classify a baseline-only edge (a gap) by its confidence.
pub fn classify_gap(confidence: f64) -> GapClass {
    if confidence >= Confidence::GAP_CRITICAL {
        GapClass::GapCritical
    } else {
        GapClass::GapMinor
    }
}
