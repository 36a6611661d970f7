use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DIFF_SUMMARY_TOP_N;
use crate::graph::{Confidence, EdgeType};

/// Classification of a learner-only edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeClass {
    /// Well-evidenced learner relation with no baseline counterpart —
    /// plausibly a genuine insight.
    DiscoveryPlausible,
    /// Thin evidence or low confidence — probably a mistake.
    ErrorLikely,
    /// Neither rule fired and no cached resolution exists.
    Undecided,
}

/// Classification of a baseline-only edge (a gap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GapClass {
    GapCritical,
    GapMinor,
}

/// A node present on one side only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDiffEntry {
    pub node_id: String,
    pub slug: String,
    pub label: String,
    pub confidence: Confidence,
}

/// A baseline edge absent from the learner graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapEntry {
    pub edge_id: String,
    pub from_slug: String,
    pub to_slug: String,
    pub edge_type: EdgeType,
    pub confidence: Confidence,
    pub class: GapClass,
}

/// A learner edge with no baseline counterpart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryEntry {
    pub edge_id: String,
    pub from_slug: String,
    pub to_slug: String,
    pub edge_type: EdgeType,
    pub confidence: Confidence,
    pub evidence_count: usize,
    pub class: EdgeClass,
}

/// Full diff detail: counts plus per-item lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiffPayload {
    pub nodes_matched: usize,
    pub missing_in_learner: Vec<NodeDiffEntry>,
    pub extra_in_learner: Vec<NodeDiffEntry>,
    pub edges_matched: usize,
    pub baseline_only_edges: Vec<GapEntry>,
    pub learner_only_edges: Vec<DiscoveryEntry>,
}

impl DiffPayload {
    /// Total number of differences — drives the scheduler's `had_changes`
    /// feedback to the threshold controller.
    pub fn change_count(&self) -> usize {
        self.missing_in_learner.len()
            + self.extra_in_learner.len()
            + self.baseline_only_edges.len()
            + self.learner_only_edges.len()
    }
}

/// Condensed view of a diff: top gaps, top discoveries, aggregate counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiffSummary {
    pub top_gaps: Vec<GapEntry>,
    pub top_discoveries: Vec<DiscoveryEntry>,
    pub nodes_matched: usize,
    pub nodes_missing: usize,
    pub nodes_extra: usize,
    pub edges_matched: usize,
    pub gaps_critical: usize,
    pub gaps_minor: usize,
    pub discoveries_plausible: usize,
    pub errors_likely: usize,
    pub undecided: usize,
}

impl DiffSummary {
    /// Build a summary from the full payload: top-10 gaps and discoveries by
    /// confidence descending (stable for ties), plus aggregate counts.
    pub fn from_payload(payload: &DiffPayload) -> Self {
        let mut gaps = payload.baseline_only_edges.clone();
        gaps.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        gaps.truncate(DIFF_SUMMARY_TOP_N);

        let mut discoveries = payload.learner_only_edges.clone();
        discoveries.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        discoveries.truncate(DIFF_SUMMARY_TOP_N);

        Self {
            top_gaps: gaps,
            top_discoveries: discoveries,
            nodes_matched: payload.nodes_matched,
            nodes_missing: payload.missing_in_learner.len(),
            nodes_extra: payload.extra_in_learner.len(),
            edges_matched: payload.edges_matched,
            gaps_critical: count_gaps(payload, GapClass::GapCritical),
            gaps_minor: count_gaps(payload, GapClass::GapMinor),
            discoveries_plausible: count_edges(payload, EdgeClass::DiscoveryPlausible),
            errors_likely: count_edges(payload, EdgeClass::ErrorLikely),
            undecided: count_edges(payload, EdgeClass::Undecided),
        }
    }
}

fn count_gaps(payload: &DiffPayload, class: GapClass) -> usize {
    payload
        .baseline_only_edges
        .iter()
        .filter(|g| g.class == class)
        .count()
}

fn count_edges(payload: &DiffPayload, class: EdgeClass) -> usize {
    payload
        .learner_only_edges
        .iter()
        .filter(|e| e.class == class)
        .count()
}

/// Persisted comparison result, keyed by (user_id, content_id).
/// Recomputation replaces the previous diff for the same pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDiff {
    /// UUID v4 identifier.
    pub id: String,
    pub user_id: String,
    pub content_id: String,
    pub baseline_graph_id: String,
    pub learner_graph_id: String,
    pub payload: DiffPayload,
    pub summary: DiffSummary,
    pub computed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gap(conf: f64, class: GapClass) -> GapEntry {
        GapEntry {
            edge_id: uuid::Uuid::new_v4().to_string(),
            from_slug: "a".into(),
            to_slug: "b".into(),
            edge_type: EdgeType::Supports,
            confidence: Confidence::new(conf),
            class,
        }
    }

    #[test]
    fn summary_caps_gaps_at_ten_sorted_by_confidence() {
        let payload = DiffPayload {
            baseline_only_edges: (0..15)
                .map(|i| gap(i as f64 / 15.0, GapClass::GapMinor))
                .collect(),
            ..Default::default()
        };
        let summary = DiffSummary::from_payload(&payload);
        assert_eq!(summary.top_gaps.len(), 10);
        assert_eq!(summary.gaps_minor, 15);
        let confidences: Vec<f64> = summary.top_gaps.iter().map(|g| g.confidence.value()).collect();
        assert!(confidences.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn change_count_sums_all_four_lists() {
        let payload = DiffPayload {
            nodes_matched: 7,
            missing_in_learner: vec![NodeDiffEntry {
                node_id: "n".into(),
                slug: "s".into(),
                label: "S".into(),
                confidence: Confidence::new(0.9),
            }],
            baseline_only_edges: vec![gap(0.9, GapClass::GapCritical)],
            ..Default::default()
        };
        assert_eq!(payload.change_count(), 2);
    }
}
