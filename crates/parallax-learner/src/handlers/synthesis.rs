//! Cornell synthesis handling: deterministic topic extraction from free
//! text, then LINKS_TO chaining between consecutive topics.
//!
//! The extractor is a placeholder for true NLP extraction: split on
//! sentence terminators, keep fragments longer than 10 characters, take the
//! first three; when nothing qualifies, use the first 50 characters as a
//! single topic.

use parallax_core::constants::{
    MAX_SYNTHESIS_TOPICS, MIN_SYNTHESIS_FRAGMENT_CHARS, SYNTHESIS_FALLBACK_CHARS,
};
use parallax_core::errors::ParallaxResult;
use parallax_core::events::SynthesisEvent;
use parallax_core::graph::{EdgeType, EvidenceType, NodeSource, TopicEdge, TopicEdgeEvidence};
use parallax_core::traits::IGraphStore;

use super::{upsert_node, Mutation};

/// Confidence for LINKS_TO chain edges.
const CHAIN_CONFIDENCE: f64 = 0.6;

/// Deterministic 1–3 topic extraction.
pub fn extract_topics(text: &str) -> Vec<String> {
    let fragments: Vec<String> = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|f| f.chars().count() > MIN_SYNTHESIS_FRAGMENT_CHARS)
        .take(MAX_SYNTHESIS_TOPICS)
        .map(str::to_string)
        .collect();

    if !fragments.is_empty() {
        return fragments;
    }

    let fallback: String = text.trim().chars().take(SYNTHESIS_FALLBACK_CHARS).collect();
    if fallback.is_empty() {
        Vec::new()
    } else {
        vec![fallback]
    }
}

pub fn apply(
    store: &dyn IGraphStore,
    graph_id: &str,
    event: &SynthesisEvent,
) -> ParallaxResult<Mutation> {
    let topics = extract_topics(&event.text);
    if topics.is_empty() {
        return Ok(Mutation {
            warnings: vec!["synthesis note yielded no topics".into()],
            ..Default::default()
        });
    }

    let mut mutation = Mutation::default();
    let mut nodes = Vec::with_capacity(topics.len());
    for topic in &topics {
        nodes.push(upsert_node(store, graph_id, topic)?);
        mutation.nodes_touched += 1;
    }

    // Chain consecutive topics with LINKS_TO, each link carrying
    // CORNELL_SUMMARY evidence pointing back at the note.
    for pair in nodes.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        if from.id == to.id {
            continue;
        }
        let edge = match store.find_edge(graph_id, &from.id, &to.id, EdgeType::LinksTo)? {
            Some(existing) => existing,
            None => {
                let edge = TopicEdge::new(
                    graph_id,
                    from.id.clone(),
                    to.id.clone(),
                    EdgeType::LinksTo,
                    CHAIN_CONFIDENCE,
                    NodeSource::User,
                );
                store.create_edge(&edge)?;
                edge
            }
        };
        let evidence = TopicEdgeEvidence::new(&edge.id, EvidenceType::CornellSummary)
            .with_note(event.note_id.clone())
            .with_excerpt(&event.text);
        store.add_evidence(&evidence)?;
        mutation.edges_touched += 1;
    }

    Ok(mutation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_up_to_three_long_fragments() {
        let text = "Energy flows through trophic levels. Producers capture sunlight. \
                    Consumers eat producers. Decomposers recycle the rest.";
        let topics = extract_topics(text);
        assert_eq!(topics.len(), 3);
        assert_eq!(topics[0], "Energy flows through trophic levels");
    }

    #[test]
    fn short_fragments_are_dropped() {
        let topics = extract_topics("Short. But this fragment is long enough to keep.");
        assert_eq!(topics, vec!["But this fragment is long enough to keep"]);
    }

    #[test]
    fn fallback_takes_first_fifty_chars() {
        // Every fragment is exactly at or under the 10-char floor.
        let text = "Tiny. Bits. Here.";
        let topics = extract_topics(text);
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0], text);
        assert!(topics[0].chars().count() <= 50);
    }

    #[test]
    fn unpunctuated_text_is_a_single_fragment() {
        let text = "a".repeat(120);
        let topics = extract_topics(&text);
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].chars().count(), 120);
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(extract_topics("").is_empty());
        assert!(extract_topics("   ").is_empty());
    }
}
