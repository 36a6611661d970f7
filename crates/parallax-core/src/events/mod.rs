//! Learner event model.
//!
//! Events arrive as loosely-typed JSON from the ingestion edge and are
//! validated into a tagged union before any graph work happens: one variant
//! per event kind, each with its own typed payload, dispatched by pattern
//! matching. Unknown event or mission kinds are not errors — they parse to
//! `None` so the caller can log and no-op. Missing required fields are
//! rejected as `Validation` failures before reaching the builder.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{ParallaxError, ParallaxResult};

/// Validated event envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub user_id: String,
    pub content_id: String,
    pub session_id: Option<String>,
    /// Section of the content the event happened in, if known.
    pub section_ref: Option<String>,
    pub event: LearnerEvent,
}

/// One variant per behavioral event kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LearnerEvent {
    Highlight(HighlightEvent),
    CornellSynthesis(SynthesisEvent),
    MissionCompleted(MissionEvent),
}

/// What kind of highlight the learner made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HighlightKind {
    MainIdea,
    Evidence,
    Doubt,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightEvent {
    pub kind: HighlightKind,
    /// The selected text.
    pub text: String,
    pub highlight_id: String,
    #[serde(default)]
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisEvent {
    /// Free text of the Cornell summary cell.
    pub text: String,
    pub note_id: String,
}

/// Completed transfer mission, already resolved to edge semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MissionEvent {
    /// Topic applied in a concrete domain.
    Hugging {
        topic: String,
        domain: String,
        transfer_attempt_id: String,
    },
    /// Topic explained through an underlying principle.
    Bridging {
        topic: String,
        principle: String,
        transfer_attempt_id: String,
    },
    /// Structural analogy between two topics; the mapping rides in the
    /// edge rationale.
    Analogy {
        topic_a: String,
        topic_b: String,
        mapping: Value,
        transfer_attempt_id: String,
    },
    /// Cause/effect chain (iceberg model); sign rides in the rationale.
    Iceberg {
        cause: String,
        effect: String,
        positive: bool,
        transfer_attempt_id: String,
    },
    /// Cause/effect loop segment (connection circle); same edge semantics
    /// as Iceberg.
    ConnectionCircle {
        cause: String,
        effect: String,
        positive: bool,
        transfer_attempt_id: String,
    },
}

impl MissionEvent {
    /// Transfer-attempt id referenced by the TIMESTAMP evidence.
    pub fn transfer_attempt_id(&self) -> &str {
        match self {
            Self::Hugging { transfer_attempt_id, .. }
            | Self::Bridging { transfer_attempt_id, .. }
            | Self::Analogy { transfer_attempt_id, .. }
            | Self::Iceberg { transfer_attempt_id, .. }
            | Self::ConnectionCircle { transfer_attempt_id, .. } => transfer_attempt_id,
        }
    }
}

/// Parse a raw ingress payload into a validated envelope.
///
/// Returns `Ok(None)` for unknown event or mission kinds (the caller logs
/// and no-ops), `Err(Validation)` when required fields are missing or
/// malformed. Unknown fields are ignored.
pub fn parse_envelope(raw: &Value) -> ParallaxResult<Option<EventEnvelope>> {
    let user_id = required_str(raw, "userId")?;
    let content_id = required_str(raw, "contentId")?;
    let session_id = optional_str(raw, "sessionId");
    let section_ref = optional_str(raw, "sectionRef");
    let event_type = required_str(raw, "eventType")?;
    let data = raw.get("eventData").cloned().unwrap_or(Value::Null);

    let event = match event_type.as_str() {
        "HIGHLIGHT" => LearnerEvent::Highlight(decode(&data, "HIGHLIGHT")?),
        "CORNELL_SYNTHESIS" => LearnerEvent::CornellSynthesis(decode(&data, "CORNELL_SYNTHESIS")?),
        "MISSION_COMPLETED" => match parse_mission(&data)? {
            Some(mission) => LearnerEvent::MissionCompleted(mission),
            None => return Ok(None),
        },
        _ => return Ok(None),
    };

    Ok(Some(EventEnvelope {
        user_id,
        content_id,
        session_id,
        section_ref,
        event,
    }))
}

fn parse_mission(data: &Value) -> ParallaxResult<Option<MissionEvent>> {
    let mission_type = required_str(data, "missionType")?;
    let attempt = required_str(data, "transferAttemptId")?;

    let mission = match mission_type.as_str() {
        "HUGGING" => MissionEvent::Hugging {
            topic: required_str(data, "topic")?,
            domain: required_str(data, "domain")?,
            transfer_attempt_id: attempt,
        },
        "BRIDGING" => MissionEvent::Bridging {
            topic: required_str(data, "topic")?,
            principle: required_str(data, "principle")?,
            transfer_attempt_id: attempt,
        },
        "ANALOGY" => MissionEvent::Analogy {
            topic_a: required_str(data, "topicA")?,
            topic_b: required_str(data, "topicB")?,
            mapping: data.get("mapping").cloned().unwrap_or(Value::Null),
            transfer_attempt_id: attempt,
        },
        "ICEBERG" => MissionEvent::Iceberg {
            cause: required_str(data, "cause")?,
            effect: required_str(data, "effect")?,
            positive: parse_sign(data),
            transfer_attempt_id: attempt,
        },
        "CONNECTION_CIRCLE" => MissionEvent::ConnectionCircle {
            cause: required_str(data, "cause")?,
            effect: required_str(data, "effect")?,
            positive: parse_sign(data),
            transfer_attempt_id: attempt,
        },
        _ => return Ok(None),
    };

    Ok(Some(mission))
}

/// Causal sign defaults to positive when absent.
fn parse_sign(data: &Value) -> bool {
    data.get("sign").and_then(Value::as_str) != Some("-")
}

fn decode<T: serde::de::DeserializeOwned>(data: &Value, kind: &str) -> ParallaxResult<T> {
    serde_json::from_value(data.clone())
        .map_err(|e| ParallaxError::validation(format!("bad {kind} payload: {e}")))
}

fn required_str(raw: &Value, field: &str) -> ParallaxResult<String> {
    match raw.get(field).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(ParallaxError::validation(format!(
            "missing required field: {field}"
        ))),
    }
}

fn optional_str(raw: &Value, field: &str) -> Option<String> {
    raw.get(field)
        .and_then(Value::as_str)
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_main_idea_highlight() {
        let raw = json!({
            "userId": "u1",
            "contentId": "c1",
            "eventType": "HIGHLIGHT",
            "eventData": {"kind": "MAIN_IDEA", "text": "Osmosis", "highlightId": "h1", "page": 4},
        });
        let envelope = parse_envelope(&raw).unwrap().unwrap();
        assert_eq!(envelope.user_id, "u1");
        match envelope.event {
            LearnerEvent::Highlight(h) => {
                assert_eq!(h.kind, HighlightKind::MainIdea);
                assert_eq!(h.page, Some(4));
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn missing_user_id_is_rejected() {
        let raw = json!({
            "contentId": "c1",
            "eventType": "HIGHLIGHT",
            "eventData": {"kind": "DOUBT", "text": "?", "highlightId": "h1"},
        });
        assert!(parse_envelope(&raw).is_err());
    }

    #[test]
    fn unknown_event_type_parses_to_none() {
        let raw = json!({
            "userId": "u1",
            "contentId": "c1",
            "eventType": "PAGE_TURNED",
            "eventData": {},
        });
        assert!(parse_envelope(&raw).unwrap().is_none());
    }

    #[test]
    fn unknown_mission_type_parses_to_none() {
        let raw = json!({
            "userId": "u1",
            "contentId": "c1",
            "eventType": "MISSION_COMPLETED",
            "eventData": {"missionType": "TELEPORT", "transferAttemptId": "t1"},
        });
        assert!(parse_envelope(&raw).unwrap().is_none());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let raw = json!({
            "userId": "u1",
            "contentId": "c1",
            "eventType": "CORNELL_SYNTHESIS",
            "eventData": {"text": "Summary text here.", "noteId": "n1", "color": "teal"},
            "extra": true,
        });
        assert!(parse_envelope(&raw).unwrap().is_some());
    }

    #[test]
    fn negative_sign_parses_to_negative_polarity() {
        let raw = json!({
            "userId": "u1",
            "contentId": "c1",
            "eventType": "MISSION_COMPLETED",
            "eventData": {
                "missionType": "ICEBERG",
                "cause": "deforestation",
                "effect": "biodiversity",
                "sign": "-",
                "transferAttemptId": "t9",
            },
        });
        let envelope = parse_envelope(&raw).unwrap().unwrap();
        match envelope.event {
            LearnerEvent::MissionCompleted(MissionEvent::Iceberg { positive, .. }) => {
                assert!(!positive)
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }
}
