use serde::{Deserialize, Serialize};

/// A recommended content item with the strategy's score and human-readable
/// reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub content_id: String,
    pub score: u32,
    pub reason: String,
}
