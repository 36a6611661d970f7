/// Graph comparison errors. Missing graphs are surfaced to the caller —
/// the comparator never builds graphs on demand.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    #[error("no baseline graph exists for content {content_id}")]
    BaselineNotFound { content_id: String },

    #[error("no learner graph exists for user {user_id} on content {content_id}")]
    LearnerNotFound {
        user_id: String,
        content_id: String,
    },

    #[error("graph inconsistency: {details}")]
    GraphInconsistency { details: String },
}
