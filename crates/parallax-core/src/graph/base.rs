use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a graph represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GraphKind {
    /// Canonical content-derived graph: what the material is expected to teach.
    Baseline,
    /// Per-user graph built incrementally from behavioral events.
    Learner,
    /// Hand-curated graph (e.g. the global registry anchor).
    Curated,
}

impl GraphKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Baseline => "BASELINE",
            Self::Learner => "LEARNER",
            Self::Curated => "CURATED",
        }
    }

    pub fn from_str_name(s: &str) -> Option<Self> {
        match s {
            "BASELINE" => Some(Self::Baseline),
            "LEARNER" => Some(Self::Learner),
            "CURATED" => Some(Self::Curated),
            _ => None,
        }
    }
}

/// Scope qualifier for a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScopeType {
    Global,
    User,
    Institution,
}

impl ScopeType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Global => "GLOBAL",
            Self::User => "USER",
            Self::Institution => "INSTITUTION",
        }
    }

    pub fn from_str_name(s: &str) -> Option<Self> {
        match s {
            "GLOBAL" => Some(Self::Global),
            "USER" => Some(Self::User),
            "INSTITUTION" => Some(Self::Institution),
            _ => None,
        }
    }
}

/// (scope_type, scope_id) pair. GLOBAL scope uses an empty scope id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphScope {
    pub scope_type: ScopeType,
    pub scope_id: String,
}

impl GraphScope {
    pub fn global() -> Self {
        Self {
            scope_type: ScopeType::Global,
            scope_id: String::new(),
        }
    }

    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            scope_type: ScopeType::User,
            scope_id: user_id.into(),
        }
    }
}

/// A topic graph. At most one BASELINE per (content_id, scope); at most one
/// LEARNER per (user_id, content_id). Created lazily on first write; never
/// deleted in normal operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicGraph {
    /// UUID v4 identifier.
    pub id: String,
    pub kind: GraphKind,
    pub scope: GraphScope,
    /// Owning content item. None for CURATED/global graphs.
    pub content_id: Option<String>,
    /// Owning learner. Only set on LEARNER graphs.
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Last time this graph was diffed against its counterpart.
    pub last_compared_at: Option<DateTime<Utc>>,
}

impl TopicGraph {
    /// New BASELINE graph for a content item at a scope.
    pub fn baseline(content_id: impl Into<String>, scope: GraphScope) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind: GraphKind::Baseline,
            scope,
            content_id: Some(content_id.into()),
            user_id: None,
            created_at: Utc::now(),
            last_compared_at: None,
        }
    }

    /// New LEARNER graph for a (user, content) pair.
    pub fn learner(user_id: impl Into<String>, content_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind: GraphKind::Learner,
            scope: GraphScope::user(user_id.clone()),
            content_id: Some(content_id.into()),
            user_id: Some(user_id),
            created_at: Utc::now(),
            last_compared_at: None,
        }
    }

    /// New CURATED/GLOBAL graph (registry anchor).
    pub fn curated_global() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind: GraphKind::Curated,
            scope: GraphScope::global(),
            content_id: None,
            user_id: None,
            created_at: Utc::now(),
            last_compared_at: None,
        }
    }
}

/// Identity equality: a graph's identity is its UUID, not its contents.
impl PartialEq for TopicGraph {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
