/// Parallax system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum excerpt length stored on a piece of edge evidence (characters).
pub const MAX_EVIDENCE_EXCERPT_CHARS: usize = 200;

/// Maximum number of topics extracted from a single synthesis note.
pub const MAX_SYNTHESIS_TOPICS: usize = 3;

/// Minimum fragment length (characters) for a synthesis fragment to count
/// as a topic.
pub const MIN_SYNTHESIS_FRAGMENT_CHARS: usize = 10;

/// Fallback topic length when no fragment qualifies: the first N characters
/// of the note text.
pub const SYNTHESIS_FALLBACK_CHARS: usize = 50;

/// Number of gaps and discoveries carried in a diff summary.
pub const DIFF_SUMMARY_TOP_N: usize = 10;
