//! Slug normalization — the matching key for topic labels across graphs.

use regex::Regex;
use std::sync::LazyLock;

static RE_SEPARATORS: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[\s_-]+").ok());
static RE_NON_WORD: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[^a-z0-9-]").ok());
static RE_HYPHEN_RUNS: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"-{2,}").ok());

/// Normalize a topic label into its slug form: lower-cased, trimmed,
/// whitespace/underscore/hyphen runs collapsed to a single hyphen, remaining
/// non-word characters stripped, leading/trailing hyphens trimmed.
///
/// Deterministic and idempotent: `slugify(slugify(x)) == slugify(x)`.
pub fn slugify(label: &str) -> String {
    let mut s = label.trim().to_lowercase();
    if let Some(re) = RE_SEPARATORS.as_ref() {
        s = re.replace_all(&s, "-").into_owned();
    }
    if let Some(re) = RE_NON_WORD.as_ref() {
        s = re.replace_all(&s, "").into_owned();
    }
    if let Some(re) = RE_HYPHEN_RUNS.as_ref() {
        s = re.replace_all(&s, "-").into_owned();
    }
    s.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Cellular Respiration"), "cellular-respiration");
    }

    #[test]
    fn collapses_separator_runs() {
        assert_eq!(slugify("krebs __ cycle -- step"), "krebs-cycle-step");
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(slugify("What is ATP?"), "what-is-atp");
        assert_eq!(slugify("photosynthesis (light phase)"), "photosynthesis-light-phase");
    }

    #[test]
    fn trims_edge_hyphens() {
        assert_eq!(slugify("--- membrane ---"), "membrane");
    }

    #[test]
    fn empty_and_symbol_only_inputs() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
