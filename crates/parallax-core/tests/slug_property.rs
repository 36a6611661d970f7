use parallax_core::graph::slugify;
use proptest::prelude::*;

proptest! {
    #[test]
    fn slugify_is_idempotent(input in ".{0,120}") {
        let once = slugify(&input);
        prop_assert_eq!(slugify(&once), once);
    }

    #[test]
    fn slugify_output_alphabet(input in ".{0,120}") {
        let slug = slugify(&input);
        prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        prop_assert!(!slug.starts_with('-'));
        prop_assert!(!slug.ends_with('-'));
        prop_assert!(!slug.contains("--"));
    }

    #[test]
    fn slugify_is_deterministic(input in ".{0,120}") {
        prop_assert_eq!(slugify(&input), slugify(&input));
    }
}
