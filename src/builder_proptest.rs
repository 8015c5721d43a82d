//! Property-based tests for rendering.
//!
//! These tests use proptest to generate random fragments and substitution
//! inputs and verify that the rendering invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::builder::{build_text, Placeholders};
    use crate::fragments::{self, Fragment};
    use crate::path::FieldPath;
    use crate::substitutions::Substituter;
    use proptest::prelude::*;
    use serde_json::json;

    /// Write `contents` to a fresh directory and resolve it as a file fragment.
    fn resolve_file(contents: &str, directive: &str, needle: &str) -> String {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("frag.md"), contents).unwrap();
        let entry = json!({"path": "frag.md", directive: needle});
        let fragment = fragments::resolve(&entry, &FieldPath::root(), dir.path()).unwrap();
        fragment.render().to_string()
    }

    proptest! {
        /// Property: text fragments render as their plain concatenation
        #[test]
        fn build_concatenates_without_separators(parts in prop::collection::vec("[^$]{1,20}", 1..8)) {
            let fragments: Vec<Fragment> = parts.iter().map(|p| Fragment::text(p.clone())).collect();
            let text = build_text(&fragments, &[], &Placeholders::default());
            prop_assert_eq!(text, parts.concat());
        }

        /// Property: rendering is deterministic
        #[test]
        fn build_is_deterministic(input in ".{0,40}") {
            let fragments = vec![Fragment::text(input)];
            let subs = vec![Substituter::new("[aeiou]", "_", true).unwrap()];
            let first = build_text(&fragments, &subs, &Placeholders::default());
            let second = build_text(&fragments, &subs, &Placeholders::default());
            prop_assert_eq!(first, second);
        }

        /// Property: two substitutions equal applying them one after the other
        #[test]
        fn substitutions_compose_sequentially(input in "[abc ]{0,30}") {
            let p1 = Substituter::new("a", "b", false).unwrap();
            let p2 = Substituter::new("b+", "c", false).unwrap();
            let fragments = vec![Fragment::text(input.clone())];
            let text = build_text(&fragments, &[p1.clone(), p2.clone()], &Placeholders::default());
            prop_assert_eq!(text, p2.substitute(&p1.substitute(&input)));
        }

        /// Property: ignore-case removes every letter-case variant of the pattern
        #[test]
        fn ignore_case_matches_any_casing(word in "[hH][eE][lL][lL][oO]") {
            let sub = Substituter::new("hello", "", true).unwrap();
            prop_assert_eq!(sub.substitute(&word), "");
        }

        /// Property: start-after drops the needle and everything before it
        #[test]
        fn start_after_drops_needle_and_prefix(
            prefix in "[a-z \n]{0,30}",
            needle in "<!--[A-Z]{1,6}-->",
            suffix in "[a-z \n<>!-]{0,30}",
        ) {
            let rendered = resolve_file(&format!("{}{}{}", prefix, needle, suffix), "start-after", &needle);
            prop_assert_eq!(rendered, suffix);
        }

        /// Property: start-at keeps the needle and drops everything before it
        #[test]
        fn start_at_begins_at_needle(
            prefix in "[a-z \n]{0,30}",
            needle in "<!--[A-Z]{1,6}-->",
            suffix in "[a-z \n<>!-]{0,30}",
        ) {
            let rendered = resolve_file(&format!("{}{}{}", prefix, needle, suffix), "start-at", &needle);
            prop_assert!(rendered.starts_with(needle.as_str()));
            prop_assert_eq!(rendered, format!("{}{}", needle, suffix));
        }

        /// Property: end-before keeps only what precedes the first needle
        #[test]
        fn end_before_keeps_prefix(
            prefix in "[a-z \n]{0,30}",
            needle in "<!--[A-Z]{1,6}-->",
            suffix in "[a-z \n<>!-]{0,30}",
        ) {
            let rendered = resolve_file(&format!("{}{}{}", prefix, needle, suffix), "end-before", &needle);
            prop_assert_eq!(rendered, prefix);
        }
    }
}
