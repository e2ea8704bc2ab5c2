//! Property-based tests for term sanitizing, escaping and parsing.
//!
//! Run with: `cargo test --test property_tests`

use proptest::prelude::*;

use partsearch_query::normalizer::{ESCAPED_CHARS, SANITIZED_CHARS, escape_wildcard, sanitize};
use partsearch_query::{SearchCompiler, parse};

// =============================================================================
// Strategies
// =============================================================================

/// Characters that are neither sanitized nor escaped.
fn plain_char() -> impl Strategy<Value = char> {
    any::<char>().prop_filter("plain character", |c| {
        !SANITIZED_CHARS.contains(c) && !ESCAPED_CHARS.contains(c)
    })
}

fn plain_string() -> impl Strategy<Value = String> {
    prop::collection::vec(plain_char(), 0..24).prop_map(|chars| chars.into_iter().collect())
}

/// A plain string with characters from `set` inserted at random positions.
fn interleaved(set: &'static [char]) -> impl Strategy<Value = (String, String)> {
    (
        prop::collection::vec(plain_char(), 0..24),
        prop::collection::vec((any::<prop::sample::Index>(), prop::sample::select(set)), 0..12),
    )
        .prop_map(|(plain, inserts)| {
            let mut mixed = plain.clone();
            for (index, c) in inserts {
                let at = index.index(mixed.len() + 1);
                mixed.insert(at, c);
            }
            (plain.into_iter().collect(), mixed.into_iter().collect())
        })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn sanitize_removes_exactly_the_sanitized_set((plain, mixed) in interleaved(SANITIZED_CHARS)) {
        prop_assert_eq!(sanitize(&mixed), plain);
    }

    #[test]
    fn sanitize_leaves_plain_text_untouched(plain in plain_string()) {
        prop_assert_eq!(sanitize(&plain), plain);
    }

    #[test]
    fn escape_prefixes_exactly_the_escaped_set((_plain, mixed) in interleaved(ESCAPED_CHARS)) {
        let escaped = escape_wildcard(&mixed);

        let mut expected = String::new();
        for c in mixed.chars() {
            if ESCAPED_CHARS.contains(&c) {
                expected.push('\\');
            }
            expected.push(c);
        }
        prop_assert_eq!(&escaped, &expected);

        let added = escaped.chars().count() - mixed.chars().count();
        let special = mixed.chars().filter(|c| ESCAPED_CHARS.contains(c)).count();
        prop_assert_eq!(added, special);
    }

    #[test]
    fn parser_never_panics(input in ".*") {
        let _ = parse(&input);
    }

    #[test]
    fn compile_is_deterministic(input in "[a-z\" -]{0,40}") {
        let compiler = SearchCompiler::default();
        prop_assert_eq!(compiler.compile(&input), compiler.compile(&input));
    }

    #[test]
    fn placeholders_match_params(words in prop::collection::vec("[a-z]{1,8}", 1..5),
                                 planners in prop::collection::vec("-?planner:[a-z]{1,6}", 0..4)) {
        let input = words.iter().chain(planners.iter()).cloned().collect::<Vec<_>>().join(" ");
        let statement = SearchCompiler::default().compile(&input).unwrap().unwrap();
        prop_assert_eq!(statement.sql.matches('?').count(), statement.params.len());
    }
}
