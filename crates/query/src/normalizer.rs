//! Query normalization.
//!
//! Folds a [`ParseTree`] into a [`NormalizedQuery`]:
//!
//! - term text is stripped of punctuation the full-text engine would treat as
//!   syntax ([`sanitize`])
//! - unquoted terms get a second, wildcard alternative whose operator
//!   characters are backslash-escaped ([`escape_wildcard`])
//! - negated terms keep only their exact form and go to `negations`
//! - filter clauses accumulate per filter, negated values tagged in place

use crate::types::{
    FilterClause, FilterValue, Node, NormalizedQuery, ParseTree, TermForm, TermNode,
};

/// Characters removed from every term.
pub const SANITIZED_CHARS: &[char] = &[
    '"', '\'', '(', ')', '[', ']', '{', '}', ',', '.', '*', '?', '_',
];

/// Characters escaped in the wildcard alternative.
pub const ESCAPED_CHARS: &[char] = &['&', '=', '\\', '-', ';', '~', '|', '$', '!', '>'];

/// Removes [`SANITIZED_CHARS`] from `text`.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !SANITIZED_CHARS.contains(c)).collect()
}

/// Prefixes every occurrence of [`ESCAPED_CHARS`] with a backslash.
pub fn escape_wildcard(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if ESCAPED_CHARS.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

/// Normalizes parse trees.
pub struct Normalizer;

impl Normalizer {
    /// Folds every node of `tree` into a normalized query.
    pub fn normalize(tree: ParseTree) -> NormalizedQuery {
        let mut query = NormalizedQuery::default();
        for node in tree {
            match node {
                Node::Term(term) => Self::fold_term(&mut query, term),
                Node::Filter(filter) => Self::fold_filter(&mut query, filter),
            }
        }

        tracing::debug!(
            terms = query.terms.len(),
            negations = query.negations.len(),
            filters = query.filters.len(),
            "Normalized search string"
        );
        query
    }

    fn fold_term(query: &mut NormalizedQuery, term: TermNode) {
        let sanitized = sanitize(&term.text);
        if sanitized.is_empty() {
            // `{}` is not a valid full-text operand
            tracing::warn!(
                term = %term.text,
                literal = term.literal,
                "Dropping term with no searchable characters"
            );
            return;
        }

        if term.negated {
            // Negation always matches exactly.
            query.negations.push(TermForm::literal(&sanitized).exact().to_string());
        } else if term.literal {
            query.terms.push(TermForm::literal(&sanitized));
        } else {
            query
                .terms
                .push(TermForm::non_literal(&sanitized, &escape_wildcard(&sanitized)));
        }
    }

    fn fold_filter(query: &mut NormalizedQuery, filter: FilterClause) {
        let negated = filter.negated;
        query.filters.extend(
            filter.kind,
            filter.values.into_iter().map(|v| {
                if negated {
                    FilterValue::Negated(v)
                } else {
                    FilterValue::Value(v)
                }
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SearchParser;
    use crate::registry::FilterKind;

    fn normalize(input: &str) -> NormalizedQuery {
        Normalizer::normalize(SearchParser::parse(input).unwrap())
    }

    fn alternatives(query: &NormalizedQuery) -> Vec<Vec<String>> {
        query
            .terms
            .iter()
            .map(|t| t.alternatives().to_vec())
            .collect()
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("bias"), "bias");
        assert_eq!(sanitize("(b)i[a]s{}"), "bias");
        assert_eq!(sanitize("a,b.c*d?e_f'g\"h"), "abcdefgh");
        assert_eq!(sanitize("a-b&c"), "a-b&c");
    }

    #[test]
    fn test_escape_wildcard() {
        assert_eq!(escape_wildcard("bias"), "bias");
        assert_eq!(escape_wildcard("a&b=c"), "a\\&b\\=c");
        assert_eq!(escape_wildcard("\\-;~|$!>"), "\\\\\\-\\;\\~\\|\\$\\!\\>");
        assert_eq!(escape_wildcard("<"), "<");
    }

    #[test]
    fn test_empty_query() {
        let query = normalize("");
        assert!(query.terms.is_empty());
        assert!(query.negations.is_empty());
        assert!(query.filters.is_empty());
        assert_eq!(query, NormalizedQuery::default());
    }

    #[test]
    fn test_term_shaping() {
        let query = normalize("bias unit 900");
        assert_eq!(
            alternatives(&query),
            vec![
                vec!["{bias}".to_string(), "%bias%".to_string()],
                vec!["{unit}".to_string(), "%unit%".to_string()],
                vec!["{900}".to_string(), "%900%".to_string()],
            ]
        );
    }

    #[test]
    fn test_literal_term_has_one_alternative() {
        let query = normalize("\"bias unit\"");
        assert_eq!(alternatives(&query), vec![vec!["{bias unit}".to_string()]]);
    }

    #[test]
    fn test_literal_is_sanitized_not_escaped() {
        let query = normalize("\"a&b (rev.2)\"");
        assert_eq!(alternatives(&query), vec![vec!["{a&b rev2}".to_string()]]);
    }

    #[test]
    fn test_wildcard_is_escaped() {
        let query = normalize("r&d");
        assert_eq!(
            alternatives(&query),
            vec![vec!["{r&d}".to_string(), "%r\\&d%".to_string()]]
        );
    }

    #[test]
    fn test_negated_terms_are_exact() {
        let query = normalize("bias -orbit -\"low.gain\"");
        assert_eq!(query.terms.len(), 1);
        assert_eq!(query.negations, vec!["{orbit}", "{lowgain}"]);
    }

    #[test]
    fn test_term_with_only_punctuation_is_dropped() {
        let query = normalize("bias ... -()");
        assert_eq!(query.terms.len(), 1);
        assert!(query.negations.is_empty());
    }

    #[test]
    fn test_quoted_punctuation_is_dropped() {
        let query = normalize("\"...\" \"(*)\"");
        assert!(query.is_empty());
        assert_eq!(crate::build(&query), None);

        let query = normalize("\"...\" unit");
        assert_eq!(alternatives(&query), vec![vec!["{unit}", "%unit%"]]);
    }

    #[test]
    fn test_filter_accumulation() {
        let query = normalize("planner:sbennett planner:jelliott");
        assert_eq!(
            query.filters.get(FilterKind::Planner),
            Some(&[FilterValue::value("sbennett"), FilterValue::value("jelliott")][..])
        );
        assert!(query.terms.is_empty());
    }

    #[test]
    fn test_negated_filter_accumulation() {
        let query = normalize("planner:jelliott -planner:sbennett");
        assert_eq!(
            query.filters.get(FilterKind::Planner),
            Some(&[FilterValue::value("jelliott"), FilterValue::negated("sbennett")][..])
        );
    }

    #[test]
    fn test_mixed_query() {
        let query = normalize(
            "planner:sbennett bias \"unit\" 900 -orbit -planner:mgibson planner:jelliott,sfernandez",
        );
        assert_eq!(
            alternatives(&query),
            vec![
                vec!["{bias}".to_string(), "%bias%".to_string()],
                vec!["{unit}".to_string()],
                vec!["{900}".to_string(), "%900%".to_string()],
            ]
        );
        assert_eq!(query.negations, vec!["{orbit}"]);
        assert_eq!(
            query.filters.get(FilterKind::Planner),
            Some(
                &[
                    FilterValue::value("sbennett"),
                    FilterValue::negated("mgibson"),
                    FilterValue::value("jelliott"),
                    FilterValue::value("sfernandez"),
                ][..]
            )
        );
    }
}
