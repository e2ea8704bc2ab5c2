//! Relaxation (progression) query builder.
//!
//! Expands the ordered term forms of a [`NormalizedQuery`] into a ranked
//! sequence of full-text expressions and wraps them in the engine's
//! progression template:
//!
//! ```text
//! <query><textquery lang="ENGLISH" grammar="CONTEXT"><progression>
//!   <seq>(NEAR(({bias}, {unit}), 100, TRUE) NOT ({orbit}))</seq>
//!   <seq>({bias} AND {unit} NOT ({orbit}))</seq>
//!   ...
//! </progression></textquery></query>
//! ```
//!
//! Combinations run from all-exact to all-wildcard; within a combination the
//! proximity clause precedes the plain conjunction. The engine scores earlier
//! `<seq>` matches higher, so exact and near matches rank first.
//!
//! A query with `n` unquoted terms yields `2^n` combinations. Terms past
//! `max_relaxed_terms` unquoted terms contribute only their exact alternative.

use crate::types::{NormalizedQuery, TermForm};

/// Default number of unquoted terms allowed to relax to a wildcard.
pub const DEFAULT_MAX_RELAXED_TERMS: usize = 8;

/// Upper bound for the relaxation cap; `2^16` combinations.
pub const MAX_RELAXED_TERMS_LIMIT: usize = 16;

/// Word distance of the proximity clause.
pub const NEAR_DISTANCE: u32 = 100;

const ENVELOPE_OPEN: &str =
    "<query><textquery lang=\"ENGLISH\" grammar=\"CONTEXT\"><progression>";
const ENVELOPE_CLOSE: &str = "</progression></textquery></query>";

/// Builds progression templates from normalized queries.
#[derive(Debug, Clone)]
pub struct ProgressionBuilder {
    max_relaxed_terms: usize,
}

impl Default for ProgressionBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RELAXED_TERMS)
    }
}

impl ProgressionBuilder {
    /// Creates a builder that relaxes at most `max_relaxed_terms` terms.
    ///
    /// Values above [`MAX_RELAXED_TERMS_LIMIT`] are clamped to the limit.
    pub fn new(max_relaxed_terms: usize) -> Self {
        if max_relaxed_terms > MAX_RELAXED_TERMS_LIMIT {
            tracing::warn!(
                max_relaxed_terms,
                limit = MAX_RELAXED_TERMS_LIMIT,
                "Relaxation cap above limit; clamping"
            );
        }
        Self {
            max_relaxed_terms: max_relaxed_terms.min(MAX_RELAXED_TERMS_LIMIT),
        }
    }

    /// Returns the effective relaxation cap.
    pub fn max_relaxed_terms(&self) -> usize {
        self.max_relaxed_terms
    }

    /// Builds the full-text query, or `None` if the query has no terms.
    ///
    /// Negations and filters alone never produce a full-text query.
    pub fn build(&self, query: &NormalizedQuery) -> Option<String> {
        if query.terms.is_empty() {
            return None;
        }

        let negation = negation_clause(&query.negations);
        let mut progression = String::from(ENVELOPE_OPEN);
        for clause in self.clauses(&query.terms) {
            progression.push_str("<seq>(");
            progression.push_str(&clause);
            if let Some(negation) = &negation {
                progression.push(' ');
                progression.push_str(negation);
            }
            progression.push_str(")</seq>");
        }
        progression.push_str(ENVELOPE_CLOSE);

        tracing::debug!(
            terms = query.terms.len(),
            negations = query.negations.len(),
            length = progression.len(),
            "Built progression query"
        );
        Some(progression)
    }

    /// Returns the unwrapped clauses in ranking order.
    pub fn clauses(&self, terms: &[TermForm]) -> Vec<String> {
        let combinations = self.combinations(terms);
        let mut clauses = Vec::with_capacity(combinations.len() * 2);
        for combination in &combinations {
            if combination.len() > 1 {
                clauses.push(format!(
                    "NEAR(({}), {}, TRUE)",
                    combination.join(", "),
                    NEAR_DISTANCE
                ));
            }
            clauses.push(combination.join(" AND "));
        }
        clauses
    }

    /// Returns the cartesian product of term alternatives.
    ///
    /// The first term varies slowest, so the first combination is all exact
    /// forms and the last is all wildcard forms.
    pub fn combinations<'t>(&self, terms: &'t [TermForm]) -> Vec<Vec<&'t str>> {
        if terms.is_empty() {
            return Vec::new();
        }

        let counts = self.alternative_counts(terms);
        let mut indices = vec![0usize; terms.len()];
        let mut combinations = Vec::with_capacity(counts.iter().product());

        loop {
            combinations.push(
                indices
                    .iter()
                    .zip(terms)
                    .map(|(&i, term)| term.alternatives()[i].as_str())
                    .collect(),
            );

            // Odometer step: advance the last position, carrying leftwards.
            let mut pos = terms.len();
            loop {
                if pos == 0 {
                    return combinations;
                }
                pos -= 1;
                indices[pos] += 1;
                if indices[pos] < counts[pos] {
                    break;
                }
                indices[pos] = 0;
            }
        }
    }

    /// Number of alternatives each term contributes, after the relaxation cap.
    fn alternative_counts(&self, terms: &[TermForm]) -> Vec<usize> {
        let mut relaxed = 0usize;
        let counts: Vec<usize> = terms
            .iter()
            .map(|term| {
                let count = term.alternatives().len();
                if count > 1 {
                    if relaxed >= self.max_relaxed_terms {
                        return 1;
                    }
                    relaxed += 1;
                }
                count
            })
            .collect();

        let unquoted = terms.iter().filter(|t| !t.is_literal()).count();
        if unquoted > relaxed {
            tracing::warn!(
                unquoted,
                max_relaxed_terms = self.max_relaxed_terms,
                "Too many terms to relax; trailing terms match exactly only"
            );
        }
        counts
    }
}

/// `NOT (a | b)` for the given negations, or `None` when there are none.
fn negation_clause(negations: &[String]) -> Option<String> {
    if negations.is_empty() {
        None
    } else {
        Some(format!("NOT ({})", negations.join(" | ")))
    }
}
