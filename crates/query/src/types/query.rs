//! Normalized query representation.

use serde::Serialize;
use serde::ser::{SerializeMap, SerializeSeq, Serializer};

use crate::registry::FilterKind;

/// Alternatives for one search term, most specific first.
///
/// The first alternative is always the braced exact form (`{bias}`). Unquoted
/// terms carry a second, wildcard alternative (`%bias%`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermForm {
    alternatives: Vec<String>,
}

impl TermForm {
    /// Builds the single-alternative form of a quoted term.
    pub fn literal(sanitized: &str) -> Self {
        Self {
            alternatives: vec![format!("{{{}}}", sanitized)],
        }
    }

    /// Builds the two-alternative form of an unquoted term.
    pub fn non_literal(sanitized: &str, escaped: &str) -> Self {
        Self {
            alternatives: vec![format!("{{{}}}", sanitized), format!("%{}%", escaped)],
        }
    }

    /// Returns all alternatives, most specific first.
    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    /// Returns the exact-match alternative.
    pub fn exact(&self) -> &str {
        &self.alternatives[0]
    }

    /// Returns the wildcard alternative, if the term has one.
    pub fn wildcard(&self) -> Option<&str> {
        self.alternatives.get(1).map(String::as_str)
    }

    /// Returns true if the term only matches exactly.
    pub fn is_literal(&self) -> bool {
        self.alternatives.len() == 1
    }
}

impl Serialize for TermForm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.alternatives.len()))?;
        for alternative in &self.alternatives {
            seq.serialize_element(alternative)?;
        }
        seq.end()
    }
}

/// A filter value, either required or excluded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterValue {
    /// Rows must match this value.
    Value(String),
    /// Rows must not match this value.
    Negated(String),
}

impl FilterValue {
    /// Creates a required value.
    pub fn value(v: impl Into<String>) -> Self {
        FilterValue::Value(v.into())
    }

    /// Creates an excluded value.
    pub fn negated(v: impl Into<String>) -> Self {
        FilterValue::Negated(v.into())
    }

    /// Returns the raw value regardless of negation.
    pub fn as_str(&self) -> &str {
        match self {
            FilterValue::Value(v) | FilterValue::Negated(v) => v,
        }
    }

    /// Returns true for excluded values.
    pub fn is_negated(&self) -> bool {
        matches!(self, FilterValue::Negated(_))
    }
}

impl Serialize for FilterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FilterValue::Value(v) => serializer.serialize_str(v),
            FilterValue::Negated(v) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("not", v)?;
                map.end()
            }
        }
    }
}

/// Filter values keyed by filter, in first-appearance order.
///
/// Repeated clauses for the same filter accumulate under one entry; both the
/// entry order and the value order end up in the SQL parameter list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterMap {
    entries: Vec<(FilterKind, Vec<FilterValue>)>,
}

impl FilterMap {
    /// Creates an empty filter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends values under `kind`, keeping values already present.
    pub fn extend<I>(&mut self, kind: FilterKind, values: I)
    where
        I: IntoIterator<Item = FilterValue>,
    {
        match self.entries.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, existing)) => existing.extend(values),
            None => self.entries.push((kind, values.into_iter().collect())),
        }
    }

    /// Returns the values for a filter.
    pub fn get(&self, kind: FilterKind) -> Option<&[FilterValue]> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, values)| values.as_slice())
    }

    /// Iterates filters in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (FilterKind, &[FilterValue])> {
        self.entries
            .iter()
            .map(|(kind, values)| (*kind, values.as_slice()))
    }

    /// Returns the number of distinct filters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no filter was given.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FilterMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (kind, values) in &self.entries {
            map.serialize_entry(kind.name(), values)?;
        }
        map.end()
    }
}

/// Terms, negations and filters extracted from one search string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedQuery {
    /// Positive terms in input order.
    pub terms: Vec<TermForm>,
    /// Braced exact forms of negated terms.
    pub negations: Vec<String>,
    /// Filters in first-appearance order.
    pub filters: FilterMap,
}

impl NormalizedQuery {
    /// Returns true for the canonical empty query.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.negations.is_empty() && self.filters.is_empty()
    }
}
