//! Parse tree produced by the grammar parser.

use crate::registry::FilterKind;

/// A free-text term as it appeared in the search string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermNode {
    /// Raw text of the term, without surrounding quotes or leading `-`.
    pub text: String,
    /// Whether the term was quoted (exact match only).
    pub literal: bool,
    /// Whether the term was prefixed with `-`.
    pub negated: bool,
}

impl TermNode {
    /// Creates an unquoted, non-negated term.
    pub fn word(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            literal: false,
            negated: false,
        }
    }

    /// Creates a quoted, non-negated term.
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            literal: true,
            negated: false,
        }
    }

    /// Marks the term as negated.
    pub fn negate(mut self) -> Self {
        self.negated = true;
        self
    }
}

/// A registered filter operator with its values, e.g. `planner:jelliott,sfernandez`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    /// The registered filter.
    pub kind: FilterKind,
    /// Whether the clause was prefixed with `-`.
    pub negated: bool,
    /// Non-empty values in the order they were typed.
    pub values: Vec<String>,
}

/// A single item of the search string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Free-text term.
    Term(TermNode),
    /// Filter clause.
    Filter(FilterClause),
}

/// Ordered sequence of nodes parsed from one search string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseTree {
    nodes: Vec<Node>,
}

impl ParseTree {
    /// Creates a parse tree from nodes.
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Returns the nodes in input order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns true if the search string contained no items.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl IntoIterator for ParseTree {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}
