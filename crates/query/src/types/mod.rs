//! Core types flowing through the search-string pipeline.
//!
//! Each stage of the pipeline consumes the value produced by the previous
//! stage and returns a new one:
//!
//! - [`ParseTree`] - terms and filter clauses as typed by the user
//! - [`NormalizedQuery`] - sanitized term forms, negations and folded filters
//! - [`CompiledStatement`] - SQL text plus positional parameters

mod parse_tree;
mod query;
mod statement;

pub use parse_tree::{FilterClause, Node, ParseTree, TermNode};
pub use query::{FilterMap, FilterValue, NormalizedQuery, TermForm};
pub use statement::CompiledStatement;
