//! Part Search Query Compiler
//!
//! This crate translates a Google-style search string typed by a user into a
//! parameterized SQL statement against the inventory part tables, using the
//! full-text engine's progression template to rank results from most to
//! least specific match.
//!
//! # Search Syntax
//!
//! | Input | Meaning |
//! |-------|---------|
//! | `bias unit` | both words, exact matches ranked above wildcard matches |
//! | `"bias unit"` | exact phrase only |
//! | `-orbit` | rows must not contain `orbit` |
//! | `planner:jelliott,sfernandez` | planner is one of the listed codes |
//! | `-planner:mgibson` | planner is not `mgibson` |
//!
//! # Architecture
//!
//! The pipeline is pure and stateless; each stage consumes the previous
//! stage's value:
//!
//! - [`parser`] - search string to [`ParseTree`](types::ParseTree)
//! - [`normalizer`] - parse tree to [`NormalizedQuery`](types::NormalizedQuery)
//! - [`relaxation`] - terms to the ranked progression query
//! - [`query_builder`] - progression query and filters to a
//!   [`CompiledStatement`](types::CompiledStatement)
//! - [`registry`] - the closed set of `name:value` filters
//! - [`executor`] - hand-off to a host-supplied [`QueryExecutor`]
//!
//! # Quick Start
//!
//! ```
//! use partsearch_query::SearchCompiler;
//!
//! let compiler = SearchCompiler::default();
//!
//! let statement = compiler
//!     .compile("bias \"unit\" -orbit planner:jelliott")
//!     .expect("valid search string")
//!     .expect("search string has terms");
//!
//! assert!(statement.sql.contains("CONTAINS(p.search_text, ?, 1) > 0"));
//! assert!(statement.sql.contains("(p.planner IN (?))"));
//! assert_eq!(statement.params[1], "JELLIOTT");
//!
//! // Blank input and filter-only input produce no statement.
//! assert!(compiler.compile("   ").unwrap().is_none());
//! ```
//!
//! # Errors
//!
//! Malformed search strings are rejected with a [`ParseError`] carrying the
//! offending position, never a panic:
//!
//! ```
//! use partsearch_query::SearchCompiler;
//!
//! let err = SearchCompiler::default().compile("bias-unit").unwrap_err();
//! assert_eq!(err.position, 4);
//! assert_eq!(err.to_outcome().status, 400);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod compiler;
pub mod config;
pub mod error;
pub mod executor;
pub mod normalizer;
pub mod parser;
pub mod query_builder;
pub mod registry;
pub mod relaxation;
pub mod schema;
pub mod types;

pub use compiler::{Explain, SearchCompiler};
pub use config::CompilerConfig;
pub use error::{ParseError, SearchError, SearchResult, ValidationOutcome};
pub use executor::{PartSearch, QueryExecutor};
pub use registry::{FilterKind, validate_registry};
pub use types::{CompiledStatement, FilterValue, NormalizedQuery, ParseTree, TermForm};

/// Parses a search string.
pub fn parse(input: &str) -> Result<ParseTree, ParseError> {
    parser::SearchParser::parse(input)
}

/// Normalizes a parse tree.
pub fn normalize(tree: ParseTree) -> NormalizedQuery {
    normalizer::Normalizer::normalize(tree)
}

/// Builds the progression query with the default relaxation cap.
pub fn build(query: &NormalizedQuery) -> Option<String> {
    relaxation::ProgressionBuilder::default().build(query)
}

/// Compiles a normalized query against a progression query.
pub fn compile(query: &NormalizedQuery, full_text: &str) -> CompiledStatement {
    query_builder::StatementCompiler::compile(query, full_text)
}
