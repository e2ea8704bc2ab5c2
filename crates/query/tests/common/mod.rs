//! Shared helpers for integration tests.

#![allow(dead_code)]

use partsearch_query::{CompiledStatement, CompilerConfig, SearchCompiler};

/// Opening of every progression query.
pub const ENVELOPE_OPEN: &str =
    "<query><textquery lang=\"ENGLISH\" grammar=\"CONTEXT\"><progression>";

/// Closing of every progression query.
pub const ENVELOPE_CLOSE: &str = "</progression></textquery></query>";

pub fn create_compiler() -> SearchCompiler {
    SearchCompiler::new(CompilerConfig::for_testing())
}

/// Wraps clauses the way the progression builder does.
pub fn progression(clauses: &[&str]) -> String {
    let mut out = String::from(ENVELOPE_OPEN);
    for clause in clauses {
        out.push_str("<seq>(");
        out.push_str(clause);
        out.push_str(")</seq>");
    }
    out.push_str(ENVELOPE_CLOSE);
    out
}

/// Returns the text between `WHERE` and `ORDER BY`.
pub fn where_clause(statement: &CompiledStatement) -> &str {
    let start = statement
        .sql
        .find(" WHERE ")
        .expect("statement has a WHERE clause")
        + " WHERE ".len();
    let end = statement
        .sql
        .find(" ORDER BY ")
        .expect("statement has an ORDER BY clause");
    &statement.sql[start..end]
}
