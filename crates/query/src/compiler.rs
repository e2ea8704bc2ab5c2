//! End-to-end search-string compilation.

use serde::Serialize;

use crate::config::CompilerConfig;
use crate::error::ParseError;
use crate::normalizer::Normalizer;
use crate::parser::SearchParser;
use crate::query_builder::StatementCompiler;
use crate::relaxation::ProgressionBuilder;
use crate::types::{CompiledStatement, NormalizedQuery};

/// Every intermediate stage for one search string, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explain {
    /// The search string as received.
    pub input: String,
    /// Normalized terms, negations and filters.
    pub normalized: NormalizedQuery,
    /// The progression query, if the search string had terms.
    pub full_text: Option<String>,
    /// The compiled statement, if the search string had terms.
    pub statement: Option<CompiledStatement>,
}

/// Compiles search strings into SQL statements.
///
/// The compiler holds only configuration and can be shared freely across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct SearchCompiler {
    config: CompilerConfig,
    builder: ProgressionBuilder,
}

impl SearchCompiler {
    /// Creates a compiler with the given configuration.
    pub fn new(config: CompilerConfig) -> Self {
        let builder = ProgressionBuilder::new(config.max_relaxed_terms);
        Self { config, builder }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compiles `input`.
    ///
    /// Returns `Ok(None)` when the search string has no positive terms; the
    /// caller answers with an empty result without querying.
    pub fn compile(&self, input: &str) -> Result<Option<CompiledStatement>, ParseError> {
        let normalized = self.normalize(input)?;
        Ok(self.compile_normalized(&normalized))
    }

    /// Parses and normalizes `input`.
    pub fn normalize(&self, input: &str) -> Result<NormalizedQuery, ParseError> {
        let tree = SearchParser::parse(input).inspect_err(|e| {
            tracing::debug!(position = e.position, fragment = %e.fragment, "Rejected search string");
        })?;
        Ok(Normalizer::normalize(tree))
    }

    /// Builds the progression query and statement for a normalized query.
    pub fn compile_normalized(&self, query: &NormalizedQuery) -> Option<CompiledStatement> {
        let full_text = self.builder.build(query)?;
        let statement = StatementCompiler::compile(query, &full_text);
        if self.config.log_queries {
            tracing::debug!(sql = %statement.to_inline_sql(), "Search statement");
        }
        Some(statement)
    }

    /// Runs every stage and returns all intermediate values.
    pub fn explain(&self, input: &str) -> Result<Explain, ParseError> {
        let normalized = self.normalize(input)?;
        let full_text = self.builder.build(&normalized);
        let statement = full_text
            .as_deref()
            .map(|full_text| StatementCompiler::compile(&normalized, full_text));
        Ok(Explain {
            input: input.to_string(),
            normalized,
            full_text,
            statement,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_empty() {
        let compiler = SearchCompiler::default();
        assert_eq!(compiler.compile("").unwrap(), None);
        assert_eq!(compiler.compile("   ").unwrap(), None);
    }

    #[test]
    fn test_compile_filters_only() {
        let compiler = SearchCompiler::default();
        assert_eq!(compiler.compile("planner:jelliott -orbit").unwrap(), None);
    }

    #[test]
    fn test_compile_parse_error() {
        let compiler = SearchCompiler::default();
        let err = compiler.compile("bias \"unit").unwrap_err();
        assert_eq!(err.position, 5);
    }

    #[test]
    fn test_compile_binds_full_text_first() {
        let compiler = SearchCompiler::new(CompilerConfig::for_testing());
        let stmt = compiler.compile("bias planner:jelliott").unwrap().unwrap();
        assert_eq!(stmt.params.len(), 2);
        assert!(stmt.params[0].starts_with("<query>"));
        assert_eq!(stmt.params[1], "JELLIOTT");
    }

    #[test]
    fn test_config_cap_is_applied() {
        let compiler = SearchCompiler::new(CompilerConfig {
            max_relaxed_terms: 0,
            ..Default::default()
        });
        let stmt = compiler.compile("bias unit").unwrap().unwrap();
        assert!(!stmt.params[0].contains('%'));
    }

    #[test]
    fn test_out_of_range_cap_compiles_long_search() {
        let config: CompilerConfig =
            serde_json::from_value(serde_json::json!({ "max_relaxed_terms": 64 })).unwrap();
        assert!(config.validate().is_err());

        let input = (0..64).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let stmt = SearchCompiler::new(config).compile(&input).unwrap().unwrap();
        assert!(stmt.params[0].contains("%w15%"));
        assert!(!stmt.params[0].contains("%w16%"));
    }

    #[test]
    fn test_explain() {
        let compiler = SearchCompiler::default();
        let explain = compiler.explain("-orbit").unwrap();
        assert_eq!(explain.normalized.negations, vec!["{orbit}"]);
        assert_eq!(explain.full_text, None);
        assert_eq!(explain.statement, None);

        let explain = compiler.explain("bias").unwrap();
        assert_eq!(
            explain.statement.as_ref().and_then(|s| s.full_text_query()),
            explain.full_text.as_deref()
        );
    }
}
