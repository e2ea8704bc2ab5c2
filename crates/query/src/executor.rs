//! Hand-off to the query-execution collaborator.
//!
//! The compiler never talks to a database. [`PartSearch`] compiles a search
//! string and passes the statement to a [`QueryExecutor`] supplied by the
//! host, which owns connections, binding and row mapping.

use async_trait::async_trait;

use crate::compiler::SearchCompiler;
use crate::error::{SearchError, SearchResult};
use crate::types::CompiledStatement;

/// Executes compiled statements.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// A result row.
    type Row: Send;

    /// The executor's failure type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Runs `statement`, binding `statement.params` positionally.
    async fn execute(&self, statement: &CompiledStatement) -> Result<Vec<Self::Row>, Self::Error>;
}

/// Search service: compile, then execute.
#[derive(Debug, Clone)]
pub struct PartSearch<E> {
    compiler: SearchCompiler,
    executor: E,
}

impl<E: QueryExecutor> PartSearch<E> {
    /// Creates a search service.
    pub fn new(compiler: SearchCompiler, executor: E) -> Self {
        Self { compiler, executor }
    }

    /// Returns the compiler.
    pub fn compiler(&self) -> &SearchCompiler {
        &self.compiler
    }

    /// Returns the executor.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Searches for parts matching `input`.
    ///
    /// A search string without positive terms returns no rows and never
    /// reaches the executor.
    pub async fn search(&self, input: &str) -> SearchResult<Vec<E::Row>> {
        let Some(statement) = self.compiler.compile(input)? else {
            tracing::debug!("Search string has no terms; skipping execution");
            return Ok(Vec::new());
        };

        let rows = self
            .executor
            .execute(&statement)
            .await
            .map_err(SearchError::execution)?;

        tracing::debug!(rows = rows.len(), "Search executed");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingExecutor {
        calls: Mutex<Vec<CompiledStatement>>,
    }

    #[async_trait]
    impl QueryExecutor for RecordingExecutor {
        type Row = String;
        type Error = std::io::Error;

        async fn execute(
            &self,
            statement: &CompiledStatement,
        ) -> Result<Vec<Self::Row>, Self::Error> {
            self.calls.lock().unwrap().push(statement.clone());
            Ok(vec!["PN-1".to_string()])
        }
    }

    #[test]
    fn test_search_executes_statement() {
        let search = PartSearch::new(SearchCompiler::default(), RecordingExecutor::default());
        let rows = tokio_test::block_on(search.search("bias")).unwrap();
        assert_eq!(rows, vec!["PN-1"]);
        assert_eq!(search.executor().calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_search_skips_executor() {
        let search = PartSearch::new(SearchCompiler::default(), RecordingExecutor::default());
        let rows = tokio_test::block_on(search.search("  ")).unwrap();
        assert!(rows.is_empty());
        assert!(search.executor().calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_parse_error_skips_executor() {
        let search = PartSearch::new(SearchCompiler::default(), RecordingExecutor::default());
        let err = tokio_test::block_on(search.search("bias-")).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(search.executor().calls.lock().unwrap().is_empty());
    }
}
