//! Error types for the search-string compiler.
//!
//! Only parsing can fail. Every later stage is total over a parsed query, so
//! [`ParseError`] is the single error the compiler surfaces. [`SearchError`]
//! adds the execution failure reported by a [`QueryExecutor`](crate::executor::QueryExecutor)
//! when the compiler is driven through [`PartSearch`](crate::executor::PartSearch).

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// The search string could not be derived from the grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("search parse error at position {position}: {message} (near '{fragment}')")]
pub struct ParseError {
    /// Byte offset of the offending input.
    pub position: usize,
    /// The offending input, up to the next separator.
    pub fragment: String,
    /// What the parser expected.
    pub message: String,
}

impl ParseError {
    /// Creates a parse error at `position` of `input`.
    pub fn at(input: &str, position: usize, message: impl Into<String>) -> Self {
        let rest = input.get(position..).unwrap_or_default();
        let fragment = rest.split(' ').next().unwrap_or_default().to_string();
        Self {
            position,
            fragment,
            message: message.into(),
        }
    }

    /// Builds the client-facing validation outcome for this error.
    pub fn to_outcome(&self) -> ValidationOutcome {
        ValidationOutcome {
            status: 400,
            code: "invalid",
            diagnostics: self.message.clone(),
            position: self.position,
            fragment: self.fragment.clone(),
        }
    }
}

/// A structured validation failure suitable for a 4xx response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    /// HTTP status the transport layer should answer with.
    pub status: u16,
    /// Machine-readable issue code.
    pub code: &'static str,
    /// Human-readable explanation.
    pub diagnostics: String,
    /// Byte offset of the offending input.
    pub position: usize,
    /// The offending input.
    pub fragment: String,
}

impl ValidationOutcome {
    /// Returns the outcome as a JSON body.
    pub fn to_json(&self) -> Value {
        json!({
            "status": self.status,
            "issue": [{
                "severity": "error",
                "code": self.code,
                "diagnostics": self.diagnostics,
                "location": [format!("q[{}]", self.position)],
                "expression": [self.fragment]
            }]
        })
    }
}

/// Errors returned by the search service.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The search string is malformed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The execution collaborator failed.
    #[error("query execution failed: {0}")]
    Execution(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SearchError {
    /// Wraps an executor failure.
    pub fn execution<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SearchError::Execution(Box::new(err))
    }

    /// Returns the HTTP status the transport layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            SearchError::Parse(_) => 400,
            SearchError::Execution(_) => 500,
        }
    }

    /// Returns the validation outcome for client errors.
    pub fn outcome(&self) -> Option<ValidationOutcome> {
        match self {
            SearchError::Parse(e) => Some(e.to_outcome()),
            SearchError::Execution(_) => None,
        }
    }
}

/// Result type for search service operations.
pub type SearchResult<T> = Result<T, SearchError>;
