//! Compiler configuration.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PARTSEARCH_MAX_RELAXED_TERMS` | 8 | Unquoted terms allowed to relax to wildcards |
//! | `PARTSEARCH_LOG_QUERIES` | false | Log compiled statements with inlined parameters |
//!
//! # Example
//!
//! ```rust
//! use partsearch_query::CompilerConfig;
//!
//! let config = CompilerConfig {
//!     max_relaxed_terms: 4,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use clap::Parser;
use serde::Deserialize;

pub use crate::relaxation::MAX_RELAXED_TERMS_LIMIT;
use crate::relaxation::DEFAULT_MAX_RELAXED_TERMS;

/// Configuration for [`SearchCompiler`](crate::SearchCompiler).
#[derive(Debug, Clone, Parser, Deserialize)]
#[command(name = "partsearch")]
#[command(about = "Inventory part search-string compiler")]
#[serde(default)]
pub struct CompilerConfig {
    /// Number of unquoted terms that contribute a wildcard alternative.
    #[arg(long, env = "PARTSEARCH_MAX_RELAXED_TERMS", default_value = "8")]
    pub max_relaxed_terms: usize,

    /// Log each compiled statement with parameters inlined (debug level).
    #[arg(long, env = "PARTSEARCH_LOG_QUERIES", default_value = "false")]
    pub log_queries: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            max_relaxed_terms: DEFAULT_MAX_RELAXED_TERMS,
            log_queries: false,
        }
    }
}

impl CompilerConfig {
    /// Creates a configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::try_parse_from(["partsearch"]).unwrap_or_default()
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.max_relaxed_terms > MAX_RELAXED_TERMS_LIMIT {
            errors.push(format!(
                "Max relaxed terms cannot exceed {}",
                MAX_RELAXED_TERMS_LIMIT
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    pub fn for_testing() -> Self {
        Self {
            max_relaxed_terms: DEFAULT_MAX_RELAXED_TERMS,
            log_queries: true,
        }
    }
}
