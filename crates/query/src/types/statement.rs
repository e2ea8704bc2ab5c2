//! Compiled SQL statement handed to the execution layer.

use serde::Serialize;

/// A parameterized SELECT statement.
///
/// Placeholders are positional `?` markers bound in the order of `params`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledStatement {
    /// SQL text.
    pub sql: String,
    /// Parameter values, first the full-text query, then filter values.
    pub params: Vec<String>,
}

impl CompiledStatement {
    /// Creates a statement.
    pub fn new(sql: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Returns the full-text query bound to the `CONTAINS` predicate.
    pub fn full_text_query(&self) -> Option<&str> {
        self.params.first().map(String::as_str)
    }

    /// Renders the statement with parameters inlined as SQL string literals.
    ///
    /// Only meant for log output. Execution must go through [`Self::sql`] and
    /// [`Self::params`].
    pub fn to_inline_sql(&self) -> String {
        let mut rendered = String::with_capacity(self.sql.len());
        let mut params = self.params.iter();
        for c in self.sql.chars() {
            if c == '?' {
                match params.next() {
                    Some(value) => {
                        rendered.push('\'');
                        rendered.push_str(&value.replace('\'', "''"));
                        rendered.push('\'');
                    }
                    None => rendered.push(c),
                }
            } else {
                rendered.push(c);
            }
        }
        rendered
    }
}
