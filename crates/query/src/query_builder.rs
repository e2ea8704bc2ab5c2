//! SQL statement compiler.
//!
//! Turns a progression query and the filters of a [`NormalizedQuery`] into a
//! parameterized SELECT over the inventory part table:
//!
//! ```sql
//! SELECT ... , SCORE(1) AS score
//! FROM inventory_part p
//! LEFT JOIN customer_part_xref x ON x.part_number = p.part_number
//! LEFT JOIN part_status s ON s.status_code = p.status_code
//! WHERE CONTAINS(p.search_text, ?, 1) > 0
//!   AND (p.planner IN (?, ?) AND p.planner NOT IN (?))
//! ORDER BY SCORE(1) DESC, p.part_number
//! ```
//!
//! Placeholders are positional. The progression query is always the first
//! parameter; filter values follow in filter order, positive values before
//! negated ones within a filter.

use crate::registry::FilterKind;
use crate::schema::{
    CUSTOMER_XREF_TABLE, PART_NUMBER_COLUMN, PART_TABLE, SCORE_LABEL, SEARCH_TEXT_COLUMN,
    STATUS_TABLE,
};
use crate::types::{CompiledStatement, FilterValue, NormalizedQuery};

/// A fragment of SQL with bound parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlFragment {
    /// The SQL clause.
    pub sql: String,
    /// Bound parameter values.
    pub params: Vec<String>,
}

impl SqlFragment {
    /// Creates a new SQL fragment.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Creates a fragment with parameters.
    pub fn with_params(sql: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Adds a parameter and returns its placeholder.
    pub fn add_param(&mut self, param: impl Into<String>) -> &'static str {
        self.params.push(param.into());
        "?"
    }

    /// Conjoins with another fragment.
    ///
    /// Operands are not parenthesized; callers group compound operands with
    /// [`SqlFragment::grouped`].
    pub fn and(mut self, other: SqlFragment) -> Self {
        if !self.sql.is_empty() && !other.sql.is_empty() {
            self.sql = format!("{} AND {}", self.sql, other.sql);
        } else if !other.sql.is_empty() {
            self.sql = other.sql;
        }
        self.params.extend(other.params);
        self
    }

    /// Wraps the fragment in parentheses.
    pub fn grouped(mut self) -> Self {
        if !self.sql.is_empty() {
            self.sql = format!("({})", self.sql);
        }
        self
    }

    /// Returns true if this fragment is empty.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

/// Compiles normalized queries into SQL statements.
pub struct StatementCompiler;

impl StatementCompiler {
    /// Builds the statement for `query`, matching rows against `full_text`.
    pub fn compile(query: &NormalizedQuery, full_text: &str) -> CompiledStatement {
        let mut condition = Self::full_text_predicate(full_text);
        for (kind, values) in query.filters.iter() {
            if let Some(filter) = Self::filter_condition(kind, values) {
                condition = condition.and(filter);
            }
        }

        let sql = format!(
            "{} WHERE {} ORDER BY SCORE({}) DESC, {}",
            Self::select_clause(),
            condition.sql,
            SCORE_LABEL,
            PART_NUMBER_COLUMN
        );

        tracing::debug!(
            filters = query.filters.len(),
            params = condition.params.len(),
            "Compiled search statement"
        );
        CompiledStatement::new(sql, condition.params)
    }

    /// SELECT list with the part, cross-reference and status joins.
    fn select_clause() -> String {
        format!(
            "SELECT p.part_number, p.description, p.planner, p.status_code, \
             s.description AS status_description, x.customer_part_number, \
             SCORE({label}) AS score \
             FROM {part} p \
             LEFT JOIN {xref} x ON x.part_number = p.part_number \
             LEFT JOIN {status} s ON s.status_code = p.status_code",
            label = SCORE_LABEL,
            part = PART_TABLE,
            xref = CUSTOMER_XREF_TABLE,
            status = STATUS_TABLE,
        )
    }

    /// `CONTAINS(p.search_text, ?, 1) > 0` bound to the progression query.
    pub fn full_text_predicate(full_text: &str) -> SqlFragment {
        let mut fragment = SqlFragment::default();
        let placeholder = fragment.add_param(full_text);
        fragment.sql = format!(
            "CONTAINS({}, {}, {}) > 0",
            SEARCH_TEXT_COLUMN, placeholder, SCORE_LABEL
        );
        fragment
    }

    /// Builds the parenthesized IN / NOT IN group for one filter.
    ///
    /// Returns `None` when the filter has no values.
    pub fn filter_condition(kind: FilterKind, values: &[FilterValue]) -> Option<SqlFragment> {
        let def = kind.definition();
        let (negated, positive): (Vec<&FilterValue>, Vec<&FilterValue>) =
            values.iter().partition(|v| v.is_negated());

        let formatted = |group: Vec<&FilterValue>| -> Vec<String> {
            group
                .into_iter()
                .map(|v| def.formatter.apply(v.as_str()))
                .collect()
        };

        let condition = Self::membership(def.column, "IN", formatted(positive))
            .and(Self::membership(def.column, "NOT IN", formatted(negated)));

        if condition.is_empty() {
            None
        } else {
            Some(condition.grouped())
        }
    }

    /// `column op (?, ...)`, or an empty fragment for no values.
    fn membership(column: &str, op: &str, values: Vec<String>) -> SqlFragment {
        if values.is_empty() {
            return SqlFragment::default();
        }
        let mut fragment = SqlFragment::default();
        let placeholders: Vec<&str> = values.into_iter().map(|v| fragment.add_param(v)).collect();
        fragment.sql = format!("{} {} ({})", column, op, placeholders.join(", "));
        fragment
    }
}
