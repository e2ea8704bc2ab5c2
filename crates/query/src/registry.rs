//! Filter registry.
//!
//! The registry is the closed set of `name:value` operators the search string
//! understands. Each entry maps a filter to the column it restricts and to the
//! formatter applied to its values before they are bound.
//!
//! Adding a filter means adding a [`FilterKind`] variant and a
//! [`FilterDefinition`] entry in [`FILTER_REGISTRY`]. Names that are not
//! registered are never parsed as filters, so the SQL compiler only ever sees
//! registered kinds.

use serde::Serialize;

/// A registered filter operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// `planner:` restricts by the planner/buyer code.
    Planner,
}

impl FilterKind {
    /// Resolves a filter by the name typed in the search string.
    ///
    /// Names are matched case-sensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        FILTER_REGISTRY
            .iter()
            .find(|def| def.name == name)
            .map(|def| def.kind)
    }

    /// Returns the registry entry for this filter.
    pub fn definition(&self) -> &'static FilterDefinition {
        match self {
            FilterKind::Planner => &PLANNER,
        }
    }

    /// Returns the name typed in the search string.
    pub fn name(&self) -> &'static str {
        self.definition().name
    }

    /// Returns the column this filter restricts.
    pub fn column(&self) -> &'static str {
        self.definition().column
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Transformation applied to filter values before binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormatter {
    /// Values are bound as typed.
    Identity,
    /// Values are upper-cased.
    Uppercase,
}

impl ValueFormatter {
    /// Formats a value for binding.
    pub fn apply(&self, value: &str) -> String {
        match self {
            ValueFormatter::Identity => value.to_string(),
            ValueFormatter::Uppercase => value.to_uppercase(),
        }
    }
}

/// Registry entry for one filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterDefinition {
    /// The filter this entry describes.
    pub kind: FilterKind,
    /// Name typed before the `:`.
    pub name: &'static str,
    /// Qualified column restricted by the filter.
    pub column: &'static str,
    /// Formatter applied to each value.
    pub formatter: ValueFormatter,
}

const PLANNER: FilterDefinition = FilterDefinition {
    kind: FilterKind::Planner,
    name: "planner",
    column: crate::schema::PLANNER_COLUMN,
    formatter: ValueFormatter::Uppercase,
};

/// All registered filters.
pub static FILTER_REGISTRY: &[FilterDefinition] = &[PLANNER];

/// Checks the registry for entries the parser or compiler could not honor.
///
/// Hosts call this once at startup. Names must be non-empty ASCII letters so
/// that `name:` is unambiguous in the grammar, names must be unique, and each
/// kind must resolve back to its own entry.
pub fn validate_registry() -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (i, def) in FILTER_REGISTRY.iter().enumerate() {
        if def.name.is_empty() || !def.name.chars().all(|c| c.is_ascii_alphabetic()) {
            errors.push(format!("Filter name '{}' must be ASCII letters", def.name));
        }
        if def.column.is_empty() {
            errors.push(format!("Filter '{}' has no column", def.name));
        }
        if FILTER_REGISTRY[..i].iter().any(|other| other.name == def.name) {
            errors.push(format!("Filter name '{}' is registered twice", def.name));
        }
        if def.kind.definition() != def {
            errors.push(format!(
                "Filter '{}' does not resolve to its own definition",
                def.name
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
