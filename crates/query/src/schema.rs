//! Inventory schema names used by the compiled statement.

/// Inventory part table.
pub const PART_TABLE: &str = "inventory_part";

/// Customer part cross-reference table.
pub const CUSTOMER_XREF_TABLE: &str = "customer_part_xref";

/// Part status description table.
pub const STATUS_TABLE: &str = "part_status";

/// Full-text indexed column of the part table.
pub const SEARCH_TEXT_COLUMN: &str = "p.search_text";

/// Planner/buyer column of the part table.
pub const PLANNER_COLUMN: &str = "p.planner";

/// Secondary sort key.
pub const PART_NUMBER_COLUMN: &str = "p.part_number";

/// Label tying `CONTAINS` to `SCORE`.
pub const SCORE_LABEL: u32 = 1;
