//! Static reference data: default columns, priority levels, status glyphs.

use crate::domain::Priority;
use serde::Serialize;

/// Columns a fresh board starts with, left to right.
pub const DEFAULT_STATUSES: [&str; 4] = ["Todo", "In Progress", "Done", "Cancelled"];

/// Label used for priorities outside the catalog.
pub const FALLBACK_PRIORITY_LABEL: &str = "No priority";

/// One entry of the priority scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityLevel {
    /// Priority value
    pub id: Priority,
    /// Display label
    pub label: &'static str,
}

/// The priority scale, most urgent first.
pub const PRIORITY_LEVELS: [PriorityLevel; 5] = [
    PriorityLevel {
        id: Priority::URGENT,
        label: "Urgent",
    },
    PriorityLevel {
        id: Priority::HIGH,
        label: "High",
    },
    PriorityLevel {
        id: Priority::MEDIUM,
        label: "Medium",
    },
    PriorityLevel {
        id: Priority::LOW,
        label: "Low",
    },
    PriorityLevel {
        id: Priority::NONE,
        label: "No priority",
    },
];

/// Owned copy of [`DEFAULT_STATUSES`].
pub fn default_columns() -> Vec<String> {
    DEFAULT_STATUSES.iter().map(ToString::to_string).collect()
}

/// Label for a raw priority value, falling back to "No priority".
pub fn priority_label(id: u8) -> &'static str {
    PRIORITY_LEVELS
        .iter()
        .find(|level| level.id.value() == id)
        .map_or(FALLBACK_PRIORITY_LABEL, |level| level.label)
}

/// Built-in status glyph families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusIcon {
    /// Not started (also used for any user-created column)
    Todo,
    /// Underway
    InProgress,
    /// Finished
    Done,
    /// Abandoned
    Cancelled,
}

impl StatusIcon {
    /// Unicode glyph.
    pub fn glyph(self) -> &'static str {
        match self {
            StatusIcon::Todo => "○",
            StatusIcon::InProgress => "◐",
            StatusIcon::Done => "●",
            StatusIcon::Cancelled => "×",
        }
    }

    /// ASCII fallback glyph.
    pub fn ascii(self) -> &'static str {
        match self {
            StatusIcon::Todo => "o",
            StatusIcon::InProgress => "~",
            StatusIcon::Done => "*",
            StatusIcon::Cancelled => "x",
        }
    }
}

/// Icon for a column name, matched case-insensitively.
///
/// Unknown names, including user-created columns, get the todo icon.
pub fn status_icon(name: &str) -> StatusIcon {
    match name.to_lowercase().as_str() {
        "in progress" => StatusIcon::InProgress,
        "done" => StatusIcon::Done,
        "cancelled" => StatusIcon::Cancelled,
        _ => StatusIcon::Todo,
    }
}
