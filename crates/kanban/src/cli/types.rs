//! CLI value enums and domain type conversions.

use clap::ValueEnum;

use crate::domain::{Grouping, Sorting};

/// Grouping key for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingArg {
    /// One lane per column
    Status,
    /// One lane per user
    User,
    /// One lane per priority level
    Priority,
}

impl std::fmt::Display for GroupingArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Grouping::from(*self))
    }
}

impl From<GroupingArg> for Grouping {
    fn from(arg: GroupingArg) -> Self {
        match arg {
            GroupingArg::Status => Grouping::Status,
            GroupingArg::User => Grouping::User,
            GroupingArg::Priority => Grouping::Priority,
        }
    }
}

/// Sorting key for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortingArg {
    /// Most urgent first
    Priority,
    /// Alphabetical by title
    Title,
}

impl std::fmt::Display for SortingArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Sorting::from(*self))
    }
}

impl From<SortingArg> for Sorting {
    fn from(arg: SortingArg) -> Self {
        match arg {
            SortingArg::Priority => Sorting::Priority,
            SortingArg::Title => Sorting::Title,
        }
    }
}
