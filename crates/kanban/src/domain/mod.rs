//! Domain types for the board.
//!
//! This module contains the core domain types: tickets, users, view
//! preferences, and the creation/patch payloads used by the mutation API.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lowest priority level ("No priority").
pub const MIN_PRIORITY: u8 = 0;

/// Highest priority level ("Urgent").
pub const MAX_PRIORITY: u8 = 4;

/// Status assigned to new tickets when none is given.
pub const DEFAULT_TICKET_STATUS: &str = "Todo";

/// Unique identifier for a ticket
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(pub String);

impl TicketId {
    /// Create a new ticket ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TicketId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TicketId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Ticket priority, 0 (No priority) through 4 (Urgent).
///
/// Values outside the catalog cannot be constructed, so every stored ticket
/// carries one of the five known levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    /// "No priority"
    pub const NONE: Self = Self(0);
    /// "Low"
    pub const LOW: Self = Self(1);
    /// "Medium"
    pub const MEDIUM: Self = Self(2);
    /// "High"
    pub const HIGH: Self = Self(3);
    /// "Urgent"
    pub const URGENT: Self = Self(4);

    /// Create a priority, returning `None` if `value` is above [`MAX_PRIORITY`].
    pub fn new(value: u8) -> Option<Self> {
        (value <= MAX_PRIORITY).then_some(Self(value))
    }

    /// Numeric level.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Human-readable catalog label.
    pub fn label(self) -> &'static str {
        crate::catalog::priority_label(self.0)
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            format!("priority must be between {MIN_PRIORITY} and {MAX_PRIORITY}, got {value}")
        })
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> Self {
        p.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single work item on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Unique, immutable identifier
    pub id: TicketId,

    /// Ticket title
    pub title: String,

    /// Name of the column the ticket sits in
    pub status: String,

    /// Priority level
    pub priority: Priority,

    /// Assigned user ID (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Free-form tag (optional)
    #[serde(
        default,
        deserialize_with = "deserialize_tag",
        skip_serializing_if = "Option::is_none"
    )]
    pub tag: Option<String>,
}

/// Accept either a single tag string or a list of tags.
///
/// Seed payloads carry tags as arrays; multiple entries are joined with
/// `", "`. Empty values become `None`.
fn deserialize_tag<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TagRepr {
        One(String),
        Many(Vec<String>),
    }

    let tag = match Option::<TagRepr>::deserialize(deserializer)? {
        None => None,
        Some(TagRepr::One(tag)) => Some(tag),
        Some(TagRepr::Many(tags)) => Some(tags.join(", ")),
    };
    Ok(tag.filter(|t| !t.is_empty()))
}

/// A board user. Users are seeded once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: String,

    /// Display name
    pub name: String,
}

impl User {
    /// First character of the name, used as an avatar.
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next()
    }
}

/// Data for creating a new ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    /// Ticket title (must not be empty)
    pub title: String,

    /// Column name
    pub status: String,

    /// Priority level
    pub priority: Priority,

    /// Assigned user; defaults to the first seeded user when `None`
    pub user_id: Option<String>,

    /// Tag (optional)
    pub tag: Option<String>,
}

impl NewTicket {
    /// A ticket with the given title and default fields.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

impl Default for NewTicket {
    fn default() -> Self {
        Self {
            title: String::new(),
            status: DEFAULT_TICKET_STATUS.to_string(),
            priority: Priority::NONE,
            user_id: None,
            tag: None,
        }
    }
}

/// Data for updating an existing ticket
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketUpdate {
    /// New title (if updating)
    pub title: Option<String>,

    /// New status (if updating)
    pub status: Option<String>,

    /// New priority (if updating)
    pub priority: Option<Priority>,

    /// New assignee (if updating, `Some(None)` to clear)
    pub user_id: Option<Option<String>>,

    /// New tag (if updating, `Some(None)` to clear)
    pub tag: Option<Option<String>>,
}

/// Key used to bucket tickets into lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// Group by the ticket's status (column)
    #[default]
    Status,

    /// Group by assigned user
    User,

    /// Group by priority level
    Priority,
}

impl Grouping {
    /// All groupings, in menu order.
    pub const ALL: [Grouping; 3] = [Grouping::Status, Grouping::User, Grouping::Priority];

    /// Persisted name.
    pub fn as_str(self) -> &'static str {
        match self {
            Grouping::Status => "status",
            Grouping::User => "user",
            Grouping::Priority => "priority",
        }
    }
}

/// Key used to order tickets inside a lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sorting {
    /// Most urgent first
    #[default]
    Priority,

    /// Alphabetical by title
    Title,
}

impl Sorting {
    /// All sortings, in menu order.
    pub const ALL: [Sorting; 2] = [Sorting::Priority, Sorting::Title];

    /// Persisted name.
    pub fn as_str(self) -> &'static str {
        match self {
            Sorting::Priority => "priority",
            Sorting::Title => "title",
        }
    }
}

/// A view option string matched none of the known values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownOptionError {
    kind: &'static str,
    value: String,
}

impl FromStr for Grouping {
    type Err = UnknownOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownOptionError {
                kind: "grouping",
                value: s.to_string(),
            })
    }
}

impl FromStr for Sorting {
    type Err = UnknownOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| UnknownOptionError {
                kind: "sorting",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Sorting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-chosen view state that survives restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Column names, left to right
    pub columns: Vec<String>,

    /// Active grouping key
    pub grouping: Grouping,

    /// Active sorting key
    pub sorting: Sorting,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            columns: crate::catalog::default_columns(),
            grouping: Grouping::default(),
            sorting: Sorting::default(),
        }
    }
}
