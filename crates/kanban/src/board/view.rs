//! Rendered board: lanes in display order, each holding ordered tickets.
//!
//! The view is rebuilt from scratch on every call. Lanes come from the active
//! grouping, not from the buckets, so a bucket without a matching lane is
//! simply not shown:
//!
//! - `Status`: one lane per column, left to right
//! - `User`: one lane per seeded user
//! - `Priority`: one lane per catalog level, most urgent first

use super::BoardStore;
use super::classify::classify;
use super::order::order;
use crate::catalog::{PRIORITY_LEVELS, StatusIcon, status_icon};
use crate::domain::{Grouping, Priority, Sorting, Ticket, TicketId};
use serde::Serialize;

/// Avatar shown when a ticket's user is unknown or unset.
pub const UNKNOWN_AVATAR: char = '?';

/// Snapshot of the board as it should be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    /// Grouping the lanes were built from
    pub grouping: Grouping,
    /// Sorting applied inside each lane
    pub sorting: Sorting,
    /// Lanes, left to right
    pub lanes: Vec<Lane>,
}

/// A single rendered column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lane {
    /// Bucket key this lane shows
    pub key: String,
    /// Header text
    pub title: String,
    /// Status glyph, only for status lanes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<StatusIcon>,
    /// Tickets in display order
    pub tickets: Vec<LaneTicket>,
}

impl Lane {
    /// Number of tickets in the lane.
    pub fn count(&self) -> usize {
        self.tickets.len()
    }
}

/// A ticket card with its display fields resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneTicket {
    /// Ticket ID
    pub id: TicketId,
    /// Title
    pub title: String,
    /// Column name
    pub status: String,
    /// Priority level
    pub priority: Priority,
    /// Catalog label for the priority
    pub priority_label: &'static str,
    /// Tag, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Assigned user ID, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// First letter of the assignee's name, or [`UNKNOWN_AVATAR`]
    pub avatar: char,
}

impl BoardView {
    /// Classify and order the store's tickets into lanes.
    pub fn build(store: &BoardStore) -> Self {
        let grouping = store.grouping();
        let sorting = store.sorting();
        let buckets = classify(store.tickets(), grouping);

        let lanes = lane_headers(store)
            .into_iter()
            .map(|(key, title, icon)| {
                let tickets = buckets
                    .get(&key)
                    .map(|bucket| order(bucket, sorting))
                    .unwrap_or_default()
                    .into_iter()
                    .map(|ticket| card(store, ticket))
                    .collect();
                Lane {
                    key,
                    title,
                    icon,
                    tickets,
                }
            })
            .collect();

        Self {
            grouping,
            sorting,
            lanes,
        }
    }

    /// Find a lane by bucket key.
    pub fn lane(&self, key: &str) -> Option<&Lane> {
        self.lanes.iter().find(|lane| lane.key == key)
    }

    /// Total tickets across all rendered lanes.
    pub fn rendered_count(&self) -> usize {
        self.lanes.iter().map(Lane::count).sum()
    }
}

fn lane_headers(store: &BoardStore) -> Vec<(String, String, Option<StatusIcon>)> {
    match store.grouping() {
        Grouping::Status => store
            .columns()
            .iter()
            .map(|name| (name.clone(), name.clone(), Some(status_icon(name))))
            .collect(),
        Grouping::User => store
            .users()
            .iter()
            .map(|user| (user.id.clone(), user.name.clone(), None))
            .collect(),
        Grouping::Priority => PRIORITY_LEVELS
            .iter()
            .map(|level| (level.id.to_string(), level.label.to_string(), None))
            .collect(),
    }
}

fn card(store: &BoardStore, ticket: &Ticket) -> LaneTicket {
    let avatar = ticket
        .user_id
        .as_deref()
        .and_then(|id| store.user(id))
        .and_then(|user| user.initial())
        .unwrap_or(UNKNOWN_AVATAR);

    LaneTicket {
        id: ticket.id.clone(),
        title: ticket.title.clone(),
        status: ticket.status.clone(),
        priority: ticket.priority,
        priority_label: ticket.priority.label(),
        tag: ticket.tag.clone(),
        user_id: ticket.user_id.clone(),
        avatar,
    }
}
