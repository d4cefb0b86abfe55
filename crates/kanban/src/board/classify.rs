//! Partition tickets into buckets by the active grouping key.

use crate::domain::{Grouping, Ticket};
use std::collections::HashMap;

/// Bucket key for tickets with no assigned user under [`Grouping::User`].
pub const UNASSIGNED_KEY: &str = "";

/// Tickets keyed by their derived grouping value.
///
/// Within each bucket, tickets keep the relative order they had in the input.
pub type Buckets<'a> = HashMap<String, Vec<&'a Ticket>>;

/// Derive the bucket key of a ticket.
///
/// - `Status`: the ticket's status string
/// - `User`: the assigned user ID, or [`UNASSIGNED_KEY`]
/// - `Priority`: the numeric priority as a string (`"0"` to `"4"`)
pub fn bucket_key(ticket: &Ticket, grouping: Grouping) -> String {
    match grouping {
        Grouping::Status => ticket.status.clone(),
        Grouping::User => ticket
            .user_id
            .clone()
            .unwrap_or_else(|| UNASSIGNED_KEY.to_string()),
        Grouping::Priority => ticket.priority.to_string(),
    }
}

/// Group tickets into buckets.
///
/// Every ticket lands in exactly one bucket, even when no lane exists for its
/// key. An empty input yields an empty map.
pub fn classify<'a, I>(tickets: I, grouping: Grouping) -> Buckets<'a>
where
    I: IntoIterator<Item = &'a Ticket>,
{
    let mut buckets: Buckets<'a> = HashMap::new();
    for ticket in tickets {
        buckets
            .entry(bucket_key(ticket, grouping))
            .or_default()
            .push(ticket);
    }
    buckets
}
