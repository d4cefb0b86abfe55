//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation. Ticket commands are shared between the
//! top-level CLI and the interactive session.

use clap::{Parser, Subcommand};

use super::types::{GroupingArg, SortingArg};
use super::validators::{
    validate_column_title, validate_prefix, validate_ticket_id, validate_title,
};
use crate::domain::{
    DEFAULT_TICKET_STATUS, MAX_PRIORITY, MIN_PRIORITY, NewTicket, Priority, TicketUpdate,
};

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Ticket ID prefix (e.g., "CAM" for "CAM-12")
    ///
    /// Must be 2-20 alphanumeric characters.
    #[arg(short, long, value_parser = validate_prefix)]
    pub prefix: Option<String>,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `board` command
#[derive(Parser, Debug, Clone, Default)]
pub struct BoardArgs {
    /// Change the grouping before rendering (persisted)
    #[arg(short, long, value_enum)]
    pub group_by: Option<GroupingArg>,

    /// Change the sorting before rendering (persisted)
    #[arg(short, long, value_enum)]
    pub sort_by: Option<SortingArg>,
}

/// Arguments for the `prefs` command
#[derive(Parser, Debug, Clone)]
pub struct PrefsArgs {
    /// Preference action; shows current preferences when omitted
    #[command(subcommand)]
    pub action: Option<PrefsAction>,
}

/// Preference subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PrefsAction {
    /// Restore default columns, grouping and sorting
    ///
    /// Added columns that still hold tickets are kept.
    Reset,
}

/// Arguments for the `column` command
#[derive(Parser, Debug, Clone)]
pub struct ColumnArgs {
    /// Column action
    #[command(subcommand)]
    pub action: ColumnAction,
}

/// Column subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ColumnAction {
    /// Append a column to the right of the board
    Add {
        /// Column title
        #[arg(value_parser = validate_column_title)]
        title: String,
    },

    /// Remove a column and every ticket in it
    Remove {
        /// Column title
        #[arg(value_parser = validate_column_title)]
        title: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Arguments for adding a ticket
#[derive(Parser, Debug, Clone)]
pub struct AddArgs {
    /// Ticket title
    #[arg(value_parser = validate_title)]
    pub title: String,

    /// Column to place the ticket in
    #[arg(short, long, default_value = DEFAULT_TICKET_STATUS)]
    pub status: String,

    /// Priority level (0=none, 1=low, 2=medium, 3=high, 4=urgent)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(i64::from(MIN_PRIORITY)..=i64::from(MAX_PRIORITY)), default_value = "0")]
    pub priority: u8,

    /// Assigned user ID (defaults to the first user)
    #[arg(short, long)]
    pub user: Option<String>,

    /// Tag
    #[arg(short, long)]
    pub tag: Option<String>,
}

impl AddArgs {
    /// Convert into a creation payload.
    pub fn to_new_ticket(&self) -> NewTicket {
        NewTicket {
            title: self.title.clone(),
            status: self.status.clone(),
            priority: Priority::new(self.priority).unwrap_or_default(),
            user_id: self.user.clone(),
            tag: self.tag.clone(),
        }
    }
}

/// Arguments for editing a ticket
#[derive(Parser, Debug, Clone)]
pub struct EditArgs {
    /// Ticket ID
    #[arg(value_parser = validate_ticket_id)]
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New column
    #[arg(short, long)]
    pub status: Option<String>,

    /// New priority level
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(i64::from(MIN_PRIORITY)..=i64::from(MAX_PRIORITY)))]
    pub priority: Option<u8>,

    /// New assigned user ID
    #[arg(short, long, conflicts_with = "no_user")]
    pub user: Option<String>,

    /// Remove the assigned user
    #[arg(long)]
    pub no_user: bool,

    /// New tag
    #[arg(short, long, conflicts_with = "no_tag")]
    pub tag: Option<String>,

    /// Remove the tag
    #[arg(long)]
    pub no_tag: bool,
}

impl EditArgs {
    /// Convert into a patch. Flags left out leave fields untouched.
    pub fn to_update(&self) -> TicketUpdate {
        TicketUpdate {
            title: self.title.clone(),
            status: self.status.clone(),
            priority: self.priority.and_then(Priority::new),
            user_id: clearable(self.user.as_ref(), self.no_user),
            tag: clearable(self.tag.as_ref(), self.no_tag),
        }
    }
}

fn clearable(value: Option<&String>, clear: bool) -> Option<Option<String>> {
    if clear {
        Some(None)
    } else {
        value.map(|v| Some(v.clone()))
    }
}

/// Arguments for deleting a ticket
#[derive(Parser, Debug, Clone)]
pub struct DeleteArgs {
    /// Ticket ID
    #[arg(value_parser = validate_ticket_id)]
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for moving a ticket
#[derive(Parser, Debug, Clone)]
pub struct MoveArgs {
    /// Ticket ID
    #[arg(value_parser = validate_ticket_id)]
    pub id: String,

    /// Target column
    pub status: String,
}

/// Arguments for the `session` command
#[derive(Parser, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Do not print the prompt (for piped input)
    #[arg(long)]
    pub no_prompt: bool,
}
