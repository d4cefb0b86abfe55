//! Error types for board operations.

use crate::domain::TicketId;
use std::io;
use thiserror::Error;

/// The error type for board operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Input to a creation operation was rejected. The board is unchanged.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// An operation referenced a ticket that does not exist.
    #[error("Ticket not found: {0}")]
    TicketNotFound(TicketId),

    /// An operation referenced a column that does not exist.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Durable storage could not be read or written.
    ///
    /// Preference persistence never returns this to callers; it is logged
    /// and swallowed. It surfaces only from explicit storage setup.
    #[error("Persistence error: {0}")]
    Persistence(#[from] kanban_kv::Error),

    /// Seed data could not be fetched or decoded.
    #[error("Seed data error: {0}")]
    SeedData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No `.kanban/` directory was found in the working directory or above.
    #[error("Not a kanban board (or any of the parent directories). Run 'kanban init' first.")]
    NotInitialized,

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons a creation operation rejects its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Column title was empty or whitespace-only.
    #[error("column title cannot be empty")]
    EmptyColumnTitle,

    /// A column with this title already exists.
    #[error("column '{0}' already exists")]
    DuplicateColumn(String),

    /// Ticket title was empty or whitespace-only.
    #[error("ticket title cannot be empty")]
    EmptyTicketTitle,
}

/// A specialized Result type for board operations.
pub type Result<T> = std::result::Result<T, Error>;
