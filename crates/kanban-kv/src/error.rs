//! Error types for kanban-kv operations.

use std::io;
use thiserror::Error;

/// The error type for kanban-kv operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading or writing an entry.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Key contains characters that cannot be used as an entry name.
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),
}

/// A specialized Result type for kanban-kv operations.
pub type Result<T> = std::result::Result<T, Error>;
