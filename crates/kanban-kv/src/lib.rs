//! Durable keyed string storage.
//!
//! This library stores small string values under named keys, the way a
//! browser's local storage does. Each key is independent: a corrupt or
//! missing entry never affects its neighbours.
//!
//! Two backends are provided:
//!
//! - [`FileStore`]: one file per key inside a directory, written atomically
//! - [`MemoryStore`]: a shared in-process map, useful for tests

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod atomic;
pub mod error;
pub mod store;

pub use atomic::write_atomic;
pub use error::{Error, Result};
pub use store::{FileStore, KeyValueStore, MemoryStore, validate_key};
