//! Atomic write operations for entry files.
//!
//! Writes go to a sibling temporary file first, which is flushed to disk and
//! then renamed over the target. On POSIX systems a rename within the same
//! filesystem is atomic, so a reader sees either the old value or the new one,
//! never a torn write.
//!
//! # Examples
//!
//! ```no_run
//! use kanban_kv::write_atomic;
//!
//! # fn example() -> kanban_kv::Result<()> {
//! write_atomic("state/kanbanGrouping", "user")?;
//! # Ok(())
//! # }
//! ```

use crate::Result;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically replaces the contents of `path` with `contents`.
///
/// A temporary file with a `.tmp` suffix is created alongside the target,
/// written, synced, and renamed into place.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created or written, or if
/// the rename fails (e.g., cross-filesystem move). On failure the original
/// file, if any, is left unchanged.
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &str) -> Result<()> {
    let path = path.as_ref();
    let temp_path = make_temp_path(path);

    if let Err(e) = write_to_temp_file(&temp_path, contents) {
        // Best-effort cleanup of temp file
        let _ = std::fs::remove_file(&temp_path);
        return Err(e);
    }

    std::fs::rename(&temp_path, path)?;
    Ok(())
}

/// Creates a temporary file path for atomic write operations.
///
/// `.tmp` is appended to the existing extension, or used as the extension
/// when the path has none.
fn make_temp_path(path: &Path) -> PathBuf {
    let mut temp_path = path.to_path_buf();
    let new_extension = match path.extension() {
        Some(ext) => {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".tmp");
            new_ext
        }
        None => std::ffi::OsString::from("tmp"),
    };
    temp_path.set_extension(new_extension);
    temp_path
}

fn write_to_temp_file(temp_path: &Path, contents: &str) -> Result<()> {
    let mut file = File::create(temp_path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
