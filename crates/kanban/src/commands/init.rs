//! Implementation of the `init` command.
//!
//! This module handles initialization of a new board, creating the
//! `.kanban/` directory with its configuration, an empty seed file, and the
//! state directory that holds persisted view preferences.

use crate::board::DEFAULT_TICKET_PREFIX;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the board directory
pub const KANBAN_DIR_NAME: &str = ".kanban";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the seed data file
pub const SEED_FILE_NAME: &str = "seed.json";

/// Name of the preference state directory
pub const STATE_DIR_NAME: &str = "state";

/// Name of the gitignore file within .kanban
pub const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Minimum prefix length
pub const MIN_PREFIX_LENGTH: usize = 2;

/// Maximum prefix length
pub const MAX_PREFIX_LENGTH: usize = 20;

/// Maximum directory depth to traverse when searching for the board root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Board configuration stored in `.kanban/config.yaml`.
///
/// Paths are relative to the directory containing `.kanban/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct KanbanConfig {
    /// Ticket ID prefix (e.g., "CAM" for "CAM-12")
    pub ticket_prefix: String,

    /// Seed data file
    #[serde(default = "default_seed_file")]
    pub seed_file: String,

    /// Directory holding persisted preferences
    #[serde(default = "default_state_dir")]
    pub state_dir: String,
}

fn default_seed_file() -> String {
    format!("{KANBAN_DIR_NAME}/{SEED_FILE_NAME}")
}

fn default_state_dir() -> String {
    format!("{KANBAN_DIR_NAME}/{STATE_DIR_NAME}")
}

impl KanbanConfig {
    /// Create a new configuration with the given prefix
    pub fn new(prefix: &str) -> Self {
        Self {
            ticket_prefix: prefix.to_string(),
            seed_file: default_seed_file(),
            state_dir: default_state_dir(),
        }
    }

    /// Load configuration from a file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Save configuration to a file
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Seed file resolved against the board root.
    pub fn seed_path(&self, root_dir: &Path) -> PathBuf {
        root_dir.join(&self.seed_file)
    }

    /// State directory resolved against the board root.
    pub fn state_path(&self, root_dir: &Path) -> PathBuf {
        root_dir.join(&self.state_dir)
    }
}

impl Default for KanbanConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TICKET_PREFIX)
    }
}

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created board directory
    pub kanban_dir: PathBuf,
    /// Path to the created config file
    pub config_file: PathBuf,
    /// Path to the created seed file
    pub seed_file: PathBuf,
    /// Path to the created state directory
    pub state_dir: PathBuf,
    /// Path to the created gitignore file
    pub gitignore_file: PathBuf,
    /// The prefix used for ticket IDs
    pub prefix: String,
}

/// Validate ticket ID prefix format.
///
/// Requirements:
/// - 2-20 characters
/// - Alphanumeric only (letters and digits)
///
/// Expects pre-trimmed input.
pub fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.len() < MIN_PREFIX_LENGTH {
        return Err(Error::Config(format!(
            "Prefix must be at least {MIN_PREFIX_LENGTH} characters"
        )));
    }

    if prefix.len() > MAX_PREFIX_LENGTH {
        return Err(Error::Config(format!(
            "Prefix cannot exceed {MAX_PREFIX_LENGTH} characters"
        )));
    }

    if !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::Config(
            "Prefix must contain only alphanumeric characters".to_string(),
        ));
    }

    Ok(())
}

/// Initialize a new board in the given directory.
///
/// # Arguments
///
/// * `base_dir` - The base directory where `.kanban/` will be created
/// * `prefix` - Optional ticket ID prefix (defaults to "CAM")
///
/// # Errors
///
/// Returns an error if:
/// - The `.kanban/` directory already exists
/// - The prefix is invalid
/// - File system operations fail
pub async fn init(base_dir: &Path, prefix: Option<&str>) -> Result<InitResult> {
    let prefix = prefix.unwrap_or(DEFAULT_TICKET_PREFIX).trim();
    validate_prefix(prefix)?;

    let kanban_dir = base_dir.join(KANBAN_DIR_NAME);
    if kanban_dir.exists() {
        return Err(Error::Config(format!(
            "Board is already initialized in this directory. Found existing '{KANBAN_DIR_NAME}'"
        )));
    }

    fs::create_dir_all(&kanban_dir).await?;

    let config_file = kanban_dir.join(CONFIG_FILE_NAME);
    let config = KanbanConfig::new(prefix);
    config.save(&config_file).await?;

    let seed_file = config.seed_path(base_dir);
    fs::write(&seed_file, "{\n  \"tickets\": [],\n  \"users\": []\n}\n").await?;

    let state_dir = config.state_path(base_dir);
    fs::create_dir_all(&state_dir).await?;

    let gitignore_file = kanban_dir.join(GITIGNORE_FILE_NAME);
    let gitignore_content = "\
# Per-user view preferences
state/
";
    fs::write(&gitignore_file, gitignore_content).await?;

    tracing::info!(dir = %kanban_dir.display(), prefix, "Initialized board");

    Ok(InitResult {
        kanban_dir,
        config_file,
        seed_file,
        state_dir,
        gitignore_file,
        prefix: prefix.to_string(),
    })
}

/// Check if a directory has been initialized as a board.
pub fn is_initialized(base_dir: &Path) -> bool {
    base_dir.join(KANBAN_DIR_NAME).exists()
}

/// Find the board root directory by searching up the directory tree.
///
/// Returns the directory containing `.kanban/`, or `None` if no board is
/// found before the filesystem root or the depth limit.
pub fn find_kanban_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if current.join(KANBAN_DIR_NAME).exists() {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}
