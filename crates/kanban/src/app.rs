//! Application context for CLI command execution.
//!
//! [`App`] locates the board directory, loads its configuration and
//! persisted preferences, fetches seed data, and wires preference
//! persistence into the [`BoardStore`] as an observer.
//!
//! # Example
//!
//! ```no_run
//! use kanban::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new(".")).await?;
//!     println!("{} tickets", app.board().tickets().len());
//!     Ok(())
//! }
//! ```

use crate::board::BoardStore;
use crate::commands::init::{CONFIG_FILE_NAME, KANBAN_DIR_NAME, KanbanConfig, find_kanban_root};
use crate::error::{Error, Result};
use crate::prefs::PreferencePersistence;
use crate::seed::{JsonFileSeed, load_seed};
use kanban_kv::{FileStore, KeyValueStore, MemoryStore};
use std::path::{Path, PathBuf};

/// Application context for CLI operations.
#[derive(Debug)]
pub struct App {
    /// The board, with preference persistence subscribed
    board: BoardStore,

    /// Path to the board directory (.kanban)
    kanban_dir: PathBuf,

    /// Loaded configuration
    config: KanbanConfig,
}

impl App {
    /// Create an App instance from the given working directory.
    ///
    /// Searches up the directory tree to find a `.kanban/` directory. If the
    /// preference directory cannot be opened the board still starts, with
    /// preferences kept in memory for this run only. Seed failures likewise
    /// yield an empty board.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No board is found in the directory tree
    /// - Configuration cannot be loaded
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root_dir = find_kanban_root(working_dir).ok_or(Error::NotInitialized)?;
        let kanban_dir = root_dir.join(KANBAN_DIR_NAME);
        let config = KanbanConfig::load(&kanban_dir.join(CONFIG_FILE_NAME)).await?;

        let state_dir = config.state_path(&root_dir);
        let board = match FileStore::open(&state_dir) {
            Ok(store) => open_board(store, &config, &root_dir).await,
            Err(e) => {
                tracing::warn!(
                    dir = %state_dir.display(),
                    error = %e,
                    "Cannot open preference store, preferences will not be saved"
                );
                open_board(MemoryStore::new(), &config, &root_dir).await
            }
        };

        Ok(Self {
            board,
            kanban_dir,
            config,
        })
    }

    /// Get an immutable reference to the board.
    pub fn board(&self) -> &BoardStore {
        &self.board
    }

    /// Get a mutable reference to the board.
    pub fn board_mut(&mut self) -> &mut BoardStore {
        &mut self.board
    }

    /// Get the path to the board directory.
    pub fn kanban_dir(&self) -> &Path {
        &self.kanban_dir
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &KanbanConfig {
        &self.config
    }
}

async fn open_board<S>(store: S, config: &KanbanConfig, root_dir: &Path) -> BoardStore
where
    S: KeyValueStore + Clone + 'static,
{
    let preferences = PreferencePersistence::new(store.clone()).load();
    let mut board = BoardStore::with_prefix(preferences, config.ticket_prefix.clone());

    let seed = load_seed(&JsonFileSeed::new(config.seed_path(root_dir))).await;
    board.seed(seed);

    board.subscribe(Box::new(PreferencePersistence::new(store)));
    board
}
