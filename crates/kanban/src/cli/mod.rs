//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface using clap's derive API.
//!
//! # Commands
//!
//! - `init`: Initialize a new board
//! - `board`: Render the board, optionally changing grouping or sorting
//! - `prefs`: Show or reset view preferences
//! - `column`: Add or remove a column
//! - `session`: Work on the board interactively
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! kanban init --prefix OPS
//! kanban board --group-by priority --sort-by title
//! kanban column add Review
//! kanban column remove Cancelled --force
//! ```

mod args;
mod execute;
pub mod session;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use args::{
    AddArgs, BoardArgs, ColumnAction, ColumnArgs, DeleteArgs, EditArgs, InitArgs, MoveArgs,
    PrefsAction, PrefsArgs, SessionArgs,
};
pub use execute::PromptConfirm;
pub use types::{GroupingArg, SortingArg};
pub use validators::{validate_column_title, validate_prefix, validate_ticket_id, validate_title};

/// Kanban - a board-style task tracker
///
/// Tickets sit in columns and can be grouped by status, user, or priority.
/// The board lives in `.kanban/`; view preferences persist across runs.
#[derive(Parser, Debug)]
#[command(name = "kanban")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new board
    ///
    /// Creates the `.kanban/` directory with configuration, an empty seed
    /// file, and the preference state directory.
    Init(InitArgs),

    /// Render the board
    ///
    /// Shows one lane per column (or per user, or per priority level) with
    /// tickets ordered by the active sorting.
    Board(BoardArgs),

    /// Show or reset view preferences
    Prefs(PrefsArgs),

    /// Add or remove a column
    ///
    /// Removing a column also deletes every ticket in it. Use `--force` to
    /// skip confirmation.
    Column(ColumnArgs),

    /// Work on the board interactively
    ///
    /// Reads commands line by line: add, edit, delete, move, column, group,
    /// sort, show, prefs, quit.
    Session(SessionArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        use crate::app::App;
        use crate::output::OutputMode;

        let output_mode = OutputMode::from_json_flag(self.json);

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(args, output_mode).await,
            Some(Commands::Board(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_board(&mut app, args, output_mode)
            }
            Some(Commands::Prefs(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_prefs(&mut app, args, output_mode)
            }
            Some(Commands::Column(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_column(&mut app, args, output_mode)
            }
            Some(Commands::Session(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_session(&mut app, args, output_mode)
            }
            None => {
                println!("Kanban board");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}
