//! Line-oriented interactive session over one in-memory board.
//!
//! Each input line is split into words (single and double quotes group,
//! backslash escapes the next character) and parsed with clap, so session
//! commands accept the same flags as their one-shot counterparts.
//! Confirmation prompts read their answer from the next input line.
//!
//! ```text
//! kanban> add "Write release notes" --priority 3
//! Created: CAM-5 [Todo] High  Write release notes
//! kanban> move CAM-5 Done
//! kanban> group user
//! kanban> show
//! ```

use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};

use super::args::{AddArgs, ColumnAction, DeleteArgs, EditArgs, MoveArgs};
use super::execute::{self, PromptConfirm, Report, write_report};
use super::types::{GroupingArg, SortingArg};
use crate::board::{BoardStore, Confirm};
use crate::output::{OutputConfig, OutputMode};

/// Prompt printed before each command.
pub const PROMPT: &str = "kanban> ";

/// How a session renders its output.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Text or JSON reports
    pub mode: OutputMode,
    /// Text styling
    pub config: OutputConfig,
    /// Print [`PROMPT`] before reading each line
    pub prompt: bool,
}

#[derive(Parser, Debug)]
#[command(name = "session", no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Create a ticket
    Add(AddArgs),
    /// Edit a ticket
    Edit(EditArgs),
    /// Delete a ticket
    Delete(DeleteArgs),
    /// Move a ticket to another column
    Move(MoveArgs),
    /// Add or remove a column
    Column {
        #[command(subcommand)]
        action: ColumnAction,
    },
    /// Change the grouping
    Group {
        #[arg(value_enum)]
        grouping: GroupingArg,
    },
    /// Change the sorting
    Sort {
        #[arg(value_enum)]
        sorting: SortingArg,
    },
    /// Render the board
    Show,
    /// Show current preferences
    Prefs,
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

/// Read commands from `input` until `quit` or end of input.
///
/// Command errors are reported on `out` and the session continues. Only
/// failures of the streams themselves end it with an error.
pub fn run<R: BufRead, W: Write>(
    board: &mut BoardStore,
    input: &mut R,
    out: &mut W,
    options: &SessionOptions,
) -> io::Result<()> {
    tracing::debug!("Session started");
    let mut line = String::new();
    loop {
        if options.prompt {
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if let Flow::Quit = step(board, &line, input, out, options)? {
            break;
        }
    }
    tracing::debug!(version = board.version(), "Session ended");
    Ok(())
}

fn step<R: BufRead, W: Write>(
    board: &mut BoardStore,
    line: &str,
    input: &mut R,
    out: &mut W,
    options: &SessionOptions,
) -> io::Result<Flow> {
    let words = match split_words(line) {
        Ok(words) => words,
        Err(msg) => {
            writeln!(out, "error: {msg}")?;
            return Ok(Flow::Continue);
        }
    };
    if words.is_empty() || words[0].starts_with('#') {
        return Ok(Flow::Continue);
    }

    let parsed = match SessionLine::try_parse_from(&words) {
        Ok(parsed) => parsed,
        Err(e) => {
            write!(out, "{e}")?;
            return Ok(Flow::Continue);
        }
    };

    let result = match &parsed.command {
        SessionCommand::Add(args) => execute::add_ticket(board, args),
        SessionCommand::Edit(args) => execute::edit_ticket(board, args),
        SessionCommand::Move(args) => execute::move_ticket(board, args),
        SessionCommand::Delete(args) => with_prompt(input, out, options.mode, |confirm| {
            execute::delete_ticket(board, args, confirm)
        }),
        SessionCommand::Column { action } => with_prompt(input, out, options.mode, |confirm| {
            execute::column(board, action, confirm)
        }),
        SessionCommand::Group { grouping } => {
            execute::change_view(board, Some(*grouping), None);
            Ok(Report::Preferences(board.preferences().clone()))
        }
        SessionCommand::Sort { sorting } => {
            execute::change_view(board, None, Some(*sorting));
            Ok(Report::Preferences(board.preferences().clone()))
        }
        SessionCommand::Show => Ok(Report::Board(board.view())),
        SessionCommand::Prefs => Ok(Report::Preferences(board.preferences().clone())),
        SessionCommand::Quit => return Ok(Flow::Quit),
    };

    match result {
        Ok(report) => write_report(out, &report, options.mode, &options.config)?,
        Err(e) => writeln!(out, "Error: {e}")?,
    }
    Ok(Flow::Continue)
}

/// Run `f` with a confirmation that reads its answer from `input`.
///
/// Text sessions prompt on `out`. JSON sessions prompt on stderr so `out`
/// stays a stream of JSON documents.
fn with_prompt<R, W, T>(
    input: &mut R,
    out: &mut W,
    mode: OutputMode,
    f: impl FnOnce(&mut dyn Confirm) -> T,
) -> T
where
    R: BufRead,
    W: Write,
{
    match mode {
        OutputMode::Text => f(&mut PromptConfirm::new(input, out)),
        OutputMode::Json => f(&mut PromptConfirm::new(input, &mut io::stderr())),
    }
}

/// Split a command line into words.
fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some('"') if c == '\\' => match chars.next() {
                Some(escaped) => current.push(escaped),
                None => return Err("trailing backslash".to_string()),
            },
            Some(_) => current.push(c),
            None => match c {
                '"' | '\'' => {
                    quote = Some(c);
                    in_word = true;
                }
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                        in_word = true;
                    }
                }
                c if c.is_whitespace() => {
                    if in_word {
                        words.push(std::mem::take(&mut current));
                        in_word = false;
                    }
                }
                c => {
                    current.push(c);
                    in_word = true;
                }
            },
        }
    }

    if let Some(q) = quote {
        return Err(format!("unterminated {q} quote"));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
