//! Command execution.
//!
//! Board mutations are applied by small functions that return a [`Report`]
//! instead of printing, so the one-shot commands and the interactive
//! session share them while owning their own output streams.

use anyhow::Result;
use std::io::{self, BufRead, Write};

use super::args::{
    AddArgs, BoardArgs, ColumnAction, ColumnArgs, DeleteArgs, EditArgs, InitArgs, MoveArgs,
    PrefsAction, PrefsArgs, SessionArgs,
};
use super::session;
use super::types::{GroupingArg, SortingArg};
use crate::app::App;
use crate::board::{AutoConfirm, BoardStore, BoardView, Confirm, ConfirmRequest, Outcome};
use crate::domain::{Preferences, Ticket, TicketId};
use crate::output::{self, OutputConfig, OutputMode};

// ============================================================================
// Confirmation
// ============================================================================

/// Asks `[y/N]` on one stream and reads the answer from another.
///
/// Anything other than `y` or `yes` (case-insensitive), including end of
/// input and I/O errors, counts as no.
pub struct PromptConfirm<'a, R, W> {
    input: &'a mut R,
    prompt: &'a mut W,
}

impl<'a, R: BufRead, W: Write> PromptConfirm<'a, R, W> {
    /// Prompt on `prompt`, read answers from `input`.
    pub fn new(input: &'a mut R, prompt: &'a mut W) -> Self {
        Self { input, prompt }
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<'_, R, W> {
    fn confirm(&mut self, request: &ConfirmRequest<'_>) -> bool {
        if let Err(e) = write!(self.prompt, "{request} [y/N]: ").and_then(|()| self.prompt.flush())
        {
            tracing::warn!(error = %e, "Failed to write confirmation prompt");
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) => false,
            Ok(_) => is_yes(&answer),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read confirmation");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    answer == "y" || answer == "yes"
}

// ============================================================================
// Reports
// ============================================================================

/// What a command did, ready to be written in either output mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Report {
    /// A ticket was created, edited, or moved
    Ticket {
        /// Past-tense verb for text output
        action: &'static str,
        /// The ticket after the change
        ticket: Ticket,
    },
    /// A ticket was deleted
    Deleted(Ticket),
    /// A column was appended
    ColumnAdded(String),
    /// A column and its tickets were removed
    ColumnRemoved {
        /// Removed column
        title: String,
        /// Tickets deleted with it
        tickets: Vec<Ticket>,
    },
    /// The user answered no
    Declined,
    /// Current preferences
    Preferences(Preferences),
    /// The rendered board
    Board(BoardView),
}

/// Write a report to `w`.
pub(crate) fn write_report<W: Write>(
    w: &mut W,
    report: &Report,
    mode: OutputMode,
    config: &OutputConfig,
) -> io::Result<()> {
    match (report, mode) {
        (Report::Board(view), _) => output::write_board(w, view, mode, config),
        (Report::Preferences(prefs), _) => output::write_preferences(w, prefs, mode, config),

        (Report::Ticket { action, ticket }, OutputMode::Text) => {
            write!(w, "{} ", output::success(&format!("{action}:"), config))?;
            output::write_ticket(w, ticket, mode, config)
        }
        (Report::Ticket { action, ticket }, OutputMode::Json) => output::write_json(
            w,
            &serde_json::json!({
                "status": "success",
                "action": action.to_lowercase(),
                "ticket": ticket,
            }),
        ),

        (Report::Deleted(ticket), OutputMode::Text) => {
            writeln!(w, "Deleted ticket: {}", ticket.id)
        }
        (Report::Deleted(ticket), OutputMode::Json) => output::write_json(
            w,
            &serde_json::json!({ "status": "success", "deleted": ticket.id }),
        ),

        (Report::ColumnAdded(title), OutputMode::Text) => {
            writeln!(w, "Added column: {title}")
        }
        (Report::ColumnAdded(title), OutputMode::Json) => output::write_json(
            w,
            &serde_json::json!({ "status": "success", "added_column": title }),
        ),

        (Report::ColumnRemoved { title, tickets }, OutputMode::Text) => writeln!(
            w,
            "Removed column: {title} ({} ticket(s) deleted)",
            tickets.len()
        ),
        (Report::ColumnRemoved { title, tickets }, OutputMode::Json) => {
            let ids: Vec<&TicketId> = tickets.iter().map(|t| &t.id).collect();
            output::write_json(
                w,
                &serde_json::json!({
                    "status": "success",
                    "removed_column": title,
                    "deleted_tickets": ids,
                }),
            )
        }

        (Report::Declined, OutputMode::Text) => {
            writeln!(w, "{}", output::warning("Cancelled.", config))
        }
        (Report::Declined, OutputMode::Json) => {
            output::write_json(w, &serde_json::json!({ "status": "declined" }))
        }
    }
}

// ============================================================================
// Board Operations
// ============================================================================

pub(crate) fn add_ticket(board: &mut BoardStore, args: &AddArgs) -> crate::error::Result<Report> {
    let ticket = board.add_ticket(args.to_new_ticket())?;
    Ok(Report::Ticket {
        action: "Created",
        ticket,
    })
}

pub(crate) fn edit_ticket(board: &mut BoardStore, args: &EditArgs) -> crate::error::Result<Report> {
    let ticket = board.edit_ticket(&TicketId::new(&args.id), args.to_update())?;
    Ok(Report::Ticket {
        action: "Updated",
        ticket,
    })
}

pub(crate) fn move_ticket(board: &mut BoardStore, args: &MoveArgs) -> crate::error::Result<Report> {
    let ticket = board.move_ticket(&TicketId::new(&args.id), &args.status)?;
    Ok(Report::Ticket {
        action: "Moved",
        ticket,
    })
}

pub(crate) fn delete_ticket(
    board: &mut BoardStore,
    args: &DeleteArgs,
    confirm: &mut dyn Confirm,
) -> crate::error::Result<Report> {
    let id = TicketId::new(&args.id);
    let outcome = if args.force {
        board.delete_ticket(&id, &mut AutoConfirm)?
    } else {
        board.delete_ticket(&id, confirm)?
    };
    Ok(match outcome {
        Outcome::Applied(ticket) => Report::Deleted(ticket),
        Outcome::Declined => Report::Declined,
    })
}

pub(crate) fn column(
    board: &mut BoardStore,
    action: &ColumnAction,
    confirm: &mut dyn Confirm,
) -> crate::error::Result<Report> {
    match action {
        ColumnAction::Add { title } => {
            board.add_column(title)?;
            Ok(Report::ColumnAdded(title.clone()))
        }
        ColumnAction::Remove { title, force } => {
            let outcome = if *force {
                board.remove_column(title, &mut AutoConfirm)?
            } else {
                board.remove_column(title, confirm)?
            };
            Ok(match outcome {
                Outcome::Applied(tickets) => Report::ColumnRemoved {
                    title: title.clone(),
                    tickets,
                },
                Outcome::Declined => Report::Declined,
            })
        }
    }
}

/// Apply optional grouping and sorting changes.
pub(crate) fn change_view(
    board: &mut BoardStore,
    grouping: Option<GroupingArg>,
    sorting: Option<SortingArg>,
) {
    if let Some(grouping) = grouping {
        board.set_grouping(grouping.into());
    }
    if let Some(sorting) = sorting {
        board.set_sorting(sorting.into());
    }
}

// ============================================================================
// Top-level Commands
// ============================================================================

/// Execute the init command
pub async fn execute_init(args: &InitArgs, output_mode: OutputMode) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;
    let result = init::init(&current_dir, args.prefix.as_deref()).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "status": "success",
            "kanban_dir": result.kanban_dir,
            "prefix": result.prefix,
        }))?,
        OutputMode::Text if !args.quiet => {
            println!("Initialized board in {}", result.kanban_dir.display());
            println!("  Config: {}", result.config_file.display());
            println!("  Seed:   {}", result.seed_file.display());
            println!("  Ticket prefix: {}", result.prefix);
        }
        OutputMode::Text => {}
    }

    Ok(())
}

/// Execute the board command
pub fn execute_board(app: &mut App, args: &BoardArgs, output_mode: OutputMode) -> Result<()> {
    change_view(app.board_mut(), args.group_by, args.sort_by);
    output::print_board(&app.board().view(), output_mode)?;
    Ok(())
}

/// Execute the prefs command
pub fn execute_prefs(app: &mut App, args: &PrefsArgs, output_mode: OutputMode) -> Result<()> {
    if args.action == Some(PrefsAction::Reset) {
        app.board_mut().reset_preferences();
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = Report::Preferences(app.board().preferences().clone());
    write_report(&mut out, &report, output_mode, &OutputConfig::from_env())?;
    Ok(())
}

/// Execute the column command
pub fn execute_column(
    app: &mut App,
    args: &ColumnArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut prompt = io::stderr();
    let report = column(
        app.board_mut(),
        &args.action,
        &mut PromptConfirm::new(&mut input, &mut prompt),
    )?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &report, output_mode, &OutputConfig::from_env())?;
    Ok(())
}

/// Execute the session command
pub fn execute_session(
    app: &mut App,
    args: &SessionArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let options = session::SessionOptions {
        mode: output_mode,
        config: OutputConfig::from_env(),
        prompt: !args.no_prompt,
    };
    session::run(app.board_mut(), &mut input, &mut out, &options)?;
    Ok(())
}
