//! Output formatting for CLI commands.
//!
//! Boards, tickets, and preferences print either as human-readable text or
//! as pretty JSON for programmatic use. Text rendering goes through a
//! `Write` so it can be captured in tests and in the interactive session.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers (semantic colors, status glyphs)

pub mod color;

use crate::board::{BoardView, Lane, LaneTicket};
use crate::domain::{Preferences, Ticket};
use serde::Serialize;
use std::io::{self, Write};

pub use color::{success, warning};

use color::{
    bold, colored_status_icon, colorize_id, colorize_priority, colorize_tag, dimmed,
};

// ============================================================================
// Output Configuration
// ============================================================================

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 80;

/// Narrowest width text is ever wrapped to.
const MIN_CONTENT_WIDTH: usize = 20;

/// Indentation of ticket cards under a lane header.
const CARD_INDENT: &str = "  ";

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,
    /// Whether to use ASCII-only icons instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new OutputConfig with explicit values.
    pub fn new(max_width: usize, use_ascii: bool, use_colors: bool) -> Self {
        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `KANBAN_MAX_WIDTH`: Maximum content width (default: 80)
    /// - `KANBAN_ASCII`: Set to "1" or "true" for ASCII-only icons (default: false)
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `KANBAN_COLOR`: Set to "0" or "false" to disable colors (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_width = match lookup("KANBAN_MAX_WIDTH") {
            Some(s) if !s.is_empty() => match s.parse() {
                Ok(width) => width,
                Err(_) => {
                    tracing::warn!(
                        env_var = "KANBAN_MAX_WIDTH",
                        value = %s,
                        default = DEFAULT_MAX_CONTENT_WIDTH,
                        "Invalid value, using default"
                    );
                    DEFAULT_MAX_CONTENT_WIDTH
                }
            },
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        let use_ascii = match lookup("KANBAN_ASCII") {
            Some(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Some(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Some(v) => {
                tracing::warn!(
                    env_var = "KANBAN_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            None => false,
        };

        // https://no-color.org/
        let use_colors = lookup("NO_COLOR").is_none()
            && lookup("KANBAN_COLOR")
                .is_none_or(|v| v != "0" && !v.eq_ignore_ascii_case("false"));

        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_CONTENT_WIDTH,
            use_ascii: false,
            use_colors: true,
        }
    }
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

impl OutputMode {
    /// Pick the mode from the global `--json` flag.
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

// ============================================================================
// Terminal Width Detection
// ============================================================================

/// Get the current terminal width, falling back to default if detection fails.
fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map_or(usize::from(DEFAULT_TERMINAL_WIDTH), |(w, _)| usize::from(w.0))
}

/// Width available for content under the given config.
fn content_width(config: &OutputConfig) -> usize {
    get_terminal_width()
        .min(config.max_width)
        .max(MIN_CONTENT_WIDTH)
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

/// Print the board to stdout in the specified format
pub fn print_board(view: &BoardView, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_board(&mut handle, view, mode, &OutputConfig::from_env())
}

/// Write the board in the specified format
pub fn write_board<W: Write>(
    w: &mut W,
    view: &BoardView,
    mode: OutputMode,
    config: &OutputConfig,
) -> io::Result<()> {
    match mode {
        OutputMode::Text => write_board_text(w, view, config, content_width(config)),
        OutputMode::Json => write_json(w, view),
    }
}

/// Write a single ticket in the specified format
pub fn write_ticket<W: Write>(
    w: &mut W,
    ticket: &Ticket,
    mode: OutputMode,
    config: &OutputConfig,
) -> io::Result<()> {
    match mode {
        OutputMode::Text => writeln!(
            w,
            "{} [{}] {}  {}",
            colorize_id(ticket.id.as_str(), config),
            ticket.status,
            colorize_priority(ticket.priority, config),
            ticket.title
        ),
        OutputMode::Json => write_json(w, ticket),
    }
}

/// Write view preferences in the specified format
pub fn write_preferences<W: Write>(
    w: &mut W,
    preferences: &Preferences,
    mode: OutputMode,
    config: &OutputConfig,
) -> io::Result<()> {
    match mode {
        OutputMode::Text => {
            writeln!(
                w,
                "{} {}",
                dimmed("Columns: ", config),
                preferences.columns.join(", ")
            )?;
            writeln!(w, "{} {}", dimmed("Grouping:", config), preferences.grouping)?;
            writeln!(w, "{} {}", dimmed("Sorting: ", config), preferences.sorting)
        }
        OutputMode::Json => write_json(w, preferences),
    }
}

/// Print a simple message
pub fn print_message(msg: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{msg}")
}

/// Print a JSON-formatted result for any serializable value
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, value)
}

/// Write any serializable value as pretty JSON
pub fn write_json<W: Write, T: Serialize>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

// ============================================================================
// Text Formatting
// ============================================================================

fn write_board_text<W: Write>(
    w: &mut W,
    view: &BoardView,
    config: &OutputConfig,
    width: usize,
) -> io::Result<()> {
    if view.lanes.is_empty() {
        return writeln!(w, "No columns to show.");
    }

    for (i, lane) in view.lanes.iter().enumerate() {
        if i > 0 {
            writeln!(w)?;
        }
        write_lane(w, lane, config, width)?;
    }
    Ok(())
}

fn write_lane<W: Write>(
    w: &mut W,
    lane: &Lane,
    config: &OutputConfig,
    width: usize,
) -> io::Result<()> {
    let header = format!("{} ({})", bold(&lane.title, config), lane.count());
    match lane.icon {
        Some(icon) => writeln!(w, "{} {header}", colored_status_icon(icon, config))?,
        None => writeln!(w, "{header}")?,
    }

    if lane.tickets.is_empty() {
        return writeln!(w, "{CARD_INDENT}{}", dimmed("(empty)", config));
    }
    for ticket in &lane.tickets {
        write_card(w, ticket, config, width)?;
    }
    Ok(())
}

/// One card: ID, priority, avatar, and the wrapped title, then the tag.
fn write_card<W: Write>(
    w: &mut W,
    ticket: &LaneTicket,
    config: &OutputConfig,
    width: usize,
) -> io::Result<()> {
    let lead = format!("{CARD_INDENT}{} ", ticket.id);
    let hang = " ".repeat(lead.chars().count());
    let title_width = width.saturating_sub(hang.len()).max(MIN_CONTENT_WIDTH);

    let mut lines = wrap_text(&ticket.title, title_width).into_iter();
    writeln!(
        w,
        "{CARD_INDENT}{} {}",
        colorize_id(ticket.id.as_str(), config),
        lines.next().unwrap_or_default()
    )?;
    for line in lines {
        writeln!(w, "{hang}{line}")?;
    }

    let mut meta = format!(
        "{hang}{} {}",
        colorize_priority(ticket.priority, config),
        dimmed(&format!("({})", ticket.avatar), config)
    );
    if let Some(tag) = &ticket.tag {
        meta.push_str(&format!(" #{}", colorize_tag(tag, config)));
    }
    writeln!(w, "{meta}")
}

fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, max_width)
                    .into_iter()
                    .map(|s| s.into_owned())
                    .collect()
            }
        })
        .collect()
}
