//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success:   green   (done lanes, applied changes)
//!   - Warning:   yellow  (in-progress lanes, high priority)
//!   - Error:     red     (cancelled lanes, urgent priority)
//!   - Reference: cyan    (ticket IDs)
//!   - Accent:    magenta (tags)
//!   - Muted:     dimmed  (avatars, empty-lane notes)
//!   - Emphasis:  bold    (lane headers)

use crate::catalog::StatusIcon;
use crate::domain::Priority;
use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply bold styling to text.
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

/// Apply dimmed styling to text.
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Colorize a ticket ID (cyan).
pub(crate) fn colorize_id(id: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return id.to_string();
    }
    id.cyan().to_string()
}

/// Colorize a tag (magenta).
pub(crate) fn colorize_tag(tag: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return tag.to_string();
    }
    tag.magenta().to_string()
}

/// Priority label colored by urgency.
pub(crate) fn colorize_priority(priority: Priority, config: &OutputConfig) -> String {
    let text = priority.label();
    if !config.use_colors {
        return text.to_string();
    }
    match priority {
        Priority::URGENT => text.red().bold().to_string(),
        Priority::HIGH => text.yellow().to_string(),
        Priority::NONE => text.dimmed().to_string(),
        _ => text.to_string(),
    }
}

/// Status glyph with ASCII fallback and color.
pub(crate) fn colored_status_icon(icon: StatusIcon, config: &OutputConfig) -> String {
    let glyph = if config.use_ascii {
        icon.ascii()
    } else {
        icon.glyph()
    };

    if !config.use_colors {
        return glyph.to_string();
    }

    match icon {
        StatusIcon::Todo => glyph.white().to_string(),
        StatusIcon::InProgress => glyph.yellow().to_string(),
        StatusIcon::Done => glyph.green().to_string(),
        StatusIcon::Cancelled => glyph.red().to_string(),
    }
}
