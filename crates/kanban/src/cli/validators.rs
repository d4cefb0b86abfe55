//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

/// Validate ticket ID prefix format.
///
/// Delegates to `commands::init` so the rules live in one place.
pub fn validate_prefix(s: &str) -> Result<String, String> {
    use crate::commands::init;

    let trimmed = s.trim();
    init::validate_prefix(trimmed).map_err(|e| e.to_string())?;
    Ok(trimmed.to_string())
}

/// Validate a ticket ID.
///
/// Seeded IDs follow no fixed pattern, so only blank IDs and IDs containing
/// whitespace are rejected.
pub fn validate_ticket_id(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Ticket ID cannot be empty".to_string());
    }

    if s.chars().any(char::is_whitespace) {
        return Err(format!("Invalid ticket ID '{s}': must not contain spaces"));
    }

    Ok(s.to_string())
}

/// Validate a ticket title for creation.
pub fn validate_title(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Title cannot be empty".to_string());
    }

    Ok(s.to_string())
}

/// Validate a column title.
pub fn validate_column_title(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Column title cannot be empty".to_string());
    }

    Ok(s.to_string())
}
