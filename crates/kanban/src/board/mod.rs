//! Board state store and mutation API.
//!
//! [`BoardStore`] owns the canonical collections: tickets, users, the column
//! list, and the view preferences. Nothing outside this module mutates them
//! directly; every change goes through a mutation method that validates first
//! and applies second, so a failed call leaves the board untouched.
//!
//! # Notifications
//!
//! Each successful mutation bumps [`BoardStore::version`] and calls
//! [`BoardObserver::board_changed`] on every subscriber. When the column
//! list, grouping, or sorting changed, [`BoardObserver::preferences_changed`]
//! follows with the new [`Preferences`]. Preference persistence is wired in
//! as one of these observers.
//!
//! # Confirmation
//!
//! [`BoardStore::remove_column`] and [`BoardStore::delete_ticket`] consult a
//! [`Confirm`] capability supplied by the caller and apply nothing when it
//! answers no.
//!
//! # Example
//!
//! ```
//! use kanban::board::{AutoConfirm, BoardStore};
//! use kanban::domain::{NewTicket, Preferences, Priority};
//!
//! let mut board = BoardStore::new(Preferences::default());
//! let ticket = board
//!     .add_ticket(NewTicket {
//!         priority: Priority::HIGH,
//!         ..NewTicket::new("Fix bug")
//!     })
//!     .unwrap();
//! assert_eq!(ticket.id.as_str(), "CAM-1");
//!
//! board.move_ticket(&ticket.id, "Done").unwrap();
//! let buckets = board.buckets();
//! assert_eq!(buckets["Done"].len(), 1);
//!
//! assert!(board.remove_column("Done", &mut AutoConfirm).unwrap().is_applied());
//! assert!(board.tickets().is_empty());
//! ```

pub mod classify;
pub mod order;
pub mod view;

use crate::domain::{
    Grouping, NewTicket, Preferences, Sorting, Ticket, TicketId, TicketUpdate, User,
};
use crate::error::{Error, Result, ValidationError};
use crate::seed::SeedData;
use std::collections::HashSet;
use std::fmt;

pub use classify::{Buckets, UNASSIGNED_KEY, bucket_key, classify};
pub use order::{compare_titles, order};
pub use view::{BoardView, Lane, LaneTicket};

/// Default prefix for generated ticket IDs.
pub const DEFAULT_TICKET_PREFIX: &str = "CAM";

/// Receives change notifications from a [`BoardStore`].
///
/// Both methods default to no-ops so observers implement only what they need.
pub trait BoardObserver {
    /// Called after every successful mutation with the new board version.
    fn board_changed(&mut self, _version: u64) {}

    /// Called after a mutation changed the column list, grouping, or sorting.
    fn preferences_changed(&mut self, _preferences: &Preferences) {}
}

/// A destructive operation awaiting confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmRequest<'a> {
    /// Remove a column and every ticket in it
    RemoveColumn {
        /// Column being removed
        title: &'a str,
        /// Tickets that will be deleted with it
        ticket_count: usize,
    },
    /// Delete a single ticket
    DeleteTicket {
        /// Ticket being deleted
        id: &'a TicketId,
        /// Its title
        title: &'a str,
    },
}

impl fmt::Display for ConfirmRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfirmRequest::RemoveColumn {
                title,
                ticket_count: 0,
            } => write!(f, "Are you sure you want to remove the \"{title}\" column?"),
            ConfirmRequest::RemoveColumn {
                title,
                ticket_count,
            } => write!(
                f,
                "Are you sure you want to remove the \"{title}\" column and its {ticket_count} ticket(s)?"
            ),
            ConfirmRequest::DeleteTicket { id, title } => {
                write!(f, "Are you sure you want to delete ticket {id} ({title})?")
            }
        }
    }
}

/// Yes/no capability consulted before destructive operations.
pub trait Confirm {
    /// Return `true` to let the operation proceed.
    fn confirm(&mut self, request: &ConfirmRequest<'_>) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&ConfirmRequest<'_>) -> bool,
{
    fn confirm(&mut self, request: &ConfirmRequest<'_>) -> bool {
        self(request)
    }
}

/// Confirms everything. Used for `--force` and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _request: &ConfirmRequest<'_>) -> bool {
        true
    }
}

/// Result of a confirmation-gated operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    /// The operation ran and produced this value
    Applied(T),
    /// The confirmation was declined; nothing changed
    Declined,
}

impl<T> Outcome<T> {
    /// Whether the operation ran.
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    /// The produced value, if the operation ran.
    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Declined => None,
        }
    }
}

/// The board's single source of truth.
pub struct BoardStore {
    /// Tickets in insertion order
    tickets: Vec<Ticket>,

    /// Seeded users, read-only after seeding
    users: Vec<User>,

    /// Columns, grouping and sorting
    preferences: Preferences,

    /// Prefix for generated ticket IDs
    prefix: String,

    /// Bumped on every successful mutation
    version: u64,

    observers: Vec<Box<dyn BoardObserver>>,
}

impl fmt::Debug for BoardStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardStore")
            .field("tickets", &self.tickets.len())
            .field("users", &self.users.len())
            .field("preferences", &self.preferences)
            .field("prefix", &self.prefix)
            .field("version", &self.version)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl BoardStore {
    /// Create an empty board with the given preferences and the default ID prefix.
    pub fn new(preferences: Preferences) -> Self {
        Self::with_prefix(preferences, DEFAULT_TICKET_PREFIX)
    }

    /// Create an empty board whose generated IDs look like `<prefix>-<n>`.
    pub fn with_prefix(preferences: Preferences, prefix: impl Into<String>) -> Self {
        Self {
            tickets: Vec::new(),
            users: Vec::new(),
            preferences,
            prefix: prefix.into(),
            version: 0,
            observers: Vec::new(),
        }
    }

    /// Register an observer. It receives notifications for later mutations only.
    pub fn subscribe(&mut self, observer: Box<dyn BoardObserver>) {
        self.observers.push(observer);
    }

    /// Replace tickets and users with seed data.
    ///
    /// Seeded tickets are taken as given, except that a ticket whose ID was
    /// already seen is dropped so IDs stay unique.
    pub fn seed(&mut self, data: SeedData) {
        let mut seen = HashSet::new();
        let total = data.tickets.len();
        self.tickets = data
            .tickets
            .into_iter()
            .filter(|ticket| {
                let fresh = seen.insert(ticket.id.clone());
                if !fresh {
                    tracing::warn!(id = %ticket.id, "Dropping seeded ticket with duplicate ID");
                }
                fresh
            })
            .collect();
        self.users = data.users;

        tracing::debug!(
            tickets = self.tickets.len(),
            dropped = total - self.tickets.len(),
            users = self.users.len(),
            "Seeded board"
        );
        self.commit(false);
    }

    // ========== Accessors ==========

    /// All tickets in insertion order.
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Look up a ticket by ID.
    pub fn ticket(&self, id: &TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|t| &t.id == id)
    }

    /// Seeded users.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Look up a user by ID.
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Column names, left to right.
    pub fn columns(&self) -> &[String] {
        &self.preferences.columns
    }

    /// Whether a column with this exact name exists.
    pub fn has_column(&self, title: &str) -> bool {
        self.preferences.columns.iter().any(|c| c == title)
    }

    /// Current view preferences.
    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Active grouping key.
    pub fn grouping(&self) -> Grouping {
        self.preferences.grouping
    }

    /// Active sorting key.
    pub fn sorting(&self) -> Sorting {
        self.preferences.sorting
    }

    /// Prefix used for generated ticket IDs.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Change counter, bumped on every successful mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Tickets bucketed by the active grouping.
    pub fn buckets(&self) -> Buckets<'_> {
        classify(&self.tickets, self.preferences.grouping)
    }

    /// Tickets whose status is `column`, in insertion order.
    pub fn tickets_in_column<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Ticket> {
        self.tickets.iter().filter(move |t| t.status == column)
    }

    /// Build the rendered lanes for the current state.
    pub fn view(&self) -> BoardView {
        BoardView::build(self)
    }

    // ========== Preference Mutations ==========

    /// Change the grouping key. Setting the current value is a no-op.
    pub fn set_grouping(&mut self, grouping: Grouping) {
        if self.preferences.grouping == grouping {
            return;
        }
        tracing::debug!(%grouping, "Grouping changed");
        self.preferences.grouping = grouping;
        self.commit(true);
    }

    /// Change the sorting key. Setting the current value is a no-op.
    pub fn set_sorting(&mut self, sorting: Sorting) {
        if self.preferences.sorting == sorting {
            return;
        }
        tracing::debug!(%sorting, "Sorting changed");
        self.preferences.sorting = sorting;
        self.commit(true);
    }

    /// Restore default columns, grouping, and sorting.
    ///
    /// A non-default column that still holds tickets is kept after the
    /// defaults, in its current order, so no ticket loses its column.
    pub fn reset_preferences(&mut self) {
        let mut defaults = Preferences::default();
        let kept: Vec<String> = self
            .preferences
            .columns
            .iter()
            .filter(|column| !defaults.columns.contains(*column))
            .filter(|column| self.tickets_in_column(column).next().is_some())
            .cloned()
            .collect();
        defaults.columns.extend(kept);

        if self.preferences == defaults {
            return;
        }
        tracing::debug!(columns = ?defaults.columns, "Preferences reset to defaults");
        self.preferences = defaults;
        self.commit(true);
    }

    // ========== Column Mutations ==========

    /// Append a column.
    ///
    /// The title is trimmed before use.
    ///
    /// # Errors
    ///
    /// - `ValidationError::EmptyColumnTitle` if the title is blank
    /// - `ValidationError::DuplicateColumn` if the column already exists
    pub fn add_column(&mut self, title: &str) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyColumnTitle.into());
        }
        if self.has_column(title) {
            return Err(ValidationError::DuplicateColumn(title.to_string()).into());
        }

        self.preferences.columns.push(title.to_string());
        tracing::debug!(column = title, "Added column");
        self.commit(true);
        Ok(())
    }

    /// Remove a column and cascade-delete every ticket whose status equals it.
    ///
    /// Returns the deleted tickets, or [`Outcome::Declined`] if `confirm`
    /// answered no.
    ///
    /// # Errors
    ///
    /// Returns `Error::ColumnNotFound` if no such column exists. The
    /// confirmation is not consulted in that case.
    pub fn remove_column(
        &mut self,
        title: &str,
        confirm: &mut dyn Confirm,
    ) -> Result<Outcome<Vec<Ticket>>> {
        let Some(position) = self.preferences.columns.iter().position(|c| c == title) else {
            return Err(Error::ColumnNotFound(title.to_string()));
        };

        let request = ConfirmRequest::RemoveColumn {
            title,
            ticket_count: self.tickets_in_column(title).count(),
        };
        if !confirm.confirm(&request) {
            tracing::debug!(column = title, "Column removal declined");
            return Ok(Outcome::Declined);
        }

        self.preferences.columns.remove(position);
        let (removed, kept): (Vec<Ticket>, Vec<Ticket>) = std::mem::take(&mut self.tickets)
            .into_iter()
            .partition(|t| t.status == title);
        self.tickets = kept;

        tracing::debug!(column = title, removed = removed.len(), "Removed column");
        self.commit(true);
        Ok(Outcome::Applied(removed))
    }

    // ========== Ticket Mutations ==========

    /// Create a ticket.
    ///
    /// The ID is `<prefix>-<n>` with `n` one more than the current ticket
    /// count; if that ID is already taken, `n` keeps increasing until a free
    /// one is found. Without a user ID (or with an empty one) the ticket is
    /// assigned to the first seeded user, if any.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyTicketTitle` if the title is blank.
    pub fn add_ticket(&mut self, new_ticket: NewTicket) -> Result<Ticket> {
        let title = new_ticket.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTicketTitle.into());
        }

        if !self.has_column(&new_ticket.status) {
            tracing::warn!(status = %new_ticket.status, "Creating ticket in unknown column");
        }

        let user_id = new_ticket
            .user_id
            .filter(|id| !id.is_empty())
            .or_else(|| self.users.first().map(|u| u.id.clone()));

        let ticket = Ticket {
            id: self.next_id(),
            title: title.to_string(),
            status: new_ticket.status,
            priority: new_ticket.priority,
            user_id,
            tag: new_ticket.tag.filter(|t| !t.is_empty()),
        };

        self.tickets.push(ticket.clone());
        tracing::debug!(id = %ticket.id, status = %ticket.status, "Added ticket");
        self.commit(false);
        Ok(ticket)
    }

    /// Merge `update` into an existing ticket. Unspecified fields are untouched.
    ///
    /// # Errors
    ///
    /// Returns `Error::TicketNotFound` if the ID is absent.
    pub fn edit_ticket(&mut self, id: &TicketId, update: TicketUpdate) -> Result<Ticket> {
        let ticket = self.ticket_mut(id)?;
        let before = ticket.clone();

        if let Some(title) = update.title {
            ticket.title = title;
        }
        if let Some(status) = update.status {
            ticket.status = status;
        }
        if let Some(priority) = update.priority {
            ticket.priority = priority;
        }
        if let Some(user_id) = update.user_id {
            ticket.user_id = user_id;
        }
        if let Some(tag) = update.tag {
            ticket.tag = tag;
        }

        let edited = ticket.clone();
        if edited != before {
            tracing::debug!(%id, "Edited ticket");
            self.commit(false);
        }
        Ok(edited)
    }

    /// Delete a ticket after confirmation.
    ///
    /// # Errors
    ///
    /// Returns `Error::TicketNotFound` if the ID is absent. The confirmation
    /// is not consulted in that case.
    pub fn delete_ticket(
        &mut self,
        id: &TicketId,
        confirm: &mut dyn Confirm,
    ) -> Result<Outcome<Ticket>> {
        let position = self
            .tickets
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| Error::TicketNotFound(id.clone()))?;

        let request = ConfirmRequest::DeleteTicket {
            id,
            title: &self.tickets[position].title,
        };
        if !confirm.confirm(&request) {
            tracing::debug!(%id, "Ticket deletion declined");
            return Ok(Outcome::Declined);
        }

        let removed = self.tickets.remove(position);
        tracing::debug!(%id, "Deleted ticket");
        self.commit(false);
        Ok(Outcome::Applied(removed))
    }

    /// Set a ticket's status, as a drag-and-drop drop does.
    ///
    /// The target does not have to be a known column.
    ///
    /// # Errors
    ///
    /// Returns `Error::TicketNotFound` if the ID is absent.
    pub fn move_ticket(&mut self, id: &TicketId, status: &str) -> Result<Ticket> {
        let known = self.has_column(status);
        let ticket = self.ticket_mut(id)?;
        if ticket.status == status {
            return Ok(ticket.clone());
        }

        if !known {
            tracing::warn!(%id, status, "Moving ticket to unknown column");
        }
        ticket.status = status.to_string();
        let moved = ticket.clone();

        tracing::debug!(%id, status, "Moved ticket");
        self.commit(false);
        Ok(moved)
    }

    // ========== Internals ==========

    fn ticket_mut(&mut self, id: &TicketId) -> Result<&mut Ticket> {
        self.tickets
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| Error::TicketNotFound(id.clone()))
    }

    fn next_id(&self) -> TicketId {
        let taken: HashSet<&str> = self.tickets.iter().map(|t| t.id.as_str()).collect();
        let mut n = self.tickets.len() + 1;
        loop {
            let candidate = format!("{}-{n}", self.prefix);
            if !taken.contains(candidate.as_str()) {
                return TicketId::new(candidate);
            }
            n += 1;
        }
    }

    fn commit(&mut self, preferences_changed: bool) {
        self.version += 1;
        let version = self.version;
        for observer in &mut self.observers {
            observer.board_changed(version);
            if preferences_changed {
                observer.preferences_changed(&self.preferences);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;
    use rstest::rstest;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorded {
        versions: Vec<u64>,
        preferences: Vec<Preferences>,
    }

    struct Recorder(Rc<RefCell<Recorded>>);

    impl BoardObserver for Recorder {
        fn board_changed(&mut self, version: u64) {
            self.0.borrow_mut().versions.push(version);
        }

        fn preferences_changed(&mut self, preferences: &Preferences) {
            self.0.borrow_mut().preferences.push(preferences.clone());
        }
    }

    fn observed_board() -> (BoardStore, Rc<RefCell<Recorded>>) {
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        let mut board = BoardStore::new(Preferences::default());
        board.subscribe(Box::new(Recorder(Rc::clone(&recorded))));
        (board, recorded)
    }

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn seeded_ticket(id: &str, status: &str) -> Ticket {
        Ticket {
            id: TicketId::new(id),
            title: format!("Seeded {id}"),
            status: status.to_string(),
            priority: Priority::MEDIUM,
            user_id: None,
            tag: None,
        }
    }

    fn decline(_: &ConfirmRequest<'_>) -> bool {
        false
    }

    // ========== Columns ==========

    #[test]
    fn test_add_column_appends() {
        let mut board = BoardStore::new(Preferences::default());
        board.add_column("Review").unwrap();
        assert_eq!(
            board.columns(),
            ["Todo", "In Progress", "Done", "Cancelled", "Review"]
        );
    }

    #[test]
    fn test_add_column_trims_title() {
        let mut board = BoardStore::new(Preferences::default());
        board.add_column("  Review ").unwrap();
        assert!(board.has_column("Review"));
    }

    #[test]
    fn test_add_column_rejects_empty() {
        let mut board = BoardStore::new(Preferences::default());
        for title in ["", "   "] {
            let err = board.add_column(title).unwrap_err();
            assert!(matches!(
                err,
                Error::Validation(ValidationError::EmptyColumnTitle)
            ));
        }
        assert_eq!(board.columns().len(), 4);
        assert_eq!(board.version(), 0);
    }

    #[rstest]
    #[case("Done")]
    #[case(" Done ")]
    #[case("Done\t")]
    fn test_add_column_rejects_duplicate(#[case] title: &str) {
        let mut board = BoardStore::new(Preferences::default());
        let err = board.add_column(title).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::DuplicateColumn(ref name)) if name == "Done"
        ));
        assert_eq!(board.columns().len(), 4);
    }

    #[test]
    fn test_remove_column_cascades_exactly_its_tickets() {
        let mut board = BoardStore::new(Preferences::default());
        board.seed(SeedData {
            tickets: vec![
                seeded_ticket("CAM-1", "Todo"),
                seeded_ticket("CAM-2", "Done"),
                seeded_ticket("CAM-3", "Todo"),
            ],
            users: vec![],
        });

        let removed = board
            .remove_column("Todo", &mut AutoConfirm)
            .unwrap()
            .applied()
            .unwrap();

        let removed_ids: Vec<_> = removed.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(removed_ids, ["CAM-1", "CAM-3"]);
        assert_eq!(board.tickets().len(), 1);
        assert_eq!(board.tickets()[0].id.as_str(), "CAM-2");
        assert!(!board.has_column("Todo"));
    }

    #[test]
    fn test_remove_column_declined_changes_nothing() {
        let (mut board, recorded) = observed_board();
        board.add_ticket(NewTicket::new("Keep me")).unwrap();
        let version = board.version();

        let outcome = board.remove_column("Todo", &mut decline).unwrap();

        assert_eq!(outcome, Outcome::Declined);
        assert!(board.has_column("Todo"));
        assert_eq!(board.tickets().len(), 1);
        assert_eq!(board.version(), version);
        assert!(recorded.borrow().preferences.is_empty());
    }

    #[test]
    fn test_remove_column_passes_ticket_count_to_confirm() {
        let mut board = BoardStore::new(Preferences::default());
        board.add_ticket(NewTicket::new("One")).unwrap();
        board.add_ticket(NewTicket::new("Two")).unwrap();

        let mut asked = None;
        let mut confirm = |request: &ConfirmRequest<'_>| {
            asked = Some(request.to_string());
            true
        };
        board.remove_column("Todo", &mut confirm).unwrap();

        assert_eq!(
            asked.as_deref(),
            Some("Are you sure you want to remove the \"Todo\" column and its 2 ticket(s)?")
        );
    }

    #[test]
    fn test_remove_missing_column() {
        let mut board = BoardStore::new(Preferences::default());
        let mut asked = false;
        let mut confirm = |_: &ConfirmRequest<'_>| {
            asked = true;
            true
        };

        let err = board.remove_column("Backlog", &mut confirm).unwrap_err();
        assert!(matches!(err, Error::ColumnNotFound(_)));
        assert!(!asked);
    }

    // ========== Tickets ==========

    #[test]
    fn test_add_ticket_scenario() {
        let mut board = BoardStore::new(Preferences::default());
        let ticket = board
            .add_ticket(NewTicket {
                status: "Todo".to_string(),
                priority: Priority::HIGH,
                ..NewTicket::new("Fix bug")
            })
            .unwrap();

        assert_eq!(board.tickets().len(), 1);
        assert_eq!(ticket.id.as_str(), "CAM-1");
        assert_eq!(ticket.status, "Todo");
        assert_eq!(ticket.priority, Priority::HIGH);

        board.move_ticket(&ticket.id, "Done").unwrap();
        let buckets = board.buckets();
        assert_eq!(buckets["Done"].len(), 1);
        assert!(buckets.get("Todo").is_none_or(Vec::is_empty));
    }

    #[test]
    fn test_add_ticket_rejects_blank_title() {
        let mut board = BoardStore::new(Preferences::default());
        let err = board.add_ticket(NewTicket::new("  ")).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::EmptyTicketTitle)
        ));
        assert!(board.tickets().is_empty());
    }

    #[test]
    fn test_add_ticket_defaults_to_first_user() {
        let mut board = BoardStore::new(Preferences::default());
        board.seed(SeedData {
            tickets: vec![],
            users: vec![user("usr-1", "Anoop"), user("usr-2", "Yogesh")],
        });

        let defaulted = board.add_ticket(NewTicket::new("A")).unwrap();
        assert_eq!(defaulted.user_id.as_deref(), Some("usr-1"));

        let blank = board
            .add_ticket(NewTicket {
                user_id: Some(String::new()),
                ..NewTicket::new("B")
            })
            .unwrap();
        assert_eq!(blank.user_id.as_deref(), Some("usr-1"));

        let explicit = board
            .add_ticket(NewTicket {
                user_id: Some("usr-2".to_string()),
                ..NewTicket::new("C")
            })
            .unwrap();
        assert_eq!(explicit.user_id.as_deref(), Some("usr-2"));
    }

    #[test]
    fn test_add_ticket_without_users_leaves_user_unset() {
        let mut board = BoardStore::new(Preferences::default());
        let ticket = board.add_ticket(NewTicket::new("Lonely")).unwrap();
        assert!(ticket.user_id.is_none());
    }

    #[test]
    fn test_generated_ids_skip_taken_ids() {
        let mut board = BoardStore::new(Preferences::default());
        let first = board.add_ticket(NewTicket::new("one")).unwrap();
        board.add_ticket(NewTicket::new("two")).unwrap();
        board.delete_ticket(&first.id, &mut AutoConfirm).unwrap();

        // Count is 1, so CAM-2 would be next, but it is still in use.
        let third = board.add_ticket(NewTicket::new("three")).unwrap();
        assert_eq!(third.id.as_str(), "CAM-3");

        let ids: HashSet<_> = board.tickets().iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids.len(), board.tickets().len());
    }

    #[test]
    fn test_custom_prefix() {
        let mut board = BoardStore::with_prefix(Preferences::default(), "OPS");
        let ticket = board.add_ticket(NewTicket::new("Page on-call")).unwrap();
        assert_eq!(ticket.id.as_str(), "OPS-1");
    }

    #[test]
    fn test_edit_ticket_merges_fields() {
        let mut board = BoardStore::new(Preferences::default());
        let ticket = board
            .add_ticket(NewTicket {
                tag: Some("Feature".to_string()),
                ..NewTicket::new("Original")
            })
            .unwrap();

        let edited = board
            .edit_ticket(
                &ticket.id,
                TicketUpdate {
                    priority: Some(Priority::URGENT),
                    status: Some("In Progress".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(edited.title, "Original");
        assert_eq!(edited.tag.as_deref(), Some("Feature"));
        assert_eq!(edited.priority, Priority::URGENT);
        assert_eq!(edited.status, "In Progress");
        assert_eq!(board.ticket(&ticket.id), Some(&edited));
    }

    #[test]
    fn test_edit_ticket_clears_optional_fields() {
        let mut board = BoardStore::new(Preferences::default());
        let ticket = board
            .add_ticket(NewTicket {
                tag: Some("Feature".to_string()),
                user_id: Some("usr-9".to_string()),
                ..NewTicket::new("Tagged")
            })
            .unwrap();

        let edited = board
            .edit_ticket(
                &ticket.id,
                TicketUpdate {
                    tag: Some(None),
                    user_id: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(edited.tag.is_none());
        assert!(edited.user_id.is_none());
    }

    #[test]
    fn test_edit_missing_ticket() {
        let mut board = BoardStore::new(Preferences::default());
        let err = board
            .edit_ticket(&TicketId::new("CAM-404"), TicketUpdate::default())
            .unwrap_err();
        assert!(matches!(err, Error::TicketNotFound(id) if id.as_str() == "CAM-404"));
    }

    #[test]
    fn test_noop_edit_does_not_bump_version() {
        let mut board = BoardStore::new(Preferences::default());
        let ticket = board.add_ticket(NewTicket::new("Same")).unwrap();
        let version = board.version();

        board
            .edit_ticket(
                &ticket.id,
                TicketUpdate {
                    title: Some("Same".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(board.version(), version);
    }

    #[test]
    fn test_delete_ticket() {
        let mut board = BoardStore::new(Preferences::default());
        let ticket = board.add_ticket(NewTicket::new("Doomed")).unwrap();

        let declined = board.delete_ticket(&ticket.id, &mut decline).unwrap();
        assert_eq!(declined, Outcome::Declined);
        assert_eq!(board.tickets().len(), 1);

        let removed = board
            .delete_ticket(&ticket.id, &mut AutoConfirm)
            .unwrap()
            .applied()
            .unwrap();
        assert_eq!(removed.id, ticket.id);
        assert!(board.tickets().is_empty());
    }

    #[test]
    fn test_move_ticket_to_unknown_column_is_allowed() {
        let mut board = BoardStore::new(Preferences::default());
        let ticket = board.add_ticket(NewTicket::new("Wanderer")).unwrap();

        let moved = board.move_ticket(&ticket.id, "Nowhere").unwrap();
        assert_eq!(moved.status, "Nowhere");
        assert_eq!(board.buckets()["Nowhere"].len(), 1);
    }

    #[test]
    fn test_move_missing_ticket() {
        let mut board = BoardStore::new(Preferences::default());
        let err = board
            .move_ticket(&TicketId::new("CAM-1"), "Done")
            .unwrap_err();
        assert!(matches!(err, Error::TicketNotFound(_)));
    }

    // ========== Seeding ==========

    #[test]
    fn test_seed_drops_duplicate_ids() {
        let mut board = BoardStore::new(Preferences::default());
        board.seed(SeedData {
            tickets: vec![
                seeded_ticket("CAM-1", "Todo"),
                seeded_ticket("CAM-1", "Done"),
            ],
            users: vec![user("usr-1", "Anoop")],
        });

        assert_eq!(board.tickets().len(), 1);
        assert_eq!(board.tickets()[0].status, "Todo");
        assert_eq!(board.user("usr-1").map(|u| u.name.as_str()), Some("Anoop"));
    }

    // ========== Notifications ==========

    #[test]
    fn test_observers_see_every_mutation() {
        let (mut board, recorded) = observed_board();

        let ticket = board.add_ticket(NewTicket::new("Watched")).unwrap();
        board.move_ticket(&ticket.id, "Done").unwrap();
        board.add_column("Review").unwrap();
        board.set_grouping(Grouping::User);
        board.set_sorting(Sorting::Title);

        let recorded = recorded.borrow();
        assert_eq!(recorded.versions, [1, 2, 3, 4, 5]);
        assert_eq!(recorded.preferences.len(), 3);

        let last = recorded.preferences.last().unwrap();
        assert_eq!(last.grouping, Grouping::User);
        assert_eq!(last.sorting, Sorting::Title);
        assert!(last.columns.iter().any(|c| c == "Review"));
    }

    #[test]
    fn test_unchanged_preferences_do_not_notify() {
        let (mut board, recorded) = observed_board();

        board.set_grouping(Grouping::Status);
        board.set_sorting(Sorting::Priority);

        assert_eq!(board.version(), 0);
        assert!(recorded.borrow().versions.is_empty());
    }

    #[test]
    fn test_failed_mutations_do_not_notify() {
        let (mut board, recorded) = observed_board();

        let _ = board.add_column("");
        let _ = board.add_ticket(NewTicket::new(""));
        let _ = board.move_ticket(&TicketId::new("CAM-9"), "Done");

        assert!(recorded.borrow().versions.is_empty());
    }

    #[test]
    fn test_reset_preferences_keeps_occupied_columns() {
        let (mut board, recorded) = observed_board();
        board.add_column("Review").unwrap();
        board.add_column("Blocked").unwrap();
        board.add_column("QA").unwrap();
        board.set_grouping(Grouping::User);
        for (title, status) in [("Needs eyes", "QA"), ("Second look", "Review")] {
            board
                .add_ticket(NewTicket {
                    status: status.to_string(),
                    ..NewTicket::new(title)
                })
                .unwrap();
        }

        board.reset_preferences();

        assert_eq!(
            board.columns(),
            ["Todo", "In Progress", "Done", "Cancelled", "Review", "QA"]
        );
        assert_eq!(board.grouping(), Grouping::Status);
        assert!(board.tickets().iter().all(|t| board.has_column(&t.status)));
        assert_eq!(board.view().rendered_count(), 2);

        let notified = recorded.borrow().preferences.len();
        board.reset_preferences();
        assert_eq!(recorded.borrow().preferences.len(), notified);
    }

    #[test]
    fn test_reset_preferences_drops_empty_custom_columns() {
        let mut board = BoardStore::new(Preferences::default());
        board.add_column("Review").unwrap();
        board.set_sorting(Sorting::Title);

        board.reset_preferences();
        assert_eq!(board.preferences(), &Preferences::default());
    }
}
