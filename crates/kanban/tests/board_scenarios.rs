//! End-to-end board scenarios through the public library API.

use kanban::board::{
    AutoConfirm, BoardObserver, BoardStore, Confirm, ConfirmRequest, Outcome, order,
};
use kanban::domain::{
    Grouping, NewTicket, Preferences, Priority, Sorting, Ticket, TicketId, TicketUpdate, User,
};
use kanban::error::{Error, ValidationError};
use kanban::prefs::PreferencePersistence;
use kanban::seed::{SeedData, StaticSeed, load_seed};
use kanban_kv::MemoryStore;

fn ticket(id: &str, title: &str, status: &str, priority: Priority) -> Ticket {
    Ticket {
        id: TicketId::new(id),
        title: title.to_string(),
        status: status.to_string(),
        priority,
        user_id: None,
        tag: None,
    }
}

fn decline(_: &ConfirmRequest<'_>) -> bool {
    false
}

/// Accepts every request and remembers what was asked.
#[derive(Default)]
struct Recorder {
    asked: Vec<String>,
}

impl Confirm for Recorder {
    fn confirm(&mut self, request: &ConfirmRequest<'_>) -> bool {
        self.asked.push(request.to_string());
        true
    }
}

#[test]
fn test_add_then_move_scenario() {
    let mut board = BoardStore::new(Preferences::default());
    assert_eq!(board.columns(), ["Todo", "In Progress", "Done", "Cancelled"]);

    let created = board
        .add_ticket(NewTicket {
            status: "Todo".to_string(),
            priority: Priority::HIGH,
            ..NewTicket::new("Fix bug")
        })
        .unwrap();
    assert_eq!(board.tickets().len(), 1);
    assert_eq!(created.id.as_str(), "CAM-1");
    assert_eq!(created.status, "Todo");
    assert_eq!(created.priority.value(), 3);

    board.move_ticket(&TicketId::new("CAM-1"), "Done").unwrap();

    let buckets = board.buckets();
    assert_eq!(buckets["Done"].len(), 1);
    assert_eq!(buckets["Done"][0].id, created.id);
    assert!(buckets.get("Todo").is_none_or(Vec::is_empty));
}

#[test]
fn test_add_empty_column_scenario() {
    let mut board = BoardStore::new(Preferences::default());
    let before = board.columns().to_vec();

    let err = board.add_column("").unwrap_err();

    assert!(matches!(
        err,
        Error::Validation(ValidationError::EmptyColumnTitle)
    ));
    assert_eq!(board.columns(), before);
}

#[test]
fn test_ordering_scenario() {
    let tickets = [
        ticket("CAM-1", "B", "Todo", Priority::URGENT),
        ticket("CAM-2", "A", "Todo", Priority::LOW),
    ];
    let refs: Vec<&Ticket> = tickets.iter().collect();

    let by_title: Vec<_> = order(&refs, Sorting::Title)
        .iter()
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(by_title, ["A", "B"]);

    let by_priority: Vec<_> = order(&refs, Sorting::Priority)
        .iter()
        .map(|t| t.priority)
        .collect();
    assert_eq!(by_priority, [Priority::URGENT, Priority::LOW]);
}

#[test]
fn test_declined_confirmations_change_nothing() {
    let mut board = BoardStore::new(Preferences::default());
    board.seed(SeedData {
        tickets: vec![ticket("CAM-1", "Keep", "Done", Priority::MEDIUM)],
        users: vec![],
    });
    let version = board.version();

    let outcome = board.remove_column("Done", &mut decline).unwrap();
    assert_eq!(outcome, Outcome::Declined);
    let outcome = board
        .delete_ticket(&TicketId::new("CAM-1"), &mut decline)
        .unwrap();
    assert_eq!(outcome, Outcome::Declined);

    assert_eq!(board.version(), version);
    assert!(board.has_column("Done"));
    assert_eq!(board.tickets().len(), 1);
}

#[test]
fn test_confirmation_sees_what_will_be_lost() {
    let mut board = BoardStore::new(Preferences::default());
    board.seed(SeedData {
        tickets: vec![
            ticket("CAM-1", "One", "Done", Priority::LOW),
            ticket("CAM-2", "Two", "Done", Priority::LOW),
        ],
        users: vec![],
    });

    let mut record = Recorder::default();
    board.remove_column("Done", &mut record).unwrap();

    assert_eq!(
        record.asked,
        ["Are you sure you want to remove the \"Done\" column and its 2 ticket(s)?"]
    );
}

#[test]
fn test_generated_ids_skip_taken_ones_after_delete() {
    let mut board = BoardStore::new(Preferences::default());
    for title in ["a", "b", "c"] {
        board.add_ticket(NewTicket::new(title)).unwrap();
    }
    board
        .delete_ticket(&TicketId::new("CAM-1"), &mut AutoConfirm)
        .unwrap();

    // Count is 2, but CAM-3 is still taken
    let next = board.add_ticket(NewTicket::new("d")).unwrap();
    assert_eq!(next.id.as_str(), "CAM-4");

    let ids: Vec<_> = board.tickets().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["CAM-2", "CAM-3", "CAM-4"]);
}

#[test]
fn test_missing_targets_are_errors() {
    let mut board = BoardStore::new(Preferences::default());
    let missing = TicketId::new("CAM-404");

    assert!(matches!(
        board.edit_ticket(&missing, TicketUpdate::default()),
        Err(Error::TicketNotFound(_))
    ));
    assert!(matches!(
        board.move_ticket(&missing, "Done"),
        Err(Error::TicketNotFound(_))
    ));
    assert!(matches!(
        board.delete_ticket(&missing, &mut AutoConfirm),
        Err(Error::TicketNotFound(_))
    ));
    assert!(matches!(
        board.remove_column("Nope", &mut AutoConfirm),
        Err(Error::ColumnNotFound(_))
    ));
}

#[tokio::test]
async fn test_seeded_board_groups_by_user() {
    let seed = SeedData::from_json(
        r#"{
            "tickets": [
                {"id": "CAM-1", "title": "Profile page", "tag": ["Feature request"],
                 "userId": "usr-1", "status": "Todo", "priority": 4},
                {"id": "CAM-2", "title": "Translations", "tag": ["Feature request"],
                 "userId": "usr-2", "status": "In progress", "priority": 3},
                {"id": "CAM-3", "title": "Audit log", "userId": "usr-1",
                 "status": "Backlog", "priority": 1}
            ],
            "users": [
                {"id": "usr-1", "name": "Anoop sharma", "available": false},
                {"id": "usr-2", "name": "Yogesh", "available": true}
            ]
        }"#,
    )
    .unwrap();

    let mut board = BoardStore::new(Preferences::default());
    board.seed(load_seed(&StaticSeed(seed)).await);

    // "In progress" and "Backlog" name no column, so those tickets have no status lane
    assert_eq!(board.view().rendered_count(), 1);

    board.set_grouping(Grouping::User);
    let view = board.view();
    let anoop = view.lane("usr-1").unwrap();
    assert_eq!(anoop.title, "Anoop sharma");
    let ids: Vec<_> = anoop.tickets.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["CAM-1", "CAM-3"]);
    assert_eq!(view.lane("usr-2").unwrap().tickets[0].avatar, 'Y');
    assert_eq!(view.rendered_count(), 3);
}

#[test]
fn test_new_ticket_defaults_to_first_user() {
    let mut board = BoardStore::new(Preferences::default());
    board.seed(SeedData {
        tickets: vec![],
        users: vec![
            User {
                id: "usr-7".to_string(),
                name: "Zed".to_string(),
            },
            User {
                id: "usr-8".to_string(),
                name: "Amy".to_string(),
            },
        ],
    });

    let ticket = board.add_ticket(NewTicket::new("Assigned")).unwrap();
    assert_eq!(ticket.user_id.as_deref(), Some("usr-7"));
}

#[test]
fn test_persistence_observer_tracks_preference_changes() {
    struct Counter(std::rc::Rc<std::cell::Cell<usize>>);

    impl BoardObserver for Counter {
        fn board_changed(&mut self, _version: u64) {
            self.0.set(self.0.get() + 1);
        }
    }

    let store = MemoryStore::new();
    let changes = std::rc::Rc::new(std::cell::Cell::new(0));
    let mut board = BoardStore::new(PreferencePersistence::new(store.clone()).load());
    board.subscribe(Box::new(PreferencePersistence::new(store.clone())));
    board.subscribe(Box::new(Counter(changes.clone())));

    board.set_sorting(Sorting::Title);
    board.set_sorting(Sorting::Title);
    board.add_ticket(NewTicket::new("x")).unwrap();

    assert_eq!(changes.get(), 2);
    let reloaded = PreferencePersistence::new(store).load();
    assert_eq!(reloaded.sorting, Sorting::Title);
    assert_eq!(reloaded.grouping, Grouping::Status);
}
