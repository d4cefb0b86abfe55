//! Preference persistence.
//!
//! The column list, grouping, and sorting survive restarts as three
//! independent entries in a [`KeyValueStore`]:
//!
//! | Key              | Value                         |
//! |------------------|-------------------------------|
//! | `kanbanStatuses` | JSON array of column names    |
//! | `kanbanGrouping` | `status`, `user`, `priority`  |
//! | `kanbanSorting`  | `priority`, `title`           |
//!
//! Reading is forgiving: each entry that is missing or malformed falls back
//! to its default on its own. Writing is best-effort: failures are logged and
//! never reach the caller.
//!
//! [`PreferencePersistence`] implements [`BoardObserver`], so once subscribed
//! to a [`BoardStore`](crate::board::BoardStore) it saves on every preference
//! change without any explicit call.

use crate::board::BoardObserver;
use crate::domain::{Grouping, Preferences, Sorting};
use kanban_kv::KeyValueStore;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Key of the serialized column list.
pub const COLUMNS_KEY: &str = "kanbanStatuses";

/// Key of the grouping value.
pub const GROUPING_KEY: &str = "kanbanGrouping";

/// Key of the sorting value.
pub const SORTING_KEY: &str = "kanbanSorting";

/// Loads and saves [`Preferences`] through a key-value store.
pub struct PreferencePersistence {
    store: Box<dyn KeyValueStore>,
}

impl fmt::Debug for PreferencePersistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreferencePersistence")
            .field("store", &"<dyn KeyValueStore>")
            .finish()
    }
}

impl PreferencePersistence {
    /// Persist through the given store.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Read preferences, substituting defaults field by field.
    pub fn load(&self) -> Preferences {
        let defaults = Preferences::default();

        let columns = self
            .read(COLUMNS_KEY)
            .and_then(|raw| parse_columns(&raw))
            .unwrap_or(defaults.columns);
        let grouping = self
            .read(GROUPING_KEY)
            .and_then(|raw| parse_option::<Grouping>(GROUPING_KEY, &raw))
            .unwrap_or(defaults.grouping);
        let sorting = self
            .read(SORTING_KEY)
            .and_then(|raw| parse_option::<Sorting>(SORTING_KEY, &raw))
            .unwrap_or(defaults.sorting);

        tracing::debug!(?columns, %grouping, %sorting, "Loaded preferences");
        Preferences {
            columns,
            grouping,
            sorting,
        }
    }

    /// Write all three entries. Failures are logged and swallowed.
    pub fn save(&self, preferences: &Preferences) {
        match serde_json::to_string(&preferences.columns) {
            Ok(columns) => self.write(COLUMNS_KEY, &columns),
            Err(e) => tracing::warn!(key = COLUMNS_KEY, error = %e, "Failed to serialize columns"),
        }
        self.write(GROUPING_KEY, preferences.grouping.as_str());
        self.write(SORTING_KEY, preferences.sorting.as_str());
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read preference, using default");
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            tracing::warn!(key, error = %e, "Failed to save preference");
        }
    }
}

impl BoardObserver for PreferencePersistence {
    fn preferences_changed(&mut self, preferences: &Preferences) {
        self.save(preferences);
    }
}

/// Parse the column list.
///
/// Blank and repeated names are dropped so column names stay unique. Anything
/// that is not a JSON array of strings yields `None`.
fn parse_columns(raw: &str) -> Option<Vec<String>> {
    let parsed: Vec<String> = match serde_json::from_str(raw) {
        Ok(columns) => columns,
        Err(e) => {
            tracing::warn!(key = COLUMNS_KEY, error = %e, "Malformed column list, using default");
            return None;
        }
    };

    let total = parsed.len();
    let mut seen = HashSet::new();
    let columns: Vec<String> = parsed
        .into_iter()
        .filter(|name| !name.trim().is_empty() && seen.insert(name.clone()))
        .collect();

    if columns.len() != total {
        tracing::warn!(
            key = COLUMNS_KEY,
            dropped = total - columns.len(),
            "Dropped blank or duplicate column names"
        );
    }
    Some(columns)
}

fn parse_option<T>(key: &str, raw: &str) -> Option<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Invalid preference value, using default");
            None
        }
    }
}
