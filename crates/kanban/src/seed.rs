//! Seed data: the tickets and users a board starts with.
//!
//! Seeding is the one asynchronous boundary of the board. A [`SeedSource`]
//! produces [`SeedData`]; [`load_seed`] turns any failure into empty
//! collections so the board still opens, just with nothing on it.

use crate::domain::{Ticket, User};
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Tickets and users fetched once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    /// Initial tickets
    #[serde(default)]
    pub tickets: Vec<Ticket>,

    /// Board users
    #[serde(default)]
    pub users: Vec<User>,
}

impl SeedData {
    /// Decode the `{ "tickets": [...], "users": [...] }` payload.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` if the payload is not valid seed JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Read-only provider of seed data.
#[async_trait]
pub trait SeedSource: Send + Sync {
    /// Fetch the full seed payload.
    ///
    /// # Errors
    ///
    /// Returns `Error::SeedData` if the source cannot be read or decoded.
    async fn fetch(&self) -> Result<SeedData>;

    /// Human-readable description for log messages.
    fn describe(&self) -> String;
}

/// Seed data read from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSeed {
    path: PathBuf,
}

impl JsonFileSeed {
    /// Create a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SeedSource for JsonFileSeed {
    async fn fetch(&self) -> Result<SeedData> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::SeedData(format!("{}: {e}", self.path.display())))?;

        // An empty file is a freshly initialised board
        if content.trim().is_empty() {
            return Ok(SeedData::default());
        }

        SeedData::from_json(&content)
            .map_err(|e| Error::SeedData(format!("{}: {e}", self.path.display())))
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Source that always yields an empty board.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySeed;

#[async_trait]
impl SeedSource for EmptySeed {
    async fn fetch(&self) -> Result<SeedData> {
        Ok(SeedData::default())
    }

    fn describe(&self) -> String {
        "empty seed".to_string()
    }
}

/// Source that hands out a fixed payload.
#[derive(Debug, Clone, Default)]
pub struct StaticSeed(pub SeedData);

#[async_trait]
impl SeedSource for StaticSeed {
    async fn fetch(&self) -> Result<SeedData> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        format!(
            "static seed ({} tickets, {} users)",
            self.0.tickets.len(),
            self.0.users.len()
        )
    }
}

/// Fetch seed data once, substituting empty collections on failure.
///
/// Failures are logged and never retried. A partially decoded payload is
/// discarded rather than merged.
pub async fn load_seed(source: &dyn SeedSource) -> SeedData {
    match source.fetch().await {
        Ok(data) => {
            tracing::debug!(
                source = %source.describe(),
                tickets = data.tickets.len(),
                users = data.users.len(),
                "Loaded seed data"
            );
            data
        }
        Err(e) => {
            tracing::error!(source = %source.describe(), error = %e, "Failed to load seed data");
            SeedData::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "tickets": [
            {"id": "CAM-1", "title": "Update user profile page UI", "tag": ["Feature request"],
             "userId": "usr-1", "status": "Todo", "priority": 4},
            {"id": "CAM-2", "title": "Add multi-language support", "tag": ["Feature request"],
             "userId": "usr-2", "status": "In progress", "priority": 3}
        ],
        "users": [
            {"id": "usr-1", "name": "Anoop sharma", "available": false},
            {"id": "usr-2", "name": "Yogesh", "available": true}
        ]
    }"#;

    #[test]
    fn test_from_json_sample_payload() {
        let data = SeedData::from_json(SAMPLE).unwrap();
        assert_eq!(data.tickets.len(), 2);
        assert_eq!(data.users.len(), 2);
        assert_eq!(data.tickets[0].priority, Priority::URGENT);
        assert_eq!(data.users[1].name, "Yogesh");
    }

    #[test]
    fn test_from_json_missing_collections() {
        let data = SeedData::from_json("{}").unwrap();
        assert!(data.tickets.is_empty());
        assert!(data.users.is_empty());
    }

    #[tokio::test]
    async fn test_json_file_seed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seed.json");
        tokio::fs::write(&path, SAMPLE).await.unwrap();

        let data = JsonFileSeed::new(&path).fetch().await.unwrap();
        assert_eq!(data.tickets.len(), 2);
    }

    #[tokio::test]
    async fn test_json_file_seed_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seed.json");
        tokio::fs::write(&path, "\n").await.unwrap();

        let data = JsonFileSeed::new(&path).fetch().await.unwrap();
        assert_eq!(data, SeedData::default());
    }

    #[tokio::test]
    async fn test_json_file_seed_missing_file() {
        let dir = TempDir::new().unwrap();
        let source = JsonFileSeed::new(dir.path().join("absent.json"));

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, Error::SeedData(_)));
    }

    #[tokio::test]
    async fn test_load_seed_swallows_failures() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seed.json");
        // Second ticket has an out-of-range priority, so the whole payload is rejected
        tokio::fs::write(
            &path,
            r#"{"tickets":[{"id":"a","title":"ok","status":"Todo","priority":1},
                           {"id":"b","title":"bad","status":"Todo","priority":12}],
                "users":[{"id":"u","name":"U"}]}"#,
        )
        .await
        .unwrap();

        let data = load_seed(&JsonFileSeed::new(&path)).await;
        assert!(data.tickets.is_empty());
        assert!(data.users.is_empty());
    }

    #[tokio::test]
    async fn test_static_and_empty_sources() {
        let payload = SeedData::from_json(SAMPLE).unwrap();
        assert_eq!(load_seed(&StaticSeed(payload.clone())).await, payload);
        assert_eq!(load_seed(&EmptySeed).await, SeedData::default());
    }
}
