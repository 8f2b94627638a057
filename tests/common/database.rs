//! Database test fixtures and utilities
//!
//! Every fixture gets its own SQLite file inside a temporary directory, so a
//! reconnect reopens the same data and tests never share state.

use std::sync::Arc;

use chatroom::store::{MessageStore, SqliteConnector};
use tempfile::TempDir;

/// Test database fixture
///
/// Keeps the temporary directory alive for as long as the store is used.
pub struct TestDatabase {
    dir: TempDir,
    store: Arc<MessageStore>,
}

impl TestDatabase {
    /// Create a disconnected store over a fresh database file
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = Arc::new(MessageStore::new(SqliteConnector::from_path(
            dir.path().join("chat.db"),
        )));
        Self { dir, store }
    }

    /// Create a store and connect it
    pub async fn connected() -> Self {
        let db = Self::new();
        db.store.connect().await.expect("Failed to connect test store");
        db
    }

    pub fn store(&self) -> &Arc<MessageStore> {
        &self.store
    }

    /// A second, independent store over the same database file
    pub fn reopen(&self) -> MessageStore {
        MessageStore::new(SqliteConnector::from_path(self.dir.path().join("chat.db")))
    }
}
