/**
 * SQLite Graph Backend
 *
 * Embedded backend used for local development and the test suite. The pool
 * holds a single connection: the store models one logical session per
 * process, and a single connection keeps an in-memory database alive for the
 * lifetime of the handle.
 */

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::shared::{ConfigError, MessageId, MessageRecord, NewMessage};
use crate::store::error::StoreError;
use crate::store::graph::{Connector, GraphBackend};

/// Current time in epoch milliseconds, read from the database clock
const CLOCK_MS: &str = "CAST((julianday('now') - 2440587.5) * 86400000.0 AS INTEGER)";

/// Opens SQLite sessions
#[derive(Debug, Clone)]
pub struct SqliteConnector {
    options: SqliteConnectOptions,
    connect_timeout: Duration,
}

impl SqliteConnector {
    /// Build a connector from a `sqlite:` URL
    pub fn new(url: &str, connect_timeout: Duration) -> Result<Self, ConfigError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", url, e)))?
            .create_if_missing(true)
            .foreign_keys(true);
        Ok(Self {
            options,
            connect_timeout,
        })
    }

    /// Connector for a database file, created on first connect
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            options: SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .foreign_keys(true),
            connect_timeout: Duration::from_secs(crate::shared::config::DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

#[async_trait]
impl Connector for SqliteConnector {
    async fn connect(&self) -> Result<Arc<dyn GraphBackend>, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .acquire_timeout(self.connect_timeout)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(self.options.clone())
            .await
            .map_err(StoreError::ConnectFailed)?;

        let graph = SqliteGraph { pool };
        graph.bootstrap().await?;
        Ok(Arc::new(graph))
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.options.get_filename().display())
    }
}

/// A live SQLite session
pub struct SqliteGraph {
    pool: SqlitePool,
}

impl SqliteGraph {
    async fn bootstrap(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS message_nodes (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                user_name TEXT NOT NULL,
                text TEXT NOT NULL,
                timestamp INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(StoreError::ConnectFailed)?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_message_nodes_timeline ON message_nodes (timestamp DESC, seq DESC)",
        )
        .execute(&self.pool)
        .await
        .map_err(StoreError::ConnectFailed)?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS reply_edges (
                from_id TEXT PRIMARY KEY NOT NULL REFERENCES message_nodes (id),
                to_id TEXT NOT NULL REFERENCES message_nodes (id)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(StoreError::ConnectFailed)?;

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct TimelineRow {
    id: String,
    user_name: String,
    text: String,
    parent_user: Option<String>,
    parent_text: Option<String>,
}

#[async_trait]
impl GraphBackend for SqliteGraph {
    async fn probe(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>(&format!("SELECT {}", CLOCK_MS))
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::QueryFailed)
    }

    async fn create_message(&self, message: &NewMessage) -> Result<MessageId, StoreError> {
        let mut tx = self.pool.begin().await.map_err(StoreError::QueryFailed)?;

        if let Some(parent) = &message.reply_to {
            let found = sqlx::query_scalar::<_, String>("SELECT id FROM message_nodes WHERE id = ?")
                .bind(parent.as_str())
                .fetch_optional(&mut *tx)
                .await
                .map_err(StoreError::QueryFailed)?;
            if found.is_none() {
                tx.rollback().await.map_err(StoreError::QueryFailed)?;
                return Err(StoreError::ReplyTargetMissing(parent.to_string()));
            }
        }

        sqlx::query(&format!(
            "INSERT INTO message_nodes (id, user_name, text, timestamp) VALUES (?, ?, ?, {})",
            CLOCK_MS
        ))
        .bind(message.id.as_str())
        .bind(&message.user)
        .bind(&message.text)
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::from_write(e, message.id.as_str()))?;

        if let Some(parent) = &message.reply_to {
            sqlx::query("INSERT INTO reply_edges (from_id, to_id) VALUES (?, ?)")
                .bind(message.id.as_str())
                .bind(parent.as_str())
                .execute(&mut *tx)
                .await
                .map_err(StoreError::QueryFailed)?;
        }

        tx.commit().await.map_err(StoreError::QueryFailed)?;
        Ok(message.id.clone())
    }

    async fn list_messages(&self, limit: i64) -> Result<Vec<MessageRecord>, StoreError> {
        let rows = sqlx::query_as::<_, TimelineRow>(
            r#"
            SELECT m.id, m.user_name, m.text,
                   p.user_name AS parent_user,
                   p.text AS parent_text
            FROM message_nodes m
            LEFT JOIN reply_edges e ON e.from_id = m.id
            LEFT JOIN message_nodes p ON p.id = e.to_id
            ORDER BY m.timestamp DESC, m.seq DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::QueryFailed)?;

        Ok(rows
            .into_iter()
            .map(|row| {
                MessageRecord::from_row(row.id, row.user_name, row.text, row.parent_user, row.parent_text)
            })
            .collect())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
