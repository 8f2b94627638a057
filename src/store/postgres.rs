/**
 * PostgreSQL Graph Backend
 *
 * Production backend. Credentials and the TLS mode come from configuration
 * and are applied on top of the URL, so the URL itself never needs to carry
 * a password.
 */

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::shared::config::DatabaseConfig;
use crate::shared::{ConfigError, MessageId, MessageRecord, NewMessage, TlsMode};
use crate::store::error::StoreError;
use crate::store::graph::{Connector, GraphBackend};

const CLOCK_MS: &str = "(EXTRACT(EPOCH FROM clock_timestamp()) * 1000)::BIGINT";

fn ssl_mode(tls: TlsMode) -> PgSslMode {
    match tls {
        TlsMode::Disable => PgSslMode::Disable,
        TlsMode::Prefer => PgSslMode::Prefer,
        TlsMode::Require => PgSslMode::Require,
        TlsMode::VerifyFull => PgSslMode::VerifyFull,
    }
}

/// Opens PostgreSQL sessions
#[derive(Debug, Clone)]
pub struct PgConnector {
    options: PgConnectOptions,
    connect_timeout: Duration,
}

impl PgConnector {
    pub fn new(config: &DatabaseConfig) -> Result<Self, ConfigError> {
        let mut options = PgConnectOptions::from_str(&config.url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", config.url, e)))?
            .ssl_mode(ssl_mode(config.tls));
        if let Some(user) = &config.user {
            options = options.username(user);
        }
        if let Some(password) = &config.password {
            options = options.password(password);
        }
        Ok(Self {
            options,
            connect_timeout: config.connect_timeout,
        })
    }
}

#[async_trait]
impl Connector for PgConnector {
    async fn connect(&self) -> Result<Arc<dyn GraphBackend>, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(self.connect_timeout)
            .connect_with(self.options.clone())
            .await
            .map_err(StoreError::ConnectFailed)?;

        let graph = PgGraph { pool };
        graph.bootstrap().await?;
        Ok(Arc::new(graph))
    }

    fn describe(&self) -> String {
        format!(
            "postgres://{}:{}/{}",
            self.options.get_host(),
            self.options.get_port(),
            self.options.get_database().unwrap_or_default()
        )
    }
}

/// A live PostgreSQL session
pub struct PgGraph {
    pool: PgPool,
}

impl PgGraph {
    async fn bootstrap(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS message_nodes (
                seq BIGSERIAL PRIMARY KEY,
                id TEXT NOT NULL UNIQUE,
                user_name TEXT NOT NULL,
                text TEXT NOT NULL,
                timestamp BIGINT NOT NULL
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
                from_id TEXT PRIMARY KEY REFERENCES message_nodes (id),
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
impl GraphBackend for PgGraph {
    async fn probe(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>(&format!("SELECT {}", CLOCK_MS))
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::QueryFailed)
    }

    async fn create_message(&self, message: &NewMessage) -> Result<MessageId, StoreError> {
        let mut tx = self.pool.begin().await.map_err(StoreError::QueryFailed)?;

        if let Some(parent) = &message.reply_to {
            // Lock the parent row so it cannot vanish between check and edge insert
            let found = sqlx::query_scalar::<_, String>(
                "SELECT id FROM message_nodes WHERE id = $1 FOR KEY SHARE",
            )
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
            "INSERT INTO message_nodes (id, user_name, text, timestamp) VALUES ($1, $2, $3, {})",
            CLOCK_MS
        ))
        .bind(message.id.as_str())
        .bind(&message.user)
        .bind(&message.text)
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::from_write(e, message.id.as_str()))?;

        if let Some(parent) = &message.reply_to {
            sqlx::query("INSERT INTO reply_edges (from_id, to_id) VALUES ($1, $2)")
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
            LIMIT $1
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
