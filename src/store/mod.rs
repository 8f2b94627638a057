//! Message Store
//!
//! The store owns the session with the graph database and exposes the two
//! chat operations plus a connectivity probe:
//!
//! - `create_message` writes a message node and, optionally, its reply edge
//! - `list_messages` reads the newest messages joined with their reply parent
//! - `connect` / `reconnect` / `is_connected` manage the session
//!
//! # Lifecycle
//!
//! A store is constructed disconnected from a [`Connector`], connected
//! explicitly, shared by reference (usually through an `Arc`) and shut down
//! when the process exits. There is no global instance.
//!
//! # Disconnected state
//!
//! When the handle is empty every operation fails fast with
//! [`StoreError::Unavailable`] and no backend call is made. Only a successful
//! `connect`/`reconnect` fills the handle again.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatroom::store::{MessageStore, SqliteConnector};
//!
//! # async fn example() -> Result<(), chatroom::store::StoreError> {
//! let store = MessageStore::new(SqliteConnector::from_path("chat.db"));
//! store.connect().await?;
//! let id = store.create_message("msg_1", "alice", "hello", None).await?;
//! let timeline = store.list_messages().await?;
//! assert_eq!(timeline[0].id, id);
//! # Ok(())
//! # }
//! ```

/// Store error type
pub mod error;

/// Backend traits
pub mod graph;

/// PostgreSQL backend
pub mod postgres;

/// SQLite backend
pub mod sqlite;

pub use error::StoreError;
pub use graph::{Connector, GraphBackend};
pub use postgres::PgConnector;
pub use sqlite::SqliteConnector;

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::shared::config::{DatabaseConfig, DatabaseKind};
use crate::shared::{ConfigError, MessageId, MessageRecord, NewMessage};

/// Number of messages in the timeline read
pub const TIMELINE_LIMIT: i64 = 50;

/// Build the connector a database configuration points at
pub fn connector_for(config: &DatabaseConfig) -> Result<Box<dyn Connector>, ConfigError> {
    let connector: Box<dyn Connector> = match config.kind {
        DatabaseKind::Postgres => Box::new(PgConnector::new(config)?),
        DatabaseKind::Sqlite => Box::new(SqliteConnector::new(&config.url, config.connect_timeout)?),
    };
    Ok(connector)
}

/// Owner of the graph database session
pub struct MessageStore {
    connector: Box<dyn Connector>,
    graph: RwLock<Option<Arc<dyn GraphBackend>>>,
}

impl MessageStore {
    /// Create a disconnected store
    pub fn new(connector: impl Connector + 'static) -> Self {
        Self::from_boxed(Box::new(connector))
    }

    pub fn from_boxed(connector: Box<dyn Connector>) -> Self {
        Self {
            connector,
            graph: RwLock::new(None),
        }
    }

    /// Establish a fresh session and replace the current handle
    ///
    /// The new session is verified with a liveness probe before it is
    /// installed. On any failure the handle is cleared and the store stays
    /// disconnected.
    ///
    /// # Errors
    /// `StoreError::ConnectFailed`
    pub async fn connect(&self) -> Result<(), StoreError> {
        let (next, result) = match self.establish().await {
            Ok(graph) => (Some(graph), Ok(())),
            Err(err) => (None, Err(err)),
        };

        let previous = std::mem::replace(&mut *self.graph.write().await, next);
        if let Some(previous) = previous {
            previous.close().await;
        }
        result
    }

    /// Open and verify a session without installing it
    async fn establish(&self) -> Result<Arc<dyn GraphBackend>, StoreError> {
        tracing::info!(database = %self.connector.describe(), "Connecting to message store");

        let graph = self.connector.connect().await.map_err(|err| {
            tracing::error!(error = %err, "Message store connection failed");
            err
        })?;

        match graph.probe().await {
            Ok(clock) => {
                tracing::info!(clock, "Message store connection verified");
                Ok(graph)
            }
            Err(err) => {
                graph.close().await;
                let err = match err {
                    StoreError::QueryFailed(source) => StoreError::ConnectFailed(source),
                    other => other,
                };
                tracing::error!(error = %err, "Message store connection failed");
                Err(err)
            }
        }
    }

    /// Replace `failed` after an operation on it broke
    ///
    /// Nothing happens when `failed` is no longer the installed handle: the
    /// store was shut down, or another caller already replaced the session.
    async fn reconnect_if_current(&self, failed: &Arc<dyn GraphBackend>) {
        if !self.is_current(failed).await {
            tracing::debug!("Failed session already replaced, skipping reconnect");
            return;
        }

        let established = self.establish().await;

        let mut slot = self.graph.write().await;
        if !slot.as_ref().is_some_and(|current| Arc::ptr_eq(current, failed)) {
            drop(slot);
            if let Ok(graph) = established {
                graph.close().await;
            }
            tracing::debug!("Session changed during reconnect, discarding new session");
            return;
        }

        let next = match established {
            Ok(graph) => Some(graph),
            Err(err) => {
                tracing::warn!(error = %err, "Reconnect attempt failed, store is disconnected");
                None
            }
        };
        let previous = std::mem::replace(&mut *slot, next);
        drop(slot);
        if let Some(previous) = previous {
            previous.close().await;
        }
    }

    async fn is_current(&self, graph: &Arc<dyn GraphBackend>) -> bool {
        self.graph
            .read()
            .await
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, graph))
    }

    /// Best-effort reconnect; the outcome is visible through `is_connected`
    /// and later operations
    pub async fn reconnect(&self) {
        if let Err(err) = self.connect().await {
            tracing::warn!(error = %err, "Reconnect attempt failed, store is disconnected");
        }
    }

    pub async fn is_connected(&self) -> bool {
        self.graph.read().await.is_some()
    }

    /// Close and clear the handle
    pub async fn shutdown(&self) {
        if let Some(graph) = self.graph.write().await.take() {
            graph.close().await;
            tracing::info!("Message store connection closed");
        }
    }

    async fn handle(&self) -> Result<Arc<dyn GraphBackend>, StoreError> {
        self.graph
            .read()
            .await
            .as_ref()
            .cloned()
            .ok_or(StoreError::Unavailable)
    }

    /// Database clock in epoch milliseconds, read through the live session
    pub async fn probe(&self) -> Result<i64, StoreError> {
        let graph = self.handle().await?;
        graph.probe().await
    }

    /// Create a message, optionally as a reply to an existing message
    ///
    /// Validation happens before the connectivity check, so bad input is
    /// reported the same way whether or not the store is connected. Writes
    /// are never retried; a transport fault replaces the session and is
    /// reported as `QueryFailed`.
    ///
    /// # Errors
    /// - `ValidationFailed` for an empty id or a blank user or text
    /// - `Unavailable` when disconnected
    /// - `ReplyTargetMissing` when `reply_to` does not resolve (nothing is written)
    /// - `DuplicateId` when the id already exists
    /// - `QueryFailed` for any other database failure
    pub async fn create_message(
        &self,
        id: impl Into<MessageId>,
        user: &str,
        text: &str,
        reply_to: Option<&str>,
    ) -> Result<MessageId, StoreError> {
        let message = NewMessage::new(id, user, text, reply_to);
        message.validate()?;

        let graph = self.handle().await?;
        match graph.create_message(&message).await {
            Ok(id) => {
                tracing::debug!(id = %id, reply = message.reply_to.is_some(), "Message created");
                Ok(id)
            }
            Err(err) => {
                tracing::error!(id = %message.id, error = %err, "Failed to create message");
                if err.is_transport() {
                    self.reconnect_if_current(&graph).await;
                }
                Err(err)
            }
        }
    }

    /// The newest messages, newest first, each joined with its reply parent
    ///
    /// # Errors
    /// - `Unavailable` when disconnected
    /// - `QueryFailed` when the read fails; one reconnect is attempted first
    pub async fn list_messages(&self) -> Result<Vec<MessageRecord>, StoreError> {
        let graph = self.handle().await?;
        match graph.list_messages(TIMELINE_LIMIT).await {
            Ok(records) => Ok(records),
            Err(err) => {
                tracing::error!(error = %err, "Failed to list messages, reconnecting");
                self.reconnect_if_current(&graph).await;
                Err(err)
            }
        }
    }
}
