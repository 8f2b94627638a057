/**
 * Graph Backend Seam
 *
 * The message store depends on a capability, not on a particular database:
 * something that can open a session, answer a liveness probe, write a message
 * node (plus its reply edge) atomically and read the recent timeline back as
 * rows.
 *
 * Both shipped backends store the graph as two tables:
 *
 * - `message_nodes (seq, id, user_name, text, timestamp)`
 * - `reply_edges (from_id, to_id)` with `from_id` as primary key, so a message
 *   has at most one outgoing reply edge
 */

use async_trait::async_trait;
use std::sync::Arc;

use crate::shared::{MessageId, MessageRecord, NewMessage};
use crate::store::error::StoreError;

/// An open session against the graph database
#[async_trait]
pub trait GraphBackend: Send + Sync {
    /// Round-trip to the database and return its clock in epoch milliseconds
    async fn probe(&self) -> Result<i64, StoreError>;

    /// Write the node and, when `reply_to` is set, its reply edge in one
    /// transaction
    ///
    /// Must fail with `ReplyTargetMissing` and write nothing when the parent
    /// does not exist, and with `DuplicateId` when the id is taken.
    async fn create_message(&self, message: &NewMessage) -> Result<MessageId, StoreError>;

    /// Newest `limit` messages joined with their reply parent
    async fn list_messages(&self, limit: i64) -> Result<Vec<MessageRecord>, StoreError>;

    /// Release the session
    async fn close(&self);
}

/// Opens sessions against a configured database
#[async_trait]
pub trait Connector: Send + Sync {
    /// Establish a session and make sure the schema exists
    async fn connect(&self) -> Result<Arc<dyn GraphBackend>, StoreError>;

    /// Short human-readable target description for logs
    fn describe(&self) -> String;
}
