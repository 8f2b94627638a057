/**
 * Message Store Errors
 *
 * Every failure the store can report to its caller. All of them are
 * recoverable: the caller decides whether to retry, reconnect or give up.
 */

use thiserror::Error;

use crate::shared::SharedError;

#[derive(Debug, Error)]
pub enum StoreError {
    /// No live handle. Raised before any I/O is attempted.
    #[error("message store is not connected")]
    Unavailable,

    /// Establishing or probing a session failed
    #[error("failed to connect to message store: {0}")]
    ConnectFailed(#[source] sqlx::Error),

    /// Caller input rejected before any I/O
    #[error(transparent)]
    ValidationFailed(#[from] SharedError),

    /// The message being replied to does not exist
    #[error("reply target '{0}' does not exist")]
    ReplyTargetMissing(String),

    /// A message with this id already exists
    #[error("message id '{0}' already exists")]
    DuplicateId(String),

    /// A read or write failed after the connectivity check passed
    #[error("query failed: {0}")]
    QueryFailed(#[source] sqlx::Error),
}

impl StoreError {
    /// Whether the failure points at a broken session rather than bad data
    ///
    /// Transport faults leave the handle in an unknown state, so the store
    /// replaces it. Constraint and decode failures do not.
    pub fn is_transport(&self) -> bool {
        match self {
            Self::QueryFailed(err) => matches!(
                err,
                sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
                    | sqlx::Error::Protocol(_)
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::WorkerCrashed
            ),
            _ => false,
        }
    }

    /// Map a write error, turning unique violations on the node id into
    /// `DuplicateId`
    pub(crate) fn from_write(err: sqlx::Error, id: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::DuplicateId(id.to_string())
            }
            _ => Self::QueryFailed(err),
        }
    }
}
