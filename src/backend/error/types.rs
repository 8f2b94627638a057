/**
 * Backend Error Types
 *
 * Errors returned by HTTP handlers. Store failures are wrapped unchanged and
 * mapped to a status code here, so handlers can use `?` on store calls.
 *
 * # Status Code Mapping
 *
 * - `Unavailable`, `ConnectFailed` - 503 Service Unavailable
 * - `ValidationFailed` - 400 Bad Request
 * - `ReplyTargetMissing` - 422 Unprocessable Entity
 * - `DuplicateId` - 409 Conflict
 * - `QueryFailed` - 502 Bad Gateway
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g. malformed request body)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Failure reported by the message store
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Store(err) => match err {
                StoreError::Unavailable | StoreError::ConnectFailed(_) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                StoreError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
                StoreError::ReplyTargetMissing(_) => StatusCode::UNPROCESSABLE_ENTITY,
                StoreError::DuplicateId(_) => StatusCode::CONFLICT,
                StoreError::QueryFailed(_) => StatusCode::BAD_GATEWAY,
            },
        }
    }

    /// Message sent to the client
    ///
    /// Database failures are not echoed verbatim; their details stay in the
    /// server log.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Store(StoreError::ConnectFailed(_)) => "Message store connection failed".to_string(),
            Self::Store(StoreError::QueryFailed(_)) => "Message store query failed".to_string(),
            Self::Store(err) => err.to_string(),
        }
    }
}
