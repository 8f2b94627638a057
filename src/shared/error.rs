//! Shared Error Types
//!
//! Errors that describe bad caller input. They are raised before any store
//! I/O happens and carry the name of the offending field so the HTTP layer
//! can report it back.
//!
//! # Usage
//!
//! ```rust
//! use chatroom::shared::error::SharedError;
//!
//! let error = SharedError::validation("text", "Message text cannot be empty");
//! assert_eq!(error.field(), "text");
//! ```
use thiserror::Error;

/// Input errors shared by the store and the chat room service
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the field that failed validation
    pub fn field(&self) -> &str {
        match self {
            Self::ValidationError { field, .. } => field,
        }
    }
}
