//! Shared Module
//!
//! Types shared by the message store, the chat room service and the HTTP
//! layer. Everything here is plain data: it serializes to JSON and never
//! touches the database.

/// Message data structures
pub mod message;

/// Timeline and request/response types
pub mod timeline;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use message::{MessageId, MessageRecord, NewMessage, ParentPreview};
pub use timeline::{PostMessageRequest, PostedMessage, RoomStatus, StatusResponse, Timeline};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError, TlsMode};
