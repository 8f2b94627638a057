//! Backend Module
//!
//! Server-side code: the chat room service, its JSON API and the server
//! bootstrap. Compiled only with the `ssr` feature.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`chat`** - Chat room service and handlers
//! - **`error`** - Backend-specific error types
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── chat/           - Chat room service and handlers
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! Every request goes through the same `ChatRoom`, which owns an
//! `Arc<MessageStore>`. Writes are followed by a full timeline read, so a
//! client never has to merge partial updates.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Chat-related backend functionality
pub mod chat;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use server::{create_app, create_app_with_store};
pub use chat::ChatRoom;
pub use error::BackendError;
