//! Chat Backend Module
//!
//! Server-side chat functionality:
//!
//! - **`room`** - Chat room service over the message store
//! - **`handlers`** - Axum handlers for the JSON API
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chatroom::backend::chat::ChatRoom;
//! use chatroom::shared::PostMessageRequest;
//! use chatroom::store::{MessageStore, SqliteConnector};
//!
//! # async fn example() {
//! let store = Arc::new(MessageStore::new(SqliteConnector::from_path("chat.db")));
//! store.reconnect().await;
//! let room = ChatRoom::new(store);
//! let posted = room
//!     .post(PostMessageRequest {
//!         user: "alice".into(),
//!         text: "Hello!".into(),
//!         reply_to: None,
//!     })
//!     .await;
//! # }
//! ```

/// Chat room service
pub mod room;

/// HTTP handlers
pub mod handlers;

/// Re-export commonly used types
pub use room::ChatRoom;
