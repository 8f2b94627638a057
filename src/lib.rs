//! Chatroom - Main Library
//!
//! A single shared chat room whose messages live in a graph database:
//! every message is a node, and a reply is an edge from the reply to the
//! message it answers.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared by the store and the server
//!   - Message and timeline structures
//!   - Configuration loading
//!   - Validation error types
//!
//! - **`store`** - The message store
//!   - Session lifecycle (connect, reconnect, shutdown)
//!   - Message creation with optional reply edge
//!   - Timeline read, newest first, with reply parent preview
//!   - PostgreSQL and SQLite graph backends
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Chat room service
//!   - Axum JSON API
//!
//! # Feature Flags
//!
//! - **`ssr`** - Enables the `backend` module and the server binaries
//!
//! # Usage
//!
//! ```rust,no_run
//! use chatroom::backend::server::init::create_app;
//! use chatroom::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let (app, store) = create_app(&config).await?;
//! // Use app with axum::serve, then store.shutdown().await
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The store keeps its session behind a `tokio::sync::RwLock`. Operations
//! clone the session handle out of the lock before doing I/O, so a
//! reconnect never waits on an in-flight query.
//!
//! # Error Handling
//!
//! - `shared::SharedError` for input validation
//! - `store::StoreError` for store operations
//! - `backend::BackendError` for HTTP responses

/// Shared types and data structures
pub mod shared;

/// Graph-backed message store
pub mod store;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
