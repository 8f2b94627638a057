//! Server Module
//!
//! Server initialization and configuration.
//!
//! - **`state`** - `AppState` and its `FromRef` implementations
//! - **`config`** - Message store construction from `AppConfig`
//! - **`init`** - Application assembly
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `AppConfig::load` (fatal on error)
//! 2. **Store Creation**: connector chosen by URL scheme, initial connect
//! 3. **State Creation**: chat room service wrapped in `AppState`
//! 4. **Router Creation**: routes plus request tracing
//!
//! # Example
//!
//! ```rust,no_run
//! use chatroom::backend::server::create_app;
//! use chatroom::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let (app, store) = create_app(&config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use state::AppState;
pub use init::{create_app, create_app_with_store};
