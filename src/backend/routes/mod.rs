//! Route Configuration Module
//!
//! - **`router`** - Main router creation and route assembly
//! - **`api_routes`** - Chat API endpoints
//!
//! # Routes
//!
//! - `GET /healthz` - Liveness check
//! - `GET /api/messages` - Timeline
//! - `POST /api/messages` - Post a message
//! - `POST /api/reconnect` - Reconnect the message store
//! - `GET /api/status` - Connection status

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
