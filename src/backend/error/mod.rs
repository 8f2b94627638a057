//! Backend Error Module
//!
//! Error types returned by the HTTP handlers.
//!
//! - **`types`** - `BackendError` and its status code mapping
//! - **`conversion`** - `IntoResponse` and request-body rejection handling
//!
//! # Example
//!
//! ```rust,no_run
//! use chatroom::backend::error::BackendError;
//! use chatroom::store::StoreError;
//! use axum::http::StatusCode;
//!
//! let err: BackendError = StoreError::Unavailable.into();
//! assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
