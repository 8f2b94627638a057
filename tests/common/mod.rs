//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - SQLite store fixtures in a temporary directory
//! - A recording graph backend that counts every call
//! - Custom assertion macros

pub mod database;

// Re-export commonly used utilities
pub use database::*;
pub use recording::*;
