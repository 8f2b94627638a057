//! Integration tests
//!
//! Store behaviour against a real SQLite database, connection handling against
//! the recording backend, the HTTP API and configuration loading.

mod config_test;
mod store_test;
