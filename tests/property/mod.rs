//! Property-based tests

mod message_proptest;
mod store_proptest;
