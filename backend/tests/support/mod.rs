//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! each suite pulls this module in with `mod support;`.

pub mod embedded_postgres;

pub use embedded_postgres::{handle_cluster_setup_failure, migrated_database};
