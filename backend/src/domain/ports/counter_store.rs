//! Port for the persistent counters behind sequential identifiers.
//!
//! A counter is a `{key -> last_value}` row. Values never decrease and rows are
//! never deleted. `increment_and_get` must be a single storage-level atomic
//! step: two callers racing on one key always observe distinct values.

use async_trait::async_trait;

use crate::domain::sequence::CounterKey;

use super::define_port_error;

define_port_error! {
    /// Errors raised by counter store adapters.
    pub enum CounterStoreError {
        /// The store could not be reached.
        Connection { message: String } => "counter store connection failed: {message}",
        /// The store was reached but the statement failed.
        Query { message: String } => "counter store query failed: {message}",
    }
}

/// Durable named counters backing sequential identifiers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically bump the counter (absent counts as zero) and return the new
    /// value. Nothing is written when the call fails.
    async fn increment_and_get(&self, key: &CounterKey) -> Result<u64, CounterStoreError>;

    /// Raise the counter to at least `floor` and return the resulting value.
    async fn advance_to(&self, key: &CounterKey, floor: u64) -> Result<u64, CounterStoreError>;

    /// Read the counter without changing it.
    async fn current(&self, key: &CounterKey) -> Result<Option<u64>, CounterStoreError>;
}
