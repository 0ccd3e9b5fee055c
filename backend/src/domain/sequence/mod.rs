//! Sequential human-facing identifiers (`USR001`, `ADM001`, `CMP0001`).
//!
//! Numbers come from the [`CounterStore`](crate::domain::ports::CounterStore)
//! port, one counter per [`SequenceKind`]. The allocator formats them, the
//! save hook applies them to new entities, and reconciliation lifts counters
//! above identifiers that already exist in storage.

mod allocator;
mod hook;
mod id;
mod reconcile;

pub use allocator::SequentialIdAllocator;
pub use hook::{HookOutcome, SequentiallyIdentified, assign_sequential_id};
pub use id::{
    CounterKey, CounterKeyValidationError, MAX_SEQUENCE_VALUE, SequenceFormat, SequenceKind,
    SequentialId, SequentialIdValidationError,
};
pub use reconcile::{ReconcileReport, reconcile_counters};

use crate::domain::Error;
use crate::domain::ports::{CounterStoreError, define_port_error};

define_port_error! {
    /// Failures surfaced while allocating or reconciling identifiers.
    pub enum SequenceError {
        /// The counter store is unreachable or rejected the write.
        StoreUnavailable { message: String } => "sequence store unavailable: {message}",
        /// A caller-supplied identifier collided with an existing one.
        DuplicateId { id: String } => "identifier already in use: {id}",
        /// A stored identifier does not parse as `<prefix><integer>`.
        MalformedSequenceValue { value: String } => "malformed sequence value: {value}",
    }
}

impl From<CounterStoreError> for SequenceError {
    fn from(value: CounterStoreError) -> Self {
        Self::store_unavailable(value.to_string())
    }
}

impl From<SequenceError> for Error {
    fn from(value: SequenceError) -> Self {
        match value {
            SequenceError::StoreUnavailable { .. } => {
                Self::service_unavailable("identifier allocation is temporarily unavailable")
            }
            SequenceError::DuplicateId { ref id } => {
                Self::conflict(value.to_string()).with_details(serde_json::json!({ "id": id }))
            }
            SequenceError::MalformedSequenceValue { .. } => Self::internal(value.to_string()),
        }
    }
}

#[cfg(test)]
mod tests;
