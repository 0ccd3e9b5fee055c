//! In-process adapters for every driven port.
//!
//! Used by tests and by database-less development runs. Each store keeps its
//! rows behind a single mutex, so every operation is one critical section.

mod complaint_repository;
mod contact_repository;
mod counter_store;
mod feedback_repository;
mod table;
mod user_repository;

pub use complaint_repository::InMemoryComplaintRepository;
pub use contact_repository::InMemoryContactRepository;
pub use counter_store::InMemoryCounterStore;
pub use feedback_repository::InMemoryFeedbackRepository;
pub use user_repository::InMemoryUserRepository;

fn lock_poisoned(store: &str) -> String {
    format!("{store} store lock poisoned")
}
