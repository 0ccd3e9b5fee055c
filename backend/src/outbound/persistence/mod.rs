//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin translators between row structs (`models.rs`) and
//! domain types; they hold no business rules. All of them share one
//! [`DbPool`] of `diesel-async` connections managed by bb8.
//!
//! ```ignore
//! use civicdesk::outbound::persistence::{DbPool, DieselCounterStore, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/civicdesk")).await?;
//! let counters = DieselCounterStore::new(pool.clone());
//! ```

mod diesel_complaint_repository;
mod diesel_contact_repository;
mod diesel_counter_store;
mod diesel_feedback_repository;
pub(crate) mod diesel_helpers;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_complaint_repository::DieselComplaintRepository;
pub use diesel_contact_repository::DieselContactRepository;
pub use diesel_counter_store::DieselCounterStore;
pub use diesel_feedback_repository::DieselFeedbackRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations, run_migrations_blocking};
pub use pool::{DbPool, PoolConfig, PoolError, PooledPgConnection};
