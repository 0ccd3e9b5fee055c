//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`CounterStore`]) are implemented by outbound
//! adapters. Driving ports (`*Management`, [`DashboardQuery`]) are what the
//! inbound HTTP adapter calls.

mod macros;
pub(crate) use macros::define_port_error;

mod complaint_management;
mod complaint_repository;
mod contact_management;
mod contact_repository;
mod counter_store;
mod dashboard_query;
mod feedback_management;
mod feedback_repository;
mod user_management;
mod user_repository;

#[cfg(test)]
pub use complaint_management::MockComplaintManagement;
pub use complaint_management::ComplaintManagement;
#[cfg(test)]
pub use complaint_repository::MockComplaintRepository;
pub use complaint_repository::{ComplaintRepository, ComplaintRepositoryError};
#[cfg(test)]
pub use contact_management::MockContactManagement;
pub use contact_management::ContactManagement;
#[cfg(test)]
pub use contact_repository::MockContactRepository;
pub use contact_repository::{ContactRepository, ContactRepositoryError};
#[cfg(test)]
pub use counter_store::MockCounterStore;
pub use counter_store::{CounterStore, CounterStoreError};
#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
pub use dashboard_query::DashboardQuery;
#[cfg(test)]
pub use feedback_management::MockFeedbackManagement;
pub use feedback_management::FeedbackManagement;
#[cfg(test)]
pub use feedback_repository::MockFeedbackRepository;
pub use feedback_repository::{FeedbackRepository, FeedbackRepositoryError};
#[cfg(test)]
pub use user_management::MockUserManagement;
pub use user_management::UserManagement;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
