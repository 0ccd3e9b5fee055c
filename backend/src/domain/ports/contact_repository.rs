//! Port for contact message persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::contact::{Contact, ContactFilter};

use super::define_port_error;

define_port_error! {
    /// Errors raised by contact repositories.
    pub enum ContactRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "contact repository connection failed: {message}",
        /// The store was reached but the statement failed.
        Query { message: String } => "contact repository query failed: {message}",
    }
}

/// Persistence port for contact messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Insert a message.
    async fn insert(&self, contact: &Contact) -> Result<(), ContactRepositoryError>;

    /// Returns `false` when no message has this record id.
    async fn update(&self, contact: &Contact) -> Result<bool, ContactRepositoryError>;

    /// Remove and return the message, if it existed.
    async fn delete(&self, id: &Uuid) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Message by record id.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Contact messages matching `filter`, newest first.
    async fn list(&self, filter: &ContactFilter) -> Result<Vec<Contact>, ContactRepositoryError>;
}
