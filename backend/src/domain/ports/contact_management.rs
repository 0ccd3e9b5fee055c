//! Driving port for contact form messages.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::contact::{Contact, ContactFilter, ContactPatch, NewContact};

/// Contact-form use-cases exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactManagement: Send + Sync {
    /// Messages matching `filter`, newest first.
    async fn list_contacts(&self, filter: &ContactFilter) -> Result<Vec<Contact>, Error>;

    /// Message by record id; `NotFound` when absent.
    async fn get_contact(&self, id: &Uuid) -> Result<Contact, Error>;

    /// Store a new open message.
    async fn create_contact(&self, contact: NewContact) -> Result<Contact, Error>;

    /// Apply `patch`, stamping `replied_at` on reply.
    async fn update_contact(&self, id: &Uuid, patch: ContactPatch) -> Result<Contact, Error>;

    /// Hard delete, returning the removed message.
    async fn delete_contact(&self, id: &Uuid) -> Result<Contact, Error>;
}
