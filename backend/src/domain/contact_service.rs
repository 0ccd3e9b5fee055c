//! Contact message service implementing [`ContactManagement`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::contact::{Contact, ContactFilter, ContactPatch, NewContact};
use crate::domain::ports::{ContactManagement, ContactRepository};
use crate::domain::service_support::map_contact_repository_error;

/// Contact service backed by a repository.
pub struct ContactService<R: ?Sized> {
    contacts: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ContactService<R>
where
    R: ContactRepository + ?Sized,
{
    /// Build the service.
    pub fn new(contacts: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { contacts, clock }
    }

    async fn fetch(&self, id: &Uuid) -> Result<Contact, Error> {
        self.contacts
            .find_by_id(id)
            .await
            .map_err(map_contact_repository_error)?
            .ok_or_else(not_found)
    }
}

fn not_found() -> Error {
    Error::not_found("Contact message not found")
}

#[async_trait]
impl<R> ContactManagement for ContactService<R>
where
    R: ContactRepository + ?Sized,
{
    async fn list_contacts(&self, filter: &ContactFilter) -> Result<Vec<Contact>, Error> {
        self.contacts
            .list(filter)
            .await
            .map_err(map_contact_repository_error)
    }

    async fn get_contact(&self, id: &Uuid) -> Result<Contact, Error> {
        self.fetch(id).await
    }

    async fn create_contact(&self, contact: NewContact) -> Result<Contact, Error> {
        let contact = contact.into_contact(Uuid::new_v4(), self.clock.utc());
        self.contacts
            .insert(&contact)
            .await
            .map_err(map_contact_repository_error)?;
        info!(id = %contact.id, "contact message received");
        Ok(contact)
    }

    async fn update_contact(&self, id: &Uuid, patch: ContactPatch) -> Result<Contact, Error> {
        let mut contact = self.fetch(id).await?;
        contact.apply(patch, self.clock.utc());
        let found = self
            .contacts
            .update(&contact)
            .await
            .map_err(map_contact_repository_error)?;
        if !found {
            return Err(not_found());
        }
        Ok(contact)
    }

    async fn delete_contact(&self, id: &Uuid) -> Result<Contact, Error> {
        self.contacts
            .delete(id)
            .await
            .map_err(map_contact_repository_error)?
            .ok_or_else(not_found)
    }
}
