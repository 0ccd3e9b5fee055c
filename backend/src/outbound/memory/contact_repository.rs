//! In-memory contact message repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::contact::{Contact, ContactFilter};
use crate::domain::ports::{ContactRepository, ContactRepositoryError};

use super::table::{Row, Table};

impl Row for Contact {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Process-local store for contact messages.
#[derive(Debug)]
pub struct InMemoryContactRepository {
    table: Table<Contact>,
}

impl Default for InMemoryContactRepository {
    fn default() -> Self {
        Self {
            table: Table::new("contact"),
        }
    }
}

impl InMemoryContactRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn insert(&self, contact: &Contact) -> Result<(), ContactRepositoryError> {
        self.table
            .with_rows(|rows| rows.push(contact.clone()))
            .map_err(ContactRepositoryError::connection)
    }

    async fn update(&self, contact: &Contact) -> Result<bool, ContactRepositoryError> {
        self.table
            .replace(contact)
            .map_err(ContactRepositoryError::connection)
    }

    async fn delete(&self, id: &Uuid) -> Result<Option<Contact>, ContactRepositoryError> {
        self.table
            .remove(id)
            .map_err(ContactRepositoryError::connection)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Contact>, ContactRepositoryError> {
        self.table
            .find(id)
            .map_err(ContactRepositoryError::connection)
    }

    async fn list(&self, filter: &ContactFilter) -> Result<Vec<Contact>, ContactRepositoryError> {
        self.table
            .select(|contact| filter.matches(contact))
            .map_err(ContactRepositoryError::connection)
    }
}
