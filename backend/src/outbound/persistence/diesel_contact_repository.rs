//! PostgreSQL-backed [`ContactRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::contact::{Contact, ContactFilter, ContactStatus};
use crate::domain::ports::{ContactRepository, ContactRepositoryError};
use crate::domain::validation::EmailAddress;

use super::diesel_helpers::{
    DieselFailure, classify_diesel_error, like_pattern, pool_error_message,
};
use super::models::ContactRow;
use super::pool::{DbPool, PooledPgConnection};
use super::schema::contacts;

/// PostgreSQL store for contact messages.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    /// Repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn connection(&self) -> Result<PooledPgConnection<'_>, ContactRepositoryError> {
        self.pool
            .get()
            .await
            .map_err(|err| ContactRepositoryError::connection(pool_error_message(err)))
    }
}

fn map_diesel_error(error: diesel::result::Error) -> ContactRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => ContactRepositoryError::connection(message),
        DieselFailure::Query(message) => ContactRepositoryError::query(message),
        DieselFailure::UniqueViolation { .. } => {
            ContactRepositoryError::query("unexpected unique violation")
        }
    }
}

fn row_to_contact(row: ContactRow) -> Result<Contact, ContactRepositoryError> {
    let email = EmailAddress::parse("email", &row.email).map_err(|err| {
        ContactRepositoryError::query(format!("invalid email in database: {err}"))
    })?;
    let status = ContactStatus::parse_label(&row.status).map_err(|err| {
        ContactRepositoryError::query(format!("invalid status in database: {err}"))
    })?;
    Ok(Contact {
        id: row.id,
        name: row.name,
        email,
        phone: row.phone,
        subject: row.subject,
        message: row.message,
        status,
        reply_message: row.reply_message,
        replied_at: row.replied_at,
        user_id: row.user_id,
        assigned_to: row.assigned_to,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn contact_to_row(contact: &Contact) -> ContactRow {
    ContactRow {
        id: contact.id,
        name: contact.name.clone(),
        email: contact.email.as_str().to_owned(),
        phone: contact.phone.clone(),
        subject: contact.subject.clone(),
        message: contact.message.clone(),
        status: contact.status.as_str().to_owned(),
        reply_message: contact.reply_message.clone(),
        replied_at: contact.replied_at,
        user_id: contact.user_id,
        assigned_to: contact.assigned_to,
        created_at: contact.created_at,
        updated_at: contact.updated_at,
    }
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn insert(&self, contact: &Contact) -> Result<(), ContactRepositoryError> {
        let mut conn = self.connection().await?;
        let row = contact_to_row(contact);
        diesel::insert_into(contacts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, contact: &Contact) -> Result<bool, ContactRepositoryError> {
        let mut conn = self.connection().await?;
        let row = contact_to_row(contact);
        let updated = diesel::update(contacts::table.find(contact.id))
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &Uuid) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.connection().await?;
        let row: Option<ContactRow> = diesel::delete(contacts::table.find(*id))
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_contact).transpose()
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.connection().await?;
        let row: Option<ContactRow> = contacts::table
            .find(*id)
            .select(ContactRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_contact).transpose()
    }

    async fn list(&self, filter: &ContactFilter) -> Result<Vec<Contact>, ContactRepositoryError> {
        let mut conn = self.connection().await?;
        let mut query = contacts::table
            .select(ContactRow::as_select())
            .order(contacts::created_at.desc())
            .into_boxed();

        if let Some(needle) = filter.search.as_deref() {
            let pattern = like_pattern(needle);
            query = query.filter(
                contacts::subject
                    .ilike(pattern.clone())
                    .or(contacts::message.ilike(pattern.clone()))
                    .or(contacts::email.ilike(pattern.clone()))
                    .or(contacts::name.ilike(pattern)),
            );
        }
        if let Some(status) = filter.status {
            query = query.filter(contacts::status.eq(status.as_str()));
        }

        let rows: Vec<ContactRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_contact).collect()
    }
}
