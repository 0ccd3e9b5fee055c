//! In-memory user repository enforcing unique identifiers and emails.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::user::{User, UserFilter};
use crate::domain::validation::EmailAddress;

use super::table::{Row, Table};

impl Row for User {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Process-local store for users.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    table: Table<User>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self {
            table: Table::new("user"),
        }
    }
}

impl InMemoryUserRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn conflict(rows: &[User], user: &User) -> Option<UserRepositoryError> {
    rows.iter().filter(|row| row.id != user.id).find_map(|row| {
        if row.user_id == user.user_id {
            Some(UserRepositoryError::duplicate_user_id(user.user_id.as_str()))
        } else if row.email == user.email {
            Some(UserRepositoryError::duplicate_email(user.email.as_str()))
        } else {
            None
        }
    })
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        self.table
            .with_rows(|rows| {
                if let Some(err) = conflict(rows, user) {
                    return Err(err);
                }
                rows.push(user.clone());
                Ok(())
            })
            .map_err(UserRepositoryError::connection)?
    }

    async fn update(&self, user: &User) -> Result<bool, UserRepositoryError> {
        self.table
            .with_rows(|rows| {
                if let Some(err) = conflict(rows, user) {
                    return Err(err);
                }
                Ok(match rows.iter_mut().find(|row| row.id == user.id) {
                    Some(slot) => {
                        *slot = user.clone();
                        true
                    }
                    None => false,
                })
            })
            .map_err(UserRepositoryError::connection)?
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, UserRepositoryError> {
        self.table.find(id).map_err(UserRepositoryError::connection)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        self.table
            .with_rows(|rows| rows.iter().find(|row| row.email == *email).cloned())
            .map_err(UserRepositoryError::connection)
    }

    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, UserRepositoryError> {
        self.table
            .select(|user| filter.matches(user))
            .map_err(UserRepositoryError::connection)
    }
}
