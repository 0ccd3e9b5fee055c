//! Port for user persistence adapters and their errors.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::user::{User, UserFilter};
use crate::domain::validation::EmailAddress;

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repositories.
    pub enum UserRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "user repository connection failed: {message}",
        /// The store was reached but the statement failed.
        Query { message: String } => "user repository query failed: {message}",
        /// Another user already carries this sequential identifier.
        DuplicateUserId { user_id: String } => "user id already exists: {user_id}",
        /// Another user already registered this email address.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Persistence port for users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Unique identifiers and emails are enforced here.
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Overwrite the stored user with the same record id.
    ///
    /// Returns `false` when no such user exists.
    async fn update(&self, user: &User) -> Result<bool, UserRepositoryError>;

    /// User by record id.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, UserRepositoryError>;

    /// User registered with `email`.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Users matching `filter`, newest first.
    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, UserRepositoryError>;
}
