//! Driving port for the user directory.
//!
//! Inbound adapters list, register, edit, and deactivate users through this
//! port without touching persistence or identifier allocation directly.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::user::{NewUser, User, UserFilter, UserPatch};

/// User use-cases exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserManagement: Send + Sync {
    /// Users matching `filter`, newest first.
    async fn list_users(&self, filter: &UserFilter) -> Result<Vec<User>, Error>;

    /// User by record id; `NotFound` when absent.
    async fn get_user(&self, id: &Uuid) -> Result<User, Error>;

    /// Register a user, assigning a role-scoped identifier unless one was
    /// supplied.
    async fn create_user(&self, user: NewUser) -> Result<User, Error>;

    /// Apply `patch`; the sequential identifier never changes.
    async fn update_user(&self, id: &Uuid, patch: UserPatch) -> Result<User, Error>;

    /// Soft delete: the user stays on record with `is_active = false`.
    async fn deactivate_user(&self, id: &Uuid) -> Result<(), Error>;
}
