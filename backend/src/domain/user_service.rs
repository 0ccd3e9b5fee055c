//! User directory service implementing [`UserManagement`].
//!
//! Registration runs the sequential-id save hook before the insert, so the
//! record reaching the repository always carries its `USR`/`ADM` number.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::password::{Password, PasswordHash};
use crate::domain::ports::{CounterStore, UserManagement, UserRepository};
use crate::domain::sequence::{SequentialIdAllocator, assign_sequential_id};
use crate::domain::service_support::{DUPLICATE_EMAIL_MESSAGE, map_user_repository_error};
use crate::domain::user::{NewUser, User, UserFilter, UserPatch};
use crate::domain::validation::EmailAddress;

/// User service backed by a repository and a counter store.
pub struct UserService<R: ?Sized, C: ?Sized> {
    users: Arc<R>,
    allocator: SequentialIdAllocator<C>,
    clock: Arc<dyn Clock>,
}

impl<R, C> UserService<R, C>
where
    R: UserRepository + ?Sized,
    C: CounterStore + ?Sized,
{
    /// Build the service; `counters` feeds the per-role identifier sequences.
    pub fn new(users: Arc<R>, counters: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            allocator: SequentialIdAllocator::new(counters),
            clock,
        }
    }

    async fn fetch(&self, id: &Uuid) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found("User not found"))
    }

    /// Reject `email` when a user other than `owner` already holds it.
    async fn ensure_email_free(
        &self,
        email: &EmailAddress,
        owner: Option<Uuid>,
    ) -> Result<(), Error> {
        let holder = self
            .users
            .find_by_email(email)
            .await
            .map_err(map_user_repository_error)?;
        match holder {
            Some(existing) if Some(existing.id) != owner => {
                Err(Error::conflict(DUPLICATE_EMAIL_MESSAGE))
            }
            _ => Ok(()),
        }
    }

    async fn store(&self, user: &User) -> Result<(), Error> {
        let found = self
            .users
            .update(user)
            .await
            .map_err(map_user_repository_error)?;
        if found {
            Ok(())
        } else {
            Err(Error::not_found("User not found"))
        }
    }
}

fn hash(password: &Password) -> Result<PasswordHash, Error> {
    PasswordHash::generate(password).map_err(|err| Error::internal(err.to_string()))
}

#[async_trait]
impl<R, C> UserManagement for UserService<R, C>
where
    R: UserRepository + ?Sized,
    C: CounterStore + ?Sized,
{
    async fn list_users(&self, filter: &UserFilter) -> Result<Vec<User>, Error> {
        self.users
            .list(filter)
            .await
            .map_err(map_user_repository_error)
    }

    async fn get_user(&self, id: &Uuid) -> Result<User, Error> {
        self.fetch(id).await
    }

    async fn create_user(&self, mut user: NewUser) -> Result<User, Error> {
        self.ensure_email_free(&user.email, None).await?;
        // Hash first so a hashing failure never consumes a number.
        let password_hash = hash(&user.password)?;
        assign_sequential_id(&mut user, &self.allocator).await?;
        let record = user
            .into_user(Uuid::new_v4(), password_hash, self.clock.utc())
            .ok_or_else(|| Error::internal("user reached storage without a user id"))?;
        self.users
            .insert(&record)
            .await
            .map_err(map_user_repository_error)?;
        info!(user_id = %record.user_id, role = %record.role, "user registered");
        Ok(record)
    }

    async fn update_user(&self, id: &Uuid, patch: UserPatch) -> Result<User, Error> {
        let mut user = self.fetch(id).await?;
        if let Some(email) = patch.email.as_ref() {
            if *email != user.email {
                self.ensure_email_free(email, Some(user.id)).await?;
            }
        }
        if let Some(password) = patch.password.as_ref() {
            user.password_hash = hash(password)?;
        }
        user.apply(patch, self.clock.utc());
        self.store(&user).await?;
        Ok(user)
    }

    async fn deactivate_user(&self, id: &Uuid) -> Result<(), Error> {
        let mut user = self.fetch(id).await?;
        user.apply(
            UserPatch {
                is_active: Some(false),
                ..UserPatch::default()
            },
            self.clock.utc(),
        );
        self.store(&user).await?;
        info!(user_id = %user.user_id, "user deactivated");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
