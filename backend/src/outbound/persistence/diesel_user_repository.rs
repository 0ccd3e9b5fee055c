//! PostgreSQL-backed [`UserRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::password::PasswordHash;
use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::sequence::SequentialId;
use crate::domain::user::{
    Age, Gender, Role, User, UserFilter, UserProfile, Volunteering, VolunteeringDays,
};
use crate::domain::validation::EmailAddress;

use super::diesel_helpers::{
    DieselFailure, classify_diesel_error, like_pattern, pool_error_message,
};
use super::models::UserRow;
use super::pool::DbPool;
use super::schema::users;

const USER_ID_CONSTRAINT: &str = "users_user_id_key";
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// PostgreSQL store for users.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map a Diesel failure, naming the duplicated value when a unique index
/// rejected `user`.
fn map_diesel_error(error: diesel::result::Error, user: Option<&User>) -> UserRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => UserRepositoryError::connection(message),
        DieselFailure::Query(message) => UserRepositoryError::query(message),
        DieselFailure::UniqueViolation { constraint } => match (constraint.as_deref(), user) {
            (Some(USER_ID_CONSTRAINT), Some(user)) => {
                UserRepositoryError::duplicate_user_id(user.user_id.as_str())
            }
            (Some(EMAIL_CONSTRAINT), Some(user)) => {
                UserRepositoryError::duplicate_email(user.email.as_str())
            }
            _ => UserRepositoryError::query("unexpected unique violation"),
        },
    }
}

fn corrupt(column: &str, detail: impl std::fmt::Display) -> UserRepositoryError {
    UserRepositoryError::query(format!("invalid {column} in database: {detail}"))
}

/// Empty columns mean "not provided".
fn optional_label<T>(
    raw: &str,
    parse: impl FnOnce(&str) -> Result<T, crate::domain::validation::FieldError>,
) -> Result<Option<T>, crate::domain::validation::FieldError> {
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        parse(raw).map(Some)
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let user_id = SequentialId::new(row.user_id).map_err(|err| corrupt("user_id", err))?;
    let email = EmailAddress::parse("email", &row.email).map_err(|err| corrupt("email", err))?;
    let password_hash =
        PasswordHash::from_phc(row.password_hash).map_err(|err| corrupt("password_hash", err))?;
    let role = Role::parse_label(&row.role).map_err(|err| corrupt("role", err))?;
    let age = row
        .age
        .map(|years| Age::new(i64::from(years)))
        .transpose()
        .map_err(|err| corrupt("age", err))?;
    let profile = UserProfile {
        phone: row.phone,
        location: row.location,
        work: row.work,
        gender: optional_label(&row.gender, Gender::parse_label)
            .map_err(|err| corrupt("gender", err))?,
        age,
        volunteering: optional_label(&row.volunteering, Volunteering::parse_label)
            .map_err(|err| corrupt("volunteering", err))?,
        volunteering_types: row.volunteering_types,
        volunteering_days: optional_label(&row.volunteering_days, VolunteeringDays::parse_label)
            .map_err(|err| corrupt("volunteering_days", err))?,
        profile_pic: row.profile_pic,
    };

    Ok(User {
        id: row.id,
        user_id,
        full_name: row.full_name,
        email,
        password_hash,
        role,
        is_active: row.is_active,
        profile,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn user_to_row(user: &User) -> UserRow {
    let profile = &user.profile;
    UserRow {
        id: user.id,
        user_id: user.user_id.as_str().to_owned(),
        full_name: user.full_name.clone(),
        email: user.email.as_str().to_owned(),
        password_hash: user.password_hash.as_str().to_owned(),
        phone: profile.phone.clone(),
        location: profile.location.clone(),
        work: profile.work.clone(),
        gender: profile.gender.map(Gender::as_str).unwrap_or_default().to_owned(),
        age: profile.age.map(|age| i16::from(age.years())),
        volunteering: profile
            .volunteering
            .map(Volunteering::as_str)
            .unwrap_or_default()
            .to_owned(),
        volunteering_types: profile.volunteering_types.clone(),
        volunteering_days: profile
            .volunteering_days
            .map(VolunteeringDays::as_str)
            .unwrap_or_default()
            .to_owned(),
        role: user.role.as_str().to_owned(),
        is_active: user.is_active,
        profile_pic: profile.profile_pic.clone(),
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserRepositoryError::connection(pool_error_message(err)))?;

        let row = user_to_row(user);
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, Some(user)))
    }

    async fn update(&self, user: &User) -> Result<bool, UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserRepositoryError::connection(pool_error_message(err)))?;

        let row = user_to_row(user);
        let updated = diesel::update(users::table.find(user.id))
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(user)))?;
        Ok(updated > 0)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserRepositoryError::connection(pool_error_message(err)))?;

        let row: Option<UserRow> = users::table
            .find(*id)
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserRepositoryError::connection(pool_error_message(err)))?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        row.map(row_to_user).transpose()
    }

    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserRepositoryError::connection(pool_error_message(err)))?;

        let mut query = users::table
            .select(UserRow::as_select())
            .order(users::created_at.desc())
            .into_boxed();
        if let Some(needle) = filter.search.as_deref() {
            let pattern = like_pattern(needle);
            query = query.filter(
                users::full_name
                    .ilike(pattern.clone())
                    .or(users::email.ilike(pattern.clone()))
                    .or(users::location.ilike(pattern)),
            );
        }
        if let Some(role) = filter.role {
            query = query.filter(users::role.eq(role.as_str()));
        }
        if let Some(active) = filter.active {
            query = query.filter(users::is_active.eq(active));
        }

        let rows: Vec<UserRow> = query
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        rows.into_iter().map(row_to_user).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::outbound::persistence::diesel_helpers::test_support::ConstraintViolation;

    const STORED_HASH: &str =
        "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHRzYWx0$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

    #[fixture]
    fn user() -> User {
        let now = Utc
            .with_ymd_and_hms(2025, 8, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        User {
            id: Uuid::new_v4(),
            user_id: SequentialId::new("ADM002").expect("valid id"),
            full_name: "Katherine Johnson".to_owned(),
            email: EmailAddress::parse("email", "katherine@example.org").expect("email"),
            password_hash: PasswordHash::from_phc(STORED_HASH.to_owned()).expect("valid PHC"),
            role: Role::Admin,
            is_active: true,
            profile: UserProfile {
                gender: Some(Gender::PreferNotToSay),
                age: Some(Age::new(42).expect("age")),
                volunteering_days: Some(VolunteeringDays::Weekends),
                ..UserProfile::default()
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn rows_convert_back_to_the_same_user(user: User) {
        let restored = row_to_user(user_to_row(&user)).expect("row converts");
        assert_eq!(restored, user);
    }

    #[rstest]
    fn unset_labels_are_stored_empty(mut user: User) {
        user.profile.gender = None;
        let row = user_to_row(&user);
        assert_eq!(row.gender, "");
        assert_eq!(row.volunteering, "");
    }

    #[rstest]
    fn unknown_roles_in_storage_are_query_errors(user: User) {
        let mut row = user_to_row(&user);
        row.role = "superuser".to_owned();
        assert!(matches!(
            row_to_user(row),
            Err(UserRepositoryError::Query { .. })
        ));
    }

    #[rstest]
    #[case(USER_ID_CONSTRAINT, UserRepositoryError::duplicate_user_id("ADM002"))]
    #[case(EMAIL_CONSTRAINT, UserRepositoryError::duplicate_email("katherine@example.org"))]
    fn unique_violations_name_the_duplicate(
        user: User,
        #[case] constraint: &'static str,
        #[case] expected: UserRepositoryError,
    ) {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(ConstraintViolation(constraint)),
        );
        assert_eq!(map_diesel_error(error, Some(&user)), expected);
    }
}
