//! Citizens and administrators.
//!
//! A user carries two identifiers: the opaque record `id` used in URLs and
//! the sequential `user_id` (`USR001`, `ADM001`) shown to people. The latter
//! is assigned once, on creation, and numbered per role.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::labels::labelled_enum;
use super::password::{Password, PasswordHash};
use super::sequence::{SequenceKind, SequentialId, SequentiallyIdentified};
use super::validation::{EmailAddress, FieldError, contains_ignore_case, in_range};

/// Picture shown until a user uploads one.
pub const DEFAULT_PROFILE_PIC: &str = "https://picsum.photos/200";

labelled_enum! {
    /// Access role. Each role owns its own identifier counter.
    #[derive(Default)]
    pub enum Role ("role") {
        #[default]
        User => "user",
        Admin => "admin",
    }
}

labelled_enum! {
    /// Self-described gender.
    pub enum Gender ("gender") {
        Male => "Male",
        Female => "Female",
        Other => "Other",
        PreferNotToSay => "Prefer not to say",
    }
}

labelled_enum! {
    /// Willingness to volunteer.
    pub enum Volunteering ("volunteering") {
        Yes => "yes",
        No => "no",
        Maybe => "maybe",
    }
}

labelled_enum! {
    /// Days a volunteer is available.
    pub enum VolunteeringDays ("volunteeringDays") {
        Weekdays => "Weekdays",
        Weekends => "Weekends",
        Flexible => "Flexible",
    }
}

/// Age in whole years, `0..=120`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Age(u8);

impl Age {
    /// Oldest accepted age.
    pub const MAX: u8 = 120;

    /// Validate `years` against `0..=MAX`.
    pub fn new(years: i64) -> Result<Self, FieldError> {
        let years = in_range("age", years, 0, i64::from(Self::MAX))?;
        u8::try_from(years)
            .map(Self)
            .map_err(|_| FieldError::OutOfRange {
                field: "age",
                min: 0,
                max: i64::from(Self::MAX),
            })
    }

    /// Age in years.
    pub const fn years(self) -> u8 {
        self.0
    }
}

/// Optional personal details. Empty strings mean "not provided".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Contact number.
    pub phone: String,
    /// Free-text home area.
    pub location: String,
    /// Occupation.
    pub work: String,
    /// Self-described gender.
    pub gender: Option<Gender>,
    /// Age in years.
    pub age: Option<Age>,
    /// Willingness to volunteer.
    pub volunteering: Option<Volunteering>,
    /// Kinds of volunteering offered.
    pub volunteering_types: Vec<String>,
    /// Availability.
    pub volunteering_days: Option<VolunteeringDays>,
    /// Avatar URL.
    pub profile_pic: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            phone: String::new(),
            location: String::new(),
            work: String::new(),
            gender: None,
            age: None,
            volunteering: None,
            volunteering_types: Vec::new(),
            volunteering_days: None,
            profile_pic: DEFAULT_PROFILE_PIC.to_owned(),
        }
    }
}

/// Stored user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Record identifier.
    pub id: Uuid,
    /// Sequential identifier, `USR` or `ADM` prefixed.
    pub user_id: SequentialId,
    /// Display name.
    pub full_name: String,
    /// Unique login email.
    pub email: EmailAddress,
    /// Argon2 PHC string.
    pub password_hash: PasswordHash,
    /// Access role.
    pub role: Role,
    /// Inactive users are kept but hidden from active listings.
    pub is_active: bool,
    /// Optional personal details.
    pub profile: UserProfile,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Validated registration awaiting an identifier and a password hash.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Imported identifier; `None` lets the save hook allocate one.
    pub user_id: Option<SequentialId>,
    /// Display name.
    pub full_name: String,
    /// Login email.
    pub email: EmailAddress,
    /// Plain password, hashed before storage.
    pub password: Password,
    /// Access role; selects the identifier counter.
    pub role: Role,
    /// Initial activity flag.
    pub is_active: bool,
    /// Optional personal details.
    pub profile: UserProfile,
}

impl SequentiallyIdentified for NewUser {
    fn sequence_kind(&self) -> SequenceKind {
        SequenceKind::User(self.role)
    }

    fn sequential_id(&self) -> Option<&SequentialId> {
        self.user_id.as_ref()
    }

    fn set_sequential_id(&mut self, id: SequentialId) {
        self.user_id = Some(id);
    }
}

impl NewUser {
    /// Turn the registration into a record.
    ///
    /// Returns `None` until the save hook has assigned an identifier.
    pub fn into_user(
        self,
        id: Uuid,
        password_hash: PasswordHash,
        now: DateTime<Utc>,
    ) -> Option<User> {
        let user_id = self.user_id?;
        Some(User {
            id,
            user_id,
            full_name: self.full_name,
            email: self.email,
            password_hash,
            role: self.role,
            is_active: self.is_active,
            profile: self.profile,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update. `None` keeps the stored value; `user_id` cannot change.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    /// New display name.
    pub full_name: Option<String>,
    /// New login email.
    pub email: Option<EmailAddress>,
    /// New password, hashed by the service.
    pub password: Option<Password>,
    /// New role. The sequential identifier keeps its prefix.
    pub role: Option<Role>,
    /// New activity flag.
    pub is_active: Option<bool>,
    /// New phone.
    pub phone: Option<String>,
    /// New location.
    pub location: Option<String>,
    /// New occupation.
    pub work: Option<String>,
    /// New gender.
    pub gender: Option<Gender>,
    /// New age.
    pub age: Option<Age>,
    /// New volunteering preference.
    pub volunteering: Option<Volunteering>,
    /// Replacement volunteering kinds.
    pub volunteering_types: Option<Vec<String>>,
    /// New availability.
    pub volunteering_days: Option<VolunteeringDays>,
    /// New avatar URL.
    pub profile_pic: Option<String>,
}

impl User {
    /// Apply every field of `patch` except the password, which callers hash
    /// separately.
    pub fn apply(&mut self, patch: UserPatch, now: DateTime<Utc>) {
        let UserPatch {
            full_name,
            email,
            password: _,
            role,
            is_active,
            phone,
            location,
            work,
            gender,
            age,
            volunteering,
            volunteering_types,
            volunteering_days,
            profile_pic,
        } = patch;

        replace(&mut self.full_name, full_name);
        replace(&mut self.email, email);
        replace(&mut self.role, role);
        replace(&mut self.is_active, is_active);
        let profile = &mut self.profile;
        replace(&mut profile.phone, phone);
        replace(&mut profile.location, location);
        replace(&mut profile.work, work);
        replace(&mut profile.volunteering_types, volunteering_types);
        replace(&mut profile.profile_pic, profile_pic);
        if gender.is_some() {
            profile.gender = gender;
        }
        if age.is_some() {
            profile.age = age;
        }
        if volunteering.is_some() {
            profile.volunteering = volunteering;
        }
        if volunteering_days.is_some() {
            profile.volunteering_days = volunteering_days;
        }
        self.updated_at = now;
    }
}

fn replace<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// List filter for the user directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Case-insensitive match on name, email, or location.
    pub search: Option<String>,
    /// Exact role.
    pub role: Option<Role>,
    /// `Some(true)` for active users only, `Some(false)` for inactive only.
    pub active: Option<bool>,
}

impl UserFilter {
    /// Whether `user` passes every present criterion.
    pub fn matches(&self, user: &User) -> bool {
        let search_ok = self.search.as_deref().is_none_or(|needle| {
            contains_ignore_case(&user.full_name, needle)
                || contains_ignore_case(user.email.as_str(), needle)
                || contains_ignore_case(&user.profile.location, needle)
        });
        let role_ok = self.role.is_none_or(|role| role == user.role);
        let active_ok = self.active.is_none_or(|active| active == user.is_active);
        search_ok && role_ok && active_ok
    }
}

#[cfg(test)]
mod tests;
