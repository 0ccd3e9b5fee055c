//! Users API handlers.
//!
//! ```text
//! GET    /api/users?search=&role=&status=
//! POST   /api/users {"fullName":"Ada","email":"ada@example.org","password":"s3cret"}
//! GET    /api/users/{id}
//! PUT    /api/users/{id}
//! DELETE /api/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::password::Password;
use crate::domain::sequence::SequentialId;
use crate::domain::user::{Age, NewUser, Role, User, UserFilter, UserPatch, UserProfile};
use crate::domain::validation::{EmailAddress, non_blank};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MessageResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, RequiredFields, has_text, parse_optional_label, parse_uuid,
};

const USER_ID_PATH: FieldName = FieldName::new("id");

/// User as returned to clients. The password hash is never included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Record identifier.
    pub id: Uuid,
    /// Sequential identifier such as `USR001`.
    #[schema(example = "USR001")]
    pub user_id: String,
    /// Full name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Free-text location.
    pub location: String,
    /// Occupation.
    pub work: String,
    /// Empty when not provided.
    pub gender: String,
    /// Age in years, 0 to 120.
    pub age: Option<u8>,
    /// `yes`, `no`, or `maybe`.
    pub volunteering: String,
    /// Kinds of volunteering offered.
    pub volunteering_types: Vec<String>,
    /// `Weekdays`, `Weekends`, or `Flexible`.
    pub volunteering_days: String,
    /// `user` or `admin`.
    #[schema(example = "user")]
    pub role: String,
    /// Whether the account is active.
    pub is_active: bool,
    /// Avatar URL.
    pub profile_pic: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

fn label_or_empty<T: ToString>(value: Option<T>) -> String {
    value.map(|label| label.to_string()).unwrap_or_default()
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let UserProfile {
            phone,
            location,
            work,
            gender,
            age,
            volunteering,
            volunteering_types,
            volunteering_days,
            profile_pic,
        } = user.profile;
        Self {
            id: user.id,
            user_id: user.user_id.into(),
            full_name: user.full_name,
            email: user.email.to_string(),
            phone,
            location,
            work,
            gender: label_or_empty(gender),
            age: age.map(Age::years),
            volunteering: label_or_empty(volunteering),
            volunteering_types,
            volunteering_days: label_or_empty(volunteering_days),
            role: user.role.as_str().to_owned(),
            is_active: user.is_active,
            profile_pic,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Request body for `POST /api/users`.
///
/// `userId` is optional; when omitted the next identifier for the role is
/// assigned.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateUserRequest {
    /// Sequential identifier such as `USR001`.
    pub user_id: Option<String>,
    /// Full name.
    pub full_name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Plain-text password.
    pub password: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Free-text location.
    pub location: Option<String>,
    /// Occupation.
    pub work: Option<String>,
    /// Self-described gender.
    pub gender: Option<String>,
    /// Age in years, 0 to 120.
    pub age: Option<i64>,
    /// `yes`, `no`, or `maybe`.
    pub volunteering: Option<String>,
    /// Kinds of volunteering offered.
    pub volunteering_types: Option<Vec<String>>,
    /// `Weekdays`, `Weekends`, or `Flexible`.
    pub volunteering_days: Option<String>,
    /// `user` or `admin`.
    pub role: Option<String>,
    /// Whether the account is active.
    pub is_active: Option<bool>,
    /// Avatar URL.
    pub profile_pic: Option<String>,
}

fn parse_age(age: Option<i64>) -> Result<Option<Age>, Error> {
    age.map(Age::new).transpose().map_err(Error::from)
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = Error;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        RequiredFields::default()
            .check(FieldName::new("fullName"), has_text(value.full_name.as_ref()))
            .check(FieldName::new("email"), has_text(value.email.as_ref()))
            .check(
                FieldName::new("password"),
                value.password.as_ref().is_some_and(|raw| !raw.is_empty()),
            )
            .finish()?;

        let email = EmailAddress::parse("email", value.email.as_deref().unwrap_or_default())?;
        let password = Password::new("password", value.password.unwrap_or_default())?;
        let mut profile = UserProfile {
            phone: value.phone.unwrap_or_default(),
            location: value.location.unwrap_or_default(),
            work: value.work.unwrap_or_default(),
            gender: parse_optional_label(value.gender)?,
            age: parse_age(value.age)?,
            volunteering: parse_optional_label(value.volunteering)?,
            volunteering_types: value.volunteering_types.unwrap_or_default(),
            volunteering_days: parse_optional_label(value.volunteering_days)?,
            ..UserProfile::default()
        };
        if let Some(pic) = non_blank(value.profile_pic) {
            profile.profile_pic = pic;
        }

        Ok(Self {
            user_id: SequentialId::from_optional(value.user_id),
            full_name: non_blank(value.full_name).unwrap_or_default(),
            email,
            password,
            role: parse_optional_label(value.role)?.unwrap_or_default(),
            is_active: value.is_active.unwrap_or(true),
            profile,
        })
    }
}

/// Request body for `PUT /api/users/{id}`.
///
/// Omitted fields keep their stored value. Blank `fullName`, `email`,
/// `role`, and `password` are treated as omitted. `userId` is not accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateUserRequest {
    /// Full name.
    pub full_name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Plain-text password.
    pub password: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Free-text location.
    pub location: Option<String>,
    /// Occupation.
    pub work: Option<String>,
    /// Self-described gender.
    pub gender: Option<String>,
    /// Age in years, 0 to 120.
    pub age: Option<i64>,
    /// `yes`, `no`, or `maybe`.
    pub volunteering: Option<String>,
    /// Kinds of volunteering offered.
    pub volunteering_types: Option<Vec<String>>,
    /// `Weekdays`, `Weekends`, or `Flexible`.
    pub volunteering_days: Option<String>,
    /// `user` or `admin`.
    pub role: Option<String>,
    /// Whether the account is active.
    pub is_active: Option<bool>,
    /// Avatar URL.
    pub profile_pic: Option<String>,
}

impl TryFrom<UpdateUserRequest> for UserPatch {
    type Error = Error;

    fn try_from(value: UpdateUserRequest) -> Result<Self, Self::Error> {
        let email = non_blank(value.email)
            .map(|raw| EmailAddress::parse("email", &raw))
            .transpose()?;
        let password = value
            .password
            .filter(|raw| !raw.is_empty())
            .map(|raw| Password::new("password", raw))
            .transpose()?;
        Ok(Self {
            full_name: non_blank(value.full_name),
            email,
            password,
            role: parse_optional_label(value.role)?,
            is_active: value.is_active,
            phone: value.phone,
            location: value.location,
            work: value.work,
            gender: parse_optional_label(value.gender)?,
            age: parse_age(value.age)?,
            volunteering: parse_optional_label(value.volunteering)?,
            volunteering_types: value.volunteering_types,
            volunteering_days: parse_optional_label(value.volunteering_days)?,
            profile_pic: value.profile_pic,
        })
    }
}

/// Query parameters for `GET /api/users`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    /// Case-insensitive match on name, email, or location.
    pub search: Option<String>,
    /// `user` or `admin`.
    pub role: Option<String>,
    /// `active` selects active users; any other value selects inactive ones.
    pub status: Option<String>,
}

impl TryFrom<UserListQuery> for UserFilter {
    type Error = Error;

    fn try_from(value: UserListQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            search: non_blank(value.search),
            role: parse_optional_label::<Role>(value.role)?,
            active: non_blank(value.status).map(|status| status == "active"),
        })
    }
}

/// List users, newest first.
#[utoipa::path(
    get,
    path = "/api/users",
    params(UserListQuery),
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 400, description = "Invalid filter", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<UserListQuery>,
) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let filter = UserFilter::try_from(query.into_inner())?;
    let users = state.users.list_users(&filter).await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Fetch one user by record id.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User record id")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_uuid(path.into_inner(), USER_ID_PATH)?;
    let user = state.users.get_user(&id).await?;
    Ok(web::Json(user.into()))
}

/// Register a user. The sequential `userId` is assigned per role unless the
/// body supplies one.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email or identifier already taken", body = ErrorSchema),
        (status = 503, description = "Identifier allocation unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let new_user = NewUser::try_from(payload.into_inner())?;
    let user = state.users.create_user(new_user).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Partially update a user. The sequential `userId` never changes.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User record id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 409, description = "Email already taken", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_uuid(path.into_inner(), USER_ID_PATH)?;
    let patch = UserPatch::try_from(payload.into_inner())?;
    let user = state.users.update_user(&id, patch).await?;
    Ok(web::Json(user.into()))
}

/// Deactivate a user. The record is kept with `isActive = false`.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User record id")),
    responses(
        (status = 200, description = "User deactivated", body = MessageResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deactivateUser"
)]
#[delete("/users/{id}")]
pub async fn deactivate_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_uuid(path.into_inner(), USER_ID_PATH)?;
    state.users.deactivate_user(&id).await?;
    Ok(web::Json(MessageResponse::new("User deactivated successfully")))
}
