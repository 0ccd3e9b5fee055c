//! Contact form API handlers.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::contact::{
    Contact, ContactFilter, ContactPatch, ContactStatus, MESSAGE_MIN_LEN, NewContact,
    SUBJECT_MIN_LEN,
};
use crate::domain::validation::{EmailAddress, min_length, non_blank};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, RequiredFields, has_text, parse_optional_label, parse_optional_uuid, parse_uuid,
};

const CONTACT_ID_PATH: FieldName = FieldName::new("id");
const SENDER_FIELD: FieldName = FieldName::new("userId");
const ASSIGNEE_FIELD: FieldName = FieldName::new("assignedTo");

/// Contact message as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    /// Record identifier.
    pub id: Uuid,
    /// Sender name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Message subject.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// Status label.
    #[schema(example = "Open")]
    pub status: String,
    /// Administrator reply.
    pub reply_message: String,
    /// Set once a reply has been sent.
    pub replied_at: Option<DateTime<Utc>>,
    /// Record id of the sending account.
    pub user_id: Option<Uuid>,
    /// Record id of the handling administrator.
    pub assigned_to: Option<Uuid>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.name,
            email: contact.email.to_string(),
            phone: contact.phone,
            subject: contact.subject,
            message: contact.message,
            status: contact.status.as_str().to_owned(),
            reply_message: contact.reply_message,
            replied_at: contact.replied_at,
            user_id: contact.user_id,
            assigned_to: contact.assigned_to,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        }
    }
}

/// Response body for a contact deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContactDeletedResponse {
    /// Confirmation text.
    #[schema(example = "Contact message deleted successfully")]
    pub message: String,
    /// The removed message.
    pub contact: ContactResponse,
}

/// Request body for `POST /api/contacts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateContactRequest {
    /// Sender name.
    pub name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// At least five characters once trimmed.
    pub subject: Option<String>,
    /// At least ten characters once trimmed.
    pub message: Option<String>,
    /// Record id of the signed-in sender.
    #[serde(alias = "user_id")]
    pub user_id: Option<String>,
}

impl TryFrom<CreateContactRequest> for NewContact {
    type Error = Error;

    fn try_from(value: CreateContactRequest) -> Result<Self, Self::Error> {
        RequiredFields::default()
            .check(FieldName::new("name"), has_text(value.name.as_ref()))
            .check(FieldName::new("email"), has_text(value.email.as_ref()))
            .check(FieldName::new("subject"), has_text(value.subject.as_ref()))
            .check(FieldName::new("message"), has_text(value.message.as_ref()))
            .finish()?;

        Ok(Self {
            name: non_blank(value.name).unwrap_or_default(),
            email: EmailAddress::parse("email", value.email.as_deref().unwrap_or_default())?,
            phone: value.phone.map(|raw| raw.trim().to_owned()).unwrap_or_default(),
            subject: min_length("subject", value.subject.unwrap_or_default(), SUBJECT_MIN_LEN)?,
            message: min_length("message", value.message.unwrap_or_default(), MESSAGE_MIN_LEN)?,
            user_id: parse_optional_uuid(value.user_id, SENDER_FIELD)?,
        })
    }
}

/// Request body for `PUT /api/contacts/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateContactRequest {
    /// Sender name.
    pub name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Message subject.
    pub subject: Option<String>,
    /// Message body.
    pub message: Option<String>,
    /// `Open`, `In Review`, `Replied`, or `Closed`.
    pub status: Option<String>,
    /// Administrator reply.
    pub reply_message: Option<String>,
    /// Record id of the handling administrator; blank clears it.
    #[serde(alias = "assigned_to")]
    pub assigned_to: Option<String>,
}

impl TryFrom<UpdateContactRequest> for ContactPatch {
    type Error = Error;

    fn try_from(value: UpdateContactRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value.name,
            email: value
                .email
                .map(|raw| EmailAddress::parse("email", &raw))
                .transpose()?,
            phone: value.phone,
            subject: value
                .subject
                .map(|raw| min_length("subject", raw, SUBJECT_MIN_LEN))
                .transpose()?,
            message: value
                .message
                .map(|raw| min_length("message", raw, MESSAGE_MIN_LEN))
                .transpose()?,
            status: parse_optional_label(value.status)?,
            reply_message: value.reply_message,
            assigned_to: value
                .assigned_to
                .map(|raw| parse_optional_uuid(Some(raw), ASSIGNEE_FIELD))
                .transpose()?,
        })
    }
}

/// Query parameters for `GET /api/contacts`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct ContactListQuery {
    /// Case-insensitive match on subject, message, email, or name.
    pub search: Option<String>,
    /// Status filter.
    pub status: Option<String>,
}

impl TryFrom<ContactListQuery> for ContactFilter {
    type Error = Error;

    fn try_from(value: ContactListQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            search: non_blank(value.search),
            status: parse_optional_label::<ContactStatus>(value.status)?,
        })
    }
}

/// List contact messages, newest first.
#[utoipa::path(
    get,
    path = "/api/contacts",
    params(ContactListQuery),
    responses(
        (status = 200, description = "Contact messages", body = [ContactResponse]),
        (status = 400, description = "Invalid filter", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "listContacts"
)]
#[get("/contacts")]
pub async fn list_contacts(
    state: web::Data<HttpState>,
    query: web::Query<ContactListQuery>,
) -> ApiResult<web::Json<Vec<ContactResponse>>> {
    let filter = ContactFilter::try_from(query.into_inner())?;
    let contacts = state.contacts.list_contacts(&filter).await?;
    Ok(web::Json(
        contacts.into_iter().map(ContactResponse::from).collect(),
    ))
}

/// Accept a contact-form submission.
#[utoipa::path(
    post,
    path = "/api/contacts",
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Message received", body = ContactResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "createContact"
)]
#[post("/contacts")]
pub async fn create_contact(
    state: web::Data<HttpState>,
    payload: web::Json<CreateContactRequest>,
) -> ApiResult<HttpResponse> {
    let submission = NewContact::try_from(payload.into_inner())?;
    let contact = state.contacts.create_contact(submission).await?;
    Ok(HttpResponse::Created().json(ContactResponse::from(contact)))
}

/// Fetch one contact message.
#[utoipa::path(
    get,
    path = "/api/contacts/{id}",
    params(("id" = Uuid, Path, description = "Contact message record id")),
    responses(
        (status = 200, description = "Contact message", body = ContactResponse),
        (status = 404, description = "Contact message not found", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "getContact"
)]
#[get("/contacts/{id}")]
pub async fn get_contact(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ContactResponse>> {
    let id = parse_uuid(path.into_inner(), CONTACT_ID_PATH)?;
    let contact = state.contacts.get_contact(&id).await?;
    Ok(web::Json(contact.into()))
}

/// Update a contact message. Moving to `Replied` with a reply stamps
/// `repliedAt`.
#[utoipa::path(
    put,
    path = "/api/contacts/{id}",
    params(("id" = Uuid, Path, description = "Contact message record id")),
    request_body = UpdateContactRequest,
    responses(
        (status = 200, description = "Updated contact message", body = ContactResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Contact message not found", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "updateContact"
)]
#[put("/contacts/{id}")]
pub async fn update_contact(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateContactRequest>,
) -> ApiResult<web::Json<ContactResponse>> {
    let id = parse_uuid(path.into_inner(), CONTACT_ID_PATH)?;
    let patch = ContactPatch::try_from(payload.into_inner())?;
    let contact = state.contacts.update_contact(&id, patch).await?;
    Ok(web::Json(contact.into()))
}

/// Delete a contact message, returning it.
#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    params(("id" = Uuid, Path, description = "Contact message record id")),
    responses(
        (status = 200, description = "Contact message deleted", body = ContactDeletedResponse),
        (status = 404, description = "Contact message not found", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "deleteContact"
)]
#[delete("/contacts/{id}")]
pub async fn delete_contact(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ContactDeletedResponse>> {
    let id = parse_uuid(path.into_inner(), CONTACT_ID_PATH)?;
    let removed = state.contacts.delete_contact(&id).await?;
    Ok(web::Json(ContactDeletedResponse {
        message: "Contact message deleted successfully".to_owned(),
        contact: removed.into(),
    }))
}
