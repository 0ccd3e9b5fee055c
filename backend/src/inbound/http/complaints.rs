//! Complaints API handlers.
//!
//! ```text
//! GET    /api/complaints?search=&category=&status=in-progress
//! POST   /api/complaints
//! GET    /api/complaints/{id}
//! PUT    /api/complaints/{id}
//! DELETE /api/complaints/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::complaint::{
    Complaint, ComplaintDetails, ComplaintFilter, ComplaintPatch, GeoPoint, NewComplaint,
    StatusFilter,
};
use crate::domain::sequence::SequentialId;
use crate::domain::validation::{FieldError, in_range, non_blank};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, OneOrMany};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, RequiredFields, has_text, parse_optional_label, parse_optional_uuid, parse_uuid,
};

const COMPLAINT_ID_PATH: FieldName = FieldName::new("id");
const REPORTER_FIELD: FieldName = FieldName::new("userId");

/// Complaint as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintResponse {
    /// Record identifier.
    pub id: Uuid,
    /// Sequential identifier such as `CMP0001`.
    #[schema(example = "CMP0001")]
    pub complaint_id: String,
    /// Short summary.
    pub title: String,
    /// Category tags.
    pub category: Vec<String>,
    /// Complaint type label.
    pub complaint_type: String,
    /// Area classification.
    pub area_type: String,
    /// Full description.
    pub description: String,
    /// Days the problem has persisted.
    pub days: u32,
    /// Image URL.
    pub image: Option<String>,
    /// Free-text location.
    pub location: String,
    /// Latitude in degrees.
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    pub longitude: Option<f64>,
    /// Record id of the reporting user.
    pub user_id: Option<Uuid>,
    /// Status label.
    #[schema(example = "Pending")]
    pub status: String,
    /// Whether the complaint is closed.
    pub is_closed: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl From<Complaint> for ComplaintResponse {
    fn from(complaint: Complaint) -> Self {
        let ComplaintDetails {
            title,
            category,
            complaint_type,
            area_type,
            description,
            days,
            image,
            location,
            coordinates,
        } = complaint.details;
        Self {
            id: complaint.id,
            complaint_id: complaint.complaint_id.into(),
            title,
            category,
            complaint_type,
            area_type,
            description,
            days,
            image,
            location,
            latitude: coordinates.map(GeoPoint::latitude),
            longitude: coordinates.map(GeoPoint::longitude),
            user_id: complaint.reporter_id,
            status: complaint.status.as_str().to_owned(),
            is_closed: complaint.is_closed,
            created_at: complaint.created_at,
            updated_at: complaint.updated_at,
        }
    }
}

/// Body returned by `DELETE /api/complaints/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ComplaintDeletedResponse {
    /// Confirmation text.
    #[schema(example = "Complaint deleted successfully")]
    pub message: String,
    /// The removed complaint.
    pub complaint: ComplaintResponse,
}

/// Request body for `POST /api/complaints`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateComplaintRequest {
    /// Caller-supplied identifier; assigned automatically when omitted.
    pub complaint_id: Option<String>,
    /// Short summary.
    pub title: Option<String>,
    /// Category tags.
    pub category: Option<OneOrMany>,
    /// Complaint type label.
    pub complaint_type: Option<String>,
    /// Area classification.
    pub area_type: Option<String>,
    /// Full description.
    pub description: Option<String>,
    /// Days the problem has persisted.
    pub days: Option<i64>,
    /// Image URL.
    pub image: Option<String>,
    /// Free-text location.
    pub location: Option<String>,
    /// Latitude in degrees.
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    pub longitude: Option<f64>,
    /// Record id of the reporting user.
    #[serde(alias = "user_id")]
    pub user_id: Option<String>,
}

fn parse_days(days: i64) -> Result<u32, Error> {
    let days = in_range("days", days, 0, i64::from(u32::MAX))?;
    u32::try_from(days).map_err(|_| {
        Error::from(FieldError::OutOfRange {
            field: "days",
            min: 0,
            max: i64::from(u32::MAX),
        })
    })
}

fn parse_coordinates(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Option<GeoPoint>, Error> {
    match (latitude, longitude) {
        (None, None) => Ok(None),
        (Some(latitude), Some(longitude)) => Ok(Some(GeoPoint::new(latitude, longitude)?)),
        (Some(_), None) => Err(FieldError::missing("longitude").into()),
        (None, Some(_)) => Err(FieldError::missing("latitude").into()),
    }
}

impl TryFrom<CreateComplaintRequest> for NewComplaint {
    type Error = Error;

    fn try_from(value: CreateComplaintRequest) -> Result<Self, Self::Error> {
        let category = value
            .category
            .map(OneOrMany::into_entries)
            .unwrap_or_default();
        RequiredFields::default()
            .check(FieldName::new("title"), has_text(value.title.as_ref()))
            .check(FieldName::new("category"), !category.is_empty())
            .check(
                FieldName::new("complaintType"),
                has_text(value.complaint_type.as_ref()),
            )
            .check(FieldName::new("areaType"), has_text(value.area_type.as_ref()))
            .check(
                FieldName::new("description"),
                has_text(value.description.as_ref()),
            )
            .check(FieldName::new("days"), value.days.is_some())
            .check(FieldName::new("location"), has_text(value.location.as_ref()))
            .finish()?;

        Ok(Self {
            complaint_id: SequentialId::from_optional(value.complaint_id),
            details: ComplaintDetails {
                title: non_blank(value.title).unwrap_or_default(),
                category,
                complaint_type: non_blank(value.complaint_type).unwrap_or_default(),
                area_type: non_blank(value.area_type).unwrap_or_default(),
                description: non_blank(value.description).unwrap_or_default(),
                days: parse_days(value.days.unwrap_or_default())?,
                image: non_blank(value.image),
                location: non_blank(value.location).unwrap_or_default(),
                coordinates: parse_coordinates(value.latitude, value.longitude)?,
            },
            reporter_id: parse_optional_uuid(value.user_id, REPORTER_FIELD)?,
        })
    }
}

/// Request body for `PUT /api/complaints/{id}`. Every field is optional and
/// `complaintId` cannot be changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateComplaintRequest {
    /// Short summary.
    pub title: Option<String>,
    /// Category tags.
    pub category: Option<OneOrMany>,
    /// Complaint type label.
    pub complaint_type: Option<String>,
    /// Area classification.
    pub area_type: Option<String>,
    /// Full description.
    pub description: Option<String>,
    /// Days the problem has persisted.
    pub days: Option<i64>,
    /// Image URL.
    pub image: Option<String>,
    /// Free-text location.
    pub location: Option<String>,
    /// Latitude in degrees.
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    pub longitude: Option<f64>,
    /// Record id of the reporting user.
    #[serde(alias = "user_id")]
    pub user_id: Option<String>,
    /// `Pending`, `In Progress`, or `Resolved`.
    pub status: Option<String>,
    /// Whether the complaint is closed.
    pub is_closed: Option<bool>,
}

impl TryFrom<UpdateComplaintRequest> for ComplaintPatch {
    type Error = Error;

    fn try_from(value: UpdateComplaintRequest) -> Result<Self, Self::Error> {
        let category = match value.category.map(OneOrMany::into_entries) {
            Some(entries) if entries.is_empty() => {
                return Err(FieldError::missing("category").into());
            }
            other => other,
        };
        Ok(Self {
            title: value.title,
            category,
            complaint_type: value.complaint_type,
            area_type: value.area_type,
            description: value.description,
            days: value.days.map(parse_days).transpose()?,
            image: value.image,
            location: value.location,
            coordinates: parse_coordinates(value.latitude, value.longitude)?,
            reporter_id: parse_optional_uuid(value.user_id, REPORTER_FIELD)?,
            status: parse_optional_label(value.status)?,
            is_closed: value.is_closed,
        })
    }
}

/// Query parameters for `GET /api/complaints`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct ComplaintListQuery {
    /// Case-insensitive match on title, description, or location.
    pub search: Option<String>,
    /// Exact match against any category entry.
    pub category: Option<String>,
    /// `pending`, `in-progress`, `resolved`, or `closed`. Omit to list every
    /// open complaint.
    pub status: Option<String>,
}

impl TryFrom<ComplaintListQuery> for ComplaintFilter {
    type Error = Error;

    fn try_from(value: ComplaintListQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            search: non_blank(value.search),
            category: non_blank(value.category),
            status: StatusFilter::from_slug(value.status.as_deref().unwrap_or_default())?,
        })
    }
}

/// List complaints, newest first. Closed complaints only appear under
/// `status=closed`.
#[utoipa::path(
    get,
    path = "/api/complaints",
    params(ComplaintListQuery),
    responses(
        (status = 200, description = "Complaints", body = [ComplaintResponse]),
        (status = 400, description = "Invalid filter", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "listComplaints"
)]
#[get("/complaints")]
pub async fn list_complaints(
    state: web::Data<HttpState>,
    query: web::Query<ComplaintListQuery>,
) -> ApiResult<web::Json<Vec<ComplaintResponse>>> {
    let filter = ComplaintFilter::try_from(query.into_inner())?;
    let complaints = state.complaints.list_complaints(&filter).await?;
    Ok(web::Json(
        complaints.into_iter().map(ComplaintResponse::from).collect(),
    ))
}

/// File a complaint. New complaints start `Pending` and open; the next
/// `CMP` identifier is assigned unless the body supplies one.
#[utoipa::path(
    post,
    path = "/api/complaints",
    request_body = CreateComplaintRequest,
    responses(
        (status = 201, description = "Complaint created", body = ComplaintResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorSchema),
        (status = 409, description = "Identifier already taken", body = ErrorSchema),
        (status = 503, description = "Identifier allocation unavailable", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "createComplaint"
)]
#[post("/complaints")]
pub async fn create_complaint(
    state: web::Data<HttpState>,
    payload: web::Json<CreateComplaintRequest>,
) -> ApiResult<HttpResponse> {
    let draft = NewComplaint::try_from(payload.into_inner())?;
    let complaint = state.complaints.create_complaint(draft).await?;
    Ok(HttpResponse::Created().json(ComplaintResponse::from(complaint)))
}

/// Fetch one complaint.
#[utoipa::path(
    get,
    path = "/api/complaints/{id}",
    params(("id" = Uuid, Path, description = "Complaint record id")),
    responses(
        (status = 200, description = "Complaint", body = ComplaintResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Complaint not found", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "getComplaint"
)]
#[get("/complaints/{id}")]
pub async fn get_complaint(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ComplaintResponse>> {
    let id = parse_uuid(path.into_inner(), COMPLAINT_ID_PATH)?;
    let complaint = state.complaints.get_complaint(&id).await?;
    Ok(web::Json(complaint.into()))
}

/// Update a complaint.
#[utoipa::path(
    put,
    path = "/api/complaints/{id}",
    params(("id" = Uuid, Path, description = "Complaint record id")),
    request_body = UpdateComplaintRequest,
    responses(
        (status = 200, description = "Updated complaint", body = ComplaintResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Complaint not found", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "updateComplaint"
)]
#[put("/complaints/{id}")]
pub async fn update_complaint(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateComplaintRequest>,
) -> ApiResult<web::Json<ComplaintResponse>> {
    let id = parse_uuid(path.into_inner(), COMPLAINT_ID_PATH)?;
    let patch = ComplaintPatch::try_from(payload.into_inner())?;
    let complaint = state.complaints.update_complaint(&id, patch).await?;
    Ok(web::Json(complaint.into()))
}

/// Delete a complaint, returning it.
#[utoipa::path(
    delete,
    path = "/api/complaints/{id}",
    params(("id" = Uuid, Path, description = "Complaint record id")),
    responses(
        (status = 200, description = "Complaint deleted", body = ComplaintDeletedResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Complaint not found", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "deleteComplaint"
)]
#[delete("/complaints/{id}")]
pub async fn delete_complaint(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ComplaintDeletedResponse>> {
    let id = parse_uuid(path.into_inner(), COMPLAINT_ID_PATH)?;
    let removed = state.complaints.delete_complaint(&id).await?;
    Ok(web::Json(ComplaintDeletedResponse {
        message: "Complaint deleted successfully".to_owned(),
        complaint: removed.into(),
    }))
}

#[cfg(test)]
mod tests;
