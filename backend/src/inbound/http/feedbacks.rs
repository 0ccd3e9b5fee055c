//! Feedback API handlers.
//!
//! Bodies use snake_case keys (`full_name`, `feedback_type`) as existing
//! clients send them; only the timestamps are camelCase.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::feedback::{
    ExperienceRating, Feedback, FeedbackCategory, FeedbackDetails, FeedbackFilter, FeedbackPatch,
    FeedbackType, Rating,
};
use crate::domain::validation::{EmailAddress, FieldError, non_blank};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, RequiredFields, has_text, parse_optional_label, parse_timestamp, parse_uuid,
};

const FEEDBACK_ID_PATH: FieldName = FieldName::new("id");

/// Feedback as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeedbackResponse {
    /// Record identifier.
    pub id: Uuid,
    /// Submitter user identifier.
    pub user_id: String,
    /// Complaint the feedback refers to.
    pub complaint_id: Option<String>,
    /// Full name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Feedback type label.
    #[schema(example = "service")]
    pub feedback_type: String,
    /// Free-form reference supplied by the submitter.
    pub reference_id: String,
    /// Overall rating, 1 to 5.
    pub rating: u8,
    /// Experience rating, 1 to 5.
    pub experience_rating: u8,
    /// Feedback text.
    pub detailed_feedback: String,
    /// Aspects the feedback covers.
    pub feedback_categories: Vec<String>,
    /// Attachment URL.
    pub attachment_url: String,
    /// When the experience happened, RFC 3339.
    pub experience_date: DateTime<Utc>,
    /// Free-text location.
    pub location: String,
    /// Whether the submitter wants a follow-up.
    pub follow_up: bool,
    /// Improvement suggestions.
    pub suggestions: String,
    /// Creation time.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<Feedback> for FeedbackResponse {
    fn from(feedback: Feedback) -> Self {
        let details = feedback.details;
        Self {
            id: feedback.id,
            user_id: details.user_id,
            complaint_id: details.complaint_id,
            full_name: details.full_name,
            email: details.email.to_string(),
            feedback_type: details.feedback_type.as_str().to_owned(),
            reference_id: details.reference_id,
            rating: details.rating.value(),
            experience_rating: details.experience_rating.value(),
            detailed_feedback: details.detailed_feedback,
            feedback_categories: details
                .feedback_categories
                .iter()
                .map(|category| category.as_str().to_owned())
                .collect(),
            attachment_url: details.attachment_url,
            experience_date: details.experience_date,
            location: details.location,
            follow_up: details.follow_up,
            suggestions: details.suggestions,
            created_at: feedback.created_at,
            updated_at: feedback.updated_at,
        }
    }
}

/// Response body for a feedback deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeedbackDeletedResponse {
    /// Confirmation text.
    #[schema(example = "Feedback deleted successfully")]
    pub message: String,
    /// The removed feedback.
    pub feedback: FeedbackResponse,
}

/// Request body for `POST /api/feedbacks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateFeedbackRequest {
    /// Submitter user identifier.
    pub user_id: Option<String>,
    /// Complaint the feedback refers to.
    pub complaint_id: Option<String>,
    /// Full name.
    pub full_name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Feedback type label.
    pub feedback_type: Option<String>,
    /// Free-form reference supplied by the submitter.
    pub reference_id: Option<String>,
    /// Overall rating, 1 to 5.
    pub rating: Option<i64>,
    /// Experience rating, 1 to 5.
    pub experience_rating: Option<i64>,
    /// Feedback text.
    pub detailed_feedback: Option<String>,
    /// Aspects the feedback covers.
    pub feedback_categories: Option<Vec<String>>,
    /// Attachment URL.
    pub attachment_url: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    pub experience_date: Option<String>,
    /// Free-text location.
    pub location: Option<String>,
    /// Whether the submitter wants a follow-up.
    pub follow_up: Option<bool>,
    /// Improvement suggestions.
    pub suggestions: Option<String>,
}

fn parse_categories(raw: Vec<String>) -> Result<Vec<FeedbackCategory>, Error> {
    raw.iter()
        .map(|label| label.parse::<FeedbackCategory>().map_err(Error::from))
        .collect()
}

fn parse_rating(value: i64) -> Result<Rating, Error> {
    Rating::new(value).map_err(Error::from)
}

fn parse_experience(value: i64) -> Result<ExperienceRating, Error> {
    ExperienceRating::new(value).map_err(Error::from)
}

impl TryFrom<CreateFeedbackRequest> for FeedbackDetails {
    type Error = Error;

    fn try_from(value: CreateFeedbackRequest) -> Result<Self, Self::Error> {
        RequiredFields::default()
            .check(FieldName::new("full_name"), has_text(value.full_name.as_ref()))
            .check(FieldName::new("email"), has_text(value.email.as_ref()))
            .check(
                FieldName::new("feedback_type"),
                has_text(value.feedback_type.as_ref()),
            )
            .check(FieldName::new("rating"), value.rating.is_some())
            .check(
                FieldName::new("experience_rating"),
                value.experience_rating.is_some(),
            )
            .check(
                FieldName::new("detailed_feedback"),
                has_text(value.detailed_feedback.as_ref()),
            )
            .check(
                FieldName::new("experience_date"),
                has_text(value.experience_date.as_ref()),
            )
            .check(FieldName::new("location"), has_text(value.location.as_ref()))
            .finish()?;

        let feedback_type = parse_optional_label::<FeedbackType>(value.feedback_type)?
            .ok_or(FieldError::missing("feedback_type"))?;
        Ok(Self {
            user_id: non_blank(value.user_id).unwrap_or_default(),
            complaint_id: non_blank(value.complaint_id),
            full_name: non_blank(value.full_name).unwrap_or_default(),
            email: EmailAddress::parse("email", value.email.as_deref().unwrap_or_default())?,
            feedback_type,
            reference_id: non_blank(value.reference_id).unwrap_or_default(),
            rating: parse_rating(value.rating.unwrap_or_default())?,
            experience_rating: parse_experience(value.experience_rating.unwrap_or_default())?,
            detailed_feedback: non_blank(value.detailed_feedback).unwrap_or_default(),
            feedback_categories: parse_categories(value.feedback_categories.unwrap_or_default())?,
            attachment_url: value.attachment_url.unwrap_or_default(),
            experience_date: parse_timestamp(
                value.experience_date.unwrap_or_default(),
                FieldName::new("experience_date"),
            )?,
            location: non_blank(value.location).unwrap_or_default(),
            follow_up: value.follow_up.unwrap_or(false),
            suggestions: value.suggestions.unwrap_or_default(),
        })
    }
}

/// Request body for `PUT /api/feedbacks/{id}`. The submitter, related
/// complaint, experience date, and location are fixed at submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateFeedbackRequest {
    /// Full name.
    pub full_name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Feedback type label.
    pub feedback_type: Option<String>,
    /// Free-form reference supplied by the submitter.
    pub reference_id: Option<String>,
    /// Overall rating, 1 to 5.
    pub rating: Option<i64>,
    /// Experience rating, 1 to 5.
    pub experience_rating: Option<i64>,
    /// Feedback text.
    pub detailed_feedback: Option<String>,
    /// Aspects the feedback covers.
    pub feedback_categories: Option<Vec<String>>,
    /// Attachment URL.
    pub attachment_url: Option<String>,
    /// Whether the submitter wants a follow-up.
    pub follow_up: Option<bool>,
    /// Improvement suggestions.
    pub suggestions: Option<String>,
}

impl TryFrom<UpdateFeedbackRequest> for FeedbackPatch {
    type Error = Error;

    fn try_from(value: UpdateFeedbackRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            full_name: value.full_name,
            email: value
                .email
                .map(|raw| EmailAddress::parse("email", &raw))
                .transpose()?,
            feedback_type: parse_optional_label(value.feedback_type)?,
            reference_id: value.reference_id,
            rating: value.rating.map(parse_rating).transpose()?,
            experience_rating: value.experience_rating.map(parse_experience).transpose()?,
            detailed_feedback: value.detailed_feedback,
            feedback_categories: value.feedback_categories.map(parse_categories).transpose()?,
            attachment_url: value.attachment_url,
            follow_up: value.follow_up,
            suggestions: value.suggestions,
        })
    }
}

/// Query parameters for `GET /api/feedbacks`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(default, rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct FeedbackListQuery {
    /// Case-insensitive match on name, email, detailed feedback, or suggestions.
    pub search: Option<String>,
    /// Feedback type filter.
    pub feedback_type: Option<String>,
    /// Minimum star rating.
    pub rating: Option<String>,
}

impl TryFrom<FeedbackListQuery> for FeedbackFilter {
    type Error = Error;

    fn try_from(value: FeedbackListQuery) -> Result<Self, Self::Error> {
        let min_rating = non_blank(value.rating)
            .map(|raw| {
                raw.parse::<i64>()
                    .map_err(|_| Error::from(FieldError::OutOfRange {
                        field: "rating",
                        min: 1,
                        max: 5,
                    }))
                    .and_then(parse_rating)
            })
            .transpose()?;
        Ok(Self {
            search: non_blank(value.search),
            feedback_type: parse_optional_label(value.feedback_type)?,
            min_rating: min_rating.map(Rating::value),
        })
    }
}

/// List feedback, newest first.
#[utoipa::path(
    get,
    path = "/api/feedbacks",
    params(FeedbackListQuery),
    responses(
        (status = 200, description = "Feedback", body = [FeedbackResponse]),
        (status = 400, description = "Invalid filter", body = ErrorSchema)
    ),
    tags = ["feedbacks"],
    operation_id = "listFeedbacks"
)]
#[get("/feedbacks")]
pub async fn list_feedbacks(
    state: web::Data<HttpState>,
    query: web::Query<FeedbackListQuery>,
) -> ApiResult<web::Json<Vec<FeedbackResponse>>> {
    let filter = FeedbackFilter::try_from(query.into_inner())?;
    let feedbacks = state.feedbacks.list_feedbacks(&filter).await?;
    Ok(web::Json(
        feedbacks.into_iter().map(FeedbackResponse::from).collect(),
    ))
}

/// Submit feedback.
#[utoipa::path(
    post,
    path = "/api/feedbacks",
    request_body = CreateFeedbackRequest,
    responses(
        (status = 201, description = "Feedback recorded", body = FeedbackResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorSchema)
    ),
    tags = ["feedbacks"],
    operation_id = "createFeedback"
)]
#[post("/feedbacks")]
pub async fn create_feedback(
    state: web::Data<HttpState>,
    payload: web::Json<CreateFeedbackRequest>,
) -> ApiResult<HttpResponse> {
    let details = FeedbackDetails::try_from(payload.into_inner())?;
    let feedback = state.feedbacks.create_feedback(details).await?;
    Ok(HttpResponse::Created().json(FeedbackResponse::from(feedback)))
}

/// Fetch one feedback entry.
#[utoipa::path(
    get,
    path = "/api/feedbacks/{id}",
    params(("id" = Uuid, Path, description = "Feedback record id")),
    responses(
        (status = 200, description = "Feedback", body = FeedbackResponse),
        (status = 404, description = "Feedback not found", body = ErrorSchema)
    ),
    tags = ["feedbacks"],
    operation_id = "getFeedback"
)]
#[get("/feedbacks/{id}")]
pub async fn get_feedback(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<FeedbackResponse>> {
    let id = parse_uuid(path.into_inner(), FEEDBACK_ID_PATH)?;
    let feedback = state.feedbacks.get_feedback(&id).await?;
    Ok(web::Json(feedback.into()))
}

/// Update feedback.
#[utoipa::path(
    put,
    path = "/api/feedbacks/{id}",
    params(("id" = Uuid, Path, description = "Feedback record id")),
    request_body = UpdateFeedbackRequest,
    responses(
        (status = 200, description = "Updated feedback", body = FeedbackResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Feedback not found", body = ErrorSchema)
    ),
    tags = ["feedbacks"],
    operation_id = "updateFeedback"
)]
#[put("/feedbacks/{id}")]
pub async fn update_feedback(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateFeedbackRequest>,
) -> ApiResult<web::Json<FeedbackResponse>> {
    let id = parse_uuid(path.into_inner(), FEEDBACK_ID_PATH)?;
    let patch = FeedbackPatch::try_from(payload.into_inner())?;
    let feedback = state.feedbacks.update_feedback(&id, patch).await?;
    Ok(web::Json(feedback.into()))
}

/// Delete feedback, returning it.
#[utoipa::path(
    delete,
    path = "/api/feedbacks/{id}",
    params(("id" = Uuid, Path, description = "Feedback record id")),
    responses(
        (status = 200, description = "Feedback deleted", body = FeedbackDeletedResponse),
        (status = 404, description = "Feedback not found", body = ErrorSchema)
    ),
    tags = ["feedbacks"],
    operation_id = "deleteFeedback"
)]
#[delete("/feedbacks/{id}")]
pub async fn delete_feedback(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<FeedbackDeletedResponse>> {
    let id = parse_uuid(path.into_inner(), FEEDBACK_ID_PATH)?;
    let removed = state.feedbacks.delete_feedback(&id).await?;
    Ok(web::Json(FeedbackDeletedResponse {
        message: "Feedback deleted successfully".to_owned(),
        feedback: removed.into(),
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::{Value, json};

    use crate::inbound::http::test_utils::{memory_state, test_app};

    fn feedback_body() -> Value {
        json!({
            "user_id": "USR001",
            "full_name": "Mary Seacole",
            "email": "Mary@Example.org",
            "feedback_type": "service",
            "rating": 4,
            "experience_rating": 80,
            "detailed_feedback": "Crew arrived quickly",
            "feedback_categories": ["timeliness", "communication"],
            "experience_date": "2025-05-30",
            "location": "Kingston",
        })
    }

    #[actix_web::test]
    async fn records_feedback_with_snake_case_keys() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/feedbacks")
                .set_json(feedback_body())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["email"], "mary@example.org");
        assert_eq!(body["feedback_categories"], json!(["timeliness", "communication"]));
        assert_eq!(body["follow_up"], false);
        assert_eq!(body["complaint_id"], Value::Null);
        assert_eq!(body["experience_date"], "2025-05-30T00:00:00Z");
        assert!(body.get("createdAt").is_some());
    }

    #[actix_web::test]
    async fn rejects_out_of_range_ratings_and_unknown_categories() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        for (key, value, field) in [
            ("rating", json!(6), "rating"),
            ("experience_rating", json!(101), "experience_rating"),
            ("feedback_categories", json!(["vibes"]), "feedback_categories"),
            ("feedback_type", json!("praise"), "feedback_type"),
        ] {
            let mut body = feedback_body();
            body[key] = value;
            let response = actix_test::call_service(
                &app,
                actix_test::TestRequest::post()
                    .uri("/api/feedbacks")
                    .set_json(body)
                    .to_request(),
            )
            .await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{key}");
            let body: Value = actix_test::read_body_json(response).await;
            assert_eq!(body["details"]["field"], field);
        }
    }

    #[actix_web::test]
    async fn filters_by_minimum_rating_and_type() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        for rating in [2, 5] {
            let mut body = feedback_body();
            body["rating"] = json!(rating);
            let _: Value = actix_test::call_and_read_body_json(
                &app,
                actix_test::TestRequest::post()
                    .uri("/api/feedbacks")
                    .set_json(body)
                    .to_request(),
            )
            .await;
        }

        let listed: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/feedbacks?rating=4&feedbackType=service")
                .to_request(),
        )
        .await;
        assert_eq!(listed.as_array().map(Vec::len), Some(1));
        assert_eq!(listed[0]["rating"], 5);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/feedbacks?rating=lots")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn update_and_delete_round_trip() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let created: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/feedbacks")
                .set_json(feedback_body())
                .to_request(),
        )
        .await;
        let uri = format!("/api/feedbacks/{}", created["id"].as_str().expect("id"));

        let updated: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::put()
                .uri(&uri)
                .set_json(json!({"follow_up": true, "rating": 3}))
                .to_request(),
        )
        .await;
        assert_eq!(updated["follow_up"], true);
        assert_eq!(updated["rating"], 3);
        assert_eq!(updated["full_name"], "Mary Seacole");

        let deleted: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::delete().uri(&uri).to_request(),
        )
        .await;
        assert_eq!(deleted["message"], "Feedback deleted successfully");

        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(&uri).to_request())
                .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
