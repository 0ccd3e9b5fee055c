//! Dashboard analytics endpoint.

use actix_web::{get, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::analytics::{DashboardSummary, FeedbackDigest, LabelCount, ResolutionPeriod};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Complaints carrying one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryCount {
    /// Category label.
    pub name: String,
    /// Number of records.
    pub count: u64,
}

/// Complaints in one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCount {
    /// Status label.
    pub status: String,
    /// Number of records.
    pub count: u64,
}

/// Feedback of one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeedbackTypeCount {
    /// Feedback type label.
    pub category: String,
    /// Number of records.
    pub count: u64,
}

/// Users holding one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RoleCount {
    /// Role label.
    pub role: String,
    /// Number of records.
    pub count: u64,
}

/// Mean resolution time for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionTrendPoint {
    /// Month label such as `Mar-25`.
    #[schema(example = "Mar-25")]
    pub period: String,
    /// Mean whole days to resolution.
    pub avg_days: f64,
}

/// Feedback row for the dashboard table. Keys follow the feedback
/// resource, snake case apart from `createdAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeedbackRow {
    /// Record identifier.
    pub id: Uuid,
    /// Full name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Overall rating, 1 to 5.
    pub rating: u8,
    /// Experience rating, 1 to 5.
    pub experience_rating: u8,
    /// Feedback type label.
    pub feedback_type: String,
    /// Free-text location.
    pub location: String,
    /// Creation time.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Response body for `GET /api/analytics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Every user, active or not.
    pub total_users: u64,
    /// Every complaint.
    pub total_complaints: u64,
    /// Complaints still pending.
    pub pending_complaints: u64,
    /// Every feedback entry.
    pub total_feedbacks: u64,
    /// Mean days to resolution across resolved complaints.
    pub avg_resolution_time: f64,
    /// Complaints grouped by category.
    pub complaints_by_category: Vec<CategoryCount>,
    /// Complaints grouped by status.
    pub complaints_by_status: Vec<StatusCount>,
    /// Feedback grouped by type.
    pub feedbacks_by_category: Vec<FeedbackTypeCount>,
    /// Users grouped by role.
    pub users_by_role: Vec<RoleCount>,
    /// Monthly resolution times, oldest first.
    pub resolution_time_trend: Vec<ResolutionTrendPoint>,
    /// Every feedback entry.
    pub all_feedbacks: Vec<FeedbackRow>,
}

fn relabel<T>(counts: Vec<LabelCount>, build: impl Fn(String, u64) -> T) -> Vec<T> {
    counts
        .into_iter()
        .map(|LabelCount { label, count }| build(label, count))
        .collect()
}

impl From<ResolutionPeriod> for ResolutionTrendPoint {
    fn from(value: ResolutionPeriod) -> Self {
        Self {
            period: value.period,
            avg_days: value.avg_days,
        }
    }
}

impl From<FeedbackDigest> for FeedbackRow {
    fn from(value: FeedbackDigest) -> Self {
        Self {
            id: value.id,
            full_name: value.full_name,
            email: value.email,
            rating: value.rating,
            experience_rating: value.experience_rating,
            feedback_type: value.feedback_type,
            location: value.location,
            created_at: value.created_at,
        }
    }
}

impl From<DashboardSummary> for DashboardResponse {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            total_users: summary.total_users,
            total_complaints: summary.total_complaints,
            pending_complaints: summary.pending_complaints,
            total_feedbacks: summary.total_feedbacks,
            avg_resolution_time: summary.avg_resolution_time,
            complaints_by_category: relabel(summary.complaints_by_category, |name, count| {
                CategoryCount { name, count }
            }),
            complaints_by_status: relabel(summary.complaints_by_status, |status, count| {
                StatusCount { status, count }
            }),
            feedbacks_by_category: relabel(summary.feedbacks_by_category, |category, count| {
                FeedbackTypeCount { category, count }
            }),
            users_by_role: relabel(summary.users_by_role, |role, count| RoleCount {
                role,
                count,
            }),
            resolution_time_trend: summary
                .resolution_time_trend
                .into_iter()
                .map(ResolutionTrendPoint::from)
                .collect(),
            all_feedbacks: summary
                .all_feedbacks
                .into_iter()
                .map(FeedbackRow::from)
                .collect(),
        }
    }
}

/// Dashboard summary over every stored record.
#[utoipa::path(
    get,
    path = "/api/analytics",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardResponse),
        (status = 503, description = "Backing store unavailable", body = ErrorSchema)
    ),
    tags = ["analytics"],
    operation_id = "getAnalytics"
)]
#[get("/analytics")]
pub async fn analytics(state: web::Data<HttpState>) -> ApiResult<web::Json<DashboardResponse>> {
    let summary = state.dashboard.dashboard_summary().await?;
    Ok(web::Json(summary.into()))
}
