//! Diesel row structs. Internal to the persistence adapters; repositories
//! convert them to and from domain types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{complaints, contacts, feedbacks, users};

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub location: String,
    pub work: String,
    /// Empty when not provided.
    pub gender: String,
    pub age: Option<i16>,
    pub volunteering: String,
    pub volunteering_types: Vec<String>,
    pub volunteering_days: String,
    pub role: String,
    pub is_active: bool,
    pub profile_pic: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = complaints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ComplaintRow {
    pub id: Uuid,
    pub complaint_id: String,
    pub title: String,
    pub category: Vec<String>,
    pub complaint_type: String,
    pub area_type: String,
    pub description: String,
    pub days: i32,
    pub image: Option<String>,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub reporter_id: Option<Uuid>,
    pub status: String,
    pub is_closed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = feedbacks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct FeedbackRow {
    pub id: Uuid,
    pub user_id: String,
    pub complaint_id: Option<String>,
    pub full_name: String,
    pub email: String,
    pub feedback_type: String,
    pub reference_id: String,
    pub rating: i16,
    pub experience_rating: i16,
    pub detailed_feedback: String,
    pub feedback_categories: Vec<String>,
    pub attachment_url: String,
    pub experience_date: DateTime<Utc>,
    pub location: String,
    pub follow_up: bool,
    pub suggestions: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ContactRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub reply_message: String,
    pub replied_at: Option<DateTime<Utc>>,
    pub user_id: Option<Uuid>,
    pub assigned_to: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
