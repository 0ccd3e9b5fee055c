//! PostgreSQL-backed [`FeedbackRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::feedback::{
    ExperienceRating, Feedback, FeedbackCategory, FeedbackDetails, FeedbackFilter, FeedbackType,
    Rating,
};
use crate::domain::ports::{FeedbackRepository, FeedbackRepositoryError};
use crate::domain::validation::EmailAddress;

use super::diesel_helpers::{
    DieselFailure, classify_diesel_error, like_pattern, pool_error_message,
};
use super::models::FeedbackRow;
use super::pool::{DbPool, PooledPgConnection};
use super::schema::feedbacks;

/// PostgreSQL store for feedback.
#[derive(Clone)]
pub struct DieselFeedbackRepository {
    pool: DbPool,
}

impl DieselFeedbackRepository {
    /// Repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn connection(&self) -> Result<PooledPgConnection<'_>, FeedbackRepositoryError> {
        self.pool
            .get()
            .await
            .map_err(|err| FeedbackRepositoryError::connection(pool_error_message(err)))
    }
}

fn map_diesel_error(error: diesel::result::Error) -> FeedbackRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => FeedbackRepositoryError::connection(message),
        DieselFailure::Query(message) => FeedbackRepositoryError::query(message),
        DieselFailure::UniqueViolation { .. } => {
            FeedbackRepositoryError::query("unexpected unique violation")
        }
    }
}

fn corrupt(column: &str, detail: impl std::fmt::Display) -> FeedbackRepositoryError {
    FeedbackRepositoryError::query(format!("invalid {column} in database: {detail}"))
}

fn row_to_feedback(row: FeedbackRow) -> Result<Feedback, FeedbackRepositoryError> {
    let email = EmailAddress::parse("email", &row.email).map_err(|err| corrupt("email", err))?;
    let feedback_type = FeedbackType::parse_label(&row.feedback_type)
        .map_err(|err| corrupt("feedback_type", err))?;
    let rating = Rating::new(i64::from(row.rating)).map_err(|err| corrupt("rating", err))?;
    let experience_rating = ExperienceRating::new(i64::from(row.experience_rating))
        .map_err(|err| corrupt("experience_rating", err))?;
    let feedback_categories = row
        .feedback_categories
        .iter()
        .map(|raw| FeedbackCategory::parse_label(raw))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| corrupt("feedback_categories", err))?;

    Ok(Feedback {
        id: row.id,
        details: FeedbackDetails {
            user_id: row.user_id,
            complaint_id: row.complaint_id,
            full_name: row.full_name,
            email,
            feedback_type,
            reference_id: row.reference_id,
            rating,
            experience_rating,
            detailed_feedback: row.detailed_feedback,
            feedback_categories,
            attachment_url: row.attachment_url,
            experience_date: row.experience_date,
            location: row.location,
            follow_up: row.follow_up,
            suggestions: row.suggestions,
        },
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn feedback_to_row(feedback: &Feedback) -> FeedbackRow {
    let details = &feedback.details;
    FeedbackRow {
        id: feedback.id,
        user_id: details.user_id.clone(),
        complaint_id: details.complaint_id.clone(),
        full_name: details.full_name.clone(),
        email: details.email.as_str().to_owned(),
        feedback_type: details.feedback_type.as_str().to_owned(),
        reference_id: details.reference_id.clone(),
        rating: i16::from(details.rating.value()),
        experience_rating: i16::from(details.experience_rating.value()),
        detailed_feedback: details.detailed_feedback.clone(),
        feedback_categories: details
            .feedback_categories
            .iter()
            .map(|category| category.as_str().to_owned())
            .collect(),
        attachment_url: details.attachment_url.clone(),
        experience_date: details.experience_date,
        location: details.location.clone(),
        follow_up: details.follow_up,
        suggestions: details.suggestions.clone(),
        created_at: feedback.created_at,
        updated_at: feedback.updated_at,
    }
}

#[async_trait]
impl FeedbackRepository for DieselFeedbackRepository {
    async fn insert(&self, feedback: &Feedback) -> Result<(), FeedbackRepositoryError> {
        let mut conn = self.connection().await?;
        let row = feedback_to_row(feedback);
        diesel::insert_into(feedbacks::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, feedback: &Feedback) -> Result<bool, FeedbackRepositoryError> {
        let mut conn = self.connection().await?;
        let row = feedback_to_row(feedback);
        let updated = diesel::update(feedbacks::table.find(feedback.id))
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &Uuid) -> Result<Option<Feedback>, FeedbackRepositoryError> {
        let mut conn = self.connection().await?;
        let row: Option<FeedbackRow> = diesel::delete(feedbacks::table.find(*id))
            .returning(FeedbackRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_feedback).transpose()
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Feedback>, FeedbackRepositoryError> {
        let mut conn = self.connection().await?;
        let row: Option<FeedbackRow> = feedbacks::table
            .find(*id)
            .select(FeedbackRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_feedback).transpose()
    }

    async fn list(&self, filter: &FeedbackFilter) -> Result<Vec<Feedback>, FeedbackRepositoryError> {
        let mut conn = self.connection().await?;
        let mut query = feedbacks::table
            .select(FeedbackRow::as_select())
            .order(feedbacks::created_at.desc())
            .into_boxed();

        if let Some(needle) = filter.search.as_deref() {
            let pattern = like_pattern(needle);
            query = query.filter(
                feedbacks::full_name
                    .ilike(pattern.clone())
                    .or(feedbacks::email.ilike(pattern.clone()))
                    .or(feedbacks::detailed_feedback.ilike(pattern.clone()))
                    .or(feedbacks::suggestions.ilike(pattern)),
            );
        }
        if let Some(feedback_type) = filter.feedback_type {
            query = query.filter(feedbacks::feedback_type.eq(feedback_type.as_str()));
        }
        if let Some(min_rating) = filter.min_rating {
            query = query.filter(feedbacks::rating.ge(i16::from(min_rating)));
        }

        let rows: Vec<FeedbackRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_feedback).collect()
    }
}
