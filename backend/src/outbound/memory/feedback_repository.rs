//! In-memory feedback repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::feedback::{Feedback, FeedbackFilter};
use crate::domain::ports::{FeedbackRepository, FeedbackRepositoryError};

use super::table::{Row, Table};

impl Row for Feedback {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Process-local store for feedback.
#[derive(Debug)]
pub struct InMemoryFeedbackRepository {
    table: Table<Feedback>,
}

impl Default for InMemoryFeedbackRepository {
    fn default() -> Self {
        Self {
            table: Table::new("feedback"),
        }
    }
}

impl InMemoryFeedbackRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryFeedbackRepository {
    async fn insert(&self, feedback: &Feedback) -> Result<(), FeedbackRepositoryError> {
        self.table
            .with_rows(|rows| rows.push(feedback.clone()))
            .map_err(FeedbackRepositoryError::connection)
    }

    async fn update(&self, feedback: &Feedback) -> Result<bool, FeedbackRepositoryError> {
        self.table
            .replace(feedback)
            .map_err(FeedbackRepositoryError::connection)
    }

    async fn delete(&self, id: &Uuid) -> Result<Option<Feedback>, FeedbackRepositoryError> {
        self.table
            .remove(id)
            .map_err(FeedbackRepositoryError::connection)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Feedback>, FeedbackRepositoryError> {
        self.table
            .find(id)
            .map_err(FeedbackRepositoryError::connection)
    }

    async fn list(&self, filter: &FeedbackFilter) -> Result<Vec<Feedback>, FeedbackRepositoryError> {
        self.table
            .select(|feedback| filter.matches(feedback))
            .map_err(FeedbackRepositoryError::connection)
    }
}
