//! Port for feedback persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::feedback::{Feedback, FeedbackFilter};

use super::define_port_error;

define_port_error! {
    /// Errors raised by feedback repositories.
    pub enum FeedbackRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "feedback repository connection failed: {message}",
        /// The store was reached but the statement failed.
        Query { message: String } => "feedback repository query failed: {message}",
    }
}

/// Persistence port for feedback.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Insert feedback.
    async fn insert(&self, feedback: &Feedback) -> Result<(), FeedbackRepositoryError>;

    /// Returns `false` when no feedback has this record id.
    async fn update(&self, feedback: &Feedback) -> Result<bool, FeedbackRepositoryError>;

    /// Remove and return the feedback, if it existed.
    async fn delete(&self, id: &Uuid) -> Result<Option<Feedback>, FeedbackRepositoryError>;

    /// Feedback by record id.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Feedback>, FeedbackRepositoryError>;

    /// Feedback matching `filter`, newest first.
    async fn list(&self, filter: &FeedbackFilter) -> Result<Vec<Feedback>, FeedbackRepositoryError>;
}
