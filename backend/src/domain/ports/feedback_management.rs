//! Driving port for citizen feedback.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::feedback::{Feedback, FeedbackDetails, FeedbackFilter, FeedbackPatch};

/// Feedback use-cases exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackManagement: Send + Sync {
    /// Feedback matching `filter`, newest first.
    async fn list_feedbacks(&self, filter: &FeedbackFilter) -> Result<Vec<Feedback>, Error>;

    /// Feedback by record id; `NotFound` when absent.
    async fn get_feedback(&self, id: &Uuid) -> Result<Feedback, Error>;

    /// Store validated feedback.
    async fn create_feedback(&self, details: FeedbackDetails) -> Result<Feedback, Error>;

    /// Apply `patch`.
    async fn update_feedback(&self, id: &Uuid, patch: FeedbackPatch) -> Result<Feedback, Error>;

    /// Hard delete, returning the removed feedback.
    async fn delete_feedback(&self, id: &Uuid) -> Result<Feedback, Error>;
}
