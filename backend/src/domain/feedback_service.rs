//! Feedback service implementing [`FeedbackManagement`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::feedback::{Feedback, FeedbackDetails, FeedbackFilter, FeedbackPatch};
use crate::domain::ports::{FeedbackManagement, FeedbackRepository};
use crate::domain::service_support::map_feedback_repository_error;

/// Feedback service backed by a repository.
pub struct FeedbackService<R: ?Sized> {
    feedbacks: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> FeedbackService<R>
where
    R: FeedbackRepository + ?Sized,
{
    /// Build the service.
    pub fn new(feedbacks: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { feedbacks, clock }
    }

    async fn fetch(&self, id: &Uuid) -> Result<Feedback, Error> {
        self.feedbacks
            .find_by_id(id)
            .await
            .map_err(map_feedback_repository_error)?
            .ok_or_else(not_found)
    }
}

fn not_found() -> Error {
    Error::not_found("Feedback not found")
}

#[async_trait]
impl<R> FeedbackManagement for FeedbackService<R>
where
    R: FeedbackRepository + ?Sized,
{
    async fn list_feedbacks(&self, filter: &FeedbackFilter) -> Result<Vec<Feedback>, Error> {
        self.feedbacks
            .list(filter)
            .await
            .map_err(map_feedback_repository_error)
    }

    async fn get_feedback(&self, id: &Uuid) -> Result<Feedback, Error> {
        self.fetch(id).await
    }

    async fn create_feedback(&self, details: FeedbackDetails) -> Result<Feedback, Error> {
        let feedback = Feedback::new(Uuid::new_v4(), details, self.clock.utc());
        self.feedbacks
            .insert(&feedback)
            .await
            .map_err(map_feedback_repository_error)?;
        info!(id = %feedback.id, kind = %feedback.details.feedback_type, "feedback received");
        Ok(feedback)
    }

    async fn update_feedback(&self, id: &Uuid, patch: FeedbackPatch) -> Result<Feedback, Error> {
        let mut feedback = self.fetch(id).await?;
        feedback.apply(patch, self.clock.utc());
        let found = self
            .feedbacks
            .update(&feedback)
            .await
            .map_err(map_feedback_repository_error)?;
        if !found {
            return Err(not_found());
        }
        Ok(feedback)
    }

    async fn delete_feedback(&self, id: &Uuid) -> Result<Feedback, Error> {
        self.feedbacks
            .delete(id)
            .await
            .map_err(map_feedback_repository_error)?
            .ok_or_else(not_found)
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::feedback::{ExperienceRating, FeedbackType, Rating};
    use crate::domain::ports::{FeedbackRepositoryError, MockFeedbackRepository};
    use crate::domain::service_support::fixtures::{fixture_clock, fixture_timestamp};
    use crate::domain::validation::EmailAddress;

    #[fixture]
    fn details() -> FeedbackDetails {
        FeedbackDetails {
            user_id: "USR002".to_owned(),
            complaint_id: None,
            full_name: "Rosalind Franklin".to_owned(),
            email: EmailAddress::parse("email", "rosalind@example.org").expect("email"),
            feedback_type: FeedbackType::AppExperience,
            reference_id: String::new(),
            rating: Rating::new(5).expect("rating"),
            experience_rating: ExperienceRating::new(90).expect("experience"),
            detailed_feedback: "Easy to report issues".to_owned(),
            feedback_categories: Vec::new(),
            attachment_url: String::new(),
            experience_date: fixture_timestamp(),
            location: "Leeds".to_owned(),
            follow_up: false,
            suggestions: String::new(),
        }
    }

    fn make_service(repo: MockFeedbackRepository) -> FeedbackService<MockFeedbackRepository> {
        FeedbackService::new(Arc::new(repo), fixture_clock())
    }

    #[rstest]
    #[tokio::test]
    async fn create_stamps_timestamps(details: FeedbackDetails) {
        let mut repo = MockFeedbackRepository::new();
        repo.expect_insert().times(1).return_once(|_| Ok(()));

        let feedback = make_service(repo)
            .create_feedback(details)
            .await
            .expect("feedback stored");

        assert_eq!(feedback.created_at, fixture_timestamp());
        assert_eq!(feedback.updated_at, fixture_timestamp());
    }

    #[rstest]
    #[tokio::test]
    async fn update_applies_the_patch(details: FeedbackDetails) {
        let existing = Feedback::new(Uuid::new_v4(), details, fixture_timestamp());
        let id = existing.id;
        let mut repo = MockFeedbackRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(existing)));
        repo.expect_update()
            .withf(|feedback| feedback.details.follow_up)
            .times(1)
            .return_once(|_| Ok(true));

        let updated = make_service(repo)
            .update_feedback(
                &id,
                FeedbackPatch {
                    follow_up: Some(true),
                    ..FeedbackPatch::default()
                },
            )
            .await
            .expect("feedback updated");

        assert!(updated.details.follow_up);
    }

    #[tokio::test]
    async fn missing_feedback_is_not_found() {
        let mut repo = MockFeedbackRepository::new();
        repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let err = make_service(repo)
            .get_feedback(&Uuid::new_v4())
            .await
            .expect_err("missing feedback");

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Feedback not found");
    }

    #[tokio::test]
    async fn connection_failures_are_unavailable() {
        let mut repo = MockFeedbackRepository::new();
        repo.expect_delete()
            .times(1)
            .return_once(|_| Err(FeedbackRepositoryError::connection("timeout")));

        let err = make_service(repo)
            .delete_feedback(&Uuid::new_v4())
            .await
            .expect_err("outage");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
