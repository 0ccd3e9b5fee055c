//! Dashboard service implementing [`DashboardQuery`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::analytics::DashboardSummary;
use crate::domain::complaint::ComplaintFilter;
use crate::domain::feedback::FeedbackFilter;
use crate::domain::ports::{
    ComplaintRepository, DashboardQuery, FeedbackRepository, UserRepository,
};
use crate::domain::service_support::{
    map_complaint_repository_error, map_feedback_repository_error, map_user_repository_error,
};
use crate::domain::user::UserFilter;

/// Computes the summary in memory from full repository listings.
pub struct DashboardService<U: ?Sized, C: ?Sized, F: ?Sized> {
    users: Arc<U>,
    complaints: Arc<C>,
    feedbacks: Arc<F>,
}

impl<U, C, F> DashboardService<U, C, F>
where
    U: UserRepository + ?Sized,
    C: ComplaintRepository + ?Sized,
    F: FeedbackRepository + ?Sized,
{
    /// Build the service over the three record sources.
    pub fn new(users: Arc<U>, complaints: Arc<C>, feedbacks: Arc<F>) -> Self {
        Self {
            users,
            complaints,
            feedbacks,
        }
    }
}

#[async_trait]
impl<U, C, F> DashboardQuery for DashboardService<U, C, F>
where
    U: UserRepository + ?Sized,
    C: ComplaintRepository + ?Sized,
    F: FeedbackRepository + ?Sized,
{
    async fn dashboard_summary(&self) -> Result<DashboardSummary, Error> {
        let user_filter = UserFilter::default();
        let complaint_filter = ComplaintFilter::any();
        let feedback_filter = FeedbackFilter::default();
        let (users, complaints, feedbacks) = tokio::try_join!(
            async {
                self.users
                    .list(&user_filter)
                    .await
                    .map_err(map_user_repository_error)
            },
            async {
                self.complaints
                    .list(&complaint_filter)
                    .await
                    .map_err(map_complaint_repository_error)
            },
            async {
                self.feedbacks
                    .list(&feedback_filter)
                    .await
                    .map_err(map_feedback_repository_error)
            },
        )?;
        Ok(DashboardSummary::compute(&users, &complaints, &feedbacks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::complaint::StatusFilter;
    use crate::domain::ports::{
        FeedbackRepositoryError, MockComplaintRepository, MockFeedbackRepository,
        MockUserRepository,
    };

    #[tokio::test]
    async fn closed_complaints_are_counted() {
        let mut users = MockUserRepository::new();
        users.expect_list().times(1).return_once(|_| Ok(Vec::new()));
        let mut complaints = MockComplaintRepository::new();
        complaints
            .expect_list()
            .withf(|filter| filter.status == StatusFilter::Any)
            .times(1)
            .return_once(|_| Ok(Vec::new()));
        let mut feedbacks = MockFeedbackRepository::new();
        feedbacks.expect_list().times(1).return_once(|_| Ok(Vec::new()));

        let service = DashboardService::new(
            Arc::new(users),
            Arc::new(complaints),
            Arc::new(feedbacks),
        );
        let summary = service.dashboard_summary().await.expect("summary");

        assert_eq!(summary.total_complaints, 0);
    }

    #[tokio::test]
    async fn repository_failures_surface() {
        let mut users = MockUserRepository::new();
        users.expect_list().return_once(|_| Ok(Vec::new()));
        let mut complaints = MockComplaintRepository::new();
        complaints.expect_list().return_once(|_| Ok(Vec::new()));
        let mut feedbacks = MockFeedbackRepository::new();
        feedbacks
            .expect_list()
            .return_once(|_| Err(FeedbackRepositoryError::connection("refused")));

        let service = DashboardService::new(
            Arc::new(users),
            Arc::new(complaints),
            Arc::new(feedbacks),
        );
        let err = service.dashboard_summary().await.expect_err("outage");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
