//! Repository error mapping shared by the domain services.

use tracing::warn;

use crate::domain::Error;
use crate::domain::ports::{
    ComplaintRepositoryError, ContactRepositoryError, FeedbackRepositoryError,
    UserRepositoryError,
};
use crate::domain::sequence::SequenceError;

/// Message returned when registering an email that is already taken.
pub(crate) const DUPLICATE_EMAIL_MESSAGE: &str = "User with that email already exists";

pub(crate) fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            warn!(%message, "user repository unavailable");
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateUserId { user_id } => {
            SequenceError::duplicate_id(user_id).into()
        }
        UserRepositoryError::DuplicateEmail { .. } => Error::conflict(DUPLICATE_EMAIL_MESSAGE),
    }
}

pub(crate) fn map_complaint_repository_error(error: ComplaintRepositoryError) -> Error {
    match error {
        ComplaintRepositoryError::Connection { message } => {
            warn!(%message, "complaint repository unavailable");
            Error::service_unavailable(format!("complaint repository unavailable: {message}"))
        }
        ComplaintRepositoryError::Query { message } => {
            Error::internal(format!("complaint repository error: {message}"))
        }
        ComplaintRepositoryError::DuplicateComplaintId { complaint_id } => {
            SequenceError::duplicate_id(complaint_id).into()
        }
    }
}

pub(crate) fn map_feedback_repository_error(error: FeedbackRepositoryError) -> Error {
    match error {
        FeedbackRepositoryError::Connection { message } => {
            warn!(%message, "feedback repository unavailable");
            Error::service_unavailable(format!("feedback repository unavailable: {message}"))
        }
        FeedbackRepositoryError::Query { message } => {
            Error::internal(format!("feedback repository error: {message}"))
        }
    }
}

pub(crate) fn map_contact_repository_error(error: ContactRepositoryError) -> Error {
    match error {
        ContactRepositoryError::Connection { message } => {
            warn!(%message, "contact repository unavailable");
            Error::service_unavailable(format!("contact repository unavailable: {message}"))
        }
        ContactRepositoryError::Query { message } => {
            Error::internal(format!("contact repository error: {message}"))
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Deterministic clock shared by the service tests.

    use std::sync::Arc;

    use chrono::{DateTime, Local, TimeZone, Utc};
    use mockable::Clock;

    pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    struct FixtureClock {
        utc_now: DateTime<Utc>,
    }

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc_now.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.utc_now
        }
    }

    pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
        Arc::new(FixtureClock {
            utc_now: fixture_timestamp(),
        })
    }
}
