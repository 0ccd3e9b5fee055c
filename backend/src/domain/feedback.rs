//! Citizen feedback on complaints, services, and the app itself.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::labels::labelled_enum;
use super::validation::{EmailAddress, FieldError, contains_ignore_case, in_range};

labelled_enum! {
    /// What the feedback is about.
    pub enum FeedbackType ("feedback_type") {
        Complaint => "complaint",
        Service => "service",
        AppExperience => "app_experience",
        Suggestion => "suggestion",
        Other => "other",
    }
}

labelled_enum! {
    /// Aspect of the service the feedback singles out.
    pub enum FeedbackCategory ("feedback_categories") {
        Timeliness => "timeliness",
        StaffBehavior => "staff_behavior",
        Cleanliness => "cleanliness",
        ResponseQuality => "response_quality",
        EaseOfUse => "ease_of_use",
        Communication => "communication",
        Accessibility => "accessibility",
        ClarityOfInformation => "clarity_of_information",
    }
}

/// Star rating, `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    /// Reject values outside `1..=5`.
    pub fn new(value: i64) -> Result<Self, FieldError> {
        bounded_u8("rating", value, 1, 5).map(Self)
    }

    /// Stars given.
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Overall experience score, `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExperienceRating(u8);

impl ExperienceRating {
    /// Reject values outside `0..=100`.
    pub fn new(value: i64) -> Result<Self, FieldError> {
        bounded_u8("experience_rating", value, 0, 100).map(Self)
    }

    /// Score given.
    pub const fn value(self) -> u8 {
        self.0
    }
}

fn bounded_u8(field: &'static str, value: i64, min: u8, max: u8) -> Result<u8, FieldError> {
    let value = in_range(field, value, i64::from(min), i64::from(max))?;
    u8::try_from(value).map_err(|_| FieldError::OutOfRange {
        field,
        min: i64::from(min),
        max: i64::from(max),
    })
}

/// Client-supplied feedback content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackDetails {
    /// Submitting user's identifier as sent by the client.
    pub user_id: String,
    /// Related complaint identifier, if the feedback concerns one.
    pub complaint_id: Option<String>,
    /// Submitter name.
    pub full_name: String,
    /// Contact address for follow-up.
    pub email: EmailAddress,
    /// What the feedback is about.
    pub feedback_type: FeedbackType,
    /// Free-form reference such as a ticket number.
    pub reference_id: String,
    /// Star rating.
    pub rating: Rating,
    /// Overall experience score.
    pub experience_rating: ExperienceRating,
    /// Body text.
    pub detailed_feedback: String,
    /// Aspects singled out.
    pub feedback_categories: Vec<FeedbackCategory>,
    /// Link to an attachment, empty when none.
    pub attachment_url: String,
    /// When the experience happened.
    pub experience_date: DateTime<Utc>,
    /// Where the experience happened.
    pub location: String,
    /// Whether the submitter wants a follow-up.
    pub follow_up: bool,
    /// Improvement suggestions, empty when none.
    pub suggestions: String,
}

/// Stored feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    /// Record identifier.
    pub id: Uuid,
    /// Submitted content.
    pub details: FeedbackDetails,
    /// Submission time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl Feedback {
    /// New feedback stamped with `now`.
    pub fn new(id: Uuid, details: FeedbackDetails, now: DateTime<Utc>) -> Self {
        Self {
            id,
            details,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the fields set in `patch` and bump `updated_at`.
    pub fn apply(&mut self, patch: FeedbackPatch, now: DateTime<Utc>) {
        let details = &mut self.details;
        if let Some(full_name) = patch.full_name {
            details.full_name = full_name;
        }
        if let Some(email) = patch.email {
            details.email = email;
        }
        if let Some(feedback_type) = patch.feedback_type {
            details.feedback_type = feedback_type;
        }
        if let Some(reference_id) = patch.reference_id {
            details.reference_id = reference_id;
        }
        if let Some(rating) = patch.rating {
            details.rating = rating;
        }
        if let Some(experience_rating) = patch.experience_rating {
            details.experience_rating = experience_rating;
        }
        if let Some(detailed_feedback) = patch.detailed_feedback {
            details.detailed_feedback = detailed_feedback;
        }
        if let Some(categories) = patch.feedback_categories {
            details.feedback_categories = categories;
        }
        if let Some(attachment_url) = patch.attachment_url {
            details.attachment_url = attachment_url;
        }
        if let Some(follow_up) = patch.follow_up {
            details.follow_up = follow_up;
        }
        if let Some(suggestions) = patch.suggestions {
            details.suggestions = suggestions;
        }
        self.updated_at = now;
    }
}

/// Partial update. The submitter, related complaint, experience date, and
/// location are fixed at submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackPatch {
    /// New submitter name.
    pub full_name: Option<String>,
    /// New contact address.
    pub email: Option<EmailAddress>,
    /// New feedback type.
    pub feedback_type: Option<FeedbackType>,
    /// New reference.
    pub reference_id: Option<String>,
    /// New star rating.
    pub rating: Option<Rating>,
    /// New experience score.
    pub experience_rating: Option<ExperienceRating>,
    /// New body text.
    pub detailed_feedback: Option<String>,
    /// Replacement category list.
    pub feedback_categories: Option<Vec<FeedbackCategory>>,
    /// New attachment link.
    pub attachment_url: Option<String>,
    /// New follow-up preference.
    pub follow_up: Option<bool>,
    /// New suggestions.
    pub suggestions: Option<String>,
}

/// Criteria for listing feedback. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackFilter {
    /// Case-insensitive match on name, email, detailed feedback, or suggestions.
    pub search: Option<String>,
    /// Exact feedback type.
    pub feedback_type: Option<FeedbackType>,
    /// Minimum star rating.
    pub min_rating: Option<u8>,
}

impl FeedbackFilter {
    /// True when `feedback` satisfies every set criterion.
    pub fn matches(&self, feedback: &Feedback) -> bool {
        let details = &feedback.details;
        let search_ok = self.search.as_deref().is_none_or(|needle| {
            contains_ignore_case(&details.full_name, needle)
                || contains_ignore_case(details.email.as_str(), needle)
                || contains_ignore_case(&details.detailed_feedback, needle)
                || contains_ignore_case(&details.suggestions, needle)
        });
        let type_ok = self
            .feedback_type
            .is_none_or(|wanted| wanted == details.feedback_type);
        let rating_ok = self
            .min_rating
            .is_none_or(|min| details.rating.value() >= min);
        search_ok && type_ok && rating_ok
    }
}
