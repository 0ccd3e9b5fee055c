//! Dashboard figures derived from users, complaints, and feedback.
//!
//! Everything here is a pure computation over already-loaded records; the
//! service layer decides where the records come from.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

use super::complaint::{Complaint, ComplaintStatus};
use super::feedback::Feedback;
use super::user::User;

const MILLIS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

/// A label with the number of records carrying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCount {
    /// Group label.
    pub label: String,
    /// Records in the group.
    pub count: u64,
}

/// Mean resolution time for complaints resolved in one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionPeriod {
    /// Month label such as `Mar-25`.
    pub period: String,
    /// Mean whole days to resolution.
    pub avg_days: f64,
}

/// Compact feedback listing for the dashboard table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackDigest {
    /// Feedback record id.
    pub id: Uuid,
    /// Submitter name.
    pub full_name: String,
    /// Submitter email.
    pub email: String,
    /// Overall rating, 1 to 5.
    pub rating: u8,
    /// Experience rating, 1 to 5.
    pub experience_rating: u8,
    /// Feedback type label.
    pub feedback_type: String,
    /// Where the experience happened.
    pub location: String,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

/// Admin dashboard figures.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    /// Every user, active or not.
    pub total_users: u64,
    /// Every complaint, closed ones included.
    pub total_complaints: u64,
    /// Complaints still `Pending`.
    pub pending_complaints: u64,
    /// Every feedback entry.
    pub total_feedbacks: u64,
    /// Mean whole days from creation to last update over resolved
    /// complaints; zero when nothing is resolved.
    pub avg_resolution_time: f64,
    /// Each category entry of each complaint counts once.
    pub complaints_by_category: Vec<LabelCount>,
    /// Complaints grouped by status label.
    pub complaints_by_status: Vec<LabelCount>,
    /// Feedback grouped by feedback type.
    pub feedbacks_by_category: Vec<LabelCount>,
    /// Users grouped by role.
    pub users_by_role: Vec<LabelCount>,
    /// Oldest month first.
    pub resolution_time_trend: Vec<ResolutionPeriod>,
    /// Every feedback entry in repository order.
    pub all_feedbacks: Vec<FeedbackDigest>,
}

impl DashboardSummary {
    /// Derive every figure from the loaded records.
    pub fn compute(users: &[User], complaints: &[Complaint], feedbacks: &[Feedback]) -> Self {
        let resolved: Vec<(DateTime<Utc>, u64)> = complaints
            .iter()
            .filter(|complaint| complaint.status == ComplaintStatus::Resolved)
            .map(|complaint| (complaint.updated_at, resolution_days(complaint)))
            .collect();

        Self {
            total_users: count(users.len()),
            total_complaints: count(complaints.len()),
            pending_complaints: count(
                complaints
                    .iter()
                    .filter(|complaint| complaint.status == ComplaintStatus::Pending)
                    .count(),
            ),
            total_feedbacks: count(feedbacks.len()),
            avg_resolution_time: mean(resolved.iter().map(|(_, days)| *days)),
            complaints_by_category: tally(
                complaints
                    .iter()
                    .flat_map(|complaint| complaint.details.category.iter().map(String::as_str)),
            ),
            complaints_by_status: tally(complaints.iter().map(|complaint| complaint.status.as_str())),
            feedbacks_by_category: tally(
                feedbacks
                    .iter()
                    .map(|feedback| feedback.details.feedback_type.as_str()),
            ),
            users_by_role: tally(users.iter().map(|user| user.role.as_str())),
            resolution_time_trend: trend(&resolved),
            all_feedbacks: feedbacks.iter().map(digest).collect(),
        }
    }
}

fn count(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

/// Whole days between creation and last update, rounded up.
fn resolution_days(complaint: &Complaint) -> u64 {
    (complaint.updated_at - complaint.created_at)
        .num_milliseconds()
        .unsigned_abs()
        .div_ceil(MILLIS_PER_DAY)
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "day counts stay far below 2^52 and the mean is reported as a float"
)]
fn mean(values: impl Iterator<Item = u64>) -> f64 {
    let (total, n) = values.fold((0_u64, 0_u64), |(total, n), days| {
        (total.saturating_add(days), n + 1)
    });
    if n == 0 {
        0.0
    } else {
        total as f64 / n as f64
    }
}

fn tally<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<LabelCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    let mut tallied: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount {
            label: label.to_owned(),
            count,
        })
        .collect();
    tallied.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    tallied
}

fn trend(resolved: &[(DateTime<Utc>, u64)]) -> Vec<ResolutionPeriod> {
    let mut months: BTreeMap<(i32, u32), (String, Vec<u64>)> = BTreeMap::new();
    for (resolved_at, days) in resolved {
        months
            .entry((resolved_at.year(), resolved_at.month()))
            .or_insert_with(|| (resolved_at.format("%b-%y").to_string(), Vec::new()))
            .1
            .push(*days);
    }
    months
        .into_values()
        .map(|(period, days)| ResolutionPeriod {
            period,
            avg_days: mean(days.into_iter()),
        })
        .collect()
}

fn digest(feedback: &Feedback) -> FeedbackDigest {
    let details = &feedback.details;
    FeedbackDigest {
        id: feedback.id,
        full_name: details.full_name.clone(),
        email: details.email.as_str().to_owned(),
        rating: details.rating.value(),
        experience_rating: details.experience_rating.value(),
        feedback_type: details.feedback_type.as_str().to_owned(),
        location: details.location.clone(),
        created_at: feedback.created_at,
    }
}

#[cfg(test)]
mod tests;
