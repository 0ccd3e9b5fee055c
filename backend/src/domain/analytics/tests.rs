//! Dashboard aggregation over small hand-built data sets.

use chrono::{Duration, TimeZone};
use rstest::rstest;

use super::*;
use crate::domain::complaint::ComplaintDetails;
use crate::domain::feedback::{ExperienceRating, FeedbackDetails, FeedbackType, Rating};
use crate::domain::password::PasswordHash;
use crate::domain::sequence::SequentialId;
use crate::domain::user::{Role, UserProfile};
use crate::domain::validation::EmailAddress;

const STORED_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHRzYWx0$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

fn day(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, month, day, 10, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn user(n: u32, role: Role) -> User {
    User {
        id: Uuid::new_v4(),
        user_id: SequentialId::new(format!("USR{n:03}")).expect("id"),
        full_name: format!("Resident {n}"),
        email: EmailAddress::parse("email", &format!("resident{n}@example.org")).expect("email"),
        password_hash: PasswordHash::from_phc(STORED_HASH.to_owned()).expect("hash"),
        role,
        is_active: true,
        profile: UserProfile::default(),
        created_at: day(1, 1),
        updated_at: day(1, 1),
    }
}

fn complaint(
    categories: &[&str],
    status: ComplaintStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Complaint {
    Complaint {
        id: Uuid::new_v4(),
        complaint_id: SequentialId::new("CMP0001").expect("id"),
        details: ComplaintDetails {
            title: "Pothole".to_owned(),
            category: categories.iter().map(|c| (*c).to_owned()).collect(),
            complaint_type: "Road".to_owned(),
            area_type: "Urban".to_owned(),
            description: "Deep pothole".to_owned(),
            days: 1,
            image: None,
            location: "Main Street".to_owned(),
            coordinates: None,
        },
        reporter_id: None,
        status,
        is_closed: false,
        created_at,
        updated_at,
    }
}

fn feedback(feedback_type: FeedbackType, rating: i64) -> Feedback {
    Feedback::new(
        Uuid::new_v4(),
        FeedbackDetails {
            user_id: "USR001".to_owned(),
            complaint_id: None,
            full_name: "Resident 1".to_owned(),
            email: EmailAddress::parse("email", "resident1@example.org").expect("email"),
            feedback_type,
            reference_id: String::new(),
            rating: Rating::new(rating).expect("rating"),
            experience_rating: ExperienceRating::new(70).expect("experience"),
            detailed_feedback: "Fine".to_owned(),
            feedback_categories: Vec::new(),
            attachment_url: String::new(),
            experience_date: day(2, 1),
            location: "Main Street".to_owned(),
            follow_up: false,
            suggestions: String::new(),
        },
        day(2, 2),
    )
}

fn labels(counts: &[LabelCount]) -> Vec<(&str, u64)> {
    counts
        .iter()
        .map(|entry| (entry.label.as_str(), entry.count))
        .collect()
}

#[test]
fn empty_inputs_produce_zeroes() {
    let summary = DashboardSummary::compute(&[], &[], &[]);
    assert_eq!(summary.total_users, 0);
    assert!(summary.avg_resolution_time.abs() < f64::EPSILON);
    assert!(summary.resolution_time_trend.is_empty());
    assert!(summary.complaints_by_category.is_empty());
}

#[test]
fn counts_totals_and_groups() {
    let users = [
        user(1, Role::User),
        user(2, Role::User),
        user(3, Role::Admin),
    ];
    let complaints = [
        complaint(&["Roads", "Safety"], ComplaintStatus::Pending, day(3, 1), day(3, 1)),
        complaint(&["Roads"], ComplaintStatus::InProgress, day(3, 1), day(3, 2)),
        complaint(&["Water"], ComplaintStatus::Pending, day(3, 1), day(3, 1)),
    ];
    let feedbacks = [
        feedback(FeedbackType::Service, 4),
        feedback(FeedbackType::Service, 5),
        feedback(FeedbackType::Suggestion, 3),
    ];

    let summary = DashboardSummary::compute(&users, &complaints, &feedbacks);

    assert_eq!(summary.total_users, 3);
    assert_eq!(summary.total_complaints, 3);
    assert_eq!(summary.pending_complaints, 2);
    assert_eq!(summary.total_feedbacks, 3);
    assert_eq!(
        labels(&summary.complaints_by_category),
        [("Roads", 2), ("Safety", 1), ("Water", 1)]
    );
    assert_eq!(
        labels(&summary.complaints_by_status),
        [("Pending", 2), ("In Progress", 1)]
    );
    assert_eq!(
        labels(&summary.feedbacks_by_category),
        [("service", 2), ("suggestion", 1)]
    );
    assert_eq!(labels(&summary.users_by_role), [("user", 2), ("admin", 1)]);
    assert_eq!(summary.all_feedbacks.len(), 3);
    assert_eq!(summary.all_feedbacks[0].feedback_type, "service");
}

#[rstest]
#[case(Duration::hours(1), 1)]
#[case(Duration::days(2), 2)]
#[case(Duration::days(2) + Duration::minutes(1), 3)]
fn resolution_days_round_up(#[case] elapsed: Duration, #[case] expected: u64) {
    let created = day(5, 1);
    let resolved = complaint(&["Roads"], ComplaintStatus::Resolved, created, created + elapsed);
    assert_eq!(resolution_days(&resolved), expected);
}

#[test]
fn averages_resolution_time_and_trend_by_month() {
    let complaints = [
        complaint(&["Roads"], ComplaintStatus::Resolved, day(1, 1), day(1, 3)),
        complaint(&["Roads"], ComplaintStatus::Resolved, day(1, 10), day(1, 14)),
        complaint(&["Water"], ComplaintStatus::Resolved, day(2, 20), day(3, 1)),
        complaint(&["Water"], ComplaintStatus::Pending, day(1, 1), day(6, 1)),
    ];

    let summary = DashboardSummary::compute(&[], &complaints, &[]);

    // 2 + 4 + 9 days over three resolved complaints.
    assert!((summary.avg_resolution_time - 5.0).abs() < f64::EPSILON);
    let trend: Vec<(&str, f64)> = summary
        .resolution_time_trend
        .iter()
        .map(|period| (period.period.as_str(), period.avg_days))
        .collect();
    assert_eq!(trend, [("Jan-25", 3.0), ("Mar-25", 9.0)]);
}
