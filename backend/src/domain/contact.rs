//! Messages sent through the public contact form.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::labels::labelled_enum;
use super::validation::{EmailAddress, contains_ignore_case};

/// Minimum trimmed subject length.
pub const SUBJECT_MIN_LEN: usize = 5;
/// Minimum trimmed message length.
pub const MESSAGE_MIN_LEN: usize = 10;

labelled_enum! {
    /// Handling state of a contact message.
    #[derive(Default)]
    pub enum ContactStatus ("status") {
        #[default]
        Open => "Open",
        InReview => "In Review",
        Replied => "Replied",
        Closed => "Closed",
    }
}

/// A stored contact-form message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Record identifier.
    pub id: Uuid,
    /// Sender name.
    pub name: String,
    /// Sender email.
    pub email: EmailAddress,
    /// Optional phone number, empty when not given.
    pub phone: String,
    /// Message subject.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// Handling state.
    pub status: ContactStatus,
    /// Reply sent by an administrator, empty until one is written.
    pub reply_message: String,
    /// Set when the message moves to `Replied` with a reply present.
    pub replied_at: Option<DateTime<Utc>>,
    /// Record id of the signed-in account that sent the message, if any.
    pub user_id: Option<Uuid>,
    /// Record id of the administrator handling the message.
    pub assigned_to: Option<Uuid>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Validated submission. Subject and message lengths are checked by the
/// caller building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    /// Sender name.
    pub name: String,
    /// Sender email.
    pub email: EmailAddress,
    /// Optional phone number.
    pub phone: String,
    /// Message subject.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// Record id of the sending account, when known.
    pub user_id: Option<Uuid>,
}

impl NewContact {
    /// Materialise an open, unassigned contact stamped at `now`.
    pub fn into_contact(self, id: Uuid, now: DateTime<Utc>) -> Contact {
        Contact {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            subject: self.subject,
            message: self.message,
            status: ContactStatus::Open,
            reply_message: String::new(),
            replied_at: None,
            user_id: self.user_id,
            assigned_to: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    /// New sender name.
    pub name: Option<String>,
    /// New sender email.
    pub email: Option<EmailAddress>,
    /// New phone number.
    pub phone: Option<String>,
    /// New subject.
    pub subject: Option<String>,
    /// New message body.
    pub message: Option<String>,
    /// New handling state.
    pub status: Option<ContactStatus>,
    /// New reply text.
    pub reply_message: Option<String>,
    /// `Some(None)` clears the assignee.
    pub assigned_to: Option<Option<Uuid>>,
}

impl Contact {
    /// Apply `patch`. Moving to `Replied` with a non-empty reply stamps
    /// `replied_at`.
    pub fn apply(&mut self, patch: ContactPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(subject) = patch.subject {
            self.subject = subject;
        }
        if let Some(message) = patch.message {
            self.message = message;
        }
        if let Some(reply_message) = patch.reply_message {
            self.reply_message = reply_message;
        }
        if let Some(assigned_to) = patch.assigned_to {
            self.assigned_to = assigned_to;
        }
        if let Some(status) = patch.status {
            self.status = status;
            if status == ContactStatus::Replied && !self.reply_message.trim().is_empty() {
                self.replied_at = Some(now);
            }
        }
        self.updated_at = now;
    }
}

/// Listing filter. Every present criterion must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    /// Case-insensitive match on subject, message, email, or name.
    pub search: Option<String>,
    /// Exact status.
    pub status: Option<ContactStatus>,
}

impl ContactFilter {
    /// Whether `contact` passes the filter.
    pub fn matches(&self, contact: &Contact) -> bool {
        let search_ok = self.search.as_deref().is_none_or(|needle| {
            contains_ignore_case(&contact.subject, needle)
                || contains_ignore_case(&contact.message, needle)
                || contains_ignore_case(contact.email.as_str(), needle)
                || contains_ignore_case(&contact.name, needle)
        });
        let status_ok = self.status.is_none_or(|status| status == contact.status);
        search_ok && status_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::{fixture, rstest};

    #[fixture]
    fn contact() -> Contact {
        let now = Utc
            .with_ymd_and_hms(2025, 4, 1, 9, 30, 0)
            .single()
            .expect("valid timestamp");
        NewContact {
            name: "Ida Wells".to_owned(),
            email: EmailAddress::parse("email", "ida@example.org").expect("email"),
            phone: String::new(),
            subject: "Bin collection".to_owned(),
            message: "The bins were skipped again this week".to_owned(),
            user_id: None,
        }
        .into_contact(Uuid::nil(), now)
    }

    #[rstest]
    fn new_contacts_are_open(contact: Contact) {
        assert_eq!(contact.status, ContactStatus::Open);
        assert!(contact.replied_at.is_none());
    }

    #[rstest]
    fn replying_stamps_replied_at(mut contact: Contact) {
        let later = contact.created_at + Duration::hours(2);
        contact.apply(
            ContactPatch {
                status: Some(ContactStatus::Replied),
                reply_message: Some("Rescheduled for Friday".to_owned()),
                ..ContactPatch::default()
            },
            later,
        );
        assert_eq!(contact.replied_at, Some(later));
    }

    #[rstest]
    fn replied_without_message_is_not_stamped(mut contact: Contact) {
        let later = contact.created_at + Duration::hours(2);
        contact.apply(
            ContactPatch {
                status: Some(ContactStatus::Replied),
                ..ContactPatch::default()
            },
            later,
        );
        assert_eq!(contact.status, ContactStatus::Replied);
        assert!(contact.replied_at.is_none());
    }

    #[rstest]
    fn assignment_can_be_set_and_cleared(mut contact: Contact) {
        let admin = Uuid::from_u128(7);
        let later = contact.created_at + Duration::minutes(5);
        contact.apply(
            ContactPatch {
                assigned_to: Some(Some(admin)),
                ..ContactPatch::default()
            },
            later,
        );
        assert_eq!(contact.assigned_to, Some(admin));

        contact.apply(
            ContactPatch {
                status: Some(ContactStatus::InReview),
                ..ContactPatch::default()
            },
            later,
        );
        assert_eq!(contact.assigned_to, Some(admin));

        contact.apply(
            ContactPatch {
                assigned_to: Some(None),
                ..ContactPatch::default()
            },
            later,
        );
        assert!(contact.assigned_to.is_none());
    }

    #[rstest]
    #[case(ContactFilter::default(), true)]
    #[case(ContactFilter { search: Some("BINS".to_owned()), ..ContactFilter::default() }, true)]
    #[case(ContactFilter { search: Some("wells".to_owned()), ..ContactFilter::default() }, true)]
    #[case(ContactFilter { status: Some(ContactStatus::Closed), ..ContactFilter::default() }, false)]
    fn filter_matches(contact: Contact, #[case] filter: ContactFilter, #[case] expected: bool) {
        assert_eq!(filter.matches(&contact), expected);
    }

    #[test]
    fn status_labels_keep_spaces() {
        assert_eq!("In Review".parse::<ContactStatus>(), Ok(ContactStatus::InReview));
    }
}
