//! Citizen complaints and their lifecycle.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::labels::labelled_enum;
use super::sequence::{SequenceKind, SequentialId, SequentiallyIdentified};
use super::validation::{FieldError, contains_ignore_case};

labelled_enum! {
    /// Progress of a complaint.
    #[derive(Default)]
    pub enum ComplaintStatus ("status") {
        #[default]
        Pending => "Pending",
        InProgress => "In Progress",
        Resolved => "Resolved",
    }
}

impl ComplaintStatus {
    /// URL slug used by list filters (`in-progress`).
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
        }
    }
}

/// Status selection for complaint listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Every open complaint regardless of status.
    #[default]
    Open,
    /// Open complaints with the given status.
    Status(ComplaintStatus),
    /// Resolved complaints that have been closed.
    Closed,
    /// Everything, closed or not.
    Any,
}

impl StatusFilter {
    /// Parse a list filter slug. Blank input selects open complaints.
    pub fn from_slug(raw: &str) -> Result<Self, FieldError> {
        let slug = raw.trim();
        if slug.is_empty() {
            return Ok(Self::Open);
        }
        if slug == "closed" {
            return Ok(Self::Closed);
        }
        ComplaintStatus::ALL
            .iter()
            .copied()
            .find(|status| status.slug() == slug)
            .map(Self::Status)
            .ok_or_else(|| FieldError::unknown_value("status", slug))
    }

    /// Whether a complaint in `status` with the given closed flag is selected.
    pub fn matches(self, status: ComplaintStatus, is_closed: bool) -> bool {
        match self {
            Self::Open => !is_closed,
            Self::Status(expected) => !is_closed && status == expected,
            Self::Closed => is_closed && status == ComplaintStatus::Resolved,
            Self::Any => true,
        }
    }
}

/// Coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Validate latitude in `-90..=90` and longitude in `-180..=180`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, FieldError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(FieldError::OutOfRange {
                field: "latitude",
                min: -90,
                max: 90,
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(FieldError::OutOfRange {
                field: "longitude",
                min: -180,
                max: 180,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    pub const fn latitude(self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub const fn longitude(self) -> f64 {
        self.longitude
    }
}

/// Descriptive fields shared by drafts and stored complaints.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplaintDetails {
    /// Short summary.
    pub title: String,
    /// Free-form category tags.
    pub category: Vec<String>,
    /// Complaint type label.
    pub complaint_type: String,
    /// Area classification, such as urban or rural.
    pub area_type: String,
    /// Full description.
    pub description: String,
    /// How many days the problem has persisted.
    pub days: u32,
    /// Optional image URL.
    pub image: Option<String>,
    /// Human-readable place.
    pub location: String,
    /// Optional map position.
    pub coordinates: Option<GeoPoint>,
}

/// Stored complaint.
#[derive(Debug, Clone, PartialEq)]
pub struct Complaint {
    /// Record identifier.
    pub id: Uuid,
    /// Sequential identifier, `CMP0001` onwards.
    pub complaint_id: SequentialId,
    /// Descriptive fields.
    pub details: ComplaintDetails,
    /// Record id of the reporting user, when known.
    pub reporter_id: Option<Uuid>,
    /// Progress state.
    pub status: ComplaintStatus,
    /// Closed complaints leave the default listing.
    pub is_closed: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time. Doubles as the resolution time once resolved.
    pub updated_at: DateTime<Utc>,
}

/// Validated complaint awaiting its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewComplaint {
    /// Imported identifier; `None` lets the save hook allocate one.
    pub complaint_id: Option<SequentialId>,
    /// Descriptive fields.
    pub details: ComplaintDetails,
    /// Record id of the reporting user.
    pub reporter_id: Option<Uuid>,
}

impl SequentiallyIdentified for NewComplaint {
    fn sequence_kind(&self) -> SequenceKind {
        SequenceKind::Complaint
    }

    fn sequential_id(&self) -> Option<&SequentialId> {
        self.complaint_id.as_ref()
    }

    fn set_sequential_id(&mut self, id: SequentialId) {
        self.complaint_id = Some(id);
    }
}

impl NewComplaint {
    /// New complaints start pending and open.
    ///
    /// Returns `None` until the save hook has assigned an identifier.
    pub fn into_complaint(self, id: Uuid, now: DateTime<Utc>) -> Option<Complaint> {
        let complaint_id = self.complaint_id?;
        Some(Complaint {
            id,
            complaint_id,
            details: self.details,
            reporter_id: self.reporter_id,
            status: ComplaintStatus::Pending,
            is_closed: false,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update; `complaint_id` cannot change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplaintPatch {
    /// New title.
    pub title: Option<String>,
    /// Replacement category tags.
    pub category: Option<Vec<String>>,
    /// New type.
    pub complaint_type: Option<String>,
    /// New area classification.
    pub area_type: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New duration in days.
    pub days: Option<u32>,
    /// New image URL.
    pub image: Option<String>,
    /// New location.
    pub location: Option<String>,
    /// New map position.
    pub coordinates: Option<GeoPoint>,
    /// New reporter.
    pub reporter_id: Option<Uuid>,
    /// New status.
    pub status: Option<ComplaintStatus>,
    /// New closed flag.
    pub is_closed: Option<bool>,
}

impl Complaint {
    /// Apply `patch` and bump `updated_at`.
    pub fn apply(&mut self, patch: ComplaintPatch, now: DateTime<Utc>) {
        let details = &mut self.details;
        if let Some(title) = patch.title {
            details.title = title;
        }
        if let Some(category) = patch.category {
            details.category = category;
        }
        if let Some(complaint_type) = patch.complaint_type {
            details.complaint_type = complaint_type;
        }
        if let Some(area_type) = patch.area_type {
            details.area_type = area_type;
        }
        if let Some(description) = patch.description {
            details.description = description;
        }
        if let Some(days) = patch.days {
            details.days = days;
        }
        if let Some(location) = patch.location {
            details.location = location;
        }
        if patch.image.is_some() {
            details.image = patch.image;
        }
        if patch.coordinates.is_some() {
            details.coordinates = patch.coordinates;
        }
        if patch.reporter_id.is_some() {
            self.reporter_id = patch.reporter_id;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(is_closed) = patch.is_closed {
            self.is_closed = is_closed;
        }
        self.updated_at = now;
    }
}

/// List filter for complaints. The default lists every open complaint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintFilter {
    /// Case-insensitive match on title, description, or location.
    pub search: Option<String>,
    /// Exact match against any category entry.
    pub category: Option<String>,
    /// Status selection.
    pub status: StatusFilter,
}

impl ComplaintFilter {
    /// Filter selecting every complaint, closed ones included.
    pub fn any() -> Self {
        Self {
            status: StatusFilter::Any,
            ..Self::default()
        }
    }

    /// Whether `complaint` passes every criterion.
    pub fn matches(&self, complaint: &Complaint) -> bool {
        let details = &complaint.details;
        let search_ok = self.search.as_deref().is_none_or(|needle| {
            contains_ignore_case(&details.title, needle)
                || contains_ignore_case(&details.description, needle)
                || contains_ignore_case(&details.location, needle)
        });
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|wanted| details.category.iter().any(|entry| entry == wanted));
        search_ok && category_ok && self.status.matches(complaint.status, complaint.is_closed)
    }
}
