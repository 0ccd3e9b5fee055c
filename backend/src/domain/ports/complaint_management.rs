//! Driving port for complaint intake and triage.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::complaint::{Complaint, ComplaintFilter, ComplaintPatch, NewComplaint};

/// Complaint use-cases exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintManagement: Send + Sync {
    /// Complaints matching `filter`, newest first.
    async fn list_complaints(&self, filter: &ComplaintFilter) -> Result<Vec<Complaint>, Error>;

    /// Complaint by record id; `NotFound` when absent.
    async fn get_complaint(&self, id: &Uuid) -> Result<Complaint, Error>;

    /// File a complaint, assigning the next `CMP` identifier unless one was
    /// supplied.
    async fn create_complaint(&self, complaint: NewComplaint) -> Result<Complaint, Error>;

    /// Apply `patch`; the sequential identifier never changes.
    async fn update_complaint(&self, id: &Uuid, patch: ComplaintPatch) -> Result<Complaint, Error>;

    /// Hard delete, returning the removed complaint.
    async fn delete_complaint(&self, id: &Uuid) -> Result<Complaint, Error>;
}
