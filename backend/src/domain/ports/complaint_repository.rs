//! Port for complaint persistence adapters and their errors.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::complaint::{Complaint, ComplaintFilter};

use super::define_port_error;

define_port_error! {
    /// Errors raised by complaint repositories.
    pub enum ComplaintRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "complaint repository connection failed: {message}",
        /// The store was reached but the statement failed.
        Query { message: String } => "complaint repository query failed: {message}",
        /// Another complaint already carries this sequential identifier.
        DuplicateComplaintId { complaint_id: String } => "complaint id already exists: {complaint_id}",
    }
}

/// Persistence port for complaints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    /// Insert a complaint. Duplicate identifiers are reported as such.
    async fn insert(&self, complaint: &Complaint) -> Result<(), ComplaintRepositoryError>;

    /// Returns `false` when no complaint has this record id.
    async fn update(&self, complaint: &Complaint) -> Result<bool, ComplaintRepositoryError>;

    /// Remove and return the complaint, if it existed.
    async fn delete(&self, id: &Uuid) -> Result<Option<Complaint>, ComplaintRepositoryError>;

    /// Complaint by record id.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Complaint>, ComplaintRepositoryError>;

    /// Complaints matching `filter`, newest first.
    async fn list(
        &self,
        filter: &ComplaintFilter,
    ) -> Result<Vec<Complaint>, ComplaintRepositoryError>;
}
