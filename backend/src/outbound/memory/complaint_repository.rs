//! In-memory complaint repository enforcing unique complaint identifiers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::complaint::{Complaint, ComplaintFilter};
use crate::domain::ports::{ComplaintRepository, ComplaintRepositoryError};

use super::table::{Row, Table};

impl Row for Complaint {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Process-local store for complaints.
#[derive(Debug)]
pub struct InMemoryComplaintRepository {
    table: Table<Complaint>,
}

impl Default for InMemoryComplaintRepository {
    fn default() -> Self {
        Self {
            table: Table::new("complaint"),
        }
    }
}

impl InMemoryComplaintRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ComplaintRepository for InMemoryComplaintRepository {
    async fn insert(&self, complaint: &Complaint) -> Result<(), ComplaintRepositoryError> {
        self.table
            .with_rows(|rows| {
                if rows
                    .iter()
                    .any(|row| row.complaint_id == complaint.complaint_id)
                {
                    return Err(ComplaintRepositoryError::duplicate_complaint_id(
                        complaint.complaint_id.as_str(),
                    ));
                }
                rows.push(complaint.clone());
                Ok(())
            })
            .map_err(ComplaintRepositoryError::connection)?
    }

    async fn update(&self, complaint: &Complaint) -> Result<bool, ComplaintRepositoryError> {
        self.table
            .replace(complaint)
            .map_err(ComplaintRepositoryError::connection)
    }

    async fn delete(&self, id: &Uuid) -> Result<Option<Complaint>, ComplaintRepositoryError> {
        self.table
            .remove(id)
            .map_err(ComplaintRepositoryError::connection)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Complaint>, ComplaintRepositoryError> {
        self.table
            .find(id)
            .map_err(ComplaintRepositoryError::connection)
    }

    async fn list(
        &self,
        filter: &ComplaintFilter,
    ) -> Result<Vec<Complaint>, ComplaintRepositoryError> {
        self.table
            .select(|complaint| filter.matches(complaint))
            .map_err(ComplaintRepositoryError::connection)
    }
}
