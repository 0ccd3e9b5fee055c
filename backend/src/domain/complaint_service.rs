//! Complaint service implementing [`ComplaintManagement`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::complaint::{Complaint, ComplaintFilter, ComplaintPatch, NewComplaint};
use crate::domain::ports::{ComplaintManagement, ComplaintRepository, CounterStore};
use crate::domain::sequence::{SequentialIdAllocator, assign_sequential_id};
use crate::domain::service_support::map_complaint_repository_error;

/// Complaint service backed by a repository and a counter store.
pub struct ComplaintService<R: ?Sized, C: ?Sized> {
    complaints: Arc<R>,
    allocator: SequentialIdAllocator<C>,
    clock: Arc<dyn Clock>,
}

impl<R, C> ComplaintService<R, C>
where
    R: ComplaintRepository + ?Sized,
    C: CounterStore + ?Sized,
{
    /// Build the service; `counters` feeds the complaint identifier sequence.
    pub fn new(complaints: Arc<R>, counters: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            complaints,
            allocator: SequentialIdAllocator::new(counters),
            clock,
        }
    }

    async fn fetch(&self, id: &Uuid) -> Result<Complaint, Error> {
        self.complaints
            .find_by_id(id)
            .await
            .map_err(map_complaint_repository_error)?
            .ok_or_else(not_found)
    }
}

fn not_found() -> Error {
    Error::not_found("Complaint not found")
}

#[async_trait]
impl<R, C> ComplaintManagement for ComplaintService<R, C>
where
    R: ComplaintRepository + ?Sized,
    C: CounterStore + ?Sized,
{
    async fn list_complaints(&self, filter: &ComplaintFilter) -> Result<Vec<Complaint>, Error> {
        self.complaints
            .list(filter)
            .await
            .map_err(map_complaint_repository_error)
    }

    async fn get_complaint(&self, id: &Uuid) -> Result<Complaint, Error> {
        self.fetch(id).await
    }

    async fn create_complaint(&self, mut complaint: NewComplaint) -> Result<Complaint, Error> {
        assign_sequential_id(&mut complaint, &self.allocator).await?;
        let record = complaint
            .into_complaint(Uuid::new_v4(), self.clock.utc())
            .ok_or_else(|| Error::internal("complaint reached storage without a complaint id"))?;
        self.complaints
            .insert(&record)
            .await
            .map_err(map_complaint_repository_error)?;
        info!(complaint_id = %record.complaint_id, "complaint filed");
        Ok(record)
    }

    async fn update_complaint(&self, id: &Uuid, patch: ComplaintPatch) -> Result<Complaint, Error> {
        let mut complaint = self.fetch(id).await?;
        complaint.apply(patch, self.clock.utc());
        let found = self
            .complaints
            .update(&complaint)
            .await
            .map_err(map_complaint_repository_error)?;
        if !found {
            return Err(not_found());
        }
        Ok(complaint)
    }

    async fn delete_complaint(&self, id: &Uuid) -> Result<Complaint, Error> {
        let removed = self
            .complaints
            .delete(id)
            .await
            .map_err(map_complaint_repository_error)?
            .ok_or_else(not_found)?;
        info!(complaint_id = %removed.complaint_id, "complaint deleted");
        Ok(removed)
    }
}
