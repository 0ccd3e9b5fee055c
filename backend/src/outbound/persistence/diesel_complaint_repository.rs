//! PostgreSQL-backed [`ComplaintRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::complaint::{
    Complaint, ComplaintDetails, ComplaintFilter, ComplaintStatus, GeoPoint, StatusFilter,
};
use crate::domain::ports::{ComplaintRepository, ComplaintRepositoryError};
use crate::domain::sequence::SequentialId;

use super::diesel_helpers::{
    DieselFailure, classify_diesel_error, like_pattern, pool_error_message,
};
use super::models::ComplaintRow;
use super::pool::{DbPool, PooledPgConnection};
use super::schema::complaints;

const COMPLAINT_ID_CONSTRAINT: &str = "complaints_complaint_id_key";

/// PostgreSQL store for complaints.
#[derive(Clone)]
pub struct DieselComplaintRepository {
    pool: DbPool,
}

impl DieselComplaintRepository {
    /// Repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn connection(&self) -> Result<PooledPgConnection<'_>, ComplaintRepositoryError> {
        self.pool
            .get()
            .await
            .map_err(|err| ComplaintRepositoryError::connection(pool_error_message(err)))
    }
}

fn map_diesel_error(
    error: diesel::result::Error,
    complaint: Option<&Complaint>,
) -> ComplaintRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => ComplaintRepositoryError::connection(message),
        DieselFailure::Query(message) => ComplaintRepositoryError::query(message),
        DieselFailure::UniqueViolation { constraint } => {
            match (constraint.as_deref(), complaint) {
                (Some(COMPLAINT_ID_CONSTRAINT), Some(complaint)) => {
                    ComplaintRepositoryError::duplicate_complaint_id(
                        complaint.complaint_id.as_str(),
                    )
                }
                _ => ComplaintRepositoryError::query("unexpected unique violation"),
            }
        }
    }
}

fn corrupt(column: &str, detail: impl std::fmt::Display) -> ComplaintRepositoryError {
    ComplaintRepositoryError::query(format!("invalid {column} in database: {detail}"))
}

fn row_to_complaint(row: ComplaintRow) -> Result<Complaint, ComplaintRepositoryError> {
    let complaint_id =
        SequentialId::new(row.complaint_id).map_err(|err| corrupt("complaint_id", err))?;
    let status = ComplaintStatus::parse_label(&row.status).map_err(|err| corrupt("status", err))?;
    let days = u32::try_from(row.days).map_err(|err| corrupt("days", err))?;
    let coordinates = match (row.latitude, row.longitude) {
        (Some(latitude), Some(longitude)) => Some(
            GeoPoint::new(latitude, longitude).map_err(|err| corrupt("coordinates", err))?,
        ),
        _ => None,
    };

    Ok(Complaint {
        id: row.id,
        complaint_id,
        details: ComplaintDetails {
            title: row.title,
            category: row.category,
            complaint_type: row.complaint_type,
            area_type: row.area_type,
            description: row.description,
            days,
            image: row.image,
            location: row.location,
            coordinates,
        },
        reporter_id: row.reporter_id,
        status,
        is_closed: row.is_closed,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn complaint_to_row(complaint: &Complaint) -> ComplaintRow {
    let details = &complaint.details;
    ComplaintRow {
        id: complaint.id,
        complaint_id: complaint.complaint_id.as_str().to_owned(),
        title: details.title.clone(),
        category: details.category.clone(),
        complaint_type: details.complaint_type.clone(),
        area_type: details.area_type.clone(),
        description: details.description.clone(),
        days: i32::try_from(details.days).unwrap_or(i32::MAX),
        image: details.image.clone(),
        location: details.location.clone(),
        latitude: details.coordinates.map(GeoPoint::latitude),
        longitude: details.coordinates.map(GeoPoint::longitude),
        reporter_id: complaint.reporter_id,
        status: complaint.status.as_str().to_owned(),
        is_closed: complaint.is_closed,
        created_at: complaint.created_at,
        updated_at: complaint.updated_at,
    }
}

#[async_trait]
impl ComplaintRepository for DieselComplaintRepository {
    async fn insert(&self, complaint: &Complaint) -> Result<(), ComplaintRepositoryError> {
        let mut conn = self.connection().await?;
        let row = complaint_to_row(complaint);
        diesel::insert_into(complaints::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, Some(complaint)))
    }

    async fn update(&self, complaint: &Complaint) -> Result<bool, ComplaintRepositoryError> {
        let mut conn = self.connection().await?;
        let row = complaint_to_row(complaint);
        let updated = diesel::update(complaints::table.find(complaint.id))
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(complaint)))?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &Uuid) -> Result<Option<Complaint>, ComplaintRepositoryError> {
        let mut conn = self.connection().await?;
        let row: Option<ComplaintRow> = diesel::delete(complaints::table.find(*id))
            .returning(ComplaintRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        row.map(row_to_complaint).transpose()
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Complaint>, ComplaintRepositoryError> {
        let mut conn = self.connection().await?;
        let row: Option<ComplaintRow> = complaints::table
            .find(*id)
            .select(ComplaintRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        row.map(row_to_complaint).transpose()
    }

    async fn list(
        &self,
        filter: &ComplaintFilter,
    ) -> Result<Vec<Complaint>, ComplaintRepositoryError> {
        let mut conn = self.connection().await?;
        let mut query = complaints::table
            .select(ComplaintRow::as_select())
            .order(complaints::created_at.desc())
            .into_boxed();

        if let Some(needle) = filter.search.as_deref() {
            let pattern = like_pattern(needle);
            query = query.filter(
                complaints::title
                    .ilike(pattern.clone())
                    .or(complaints::description.ilike(pattern.clone()))
                    .or(complaints::location.ilike(pattern)),
            );
        }
        if let Some(category) = filter.category.as_deref() {
            query = query.filter(complaints::category.contains(vec![category.to_owned()]));
        }
        query = match filter.status {
            StatusFilter::Open => query.filter(complaints::is_closed.eq(false)),
            StatusFilter::Status(status) => query
                .filter(complaints::is_closed.eq(false))
                .filter(complaints::status.eq(status.as_str())),
            StatusFilter::Closed => query
                .filter(complaints::is_closed.eq(true))
                .filter(complaints::status.eq(ComplaintStatus::Resolved.as_str())),
            StatusFilter::Any => query,
        };

        let rows: Vec<ComplaintRow> = query
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        rows.into_iter().map(row_to_complaint).collect()
    }
}
