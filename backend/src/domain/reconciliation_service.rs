//! Startup reconciliation of sequence counters against stored records.

use tracing::info;

use crate::domain::Error;
use crate::domain::complaint::ComplaintFilter;
use crate::domain::ports::{ComplaintRepository, CounterStore, UserRepository};
use crate::domain::sequence::{ReconcileReport, reconcile_counters};
use crate::domain::service_support::{map_complaint_repository_error, map_user_repository_error};
use crate::domain::user::UserFilter;

/// Scan every stored user and complaint identifier and lift each counter to
/// at least the highest number already in use.
pub async fn reconcile_sequences<U, K, C>(
    users: &U,
    complaints: &K,
    counters: &C,
) -> Result<ReconcileReport, Error>
where
    U: UserRepository + ?Sized,
    K: ComplaintRepository + ?Sized,
    C: CounterStore + ?Sized,
{
    let users = users
        .list(&UserFilter::default())
        .await
        .map_err(map_user_repository_error)?;
    let complaints = complaints
        .list(&ComplaintFilter::any())
        .await
        .map_err(map_complaint_repository_error)?;

    let ids = users
        .iter()
        .map(|user| &user.user_id)
        .chain(complaints.iter().map(|complaint| &complaint.complaint_id));
    let report = reconcile_counters(counters, ids).await?;
    info!(
        counters = report.counters.len(),
        malformed = report.malformed.len(),
        foreign = report.foreign,
        "sequence reconciliation finished"
    );
    Ok(report)
}
