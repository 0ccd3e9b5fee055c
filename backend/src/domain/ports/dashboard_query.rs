//! Driving port for the analytics dashboard.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::analytics::DashboardSummary;

/// Read-only dashboard figures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Compute the summary over every stored record.
    async fn dashboard_summary(&self) -> Result<DashboardSummary, Error>;
}
