//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ComplaintManagement, ContactManagement, DashboardQuery, FeedbackManagement, UserManagement,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User use-cases.
    pub users: Arc<dyn UserManagement>,
    /// Complaint use-cases.
    pub complaints: Arc<dyn ComplaintManagement>,
    /// Feedback use-cases.
    pub feedbacks: Arc<dyn FeedbackManagement>,
    /// Contact use-cases.
    pub contacts: Arc<dyn ContactManagement>,
    /// Dashboard figures.
    pub dashboard: Arc<dyn DashboardQuery>,
}

impl HttpState {
    /// Bundle the use-case handles.
    pub fn new(
        users: Arc<dyn UserManagement>,
        complaints: Arc<dyn ComplaintManagement>,
        feedbacks: Arc<dyn FeedbackManagement>,
        contacts: Arc<dyn ContactManagement>,
        dashboard: Arc<dyn DashboardQuery>,
    ) -> Self {
        Self {
            users,
            complaints,
            feedbacks,
            contacts,
            dashboard,
        }
    }
}
