//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::ports::CounterStore;
use crate::domain::service_support::fixtures::fixture_clock;
use crate::domain::{
    ComplaintService, ContactService, DashboardService, FeedbackService, UserService,
};
use crate::inbound::http::api_scope;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{
    InMemoryComplaintRepository, InMemoryContactRepository, InMemoryCounterStore,
    InMemoryFeedbackRepository, InMemoryUserRepository,
};

/// Build HTTP state over fresh in-memory adapters sharing one counter store.
pub fn memory_state() -> HttpState {
    memory_state_with_counters(Arc::new(InMemoryCounterStore::new()))
}

/// Build HTTP state over fresh in-memory repositories and the given counters.
pub fn memory_state_with_counters(counters: Arc<dyn CounterStore>) -> HttpState {
    let clock = fixture_clock();
    let users = Arc::new(InMemoryUserRepository::new());
    let complaints = Arc::new(InMemoryComplaintRepository::new());
    let feedbacks = Arc::new(InMemoryFeedbackRepository::new());
    let contacts = Arc::new(InMemoryContactRepository::new());
    HttpState::new(
        Arc::new(UserService::new(
            users.clone(),
            counters.clone(),
            clock.clone(),
        )),
        Arc::new(ComplaintService::new(
            complaints.clone(),
            counters,
            clock.clone(),
        )),
        Arc::new(FeedbackService::new(feedbacks.clone(), clock.clone())),
        Arc::new(ContactService::new(contacts, clock)),
        Arc::new(DashboardService::new(users, complaints, feedbacks)),
    )
}

/// App serving the full `/api` scope over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(api_scope())
}
