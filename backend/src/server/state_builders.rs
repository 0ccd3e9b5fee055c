//! Adapter selection and HTTP state assembly.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use civicdesk::domain::ports::{
    ComplaintRepository, ContactRepository, CounterStore, FeedbackRepository, UserRepository,
};
use civicdesk::domain::sequence::ReconcileReport;
use civicdesk::domain::{
    ComplaintService, ContactService, DashboardService, Error, FeedbackService, UserService,
    reconcile_sequences,
};
use civicdesk::inbound::http::state::HttpState;
use civicdesk::outbound::memory::{
    InMemoryComplaintRepository, InMemoryContactRepository, InMemoryCounterStore,
    InMemoryFeedbackRepository, InMemoryUserRepository,
};
use civicdesk::outbound::persistence::{
    DbPool, DieselComplaintRepository, DieselContactRepository, DieselCounterStore,
    DieselFeedbackRepository, DieselUserRepository,
};

/// Driven adapters shared by the services.
#[derive(Clone)]
pub struct Adapters {
    pub users: Arc<dyn UserRepository>,
    pub complaints: Arc<dyn ComplaintRepository>,
    pub feedbacks: Arc<dyn FeedbackRepository>,
    pub contacts: Arc<dyn ContactRepository>,
    pub counters: Arc<dyn CounterStore>,
}

impl Adapters {
    /// Diesel adapters when a pool is available, otherwise process-local
    /// in-memory stores.
    pub fn select(pool: Option<&DbPool>) -> Self {
        match pool {
            Some(pool) => Self {
                users: Arc::new(DieselUserRepository::new(pool.clone())),
                complaints: Arc::new(DieselComplaintRepository::new(pool.clone())),
                feedbacks: Arc::new(DieselFeedbackRepository::new(pool.clone())),
                contacts: Arc::new(DieselContactRepository::new(pool.clone())),
                counters: Arc::new(DieselCounterStore::new(pool.clone())),
            },
            None => {
                info!("no database configured; records live in memory only");
                Self {
                    users: Arc::new(InMemoryUserRepository::new()),
                    complaints: Arc::new(InMemoryComplaintRepository::new()),
                    feedbacks: Arc::new(InMemoryFeedbackRepository::new()),
                    contacts: Arc::new(InMemoryContactRepository::new()),
                    counters: Arc::new(InMemoryCounterStore::new()),
                }
            }
        }
    }

    /// Lift every counter to the highest identifier already stored.
    pub async fn reconcile(&self) -> Result<ReconcileReport, Error> {
        reconcile_sequences(
            self.users.as_ref(),
            self.complaints.as_ref(),
            self.counters.as_ref(),
        )
        .await
    }
}

/// Wire the services over `adapters` with the system clock.
pub fn build_http_state(adapters: &Adapters) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    HttpState::new(
        Arc::new(UserService::new(
            adapters.users.clone(),
            adapters.counters.clone(),
            clock.clone(),
        )),
        Arc::new(ComplaintService::new(
            adapters.complaints.clone(),
            adapters.counters.clone(),
            clock.clone(),
        )),
        Arc::new(FeedbackService::new(adapters.feedbacks.clone(), clock.clone())),
        Arc::new(ContactService::new(adapters.contacts.clone(), clock)),
        Arc::new(DashboardService::new(
            adapters.users.clone(),
            adapters.complaints.clone(),
            adapters.feedbacks.clone(),
        )),
    )
}
