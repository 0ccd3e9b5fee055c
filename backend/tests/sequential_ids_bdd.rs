//! Behaviour tests for sequential identifier assignment.
//!
//! Scenarios drive the user and complaint services over the in-memory
//! adapters, sharing one counter store the way the server does.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::sync::Arc;

use civicdesk::domain::complaint::{ComplaintDetails, NewComplaint};
use civicdesk::domain::password::Password;
use civicdesk::domain::ports::{ComplaintManagement, UserManagement};
use civicdesk::domain::sequence::SequentialId;
use civicdesk::domain::user::{NewUser, Role, UserProfile};
use civicdesk::domain::validation::EmailAddress;
use civicdesk::domain::{ComplaintService, UserService, reconcile_sequences};
use civicdesk::outbound::memory::{
    InMemoryComplaintRepository, InMemoryCounterStore, InMemoryUserRepository,
};
use mockable::DefaultClock;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

struct DeskWorld {
    runtime: Runtime,
    user_repo: Arc<InMemoryUserRepository>,
    complaint_repo: Arc<InMemoryComplaintRepository>,
    counters: Arc<InMemoryCounterStore>,
    users: Arc<dyn UserManagement>,
    complaints: Arc<dyn ComplaintManagement>,
    user_ids: RefCell<Vec<String>>,
    complaint_ids: RefCell<Vec<String>>,
}

impl DeskWorld {
    fn new() -> Self {
        let runtime = Runtime::new().expect("tokio runtime");
        let user_repo = Arc::new(InMemoryUserRepository::new());
        let complaint_repo = Arc::new(InMemoryComplaintRepository::new());
        let counters = Arc::new(InMemoryCounterStore::new());
        let users: Arc<dyn UserManagement> = Arc::new(UserService::new(
            user_repo.clone(),
            counters.clone(),
            Arc::new(DefaultClock),
        ));
        let complaints: Arc<dyn ComplaintManagement> = Arc::new(ComplaintService::new(
            complaint_repo.clone(),
            counters.clone(),
            Arc::new(DefaultClock),
        ));
        Self {
            runtime,
            user_repo,
            complaint_repo,
            counters,
            users,
            complaints,
            user_ids: RefCell::new(Vec::new()),
            complaint_ids: RefCell::new(Vec::new()),
        }
    }

    fn register(&self, role: Role) {
        let n = self.user_ids.borrow().len() + 1;
        let registration = NewUser {
            user_id: None,
            full_name: format!("Resident {n}"),
            email: EmailAddress::parse("email", &format!("resident{n}@example.org"))
                .expect("email"),
            password: Password::new("password", "correct horse".to_owned()).expect("password"),
            role,
            is_active: true,
            profile: UserProfile::default(),
        };
        let user = self
            .runtime
            .block_on(self.users.create_user(registration))
            .expect("user created");
        self.user_ids
            .borrow_mut()
            .push(user.user_id.as_str().to_owned());
    }

    fn submit(&self, complaint_id: Option<SequentialId>) {
        let complaint = self
            .runtime
            .block_on(self.complaints.create_complaint(new_complaint(complaint_id)))
            .expect("complaint created");
        self.complaint_ids
            .borrow_mut()
            .push(complaint.complaint_id.as_str().to_owned());
    }
}

fn new_complaint(complaint_id: Option<SequentialId>) -> NewComplaint {
    NewComplaint {
        complaint_id,
        details: ComplaintDetails {
            title: "Broken streetlight".to_owned(),
            category: vec!["Lighting".to_owned()],
            complaint_type: "Infrastructure".to_owned(),
            area_type: "Urban".to_owned(),
            description: "Dark since Tuesday".to_owned(),
            days: 3,
            image: None,
            location: "Mill Lane".to_owned(),
            coordinates: None,
        },
        reporter_id: None,
    }
}

fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',').map(|id| id.trim().to_owned()).collect()
}

#[fixture]
fn world() -> DeskWorld {
    DeskWorld::new()
}

#[given("an empty citizen desk")]
fn an_empty_citizen_desk(world: &DeskWorld) {
    assert!(world.user_ids.borrow().is_empty());
    assert!(world.complaint_ids.borrow().is_empty());
}

#[given("a complaint imported as {id}")]
fn a_complaint_imported_as(world: &DeskWorld, id: String) {
    let id = SequentialId::new(id).expect("sequential id");
    world.submit(Some(id));
}

#[when("an account with role {role} registers")]
fn an_account_registers(world: &DeskWorld, role: String) {
    let role: Role = role.parse().expect("known role");
    world.register(role);
}

#[when("a citizen submits a complaint")]
fn a_citizen_submits_a_complaint(world: &DeskWorld) {
    world.submit(None);
}

#[when("{count} complaints are submitted at once")]
fn complaints_are_submitted_at_once(world: &DeskWorld, count: usize) {
    let ids = world.runtime.block_on(async {
        let handles: Vec<_> = (0..count)
            .map(|_| {
                let complaints = world.complaints.clone();
                tokio::spawn(async move { complaints.create_complaint(new_complaint(None)).await })
            })
            .collect();
        let mut ids = Vec::with_capacity(count);
        for handle in handles {
            let complaint = handle.await.expect("task joined").expect("complaint created");
            ids.push(complaint.complaint_id.as_str().to_owned());
        }
        ids
    });
    world.complaint_ids.borrow_mut().extend(ids);
}

#[when("the counters are reconciled")]
fn the_counters_are_reconciled(world: &DeskWorld) {
    let report = world
        .runtime
        .block_on(reconcile_sequences(
            world.user_repo.as_ref(),
            world.complaint_repo.as_ref(),
            world.counters.as_ref(),
        ))
        .expect("reconciliation");
    assert!(report.malformed.is_empty());
}

#[then("the assigned user ids are {ids}")]
fn the_assigned_user_ids_are(world: &DeskWorld, ids: String) {
    assert_eq!(*world.user_ids.borrow(), split_ids(&ids));
}

#[then("the assigned complaint ids are {ids}")]
fn the_assigned_complaint_ids_are(world: &DeskWorld, ids: String) {
    assert_eq!(*world.complaint_ids.borrow(), split_ids(&ids));
}

#[then("every complaint id is distinct")]
fn every_complaint_id_is_distinct(world: &DeskWorld) {
    let ids = world.complaint_ids.borrow();
    let distinct: BTreeSet<&String> = ids.iter().collect();
    assert_eq!(distinct.len(), ids.len());
}

#[then("the assigned complaint ids run from {first} to {last}")]
fn the_complaint_ids_run_from(world: &DeskWorld, first: String, last: String) {
    let ids: BTreeSet<String> = world.complaint_ids.borrow().iter().cloned().collect();
    let expected: BTreeSet<String> = (1..=ids.len()).map(|n| format!("CMP{n:04}")).collect();
    assert_eq!(ids, expected);
    assert_eq!(ids.first(), Some(&first));
    assert_eq!(ids.last(), Some(&last));
}

#[then("the last complaint id is {id}")]
fn the_last_complaint_id_is(world: &DeskWorld, id: String) {
    assert_eq!(world.complaint_ids.borrow().last(), Some(&id));
}

#[scenario(path = "tests/features/sequential_ids.feature")]
fn sequential_id_scenarios(world: DeskWorld) {
    drop(world);
}
