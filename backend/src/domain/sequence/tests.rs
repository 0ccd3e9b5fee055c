//! Allocation properties exercised against the in-process counter store.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{CounterStore, CounterStoreError};
use crate::domain::user::Role;
use crate::outbound::memory::InMemoryCounterStore;

#[fixture]
fn allocator() -> SequentialIdAllocator<InMemoryCounterStore> {
    SequentialIdAllocator::new(Arc::new(InMemoryCounterStore::new()))
}

/// Fails the first `failures` increments, then delegates.
struct FlakyStore {
    inner: InMemoryCounterStore,
    failures: AtomicUsize,
}

#[async_trait]
impl CounterStore for FlakyStore {
    async fn increment_and_get(&self, key: &CounterKey) -> Result<u64, CounterStoreError> {
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(CounterStoreError::connection("connection reset"));
        }
        self.inner.increment_and_get(key).await
    }

    async fn advance_to(&self, key: &CounterKey, floor: u64) -> Result<u64, CounterStoreError> {
        self.inner.advance_to(key, floor).await
    }

    async fn current(&self, key: &CounterKey) -> Result<Option<u64>, CounterStoreError> {
        self.inner.current(key).await
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_allocations_are_unique() {
    let allocator = SequentialIdAllocator::new(Arc::new(InMemoryCounterStore::new()));
    let handles: Vec<_> = (0..64)
        .map(|_| {
            let allocator = allocator.clone();
            tokio::spawn(async move { allocator.allocate(SequenceKind::User(Role::User)).await })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        let id = handle.await.expect("task joins").expect("allocation succeeds");
        assert!(seen.insert(id.clone()), "duplicate id {id}");
    }

    assert_eq!(seen.len(), 64);
    assert!(seen.contains(&SequentialId::new("USR001").expect("id")));
    assert!(seen.contains(&SequentialId::new("USR064").expect("id")));
}

#[rstest]
#[tokio::test]
async fn sequential_complaints_increase_by_one(
    allocator: SequentialIdAllocator<InMemoryCounterStore>,
) {
    let mut issued = Vec::new();
    for _ in 0..3 {
        issued.push(
            allocator
                .allocate(SequenceKind::Complaint)
                .await
                .expect("allocation succeeds")
                .to_string(),
        );
    }
    assert_eq!(issued, ["CMP0001", "CMP0002", "CMP0003"]);
}

#[rstest]
#[tokio::test]
async fn roles_number_independently(allocator: SequentialIdAllocator<InMemoryCounterStore>) {
    let mut admins = Vec::new();
    for _ in 0..3 {
        admins.push(
            allocator
                .allocate(SequenceKind::User(Role::Admin))
                .await
                .expect("allocation succeeds")
                .to_string(),
        );
    }
    let user = allocator
        .allocate(SequenceKind::User(Role::User))
        .await
        .expect("allocation succeeds");

    assert_eq!(admins, ["ADM001", "ADM002", "ADM003"]);
    assert_eq!(user.as_str(), "USR001");
}

#[rstest]
#[tokio::test]
async fn seventh_complaint_is_zero_padded(allocator: SequentialIdAllocator<InMemoryCounterStore>) {
    let mut last = None;
    for _ in 0..7 {
        last = Some(
            allocator
                .allocate(SequenceKind::Complaint)
                .await
                .expect("allocation succeeds"),
        );
    }
    assert_eq!(last.map(String::from).as_deref(), Some("CMP0007"));
}

#[tokio::test]
async fn failed_allocation_consumes_no_number() {
    let store = Arc::new(FlakyStore {
        inner: InMemoryCounterStore::new(),
        failures: AtomicUsize::new(1),
    });
    let allocator = SequentialIdAllocator::new(Arc::clone(&store));
    allocator
        .allocate(SequenceKind::User(Role::User))
        .await
        .expect("first allocation succeeds");

    let err = allocator
        .allocate(SequenceKind::User(Role::User))
        .await
        .expect_err("store drops the connection");
    assert!(matches!(err, SequenceError::StoreUnavailable { .. }));
    let key = SequenceKind::User(Role::User).counter_key();
    assert_eq!(store.current(&key).await.expect("read"), Some(1));

    let retry = allocator
        .allocate(SequenceKind::User(Role::User))
        .await
        .expect("retry succeeds");
    assert_eq!(retry.as_str(), "USR002");
}

#[tokio::test]
async fn reconciled_counters_continue_past_existing_ids() {
    let store = Arc::new(InMemoryCounterStore::new());
    let existing = [
        SequentialId::new("CMP0041").expect("id"),
        SequentialId::new("CMP0007").expect("id"),
    ];
    reconcile_counters(store.as_ref(), &existing)
        .await
        .expect("reconcile succeeds");

    let allocator = SequentialIdAllocator::new(store);
    let next = allocator
        .allocate(SequenceKind::Complaint)
        .await
        .expect("allocation succeeds");
    assert_eq!(next.as_str(), "CMP0042");
}

#[rstest]
#[case(SequenceError::store_unavailable("down"), crate::domain::ErrorCode::ServiceUnavailable)]
#[case(SequenceError::duplicate_id("USR001"), crate::domain::ErrorCode::Conflict)]
#[case(
    SequenceError::malformed_sequence_value("USRx"),
    crate::domain::ErrorCode::InternalError
)]
fn maps_to_domain_error_codes(#[case] err: SequenceError, #[case] expected: crate::domain::ErrorCode) {
    assert_eq!(crate::domain::Error::from(err).code(), expected);
}
