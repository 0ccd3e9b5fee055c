//! In-process counter store.
//!
//! All counters sit behind one mutex, so each increment is a single critical
//! section. Contents vanish with the process.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{CounterStore, CounterStoreError};
use crate::domain::sequence::{CounterKey, MAX_SEQUENCE_VALUE};

use super::lock_poisoned;

/// Counters held behind a mutex; values reset with the process.
#[derive(Debug, Default)]
pub struct InMemoryCounterStore {
    counters: Mutex<HashMap<CounterKey, u64>>,
}

impl InMemoryCounterStore {
    /// Store with every counter absent.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CounterStore for InMemoryCounterStore {
    async fn increment_and_get(&self, key: &CounterKey) -> Result<u64, CounterStoreError> {
        let mut counters = self
            .counters
            .lock()
            .map_err(|_| CounterStoreError::connection(lock_poisoned("counter")))?;
        let current = counters.get(key).copied().unwrap_or(0);
        if current >= MAX_SEQUENCE_VALUE {
            return Err(CounterStoreError::query(format!("counter {key} is exhausted")));
        }
        let next = current + 1;
        counters.insert(key.clone(), next);
        Ok(next)
    }

    async fn advance_to(&self, key: &CounterKey, floor: u64) -> Result<u64, CounterStoreError> {
        let mut counters = self
            .counters
            .lock()
            .map_err(|_| CounterStoreError::connection(lock_poisoned("counter")))?;
        let value = counters.entry(key.clone()).or_insert(0);
        *value = (*value).max(floor.min(MAX_SEQUENCE_VALUE));
        Ok(*value)
    }

    async fn current(&self, key: &CounterKey) -> Result<Option<u64>, CounterStoreError> {
        let counters = self
            .counters
            .lock()
            .map_err(|_| CounterStoreError::connection(lock_poisoned("counter")))?;
        Ok(counters.get(key).copied())
    }
}
