//! PostgreSQL-backed [`CounterStore`].
//!
//! Each operation is a single `INSERT ... ON CONFLICT ... RETURNING`
//! statement, so the row lock taken by the upsert serialises concurrent
//! callers on the same key and no two of them read the same value.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CounterStore, CounterStoreError};
use crate::domain::sequence::{CounterKey, MAX_SEQUENCE_VALUE};

use super::diesel_helpers::{DieselFailure, classify_diesel_error, pool_error_message};
use super::pool::DbPool;
use super::schema::sequence_counters::dsl::{key, last_value, sequence_counters};

diesel::define_sql_function! {
    /// PostgreSQL `GREATEST` over two bigints.
    fn greatest(a: BigInt, b: BigInt) -> BigInt;
}

/// Counters kept in the `sequence_counters` table.
#[derive(Clone)]
pub struct DieselCounterStore {
    pool: DbPool,
}

impl DieselCounterStore {
    /// Store over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> CounterStoreError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => CounterStoreError::connection(message),
        DieselFailure::Query(message) => CounterStoreError::query(message),
        DieselFailure::UniqueViolation { .. } => {
            CounterStoreError::query("unexpected counter key conflict")
        }
    }
}

/// Stored values are non-negative by table constraint.
fn to_sequence_value(stored: i64) -> Result<u64, CounterStoreError> {
    u64::try_from(stored)
        .map_err(|_| CounterStoreError::query(format!("negative counter value {stored}")))
}

fn to_stored_value(value: u64) -> i64 {
    i64::try_from(value.min(MAX_SEQUENCE_VALUE)).unwrap_or(i64::MAX)
}

#[async_trait]
impl CounterStore for DieselCounterStore {
    async fn increment_and_get(&self, counter: &CounterKey) -> Result<u64, CounterStoreError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| CounterStoreError::connection(pool_error_message(err)))?;

        let value: i64 = diesel::insert_into(sequence_counters)
            .values((key.eq(counter.as_str()), last_value.eq(1_i64)))
            .on_conflict(key)
            .do_update()
            .set(last_value.eq(last_value + 1_i64))
            .returning(last_value)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        to_sequence_value(value)
    }

    async fn advance_to(&self, counter: &CounterKey, floor: u64) -> Result<u64, CounterStoreError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| CounterStoreError::connection(pool_error_message(err)))?;

        let value: i64 = diesel::insert_into(sequence_counters)
            .values((key.eq(counter.as_str()), last_value.eq(to_stored_value(floor))))
            .on_conflict(key)
            .do_update()
            .set(last_value.eq(greatest(last_value, excluded(last_value))))
            .returning(last_value)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        to_sequence_value(value)
    }

    async fn current(&self, counter: &CounterKey) -> Result<Option<u64>, CounterStoreError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| CounterStoreError::connection(pool_error_message(err)))?;

        let value: Option<i64> = sequence_counters
            .filter(key.eq(counter.as_str()))
            .select(last_value)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        value.map(to_sequence_value).transpose()
    }
}
