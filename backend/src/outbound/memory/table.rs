//! Mutex-guarded row storage shared by the in-memory repositories.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::lock_poisoned;

/// Rows the table can key and order.
pub(super) trait Row: Clone {
    fn id(&self) -> Uuid;
    fn created_at(&self) -> DateTime<Utc>;
}

#[derive(Debug)]
pub(super) struct Table<T> {
    name: &'static str,
    rows: Mutex<Vec<T>>,
}

impl<T: Row> Table<T> {
    pub(super) const fn new(name: &'static str) -> Self {
        Self {
            name,
            rows: Mutex::new(Vec::new()),
        }
    }

    /// Run `f` with exclusive access to the rows.
    ///
    /// The error is the poisoned-lock message for the caller's connection
    /// variant.
    pub(super) fn with_rows<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> Result<R, String> {
        let mut rows = self.rows.lock().map_err(|_| lock_poisoned(self.name))?;
        Ok(f(&mut rows))
    }

    pub(super) fn find(&self, id: &Uuid) -> Result<Option<T>, String> {
        self.with_rows(|rows| rows.iter().find(|row| row.id() == *id).cloned())
    }

    /// Replace the row with the same id. Returns `false` when absent.
    pub(super) fn replace(&self, row: &T) -> Result<bool, String> {
        self.with_rows(|rows| match rows.iter_mut().find(|slot| slot.id() == row.id()) {
            Some(slot) => {
                *slot = row.clone();
                true
            }
            None => false,
        })
    }

    pub(super) fn remove(&self, id: &Uuid) -> Result<Option<T>, String> {
        self.with_rows(|rows| {
            rows.iter()
                .position(|row| row.id() == *id)
                .map(|index| rows.remove(index))
        })
    }

    /// Matching rows, newest first. Rows created at the same instant keep
    /// reverse insertion order.
    pub(super) fn select(&self, predicate: impl Fn(&T) -> bool) -> Result<Vec<T>, String> {
        self.with_rows(|rows| {
            let mut selected: Vec<T> = rows
                .iter()
                .rev()
                .filter(|row| predicate(*row))
                .cloned()
                .collect();
            selected.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
            selected
        })
    }
}
