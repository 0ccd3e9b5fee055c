//! Lift counters above identifiers that already exist in storage.
//!
//! Rows imported from elsewhere, or created with caller-supplied identifiers,
//! can sit ahead of their counter. Reconciliation scans them once at startup
//! and advances each counter to the highest well-formed suffix it finds.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::domain::ports::CounterStore;

use super::{CounterKey, SequenceError, SequenceKind, SequentialId};

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Counter values after the pass, for every key that had data.
    pub counters: BTreeMap<CounterKey, u64>,
    /// Identifiers whose prefix matched but whose suffix did not parse.
    pub malformed: Vec<SequenceError>,
    /// Identifiers with no known prefix.
    pub foreign: usize,
}

/// Advance every counter to at least the highest suffix among `ids`.
///
/// Malformed identifiers are logged and listed in the report, never treated
/// as zero. Store failures abort the pass.
pub async fn reconcile_counters<'a, C, I>(store: &C, ids: I) -> Result<ReconcileReport, SequenceError>
where
    C: CounterStore + ?Sized,
    I: IntoIterator<Item = &'a SequentialId>,
{
    let mut report = ReconcileReport::default();
    let mut highest: BTreeMap<CounterKey, u64> = BTreeMap::new();

    for id in ids {
        let Some(kind) = SequenceKind::for_identifier(id.as_str()) else {
            report.foreign += 1;
            continue;
        };
        match kind.format().parse(id.as_str()) {
            Ok(Some(value)) => {
                let entry = highest.entry(kind.counter_key()).or_insert(0);
                *entry = (*entry).max(value);
            }
            Ok(None) => report.foreign += 1,
            Err(err) => {
                warn!(id = %id, error = %err, "skipping malformed sequential id");
                report.malformed.push(err);
            }
        }
    }

    for (key, floor) in highest {
        let value = store.advance_to(&key, floor).await?;
        info!(counter = %key, floor, value, "reconciled sequence counter");
        report.counters.insert(key, value);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{CounterStoreError, MockCounterStore};

    fn ids(raw: &[&str]) -> Vec<SequentialId> {
        raw.iter()
            .map(|value| SequentialId::new(*value).expect("valid id"))
            .collect()
    }

    #[tokio::test]
    async fn advances_each_key_to_its_highest_suffix() {
        let mut store = MockCounterStore::new();
        store
            .expect_advance_to()
            .times(3)
            .returning(|key, floor| match key.as_str() {
                "user" => Ok(floor.max(2)),
                _ => Ok(floor),
            });
        let existing = ids(&["USR001", "USR007", "ADM002", "CMP0010", "CMP0003"]);

        let report = reconcile_counters(&store, &existing)
            .await
            .expect("reconcile succeeds");

        let value_for = |name: &str| {
            report
                .counters
                .get(&CounterKey::new(name).expect("key"))
                .copied()
        };
        assert_eq!(value_for("user"), Some(7));
        assert_eq!(value_for("admin"), Some(2));
        assert_eq!(value_for("complaint"), Some(10));
        assert!(report.malformed.is_empty());
    }

    #[tokio::test]
    async fn isolates_malformed_and_foreign_identifiers() {
        let mut store = MockCounterStore::new();
        store
            .expect_advance_to()
            .withf(|key, floor| key.as_str() == "user" && *floor == 4)
            .times(1)
            .return_once(|_, floor| Ok(floor));
        let existing = ids(&["USR004", "USRabc", "guest-1"]);

        let report = reconcile_counters(&store, &existing)
            .await
            .expect("reconcile succeeds");

        assert_eq!(
            report.malformed,
            vec![SequenceError::malformed_sequence_value("USRabc")]
        );
        assert_eq!(report.foreign, 1);
    }

    #[tokio::test]
    async fn store_failure_aborts_the_pass() {
        let mut store = MockCounterStore::new();
        store
            .expect_advance_to()
            .times(1)
            .return_once(|_, _| Err(CounterStoreError::connection("refused")));
        let existing = ids(&["CMP0001"]);

        let err = reconcile_counters(&store, &existing)
            .await
            .expect_err("store is down");

        assert!(matches!(err, SequenceError::StoreUnavailable { .. }));
    }

    #[tokio::test]
    async fn empty_input_touches_nothing() {
        let mut store = MockCounterStore::new();
        store.expect_advance_to().times(0);

        let report = reconcile_counters(&store, &Vec::<SequentialId>::new())
            .await
            .expect("reconcile succeeds");

        assert_eq!(report, ReconcileReport::default());
    }
}
