//! Allocation of formatted identifiers from counter store values.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::CounterStore;

use super::{SequenceError, SequenceKind, SequentialId};

/// Issues the next identifier for a [`SequenceKind`].
///
/// The allocator holds no state of its own; exclusion between concurrent
/// callers comes entirely from the store's atomic increment. Failures are
/// surfaced once and never retried here.
pub struct SequentialIdAllocator<C: ?Sized> {
    store: Arc<C>,
}

impl<C: ?Sized> Clone for SequentialIdAllocator<C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<C> SequentialIdAllocator<C>
where
    C: CounterStore + ?Sized,
{
    /// Allocator drawing numbers from `store`.
    pub fn new(store: Arc<C>) -> Self {
        Self { store }
    }

    /// Store backing this allocator.
    pub fn store(&self) -> &C {
        self.store.as_ref()
    }

    /// Bump the counter for `kind` and format the result.
    pub async fn allocate(&self, kind: SequenceKind) -> Result<SequentialId, SequenceError> {
        let key = kind.counter_key();
        let value = self.store.increment_and_get(&key).await.map_err(|err| {
            warn!(counter = %key, error = %err, "sequential id allocation failed");
            SequenceError::from(err)
        })?;
        let id = kind.format().render(value);
        debug!(counter = %key, value, id = %id, "allocated sequential id");
        Ok(id)
    }
}
