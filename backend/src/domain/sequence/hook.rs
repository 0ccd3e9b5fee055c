//! Creation-time hook assigning sequential identifiers to new entities.

use tracing::debug;

use crate::domain::ports::CounterStore;

use super::{SequenceError, SequenceKind, SequentialId, SequentialIdAllocator};

/// Entities numbered on creation.
pub trait SequentiallyIdentified {
    /// Numbering domain the entity draws from.
    fn sequence_kind(&self) -> SequenceKind;

    /// Identifier already carried by the entity, if any.
    fn sequential_id(&self) -> Option<&SequentialId>;

    /// Store the identifier chosen by the hook.
    fn set_sequential_id(&mut self, id: SequentialId);
}

/// What the hook did for one creation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// The entity already carried an identifier; the allocator was not called.
    Skipped,
    /// A fresh identifier was allocated and assigned.
    Assigned,
}

/// Assign an identifier to `entity` unless it already carries one.
///
/// On failure the entity is left untouched and the allocator's error is
/// returned unchanged; callers must not persist the entity.
pub async fn assign_sequential_id<E, C>(
    entity: &mut E,
    allocator: &SequentialIdAllocator<C>,
) -> Result<HookOutcome, SequenceError>
where
    E: SequentiallyIdentified + ?Sized,
    C: CounterStore + ?Sized,
{
    if let Some(existing) = entity.sequential_id() {
        debug!(id = %existing, "keeping caller-supplied sequential id");
        return Ok(HookOutcome::Skipped);
    }
    let id = allocator.allocate(entity.sequence_kind()).await?;
    entity.set_sequential_id(id);
    Ok(HookOutcome::Assigned)
}
