//! Copy-and-apply orchestration
//!
//! Turns an original record plus a change set into a new record:
//!
//! 1. An empty change set returns the original itself (same `Arc`), and the
//!    record's validator is not consulted.
//! 2. Otherwise the original is shallow-copied.
//! 3. Every mutator is applied to the copy. Transform functions always see
//!    the original, never the partially built copy, so application order
//!    does not matter.
//! 4. The record's validator runs exactly once, comparing original and copy.
//! 5. On acceptance the copy is returned; on rejection the copy is dropped
//!    and the violation is returned.
//!
//! The original is never written.

use crate::change_set::ChangeSet;
use recast_core::{RecastError, RecastResult, Record};
use std::sync::Arc;
use tracing::{debug, trace};

/// Produce a new record from `original` with `changes` applied
///
/// # Errors
///
/// `ConstraintViolation` if the record's validator rejects the candidate.
///
/// # Example
///
/// ```ignore
/// let next = apply_changes(&original, &changes)?;
/// assert_eq!(original.count, 0);
/// ```
pub fn apply_changes<R: Record>(original: &Arc<R>, changes: &ChangeSet<R>) -> RecastResult<Arc<R>> {
    let record = R::schema().record_name();

    if changes.is_empty() {
        trace!(target: "recast::apply", record, "Empty change set, returning original");
        return Ok(Arc::clone(original));
    }

    let mut copy = original.shallow_copy();
    for mutator in changes {
        mutator.apply(original, &mut copy);
    }

    if let Err(violation) = original.validate(&copy) {
        debug!(
            target: "recast::apply",
            record,
            fields = changes.len(),
            %violation,
            "Candidate rejected"
        );
        return Err(RecastError::ConstraintViolation(violation));
    }

    trace!(target: "recast::apply", record, fields = changes.len(), "Applied change set");
    Ok(Arc::new(copy))
}

/// Alias of [`apply_changes`]
pub fn copy_and_apply<R: Record>(original: &Arc<R>, changes: &ChangeSet<R>) -> RecastResult<Arc<R>> {
    apply_changes(original, changes)
}

/// Build a change set with `build` and apply it to `original`
///
/// Errors returned by `build` (an unknown field name, say) are passed through
/// before anything is copied.
///
/// ```ignore
/// let next = with(&original, |c| {
///     c.assign(Counter::COUNT, 2)?;
///     Ok(())
/// })?;
/// ```
pub fn with<R, F>(original: &Arc<R>, build: F) -> RecastResult<Arc<R>>
where
    R: Record,
    F: FnOnce(&mut ChangeSet<R>) -> RecastResult<()>,
{
    let mut changes = ChangeSet::new();
    build(&mut changes)?;
    apply_changes(original, &changes)
}
