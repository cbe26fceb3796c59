//! Method-style entry points on shared records
//!
//! ```ignore
//! use recast_engine::RecordExt;
//!
//! let next = original.with(|c| {
//!     c.assign(Counter::COUNT, 2)?;
//!     Ok(())
//! })?;
//! ```

use crate::change_set::ChangeSet;
use crate::orchestrator;
use recast_core::{RecastResult, Record};
use std::sync::Arc;

/// Change set operations callable on an `Arc<R>`
pub trait RecordExt<R: Record> {
    /// Start an empty change set for this record type
    fn start_change_set(&self) -> ChangeSet<R>;

    /// Build a change set in `build` and apply it to this record
    fn with<F>(&self, build: F) -> RecastResult<Arc<R>>
    where
        F: FnOnce(&mut ChangeSet<R>) -> RecastResult<()>;

    /// Apply `changes` to this record
    fn copy_and_apply(&self, changes: &ChangeSet<R>) -> RecastResult<Arc<R>>;
}

impl<R: Record> RecordExt<R> for Arc<R> {
    fn start_change_set(&self) -> ChangeSet<R> {
        ChangeSet::new()
    }

    fn with<F>(&self, build: F) -> RecastResult<Arc<R>>
    where
        F: FnOnce(&mut ChangeSet<R>) -> RecastResult<()>,
    {
        orchestrator::with(self, build)
    }

    fn copy_and_apply(&self, changes: &ChangeSet<R>) -> RecastResult<Arc<R>> {
        orchestrator::apply_changes(self, changes)
    }
}
