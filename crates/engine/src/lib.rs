//! Copy-and-mutate engine for immutable records
//!
//! This crate builds on `recast-core` and provides:
//! - FieldMutator: one pending change to one field (assignment or transform)
//! - ChangeSet: at most one mutator per field, last write wins
//! - apply_changes / copy_and_apply / with: shallow copy, mutate, validate
//! - RecordExt: the same operations as methods on `Arc<R>`
//!
//! Records are shared as `Arc<R>`. Applying an empty change set hands back
//! the same `Arc`; anything else produces a new one and leaves the original
//! untouched.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod change_set;
pub mod ext;
pub mod mutator;
pub mod orchestrator;

pub use change_set::{ChangeSet, Mutators};
pub use ext::RecordExt;
pub use mutator::{FieldMutator, FieldMutatorBuilder, Mutation, MutationKind, TransformFn};
pub use orchestrator::{apply_changes, copy_and_apply, with};
