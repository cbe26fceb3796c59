//! Change sets: pending mutations keyed by field name
//!
//! ## Merge semantics
//!
//! A change set holds at most one mutator per field. Registering a second
//! mutator for a field discards the first entirely, whatever the kinds of the
//! two mutators (last write wins).
//!
//! ## Reuse
//!
//! Applying a change set only reads it. A built change set can be kept and
//! applied to any number of records, from any number of threads.
//!
//! ## Example
//!
//! ```ignore
//! let mut changes = ChangeSet::new();
//! changes
//!     .assign(Counter::COUNT, 1)?
//!     .transform(Counter::LABEL, |c| format!("{}-next", c.label))?;
//!
//! let next = changes.apply_to(&original)?;
//! ```

use crate::mutator::FieldMutator;
use crate::orchestrator::apply_changes;
use recast_core::{Field, RecastResult, Record};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Ordered-by-name set of pending field mutations for record type `R`
pub struct ChangeSet<R> {
    mutators: BTreeMap<&'static str, FieldMutator<R>>,
}

impl<R> ChangeSet<R> {
    /// Create an empty change set
    pub fn new() -> Self {
        Self {
            mutators: BTreeMap::new(),
        }
    }

    /// Number of fields with a pending mutation
    pub fn len(&self) -> usize {
        self.mutators.len()
    }

    /// True when applying this change set is a no-op
    pub fn is_empty(&self) -> bool {
        self.mutators.is_empty()
    }

    /// True when a mutation is pending for the named field
    pub fn contains(&self, field: &str) -> bool {
        self.mutators.contains_key(field)
    }

    /// Pending mutation for the named field
    pub fn get(&self, field: &str) -> Option<&FieldMutator<R>> {
        self.mutators.get(field)
    }

    /// Names of fields with a pending mutation, in name order
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.mutators.keys().copied()
    }

    /// Read-only view of the pending mutators, in field name order
    pub fn mutators(&self) -> Mutators<'_, R> {
        Mutators {
            inner: self.mutators.values(),
        }
    }
}

impl<R: Record> ChangeSet<R> {
    // =========================================================================
    // Building
    // =========================================================================

    /// Add a mutator, replacing any earlier one for the same field
    pub fn mutate(&mut self, mutator: FieldMutator<R>) -> &mut Self {
        let field = mutator.field_name();
        if self.mutators.insert(field, mutator).is_some() {
            trace!(target: "recast::changeset", field, "Replaced earlier mutation");
        }
        self
    }

    /// Set a typed field to a constant
    ///
    /// # Errors
    ///
    /// `FieldNotWritable` if the field cannot be written.
    pub fn assign<V>(&mut self, field: Field<R, V>, value: V) -> RecastResult<&mut Self>
    where
        V: Clone + Send + Sync + 'static,
    {
        let mutator = FieldMutator::from_assignment(field, value)?;
        Ok(self.mutate(mutator))
    }

    /// Set a typed field to a value computed from the original record
    ///
    /// # Errors
    ///
    /// `FieldNotWritable` if the field cannot be written.
    pub fn transform<V, F>(&mut self, field: Field<R, V>, f: F) -> RecastResult<&mut Self>
    where
        V: Clone + Send + Sync + 'static,
        F: Fn(&R) -> V + Send + Sync + 'static,
    {
        let mutator = FieldMutator::from_transform(field, f)?;
        Ok(self.mutate(mutator))
    }

    /// Set a field looked up by name to a constant
    ///
    /// The field and value type are checked now, not when the change set is
    /// applied.
    ///
    /// # Errors
    ///
    /// `FieldNotFound`, `TypeMismatch` or `FieldNotWritable`.
    pub fn assign_named<V>(&mut self, field: &str, value: V) -> RecastResult<&mut Self>
    where
        V: Clone + Send + Sync + 'static,
    {
        let mutator = FieldMutator::from_named_assignment(field, value)?;
        Ok(self.mutate(mutator))
    }

    /// Set a field looked up by name to a value computed from the original
    ///
    /// # Errors
    ///
    /// `FieldNotFound`, `TypeMismatch` or `FieldNotWritable`.
    pub fn transform_named<V, F>(&mut self, field: &str, f: F) -> RecastResult<&mut Self>
    where
        V: Clone + Send + Sync + 'static,
        F: Fn(&R) -> V + Send + Sync + 'static,
    {
        let mutator = FieldMutator::from_named_transform(field, f)?;
        Ok(self.mutate(mutator))
    }

    // =========================================================================
    // Application
    // =========================================================================

    /// Produce a new record from `original` with these changes applied
    ///
    /// Same as [`apply_changes`].
    pub fn apply_to(&self, original: &Arc<R>) -> RecastResult<Arc<R>> {
        apply_changes(original, self)
    }
}

impl<R> Default for ChangeSet<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for ChangeSet<R> {
    fn clone(&self) -> Self {
        Self {
            mutators: self.mutators.clone(),
        }
    }
}

impl<R> fmt::Debug for ChangeSet<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.mutators.values()).finish()
    }
}

impl<'a, R> IntoIterator for &'a ChangeSet<R> {
    type Item = &'a FieldMutator<R>;
    type IntoIter = Mutators<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.mutators()
    }
}

/// Iterator over the mutators of a [`ChangeSet`]
pub struct Mutators<'a, R> {
    inner: btree_map::Values<'a, &'static str, FieldMutator<R>>,
}

impl<'a, R> Iterator for Mutators<'a, R> {
    type Item = &'a FieldMutator<R>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<R> ExactSizeIterator for Mutators<'_, R> {}
