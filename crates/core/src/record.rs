//! Record contracts
//!
//! A record is an immutable entity that change sets can produce modified
//! copies of. The mutation pipeline needs:
//!
//! - [`RecordSchema`]: the compile-time field table (usually generated by
//!   [`record_schema!`](crate::record_schema)).
//! - [`Record`]: shallow self-duplication and validation of a candidate copy.
//!
//! Most records are `Clone`, and for them the duplication is just `clone`.
//! Such records implement [`CloneRecord`] and write only the validator; the
//! blanket impl supplies the rest of [`Record`]. Records that are not `Clone`
//! implement [`Record`] directly.

use crate::schema::Schema;
use crate::violation::ConstraintViolation;

/// Access to the field table of a record type
pub trait RecordSchema: Sized + Send + Sync + 'static {
    /// The schema describing this record's fields
    fn schema() -> &'static Schema<Self>;
}

/// An entity supporting shallow self-duplication and post-mutation validation
///
/// ## Contract
///
/// - `shallow_copy` returns a new value with the same field values as `self`.
///   Fields holding shared handles (`Arc`, etc.) share them with the original.
///   Because the copy is returned by value it is always a distinct instance.
/// - `validate` inspects a candidate copy built from `self` and returns
///   `Err` if any cross-field invariant is broken. It is called exactly once
///   per non-empty change set application, after every mutation has run.
///
/// ## Example
///
/// A record that is not `Clone` spells out its own copy:
///
/// ```
/// use std::sync::Arc;
/// use recast_core::{record_schema, ConstraintViolation, Record};
///
/// pub struct Upload {
///     pub name: String,
///     pub bytes: Arc<Vec<u8>>,
/// }
///
/// record_schema! {
///     Upload {
///         NAME: name: String,
///         BYTES: bytes: Arc<Vec<u8>>,
///     }
/// }
///
/// impl Record for Upload {
///     fn shallow_copy(&self) -> Self {
///         Upload {
///             name: self.name.clone(),
///             bytes: Arc::clone(&self.bytes),
///         }
///     }
///
///     fn validate(&self, candidate: &Self) -> Result<(), ConstraintViolation> {
///         if candidate.name.is_empty() {
///             return Err(ConstraintViolation::new("name is required").on_field("name"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Record: RecordSchema {
    /// Produce an independent duplicate with identical field values
    fn shallow_copy(&self) -> Self;

    /// Accept or reject a mutated candidate copy of `self`
    fn validate(&self, candidate: &Self) -> Result<(), ConstraintViolation>;
}

/// A `Clone` record that only supplies its validator
///
/// Every `CloneRecord` is a [`Record`]: `shallow_copy` is `clone`, and
/// `validate` calls [`check_candidate`](CloneRecord::check_candidate).
///
/// ```
/// use recast_core::{record_schema, CloneRecord, ConstraintViolation, Record};
///
/// #[derive(Debug, Clone, Default)]
/// pub struct Counter {
///     pub count: u32,
/// }
///
/// record_schema! {
///     Counter {
///         COUNT: count: u32,
///     }
/// }
///
/// impl CloneRecord for Counter {
///     fn check_candidate(&self, candidate: &Self) -> Result<(), ConstraintViolation> {
///         if candidate.count > 100 {
///             return Err(ConstraintViolation::new("count over limit").on_field("count"));
///         }
///         Ok(())
///     }
/// }
///
/// let copy = Counter { count: 7 }.shallow_copy();
/// assert_eq!(copy.count, 7);
/// ```
pub trait CloneRecord: RecordSchema + Clone {
    /// Accept or reject a mutated candidate copy of `self`
    fn check_candidate(&self, candidate: &Self) -> Result<(), ConstraintViolation>;
}

impl<T: CloneRecord> Record for T {
    fn shallow_copy(&self) -> Self {
        self.clone()
    }

    fn validate(&self, candidate: &Self) -> Result<(), ConstraintViolation> {
        self.check_candidate(candidate)
    }
}
