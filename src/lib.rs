//! Recast - copy-on-write mutation of immutable records
//!
//! Records are never modified in place. Callers describe changes in a
//! [`ChangeSet`] and get back a new record, validated against the original,
//! or the original itself when there was nothing to change.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use recast::{record_schema, ChangeSet, CloneRecord, ConstraintViolation, RecordExt};
//!
//! #[derive(Debug, Clone)]
//! pub struct Counter {
//!     pub count: u32,
//!     pub label: String,
//! }
//!
//! record_schema! {
//!     Counter {
//!         COUNT: count: u32,
//!         LABEL: label: String,
//!     }
//! }
//!
//! impl CloneRecord for Counter {
//!     fn check_candidate(&self, candidate: &Self) -> Result<(), ConstraintViolation> {
//!         if candidate.count < self.count {
//!             return Err(ConstraintViolation::new("count only goes up").on_field("count"));
//!         }
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> recast::RecastResult<()> {
//! let original = Arc::new(Counter { count: 0, label: "x".into() });
//!
//! let mut changes = ChangeSet::new();
//! changes.transform(Counter::COUNT, |c| c.count + 1)?;
//!
//! let next = original.copy_and_apply(&changes)?;
//! assert_eq!(next.count, 1);
//! assert_eq!(original.count, 0);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `recast-core`: record contracts, field tables, descriptor resolution,
//!   errors and configuration
//! - `recast-engine`: mutators, change sets and the copy-and-apply pipeline

pub use recast_core::*;
pub use recast_engine::*;
