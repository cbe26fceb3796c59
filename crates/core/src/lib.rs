//! Core types and traits for recast
//!
//! This crate defines the foundations the mutation engine is built on:
//! - Record / RecordSchema: the contract a record type provides
//! - CloneRecord: `Record` for `Clone` types that only write a validator
//! - Field<R, V>: typed field identifiers
//! - Schema / SchemaBuilder: per-record field tables (compile-time reflection)
//! - FieldDescriptor: resolved, writable fields and their write path
//! - ResolverConfig: resolution settings, loadable from TOML
//! - RecastError / ConstraintViolation: the error taxonomy
//! - record_schema!: generates a field table next to the record

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
pub mod config;
pub mod descriptor;
pub mod error;
pub mod field;
mod macros;
pub mod record;
pub mod schema;
pub mod violation;

// Re-export commonly used types and traits
pub use config::ResolverConfig;
pub use descriptor::{FieldDescriptor, WriteFn, WritePath};
pub use error::{RecastError, RecastResult};
pub use field::{Field, ValueType};
pub use record::{CloneRecord, Record, RecordSchema};
pub use schema::{resolve, resolve_typed, Schema, SchemaBuilder};
pub use violation::ConstraintViolation;

#[doc(hidden)]
pub mod __private {
    pub use crate::macros::has_duplicate_field;
    pub use once_cell::sync::Lazy;
}
