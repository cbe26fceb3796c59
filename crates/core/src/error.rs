//! Error types for record mutation
//!
//! This module defines every error the mutation pipeline can raise.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! ## When errors surface
//!
//! | Variant | Raised while |
//! |---------|--------------|
//! | `FieldNotFound`, `TypeMismatch` | building a change set |
//! | `FieldNotWritable`, `MissingArgument` | constructing a mutator |
//! | `DuplicateField` | building a schema |
//! | `ConstraintViolation` | applying a change set |
//! | `InvalidConfig` | loading resolver configuration |
//!
//! Nothing is retried or swallowed: every error goes straight back to the caller.

use crate::violation::ConstraintViolation;
use thiserror::Error;

/// Result type alias for recast operations
pub type RecastResult<T> = std::result::Result<T, RecastError>;

/// Error types for record mutation
#[derive(Debug, Error)]
pub enum RecastError {
    /// No field with this name is declared on the record type
    #[error("Field not found: {field} on record {record}")]
    FieldNotFound {
        /// Record type name
        record: &'static str,
        /// Requested field name
        field: String,
    },

    /// The supplied value type cannot be stored in the field
    #[error("Type mismatch for {record}.{field}: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Record type name
        record: &'static str,
        /// Field name
        field: String,
        /// Declared field type
        expected: &'static str,
        /// Supplied value type
        actual: &'static str,
    },

    /// The field has no setter and no usable backing slot
    #[error(
        "Field not writable: {record}.{field} has no setter and is not a recognized read-only backing slot"
    )]
    FieldNotWritable {
        /// Record type name
        record: &'static str,
        /// Field name
        field: String,
    },

    /// A required constructor argument was never supplied
    #[error("Missing argument: {argument}")]
    MissingArgument {
        /// Name of the missing argument
        argument: &'static str,
    },

    /// A schema declares the same field twice
    #[error("Duplicate field: {field} declared twice on record {record}")]
    DuplicateField {
        /// Record type name
        record: &'static str,
        /// Field name
        field: &'static str,
    },

    /// The record's validator rejected the mutated copy
    #[error("Constraint violation: {0}")]
    ConstraintViolation(#[from] ConstraintViolation),

    /// Resolver configuration could not be read or parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RecastError {
    /// Create a `FieldNotFound` error
    pub fn field_not_found(record: &'static str, field: impl Into<String>) -> Self {
        Self::FieldNotFound {
            record,
            field: field.into(),
        }
    }

    /// Create a `TypeMismatch` error
    pub fn type_mismatch(
        record: &'static str,
        field: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            record,
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Create a `FieldNotWritable` error
    pub fn field_not_writable(record: &'static str, field: impl Into<String>) -> Self {
        Self::FieldNotWritable {
            record,
            field: field.into(),
        }
    }

    /// Create a `MissingArgument` error
    pub fn missing_argument(argument: &'static str) -> Self {
        Self::MissingArgument { argument }
    }

    /// Create an `InvalidConfig` error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// True for errors raised while describing changes, before any record is copied
    pub fn is_build_error(&self) -> bool {
        matches!(
            self,
            Self::FieldNotFound { .. }
                | Self::TypeMismatch { .. }
                | Self::FieldNotWritable { .. }
                | Self::MissingArgument { .. }
        )
    }

    /// The wrapped violation, if the validator rejected a copy
    pub fn as_constraint_violation(&self) -> Option<&ConstraintViolation> {
        match self {
            Self::ConstraintViolation(v) => Some(v),
            _ => None,
        }
    }
}
