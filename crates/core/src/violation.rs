//! Constraint violations raised by record validators
//!
//! A record's `validate` method inspects a mutated candidate and either
//! accepts it silently or returns a [`ConstraintViolation`]. The content is
//! application-defined; the pipeline passes it back to the caller unchanged.

use std::error::Error as StdError;
use std::fmt;

type BoxedSource = Box<dyn StdError + Send + Sync + 'static>;

/// An invariant of a record was broken by a candidate copy
///
/// ## Example
///
/// ```
/// use recast_core::ConstraintViolation;
///
/// let v = ConstraintViolation::new("recorded_at must stay at its default")
///     .on_field("recorded_at");
/// assert_eq!(v.field(), Some("recorded_at"));
/// ```
#[derive(Debug)]
pub struct ConstraintViolation {
    message: String,
    field: Option<String>,
    source: Option<BoxedSource>,
}

impl ConstraintViolation {
    /// Create a violation with a human-readable message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
            source: None,
        }
    }

    /// Attach the name of the offending field
    pub fn on_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Attach an underlying cause
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// The violation message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The offending field, if the validator named one
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{} (field: {})", self.message, field),
            None => write!(f, "{}", self.message),
        }
    }
}

impl StdError for ConstraintViolation {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn StdError + 'static))
    }
}
