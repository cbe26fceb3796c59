//! Record types shared by the scenario modules

use chrono::{DateTime, Utc};
use recast::{record_schema, CloneRecord, ConstraintViolation, ResolverConfig};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ============================================================================
// Counter: plain writable fields, accepts everything
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Counter {
    pub count: i64,
    pub label: String,
}

impl Counter {
    pub fn new(count: i64, label: &str) -> Arc<Self> {
        Arc::new(Self {
            count,
            label: label.to_string(),
        })
    }
}

record_schema! {
    Counter {
        COUNT: count: i64,
        LABEL: label: String,
    }
}

impl CloneRecord for Counter {
    fn check_candidate(&self, _candidate: &Self) -> Result<(), ConstraintViolation> {
        Ok(())
    }
}

// ============================================================================
// Stamped: read-only timestamp pinned at its minimum default
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Stamped {
    pub name: String,
    created_at: DateTime<Utc>,
}

impl Stamped {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            created_at: DateTime::<Utc>::MIN_UTC,
        })
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

record_schema! {
    Stamped {
        NAME: name: String,
        CREATED_AT: created_at: DateTime<Utc> => read_only,
    }
}

impl CloneRecord for Stamped {
    fn check_candidate(&self, candidate: &Self) -> Result<(), ConstraintViolation> {
        if candidate.created_at > DateTime::<Utc>::MIN_UTC {
            return Err(
                ConstraintViolation::new("created_at must stay at its default").on_field("created_at"),
            );
        }
        Ok(())
    }
}

// ============================================================================
// Sensor: counts validator calls, has a computed field
// ============================================================================

#[derive(Debug, Clone)]
pub struct Sensor {
    pub value: i32,
    pub note: String,
    calls: Arc<AtomicUsize>,
}

impl Sensor {
    pub fn new(value: i32) -> Arc<Self> {
        Arc::new(Self {
            value,
            note: String::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Validator calls made by this sensor and every copy of it
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

record_schema! {
    Sensor {
        VALUE: value: i32,
        NOTE: note: String,
        SUMMARY: summary: String => computed,
    }
}

impl CloneRecord for Sensor {
    fn check_candidate(&self, candidate: &Self) -> Result<(), ConstraintViolation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if candidate.value < 0 {
            return Err(ConstraintViolation::new("value must be non-negative")
                .on_field("value")
                .with_source(io::Error::new(io::ErrorKind::InvalidData, "negative reading")));
        }
        Ok(())
    }
}

// ============================================================================
// Sealed: backing slots disabled by configuration
// ============================================================================

#[derive(Debug, Clone)]
pub struct Sealed {
    pub open: bool,
    serial: u64,
}

impl Sealed {
    pub fn new(serial: u64) -> Arc<Self> {
        Arc::new(Self { open: false, serial })
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }
}

record_schema! {
    Sealed(config = ResolverConfig::strict()) {
        OPEN: open: bool,
        SERIAL: serial: u64 => read_only,
    }
}

impl CloneRecord for Sealed {
    fn check_candidate(&self, _candidate: &Self) -> Result<(), ConstraintViolation> {
        Ok(())
    }
}
