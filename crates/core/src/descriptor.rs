//! Resolved field descriptors
//!
//! A [`FieldDescriptor`] is what the resolver hands out for a field that can be
//! written: its name, declared type, and exactly one write path.
//!
//! ## Write paths
//!
//! - **Setter**: the field is externally writable; writes go through the
//!   public writer the schema declares for it.
//! - **BackingSlot**: the field is read-only from outside the record, but the
//!   schema registered the storage slot behind it. Writes go through that
//!   alternate storage accessor.
//!
//! The backing slot is a deliberate escape hatch: it is how a change set can
//! produce a copy whose read-only field differs from the original. It trades
//! away the record's own guarantee that the field never changes after
//! construction, which is why it is a separately named path that schemas opt
//! into and that [`ResolverConfig`](crate::ResolverConfig) can switch off.
//!
//! Descriptors can only be built by the resolver, so a descriptor with no
//! write path cannot exist.

use crate::error::{RecastError, RecastResult};
use crate::field::ValueType;
use std::any::{type_name, Any};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Function that stores a value of type `V` into a record `R`
pub type WriteFn<R, V> = fn(&mut R, V);

/// A [`WriteFn`] with its value type erased
#[derive(Clone)]
pub(crate) struct ErasedWriter(Arc<dyn Any + Send + Sync>);

impl ErasedWriter {
    pub(crate) fn new<R: 'static, V: 'static>(write: WriteFn<R, V>) -> Self {
        Self(Arc::new(write))
    }

    fn downcast<R: 'static, V: 'static>(&self) -> Option<WriteFn<R, V>> {
        self.0.downcast_ref::<WriteFn<R, V>>().copied()
    }
}

/// How a resolved field is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePath {
    /// Through the field's public writer
    Setter,
    /// Through the alternate storage accessor of a read-only field
    BackingSlot,
}

#[derive(Clone)]
pub(crate) enum FieldAccess {
    Setter(ErasedWriter),
    BackingSlot(ErasedWriter),
}

impl FieldAccess {
    fn path(&self) -> WritePath {
        match self {
            FieldAccess::Setter(_) => WritePath::Setter,
            FieldAccess::BackingSlot(_) => WritePath::BackingSlot,
        }
    }

    fn writer(&self) -> &ErasedWriter {
        match self {
            FieldAccess::Setter(w) | FieldAccess::BackingSlot(w) => w,
        }
    }
}

/// A writable field of record type `R`
pub struct FieldDescriptor<R> {
    record: &'static str,
    name: &'static str,
    value_type: ValueType,
    access: FieldAccess,
    _record: PhantomData<fn(&mut R)>,
}

impl<R: 'static> FieldDescriptor<R> {
    pub(crate) fn new(
        record: &'static str,
        name: &'static str,
        value_type: ValueType,
        access: FieldAccess,
    ) -> Self {
        Self {
            record,
            name,
            value_type,
            access,
            _record: PhantomData,
        }
    }

    /// Check that a value of type `V` can be stored in this field
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if `V` is not the declared type.
    pub fn check_value_type<V: 'static>(&self) -> RecastResult<()> {
        if self.value_type.accepts::<V>() {
            Ok(())
        } else {
            Err(RecastError::type_mismatch(
                self.record,
                self.name,
                self.value_type.name(),
                type_name::<V>(),
            ))
        }
    }

    /// The typed writer for this field, on whichever path it resolved to
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if `V` is not the declared type.
    pub fn writer<V: 'static>(&self) -> RecastResult<WriteFn<R, V>> {
        self.check_value_type::<V>()?;
        self.access.writer().downcast::<R, V>().ok_or_else(|| {
            RecastError::type_mismatch(
                self.record,
                self.name,
                self.value_type.name(),
                type_name::<V>(),
            )
        })
    }
}

impl<R> FieldDescriptor<R> {
    /// Field name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name of the record type that declares the field
    pub fn record_name(&self) -> &'static str {
        self.record
    }

    /// Declared field type
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Which path writes to this field
    pub fn write_path(&self) -> WritePath {
        self.access.path()
    }

    /// True when the field has a public writer
    pub fn is_externally_writable(&self) -> bool {
        self.write_path() == WritePath::Setter
    }

    /// True when writes go through the alternate storage accessor
    pub fn uses_backing_slot(&self) -> bool {
        self.write_path() == WritePath::BackingSlot
    }
}

impl<R> fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("record", &self.record)
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("write_path", &self.access.path())
            .finish()
    }
}
