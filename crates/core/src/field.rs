//! Typed field identifiers
//!
//! A [`Field<R, V>`] names one field of record type `R` whose declared type is
//! `V`. Identifiers are plain constants (usually generated by
//! [`record_schema!`](crate::record_schema)), so passing the wrong value type
//! for a field is a compile error rather than a runtime one.
//!
//! [`ValueType`] is the runtime form of a declared type, used when a field is
//! looked up by name and the compiler cannot help.

use std::any::{type_name, TypeId};
use std::fmt;
use std::marker::PhantomData;

/// Identifier for field `name` of record `R`, holding values of type `V`
pub struct Field<R, V> {
    name: &'static str,
    _marker: PhantomData<fn(&R) -> V>,
}

impl<R, V> Field<R, V> {
    /// Create an identifier for the named field
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// The field name
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

// Manual impls: derives would require R: Clone / V: Clone.
impl<R, V> Clone for Field<R, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, V> Copy for Field<R, V> {}

impl<R, V> PartialEq for Field<R, V> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<R, V> Eq for Field<R, V> {}

impl<R, V> fmt::Debug for Field<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("value_type", &type_name::<V>())
            .finish()
    }
}

/// Runtime description of a declared field type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueType {
    id: TypeId,
    name: &'static str,
}

impl ValueType {
    /// The value type for `V`
    pub fn of<V: 'static>() -> Self {
        Self {
            id: TypeId::of::<V>(),
            name: type_name::<V>(),
        }
    }

    /// Type name, for diagnostics only
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether a value of type `V` can be stored in a field of this type
    ///
    /// Rust has no implicit widening, so this is exact type equality.
    pub fn accepts<V: 'static>(&self) -> bool {
        self.id == TypeId::of::<V>()
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
