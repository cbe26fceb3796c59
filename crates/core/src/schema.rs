//! Record schemas and field descriptor resolution
//!
//! A [`Schema`] is the field table of one record type, built once (at compile
//! time through [`record_schema!`](crate::record_schema), or by hand with
//! [`SchemaBuilder`]) and kept for the life of the process. It stands in for
//! runtime reflection: every field the pipeline can touch is declared here with
//! its type and its writers.
//!
//! ## Declarations
//!
//! | Builder call | Meaning |
//! |--------------|---------|
//! | `writable` | field with a public writer |
//! | `read_only` | field readable only from outside, with a registered backing slot |
//! | `computed` | field with neither; resolving it fails with `FieldNotWritable` |
//!
//! ## Resolution
//!
//! [`Schema::resolve`] turns a name into a [`FieldDescriptor`]. Successful
//! resolutions are cached in a `DashMap`, so concurrent first lookups of the
//! same field race only on the insert, and the first insert wins.

use crate::config::ResolverConfig;
use crate::descriptor::{ErasedWriter, FieldAccess, FieldDescriptor, WriteFn};
use crate::error::{RecastError, RecastResult};
use crate::field::ValueType;
use crate::record::RecordSchema;
use dashmap::DashMap;
use rustc_hash::FxHashMap;
use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::trace;

/// One field as declared in a schema
struct FieldDecl {
    name: &'static str,
    value_type: ValueType,
    setter: Option<ErasedWriter>,
    backing_slot: Option<ErasedWriter>,
}

/// Field table of record type `R`
pub struct Schema<R> {
    record: &'static str,
    config: ResolverConfig,
    fields: FxHashMap<&'static str, FieldDecl>,
    /// Declaration order, for listing
    order: Vec<&'static str>,
    cache: DashMap<&'static str, Arc<FieldDescriptor<R>>>,
}

impl<R: 'static> Schema<R> {
    /// Start declaring the schema of the named record type
    pub fn builder(record: &'static str) -> SchemaBuilder<R> {
        SchemaBuilder::new(record)
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Name of the record type
    pub fn record_name(&self) -> &'static str {
        self.record
    }

    /// Resolver configuration this schema was built with
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Number of declared fields
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when no fields are declared
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// True when a field with this name is declared
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Declared field names, in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    /// Declared type of a field
    pub fn value_type(&self, name: &str) -> Option<ValueType> {
        self.fields.get(name).map(|d| d.value_type)
    }

    /// True when a descriptor for this field is currently cached
    pub fn is_cached(&self, name: &str) -> bool {
        self.cache.contains_key(name)
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Resolve a field name to a descriptor
    ///
    /// # Errors
    ///
    /// - `FieldNotFound` if the field is not declared
    /// - `FieldNotWritable` if it has no setter and no usable backing slot
    pub fn resolve(&self, name: &str) -> RecastResult<Arc<FieldDescriptor<R>>> {
        if self.config.cache_descriptors {
            if let Some(hit) = self.cache.get(name) {
                return Ok(Arc::clone(hit.value()));
            }
        }

        let decl = self.declaration(name)?;
        let access = match (&decl.setter, &decl.backing_slot) {
            (Some(setter), _) => FieldAccess::Setter(setter.clone()),
            (None, Some(slot)) if self.config.allow_backing_slots => {
                FieldAccess::BackingSlot(slot.clone())
            }
            _ => return Err(RecastError::field_not_writable(self.record, decl.name)),
        };

        let descriptor = Arc::new(FieldDescriptor::new(
            self.record,
            decl.name,
            decl.value_type,
            access,
        ));
        trace!(
            target: "recast::resolve",
            record = self.record,
            field = decl.name,
            path = ?descriptor.write_path(),
            "Resolved field descriptor"
        );

        if !self.config.cache_descriptors {
            return Ok(descriptor);
        }
        let entry = self.cache.entry(decl.name).or_insert(descriptor);
        Ok(Arc::clone(entry.value()))
    }

    /// Resolve a field name and check that it holds values of type `V`
    ///
    /// The type check runs before writability is examined, so a caller passing
    /// the wrong value type learns about it first.
    ///
    /// # Errors
    ///
    /// - `FieldNotFound` if the field is not declared
    /// - `TypeMismatch` if `V` is not the declared type
    /// - `FieldNotWritable` if it has no setter and no usable backing slot
    pub fn resolve_typed<V: 'static>(&self, name: &str) -> RecastResult<Arc<FieldDescriptor<R>>> {
        let decl = self.declaration(name)?;
        if !decl.value_type.accepts::<V>() {
            return Err(RecastError::type_mismatch(
                self.record,
                decl.name,
                decl.value_type.name(),
                type_name::<V>(),
            ));
        }
        self.resolve(name)
    }

    fn declaration(&self, name: &str) -> RecastResult<&FieldDecl> {
        self.fields
            .get(name)
            .ok_or_else(|| RecastError::field_not_found(self.record, name))
    }
}

impl<R> fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("record", &self.record)
            .field("fields", &self.order)
            .field("config", &self.config)
            .finish()
    }
}

/// Resolve a field of record type `R` by name
pub fn resolve<R: RecordSchema>(name: &str) -> RecastResult<Arc<FieldDescriptor<R>>> {
    R::schema().resolve(name)
}

/// Resolve a field of record type `R` by name, checking it holds `V`
pub fn resolve_typed<R: RecordSchema, V: 'static>(
    name: &str,
) -> RecastResult<Arc<FieldDescriptor<R>>> {
    R::schema().resolve_typed::<V>(name)
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for a record [`Schema`]
///
/// # Example
///
/// ```
/// use recast_core::{Schema, ResolverConfig};
///
/// struct Ticket {
///     title: String,
///     opened_at: u64,
/// }
///
/// let schema = Schema::<Ticket>::builder("Ticket")
///     .config(ResolverConfig::default())
///     .writable::<String>("title", |t, v| t.title = v)
///     .read_only::<u64>("opened_at", |t, v| t.opened_at = v)
///     .computed::<bool>("is_open")
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.len(), 3);
/// assert!(schema.resolve("opened_at").unwrap().uses_backing_slot());
/// ```
pub struct SchemaBuilder<R> {
    record: &'static str,
    config: ResolverConfig,
    fields: Vec<FieldDecl>,
    _record: PhantomData<fn(&mut R)>,
}

impl<R: 'static> SchemaBuilder<R> {
    /// Create a builder for the named record type
    pub fn new(record: &'static str) -> Self {
        Self {
            record,
            config: ResolverConfig::default(),
            fields: Vec::new(),
            _record: PhantomData,
        }
    }

    /// Set the resolver configuration
    pub fn config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Declare a field with a public writer
    pub fn writable<V: 'static>(mut self, name: &'static str, setter: WriteFn<R, V>) -> Self {
        self.fields.push(FieldDecl {
            name,
            value_type: ValueType::of::<V>(),
            setter: Some(ErasedWriter::new(setter)),
            backing_slot: None,
        });
        self
    }

    /// Declare a read-only field and register its backing slot
    ///
    /// The slot writer is the alternate storage accessor used when a change
    /// set targets this field. Resolution refuses it when the schema's config
    /// disables backing slots.
    pub fn read_only<V: 'static>(mut self, name: &'static str, backing_slot: WriteFn<R, V>) -> Self {
        self.fields.push(FieldDecl {
            name,
            value_type: ValueType::of::<V>(),
            setter: None,
            backing_slot: Some(ErasedWriter::new(backing_slot)),
        });
        self
    }

    /// Declare a field that cannot be written at all
    pub fn computed<V: 'static>(mut self, name: &'static str) -> Self {
        self.fields.push(FieldDecl {
            name,
            value_type: ValueType::of::<V>(),
            setter: None,
            backing_slot: None,
        });
        self
    }

    /// Finish the schema
    ///
    /// # Errors
    ///
    /// Returns `DuplicateField` if a name was declared more than once.
    pub fn build(self) -> RecastResult<Schema<R>> {
        let mut fields = FxHashMap::default();
        let mut order = Vec::with_capacity(self.fields.len());
        for decl in self.fields {
            let name = decl.name;
            if fields.insert(name, decl).is_some() {
                return Err(RecastError::DuplicateField {
                    record: self.record,
                    field: name,
                });
            }
            order.push(name);
        }

        Ok(Schema {
            record: self.record,
            config: self.config,
            fields,
            order,
            cache: DashMap::new(),
        })
    }
}
