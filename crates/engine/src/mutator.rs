//! Field mutators
//!
//! A [`FieldMutator`] is one pending change to one field: the resolved
//! [`FieldDescriptor`] plus a computation producing the new value.
//!
//! ## Mutation kinds
//!
//! - **Assignment**: a constant. Every application writes a clone of it.
//! - **Transform**: a function of the original record. It is evaluated on
//!   every application against the original being copied, so a change set
//!   holding `count + 1` yields `1` for a record at `0` and `6` for one at `5`.
//!
//! The value type is checked and erased when the mutator is built. After
//! that, applying a mutator cannot fail.

use recast_core::{
    Field, FieldDescriptor, RecastError, RecastResult, Record, WritePath,
};
use std::fmt;
use std::sync::Arc;

/// Transform computing a field value from the original record
pub type TransformFn<R, V> = Arc<dyn Fn(&R) -> V + Send + Sync>;

type ApplyFn<R> = Arc<dyn Fn(&R, &mut R) + Send + Sync>;

/// Which kind of computation a mutator carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// Constant replacement value
    Assignment,
    /// Value computed from the original record
    Transform,
}

/// The computation of a single field mutation, before erasure
pub enum Mutation<R, V> {
    /// Write this value
    Assignment(V),
    /// Write the result of this function applied to the original
    Transform(TransformFn<R, V>),
}

impl<R, V> Mutation<R, V> {
    /// Constant replacement value
    pub fn assign(value: V) -> Self {
        Mutation::Assignment(value)
    }

    /// Value computed from the original record
    pub fn transform<F>(f: F) -> Self
    where
        F: Fn(&R) -> V + Send + Sync + 'static,
    {
        Mutation::Transform(Arc::new(f))
    }

    /// Kind of this mutation
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::Assignment(_) => MutationKind::Assignment,
            Mutation::Transform(_) => MutationKind::Transform,
        }
    }
}

impl<R, V> fmt::Debug for Mutation<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mutation::{:?}", self.kind())
    }
}

/// A resolved field together with the computation of its new value
pub struct FieldMutator<R> {
    descriptor: Arc<FieldDescriptor<R>>,
    kind: MutationKind,
    apply: ApplyFn<R>,
}

impl<R: Record> FieldMutator<R> {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Build a mutator from an already resolved descriptor
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if `V` is not the descriptor's declared type.
    pub fn from_parts<V>(
        descriptor: Arc<FieldDescriptor<R>>,
        mutation: Mutation<R, V>,
    ) -> RecastResult<Self>
    where
        V: Clone + Send + Sync + 'static,
    {
        // Picks the setter or the backing slot, whichever the field resolved to.
        let write = descriptor.writer::<V>()?;
        let kind = mutation.kind();
        let apply: ApplyFn<R> = match mutation {
            Mutation::Assignment(value) => {
                Arc::new(move |_original: &R, copy: &mut R| write(copy, value.clone()))
            }
            Mutation::Transform(f) => {
                Arc::new(move |original: &R, copy: &mut R| write(copy, f(original)))
            }
        };

        Ok(Self {
            descriptor,
            kind,
            apply,
        })
    }

    /// Mutator assigning a constant to a typed field
    ///
    /// # Errors
    ///
    /// Returns `FieldNotWritable` if the field has no setter and no usable
    /// backing slot.
    pub fn from_assignment<V>(field: Field<R, V>, value: V) -> RecastResult<Self>
    where
        V: Clone + Send + Sync + 'static,
    {
        Self::from_named_assignment(field.name(), value)
    }

    /// Mutator computing a typed field from the original record
    ///
    /// # Errors
    ///
    /// Returns `FieldNotWritable` if the field has no setter and no usable
    /// backing slot.
    pub fn from_transform<V, F>(field: Field<R, V>, f: F) -> RecastResult<Self>
    where
        V: Clone + Send + Sync + 'static,
        F: Fn(&R) -> V + Send + Sync + 'static,
    {
        Self::from_named_transform(field.name(), f)
    }

    /// Mutator assigning a constant to a field looked up by name
    ///
    /// # Errors
    ///
    /// `FieldNotFound`, `TypeMismatch` or `FieldNotWritable`.
    pub fn from_named_assignment<V>(name: &str, value: V) -> RecastResult<Self>
    where
        V: Clone + Send + Sync + 'static,
    {
        let descriptor = R::schema().resolve_typed::<V>(name)?;
        Self::from_parts(descriptor, Mutation::assign(value))
    }

    /// Mutator computing a field looked up by name from the original record
    ///
    /// # Errors
    ///
    /// `FieldNotFound`, `TypeMismatch` or `FieldNotWritable`.
    pub fn from_named_transform<V, F>(name: &str, f: F) -> RecastResult<Self>
    where
        V: Clone + Send + Sync + 'static,
        F: Fn(&R) -> V + Send + Sync + 'static,
    {
        let descriptor = R::schema().resolve_typed::<V>(name)?;
        Self::from_parts(descriptor, Mutation::transform(f))
    }

    /// Start a builder that assembles a mutator piece by piece
    pub fn builder<V>() -> FieldMutatorBuilder<R, V>
    where
        V: Clone + Send + Sync + 'static,
    {
        FieldMutatorBuilder::new()
    }
}

impl<R> FieldMutator<R> {
    // =========================================================================
    // Accessors
    // =========================================================================

    /// Name of the target field; the merge key inside a change set
    pub fn field_name(&self) -> &'static str {
        self.descriptor.name()
    }

    /// Resolved target field
    pub fn descriptor(&self) -> &Arc<FieldDescriptor<R>> {
        &self.descriptor
    }

    /// Kind of computation this mutator carries
    pub fn kind(&self) -> MutationKind {
        self.kind
    }

    /// Path the write goes through
    pub fn write_path(&self) -> WritePath {
        self.descriptor.write_path()
    }

    /// Compute the new value from `original` and store it in `copy`
    pub fn apply(&self, original: &R, copy: &mut R) {
        (self.apply)(original, copy)
    }
}

impl<R> Clone for FieldMutator<R> {
    fn clone(&self) -> Self {
        Self {
            descriptor: Arc::clone(&self.descriptor),
            kind: self.kind,
            apply: Arc::clone(&self.apply),
        }
    }
}

impl<R> fmt::Debug for FieldMutator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMutator")
            .field("field", &self.descriptor.name())
            .field("kind", &self.kind)
            .finish()
    }
}

// ============================================================================
// Builder
// ============================================================================

enum Target<R> {
    Field(&'static str),
    Descriptor(Arc<FieldDescriptor<R>>),
}

/// Assembles a [`FieldMutator`] from separately supplied parts
///
/// Both a target (field or descriptor) and a computation (assignment or
/// transform) are required; `build` reports whichever is missing.
///
/// # Example
///
/// ```ignore
/// let mutator = FieldMutator::<Counter>::builder()
///     .field(Counter::COUNT)
///     .transform(|c| c.count + 1)
///     .build()?;
/// ```
pub struct FieldMutatorBuilder<R, V> {
    target: Option<Target<R>>,
    mutation: Option<Mutation<R, V>>,
}

impl<R: Record, V> FieldMutatorBuilder<R, V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            target: None,
            mutation: None,
        }
    }

    /// Target a typed field; it is resolved by `build`
    pub fn field(mut self, field: Field<R, V>) -> Self {
        self.target = Some(Target::Field(field.name()));
        self
    }

    /// Target an already resolved descriptor
    pub fn descriptor(mut self, descriptor: Arc<FieldDescriptor<R>>) -> Self {
        self.target = Some(Target::Descriptor(descriptor));
        self
    }

    /// Assign a constant
    pub fn assign(mut self, value: V) -> Self {
        self.mutation = Some(Mutation::assign(value));
        self
    }

    /// Compute the value from the original record
    pub fn transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> V + Send + Sync + 'static,
    {
        self.mutation = Some(Mutation::transform(f));
        self
    }

    /// Use an already assembled mutation
    pub fn mutation(mut self, mutation: Mutation<R, V>) -> Self {
        self.mutation = Some(mutation);
        self
    }

    /// Build the mutator
    ///
    /// # Errors
    ///
    /// - `MissingArgument` if no target or no computation was supplied
    /// - `TypeMismatch` or `FieldNotWritable` from resolution
    pub fn build(self) -> RecastResult<FieldMutator<R>> {
        let target = self
            .target
            .ok_or_else(|| RecastError::missing_argument("descriptor"))?;
        let mutation = self
            .mutation
            .ok_or_else(|| RecastError::missing_argument("mutation"))?;

        let descriptor = match target {
            Target::Descriptor(d) => d,
            Target::Field(name) => R::schema().resolve_typed::<V>(name)?,
        };
        FieldMutator::from_parts(descriptor, mutation)
    }
}

impl<R: Record, V> Default for FieldMutatorBuilder<R, V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
