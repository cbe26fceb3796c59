//! Compile-time field table generation
//!
//! [`record_schema!`](crate::record_schema) declares a record's field table
//! once, next to the struct, and generates:
//!
//! - one `Field<Record, T>` associated constant per field;
//! - a [`RecordSchema`](crate::RecordSchema) impl whose schema lives in a
//!   lazily initialised static.
//!
//! Each entry is `CONST: field: Type`, optionally followed by a mode:
//!
//! | Mode | Declaration |
//! |------|-------------|
//! | (none) | writable field, written directly |
//! | `=> read_only` | read-only field; the generated writer is its backing slot |
//! | `=> computed` | no writer; resolution fails with `FieldNotWritable` |
//!
//! Invoke the macro in the module that defines the record: backing-slot
//! writers assign the private field directly.
//!
//! A field name declared twice is rejected at compile time.

/// True if any name appears more than once; evaluated in const context
#[doc(hidden)]
pub const fn has_duplicate_field(names: &[&str]) -> bool {
    let mut i = 0;
    while i < names.len() {
        let mut j = i + 1;
        while j < names.len() {
            if str_eq(names[i], names[j]) {
                return true;
            }
            j += 1;
        }
        i += 1;
    }
    false
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Declare the field table of a record type
///
/// # Example
///
/// ```
/// use recast_core::{record_schema, RecordSchema, ResolverConfig, WritePath};
///
/// pub struct Invoice {
///     pub amount: u64,
///     issued_at: u64,
/// }
///
/// impl Invoice {
///     pub fn issued_at(&self) -> u64 {
///         self.issued_at
///     }
/// }
///
/// record_schema! {
///     Invoice(config = ResolverConfig::default()) {
///         AMOUNT: amount: u64,
///         ISSUED_AT: issued_at: u64 => read_only,
///         OVERDUE: overdue: bool => computed,
///     }
/// }
///
/// assert_eq!(Invoice::AMOUNT.name(), "amount");
/// let schema = Invoice::schema();
/// assert_eq!(schema.len(), 3);
/// assert_eq!(
///     schema.resolve("issued_at").unwrap().write_path(),
///     WritePath::BackingSlot
/// );
/// assert!(schema.resolve("overdue").is_err());
/// ```
///
/// # Duplicate fields
///
/// Each field name may appear once. A repeated name fails to compile:
///
/// ```compile_fail
/// use recast_core::record_schema;
///
/// pub struct Twice {
///     pub a: u8,
/// }
///
/// record_schema! {
///     Twice {
///         A: a: u8,
///         ALSO_A: a: u8,
///     }
/// }
/// ```
#[macro_export]
macro_rules! record_schema {
    (@decl $builder:ident, $record:ty, $field:ident, $ty:ty, read_only) => {
        $builder.read_only::<$ty>(stringify!($field), |r: &mut $record, v: $ty| r.$field = v)
    };
    (@decl $builder:ident, $record:ty, $field:ident, $ty:ty, computed) => {
        $builder.computed::<$ty>(stringify!($field))
    };
    (@decl $builder:ident, $record:ty, $field:ident, $ty:ty) => {
        $builder.writable::<$ty>(stringify!($field), |r: &mut $record, v: $ty| r.$field = v)
    };
    (
        $record:ident $(( config = $config:expr ))? {
            $( $konst:ident : $field:ident : $ty:ty $(=> $mode:ident)? ),* $(,)?
        }
    ) => {
        const _: () = assert!(
            !$crate::__private::has_duplicate_field(&[$(stringify!($field)),*]),
            "record_schema!: a field name is declared more than once",
        );

        impl $record {
            $(
                #[allow(missing_docs)]
                pub const $konst: $crate::Field<$record, $ty> =
                    $crate::Field::new(stringify!($field));
            )*
        }

        impl $crate::RecordSchema for $record {
            fn schema() -> &'static $crate::Schema<Self> {
                static SCHEMA: $crate::__private::Lazy<$crate::Schema<$record>> =
                    $crate::__private::Lazy::new(|| {
                        let builder = $crate::Schema::<$record>::builder(stringify!($record))
                            $( .config($config) )?;
                        $(
                            let builder = $crate::record_schema!(
                                @decl builder, $record, $field, $ty $(, $mode)?
                            );
                        )*
                        match builder.build() {
                            Ok(schema) => schema,
                            Err(e) => panic!("invalid schema for {}: {}", stringify!($record), e),
                        }
                    });
                &SCHEMA
            }
        }
    };
}
