//! Name-keyed building, type checks and write paths

use crate::records::{Counter, Sensor, Sealed, Stamped};
use recast::{
    resolve, ChangeSet, FieldMutator, RecastError, RecordExt, RecordSchema, ResolverConfig,
    Schema, WritePath,
};
use std::sync::Arc;

// ============================================================================
// Name-keyed building
// ============================================================================

#[test]
fn test_wrong_value_type_is_rejected_at_build() {
    let original = Counter::new(0, "x");
    let mut changes = ChangeSet::<Counter>::new();

    let err = changes.assign_named("count", "seven".to_string()).unwrap_err();
    match err {
        RecastError::TypeMismatch {
            record,
            field,
            expected,
            actual,
        } => {
            assert_eq!(record, "Counter");
            assert_eq!(field, "count");
            assert_eq!(expected, "i64");
            assert!(actual.contains("String"));
        }
        other => panic!("expected TypeMismatch, got {:?}", other),
    }
    assert!(changes.is_empty());
    assert_eq!(original.count, 0);
}

#[test]
fn test_unknown_field_is_rejected_at_build() {
    let err = ChangeSet::<Counter>::new()
        .assign_named("cuont", 1i64)
        .unwrap_err();
    assert!(matches!(err, RecastError::FieldNotFound { ref field, .. } if field == "cuont"));
    assert!(err.is_build_error());
}

#[test]
fn test_named_transform_applies() {
    let original = Counter::new(4, "x");
    let result = original
        .with(|c| {
            c.transform_named("count", |c: &Counter| c.count * c.count)?;
            Ok(())
        })
        .unwrap();
    assert_eq!(result.count, 16);
}

// ============================================================================
// Write paths
// ============================================================================

#[test]
fn test_backing_slot_is_writable() {
    let descriptor = resolve::<Stamped>("created_at").unwrap();
    assert_eq!(descriptor.write_path(), WritePath::BackingSlot);
    assert!(!descriptor.is_externally_writable());

    let mutator = FieldMutator::from_assignment(Stamped::NAME, "renamed".to_string()).unwrap();
    assert_eq!(mutator.write_path(), WritePath::Setter);
}

#[test]
fn test_computed_field_is_not_writable() {
    let err = FieldMutator::<Sensor>::from_named_assignment("summary", "s".to_string()).unwrap_err();
    assert!(matches!(
        err,
        RecastError::FieldNotWritable { record: "Sensor", .. }
    ));

    let err = FieldMutator::<Sensor>::from_named_assignment("summary", 1u32).unwrap_err();
    assert!(matches!(err, RecastError::TypeMismatch { .. }));
}

#[test]
fn test_backing_slots_disabled_by_config() {
    assert!(!Sealed::schema().config().allow_backing_slots);
    let err = FieldMutator::from_assignment(Sealed::SERIAL, 9).unwrap_err();
    assert!(matches!(err, RecastError::FieldNotWritable { .. }));

    let original = Sealed::new(1);
    let opened = original
        .with(|c| {
            c.assign(Sealed::OPEN, true)?;
            Ok(())
        })
        .unwrap();
    assert!(opened.open);
    assert_eq!(opened.serial(), 1);
}

#[test]
fn test_descriptor_is_cached() {
    let first = resolve::<Counter>("label").unwrap();
    let second = resolve::<Counter>("label").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(Counter::schema().is_cached("label"));
}

// ============================================================================
// Builder
// ============================================================================

#[test]
fn test_builder_requires_descriptor_and_mutation() {
    let err = FieldMutator::<Counter>::builder::<i64>()
        .assign(1)
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        RecastError::MissingArgument {
            argument: "descriptor"
        }
    ));

    let err = FieldMutator::<Counter>::builder()
        .field(Counter::COUNT)
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        RecastError::MissingArgument {
            argument: "mutation"
        }
    ));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_from_toml_drives_hand_built_schema() {
    #[derive(Debug, Clone)]
    struct Row {
        id: u32,
    }

    let config = ResolverConfig::from_toml_str(
        r#"
        cache_descriptors = false
        allow_backing_slots = false
        "#,
    )
    .unwrap();

    let schema = Schema::<Row>::builder("Row")
        .config(config)
        .read_only::<u32>("id", |r: &mut Row, v| r.id = v)
        .build()
        .unwrap();

    assert!(matches!(
        schema.resolve("id"),
        Err(RecastError::FieldNotWritable { .. })
    ));
    assert!(!schema.is_cached("id"));

    let mut row = Row { id: 1 };
    let relaxed = Schema::<Row>::builder("Row")
        .config(config.with_allow_backing_slots(true))
        .read_only::<u32>("id", |r: &mut Row, v| r.id = v)
        .build()
        .unwrap();
    (relaxed.resolve("id").unwrap().writer::<u32>().unwrap())(&mut row, 2);
    assert_eq!(row.id, 2);
}

#[test]
fn test_bad_config_is_reported() {
    let err = ResolverConfig::from_toml_str("cache_descriptors = \"sometimes\"").unwrap_err();
    assert!(matches!(err, RecastError::InvalidConfig(_)));
}
