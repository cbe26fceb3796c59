//! Properties over randomly generated change sets

use crate::records::Counter;
use proptest::prelude::*;
use recast::{apply_changes, ChangeSet, RecastResult};
use std::sync::Arc;

// ============================================================================
// Strategies
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    SetCount(i64),
    AddCount(i64),
    SetLabel(String),
    SuffixLabel(String),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i32>().prop_map(|n| Op::SetCount(n as i64)),
        (-1000i64..1000).prop_map(Op::AddCount),
        "[a-z]{0,8}".prop_map(Op::SetLabel),
        "[a-z]{1,4}".prop_map(Op::SuffixLabel),
    ]
}

fn build(ops: &[Op]) -> RecastResult<ChangeSet<Counter>> {
    let mut changes = ChangeSet::new();
    for op in ops.iter().cloned() {
        match op {
            Op::SetCount(n) => changes.assign(Counter::COUNT, n)?,
            Op::AddCount(d) => changes.transform(Counter::COUNT, move |c| c.count + d)?,
            Op::SetLabel(s) => changes.assign(Counter::LABEL, s)?,
            Op::SuffixLabel(s) => {
                changes.transform(Counter::LABEL, move |c| format!("{}{}", c.label, s))?
            }
        };
    }
    Ok(changes)
}

/// Expected result: the last op per field, evaluated against the original
fn model(original: &Counter, ops: &[Op]) -> Counter {
    let mut count = original.count;
    let mut label = original.label.clone();
    for op in ops {
        match op {
            Op::SetCount(n) => count = *n,
            Op::AddCount(d) => count = original.count + d,
            Op::SetLabel(s) => label = s.clone(),
            Op::SuffixLabel(s) => label = format!("{}{}", original.label, s),
        }
    }
    Counter { count, label }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: applying never touches the original.
    #[test]
    fn prop_original_is_never_mutated(
        count in -10_000i64..10_000,
        label in "[a-z]{0,6}",
        ops in prop::collection::vec(arb_op(), 0..12),
    ) {
        let original = Counter::new(count, &label);
        let snapshot = (*original).clone();
        let changes = build(&ops).unwrap();
        let _ = apply_changes(&original, &changes).unwrap();
        prop_assert_eq!(&*original, &snapshot);
    }

    /// Property: the result equals the last write per field.
    #[test]
    fn prop_last_write_wins(
        count in -10_000i64..10_000,
        label in "[a-z]{0,6}",
        ops in prop::collection::vec(arb_op(), 1..12),
    ) {
        let original = Counter::new(count, &label);
        let changes = build(&ops).unwrap();
        prop_assert!(changes.len() <= 2);
        let result = apply_changes(&original, &changes).unwrap();
        prop_assert_eq!(&*result, &model(&original, &ops));
    }

    /// Property: identity is returned exactly when there is nothing to do.
    #[test]
    fn prop_identity_iff_empty(ops in prop::collection::vec(arb_op(), 0..4)) {
        let original = Counter::new(0, "x");
        let changes = build(&ops).unwrap();
        let result = apply_changes(&original, &changes).unwrap();
        prop_assert_eq!(Arc::ptr_eq(&original, &result), ops.is_empty());
    }

    /// Property: one change set applied to two originals gives the same
    /// answers as applying it to each alone.
    #[test]
    fn prop_reuse_is_independent(
        a in -1000i64..1000,
        b in -1000i64..1000,
        ops in prop::collection::vec(arb_op(), 0..8),
    ) {
        let changes = build(&ops).unwrap();
        let first = Counter::new(a, "a");
        let second = Counter::new(b, "b");

        let r1 = apply_changes(&first, &changes).unwrap();
        let r2 = apply_changes(&second, &changes).unwrap();
        prop_assert_eq!(&*r1, &model(&first, &ops));
        prop_assert_eq!(&*r2, &model(&second, &ops));
    }
}
