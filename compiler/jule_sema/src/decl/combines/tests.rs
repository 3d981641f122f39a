use super::*;
use jule_types::Prim;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn prim_kind() -> impl Strategy<Value = TypeKind> {
    prop::sample::select(Prim::ALL.to_vec()).prop_map(TypeKind::Prim)
}

fn kind() -> impl Strategy<Value = TypeKind> {
    prim_kind().prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(TypeKind::ptr),
            inner.clone().prop_map(TypeKind::reference),
            inner.prop_map(TypeKind::slice),
        ]
    })
}

#[test]
fn test_synthetic_has_one_empty_combination() {
    let combines = Combines::synthetic();
    assert_eq!(combines.len(), 1);
    assert_eq!(combines.get(0), Some(&Vec::new()));
}

#[test]
fn test_record_is_idempotent() {
    let mut combines = Combines::new();
    assert_eq!(combines.record(vec![Prim::Int.into()]), (0, true));
    assert_eq!(combines.record(vec![Prim::F64.into()]), (1, true));
    assert_eq!(combines.record(vec![Prim::Int.into()]), (0, false));
    assert_eq!(combines.len(), 2);
    assert_eq!(combines.position(&[TypeKind::from(Prim::F64)]), Some(1));
}

#[test]
fn test_limit_only_rejects_new_combinations() {
    let mut combines = Combines::new();
    assert_eq!(combines.try_record(vec![Prim::Int.into()], 1), Ok((0, true)));
    assert_eq!(combines.try_record(vec![Prim::Int.into()], 1), Ok((0, false)));
    assert_eq!(combines.try_record(vec![Prim::Str.into()], 1), Err(1));
    assert_eq!(combines.try_record(vec![Prim::Str.into()], 0), Ok((1, true)));
}

proptest! {
    #[test]
    fn prop_recorded_set_has_no_duplicates(
        combos in prop::collection::vec(prop::collection::vec(kind(), 0..3), 0..24)
    ) {
        let mut combines = Combines::new();
        for combo in &combos {
            let (index, _) = combines.record(combo.clone());
            prop_assert_eq!(combines.get(index), Some(combo));
        }

        let recorded: Vec<_> = combines.iter().collect();
        for (i, a) in recorded.iter().enumerate() {
            for b in &recorded[i + 1..] {
                prop_assert_ne!(a, b);
            }
        }
        let mut distinct = combos.clone();
        distinct.sort_by_key(|c| format!("{c:?}"));
        distinct.dedup();
        prop_assert_eq!(combines.len(), distinct.len());
    }
}
