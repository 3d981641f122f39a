use super::*;
use jule_ir::{StringInterner, StructId};
use pretty_assertions::assert_eq;

#[test]
fn test_numeric_casts_are_static() {
    assert_eq!(
        classify_cast(&Prim::F64.into(), &Prim::Int.into()),
        Ok(CastIdiom::Static)
    );
    assert_eq!(
        classify_cast(&Prim::U8.into(), &Prim::I64.into()),
        Ok(CastIdiom::Static)
    );
}

#[test]
fn test_both_directions_are_classified() {
    let a: TypeKind = Prim::I32.into();
    let b: TypeKind = Prim::F32.into();
    assert_eq!(classify_cast(&a, &b), Ok(CastIdiom::Static));
    assert_eq!(classify_cast(&b, &a), Ok(CastIdiom::Static));
}

#[test]
fn test_string_conversions_construct() {
    let bytes = TypeKind::slice(Prim::U8.into());
    let runes = TypeKind::slice(Prim::I32.into());
    let s: TypeKind = Prim::Str.into();

    assert_eq!(classify_cast(&bytes, &s), Ok(CastIdiom::Construct));
    assert_eq!(classify_cast(&s, &runes), Ok(CastIdiom::Construct));
    assert_eq!(classify_cast(&Prim::I32.into(), &s), Ok(CastIdiom::Construct));
    assert_eq!(
        classify_cast(&s, &Prim::F64.into()),
        Err(CastError::NoConversion)
    );
}

#[test]
fn test_pointer_reinterpretation_requires_unsafe() {
    let p = TypeKind::ptr(Prim::U8.into());
    let q = TypeKind::ptr(Prim::I64.into());
    let idiom = classify_cast(&p, &q);
    assert_eq!(idiom, Ok(CastIdiom::Reinterpret));
    assert!(idiom.is_ok_and(CastIdiom::requires_unsafe));
    assert_eq!(
        classify_cast(&p, &Prim::Uintptr.into()),
        Ok(CastIdiom::Reinterpret)
    );
}

#[test]
fn test_any_boxing_and_unboxing() {
    let any: TypeKind = Prim::Any.into();
    assert_eq!(classify_cast(&Prim::Int.into(), &any), Ok(CastIdiom::Construct));
    assert_eq!(classify_cast(&any, &Prim::Int.into()), Ok(CastIdiom::Static));
}

#[test]
fn test_rejected_casts() {
    let interner = StringInterner::new();
    let t = TypeKind::generic(interner.intern("T"), 0);
    let point = TypeKind::strct(StructId::new(0), interner.intern("Point"), vec![]);

    assert_eq!(
        classify_cast(&t, &Prim::Int.into()),
        Err(CastError::Unresolved)
    );
    assert_eq!(
        classify_cast(&Prim::Bool.into(), &Prim::Int.into()),
        Err(CastError::NoConversion)
    );
    assert_eq!(
        classify_cast(&point, &Prim::Int.into()),
        Err(CastError::NoConversion)
    );
    assert_eq!(classify_cast(&point, &point), Ok(CastIdiom::Static));
}
