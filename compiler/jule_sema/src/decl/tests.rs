use super::*;
use crate::testing::{int, tok, Fixture};
use jule_types::Prim;
use pretty_assertions::assert_eq;

#[test]
fn test_non_generic_fn_has_synthetic_combination() {
    let fx = Fixture::new();
    let decl = Fn::new(tok(1), fx.name("run"));
    assert!(!decl.is_generic());
    assert_eq!(decl.combinations(), vec![Vec::<TypeKind>::new()]);

    let still_plain = Fn::new(tok(1), fx.name("run")).with_generics(vec![]);
    assert_eq!(still_plain.combination_count(), 1);
}

#[test]
fn test_generic_fn_starts_without_combinations() {
    let mut fx = Fixture::new();
    let max = fx.add_max();
    let decl = fx.decls.fn_decl(max);
    assert!(decl.is_generic());
    assert_eq!(decl.combination_count(), 0);

    assert_eq!(decl.record_combination(vec![int()], 0), Ok((0, true)));
    assert_eq!(decl.record_combination(vec![int()], 0), Ok((0, false)));
    assert_eq!(decl.combination_count(), 1);
}

#[test]
fn test_flags() {
    let fx = Fixture::new();
    let decl = Fn::new(tok(1), fx.name("memcpy"))
        .with_flags(FnFlags::CPP_LINKED | FnFlags::UNSAFE | FnFlags::PUBLIC);
    assert!(decl.is_cpp_linked());
    assert!(decl.is_unsafe());
    assert!(decl.is_public());
    assert!(decl.scope.is_none());
}

#[test]
fn test_directive_lookup() {
    let fx = Fixture::new();
    let cdef = fx.name("cdef");
    let decl = Fn::new(tok(1), fx.name("EOF"))
        .with_directive(Directive::new(tok(1), cdef))
        .with_doc("end of file marker");
    assert!(decl.directive(cdef).is_some());
    assert!(decl.directive(fx.name("typedef")).is_none());
    assert_eq!(decl.doc, "end of file marker");
}

#[test]
fn test_table_hands_out_sequential_ids() {
    let mut fx = Fixture::new();
    let max = fx.add_max();
    let main = fx.add_main_like("main", vec![]);
    assert_eq!(max, FnId::new(0));
    assert_eq!(main, FnId::new(1));
    assert_eq!(fx.decls.find_fn(fx.name("main")), Some(main));
    assert_eq!(fx.decls.find_fn(fx.name("missing")), None);
    assert_eq!(fx.decls.fn_count(), 2);
}

#[test]
fn test_struct_fields_by_identity() {
    let mut fx = Fixture::new();
    let point = fx.add_point();
    let decl = fx.decls.struct_decl(point);
    assert_eq!(decl.field_index(fx.name("y")), Some(1));
    assert_eq!(decl.field_index(fx.name("z")), None);
    assert_eq!(decl.combinations().len(), 1);

    let pair = fx.add_pair();
    let decl = fx.decls.struct_decl(pair);
    assert!(decl.is_generic());
    assert_eq!(
        decl.record_combination(vec![Prim::Str.into()], 1),
        Ok((0, true))
    );
    assert_eq!(decl.record_combination(vec![int()], 1), Err(1));
}
