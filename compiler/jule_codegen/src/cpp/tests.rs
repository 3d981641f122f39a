use super::*;
use jule_diagnostic::ErrorCode;
use jule_ir::{Attribute, Directive, FnId, Name, Span, StructId, Token};
use jule_sema::{
    Analyzer, BinaryOp, CastExpr, CheckedBlock, CheckedExpr, CheckedStmt, Field, FieldInit, Fn,
    FnFlags, Literal, LocalRef, Param, SliceLiteral, Struct, UnaryOp,
};
use jule_types::{CastIdiom, Prim, TypeKind};
use pretty_assertions::assert_eq;

fn tok(line: u32) -> Token {
    Token::new(Span::new(line * 100, line * 100 + 1), line, 1)
}

fn int() -> TypeKind {
    Prim::Int.into()
}

struct Program {
    interner: StringInterner,
    decls: DeclTable,
}

impl Program {
    fn new() -> Self {
        Program {
            interner: StringInterner::new(),
            decls: DeclTable::new(),
        }
    }

    fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    fn ident(&self, line: u32, kind: TypeKind, s: &str) -> CheckedExpr {
        CheckedExpr::ident(tok(line), kind, self.name(s))
    }

    fn int_lit(&self, line: u32, value: i64) -> CheckedExpr {
        CheckedExpr::lit(tok(line), int(), Literal::Int(value))
    }

    /// `fn max[T](a: T, b: T): T { if a > b { ret a }; ret b }`
    fn add_max(&mut self) -> FnId {
        let t = TypeKind::generic(self.name("T"), 0);
        let a = self.ident(2, t.clone(), "a");
        let b = self.ident(2, t.clone(), "b");
        let body = CheckedBlock::new(vec![
            CheckedStmt::If {
                cond: CheckedExpr::binary(tok(2), Prim::Bool.into(), ">", a.clone(), b.clone()),
                then: CheckedBlock::new(vec![CheckedStmt::Return {
                    token: tok(2),
                    value: Some(a),
                }]),
                otherwise: None,
            },
            CheckedStmt::Return {
                token: tok(3),
                value: Some(b),
            },
        ]);
        let decl = Fn::new(tok(1), self.name("max"))
            .with_generics(vec![self.name("T")])
            .with_params(vec![
                Param::new(tok(1), self.name("a"), t.clone()),
                Param::new(tok(1), self.name("b"), t.clone()),
            ])
            .with_result(t)
            .with_body(body);
        self.decls.add_fn(decl)
    }

    /// `struct Point { x: int, y: int }`
    fn add_point(&mut self) -> (StructId, TypeKind) {
        let decl = Struct::new(tok(1), self.name("Point"))
            .with_field(Field::new(tok(1), self.name("x"), int()))
            .with_field(Field::new(tok(1), self.name("y"), int()));
        let id = self.decls.add_struct(decl);
        (id, TypeKind::strct(id, self.name("Point"), vec![]))
    }

    fn init(&self, field: &str, value: CheckedExpr) -> FieldInit {
        FieldInit {
            token: tok(5),
            ident: self.name(field),
            value,
        }
    }

    fn add_fn(&mut self, decl: Fn) -> FnId {
        self.decls.add_fn(decl)
    }

    fn analyze(&self) -> Analysis {
        let analysis = Analyzer::new(&self.decls, &self.interner).analyze();
        assert!(!analysis.has_errors(), "{:?}", analysis.errors);
        analysis
    }
}

fn first_instance(analysis: &Analysis, decl: FnId) -> FnInsId {
    analysis.instances_of(decl)[0]
}

fn local(p: &Program, s: &str) -> ExprModel {
    ExprModel::Ident(LocalRef { ident: p.name(s) })
}

#[test]
fn test_generic_instance_renders_with_substituted_kinds() {
    let mut p = Program::new();
    let max = p.add_max();
    let args = vec![p.int_lit(11, 1), p.int_lit(11, 2)];
    let call = CheckedExpr::call(tok(11), int(), max, vec![], args);
    let body = CheckedBlock::new(vec![CheckedStmt::Expr(call)]);
    p.add_fn(Fn::new(tok(10), p.name("run")).with_body(body));
    let analysis = p.analyze();
    let codegen = CppCodegen::new(&p.decls, &p.interner, &analysis);

    let id = first_instance(&analysis, max);
    let text = codegen.render_fn(id, analysis.body(id).unwrap()).unwrap();
    assert_eq!(
        text,
        "jule::Int _max__int(jule::Int _a, jule::Int _b) {\n    \
         if ((_a > _b)) {\n        \
         return _a;\n    \
         }\n    \
         return _b;\n\
         }\n"
    );
}

#[test]
fn test_entry_point_is_forced_to_i32_with_boilerplate() {
    let mut p = Program::new();
    let ret = CheckedStmt::Return {
        token: tok(2),
        value: Some(p.int_lit(2, 0)),
    };
    let main = p.add_fn(
        Fn::new(tok(1), p.name("main"))
            .with_result(Prim::I64.into())
            .with_body(CheckedBlock::new(vec![ret])),
    );
    let analysis = p.analyze();
    let codegen = CppCodegen::new(&p.decls, &p.interner, &analysis);

    let id = first_instance(&analysis, main);
    let text = codegen.render_fn(id, analysis.body(id).unwrap()).unwrap();
    assert_eq!(
        text,
        "jule::I32 main() {\n\
         #pragma region JULE_ENTRY_POINT_STANDARD_CODES\n  \
         setlocale(0x0, \"\");\n\
         #pragma endregion JULE_ENTRY_POINT_STANDARD_CODES\n\
         \n    \
         return 0;\n\
         }\n"
    );
}

#[test]
fn test_unsafe_entry_point_still_gets_boilerplate() {
    let mut p = Program::new();
    let main = p.add_fn(Fn::new(tok(1), p.name("main")).with_flags(FnFlags::UNSAFE));
    let analysis = p.analyze();
    let codegen = CppCodegen::new(&p.decls, &p.interner, &analysis);

    let text = codegen.render_fn(first_instance(&analysis, main), &[]).unwrap();
    assert!(text.starts_with(&format!("jule::I32 main() {{{ENTRY_POINT_STANDARD_CODES}")));
}

#[test]
fn test_foreign_linked_entry_point_is_still_defined() {
    let mut p = Program::new();
    p.add_fn(Fn::new(tok(1), p.name("main")).with_flags(FnFlags::CPP_LINKED));
    p.add_fn(Fn::new(tok(2), p.name("puts")).with_flags(FnFlags::CPP_LINKED));
    let analysis = p.analyze();
    let result = CppCodegen::new(&p.decls, &p.interner, &analysis).render_program();

    assert!(result.success, "{:?}", result.errors);
    assert_eq!(
        result.code,
        format!("#include \"julec.hpp\"\n\njule::I32 main() {{{ENTRY_POINT_STANDARD_CODES}}}\n")
    );
}

#[test]
fn test_entry_point_name_is_configurable() {
    let mut p = Program::new();
    let start = p.add_fn(Fn::new(tok(1), p.name("start")));
    let main = p.add_fn(Fn::new(tok(2), p.name("main")));
    let analysis = p.analyze();
    let codegen = CppCodegen::new(&p.decls, &p.interner, &analysis).with_config(CodegenConfig {
        entry_point: "start".to_string(),
        ..CodegenConfig::default()
    });

    let start_text = codegen.render_fn(first_instance(&analysis, start), &[]).unwrap();
    assert!(start_text.starts_with("jule::I32 start() {\n#pragma region"));
    let main_text = codegen.render_fn(first_instance(&analysis, main), &[]).unwrap();
    assert_eq!(main_text, "void _main() {\n}\n");
}

#[test]
fn test_empty_parameter_list_renders_as_empty_text() {
    let mut p = Program::new();
    let tick = p.add_fn(Fn::new(tok(1), p.name("tick")));
    let analysis = p.analyze();
    let codegen = CppCodegen::new(&p.decls, &p.interner, &analysis);

    let id = first_instance(&analysis, tick);
    assert_eq!(codegen.render_fn(id, &[]).unwrap(), "void _tick() {\n}\n");
    assert_eq!(codegen.render_prototype(id).unwrap(), "void _tick();\n");
}

#[test]
fn test_parameters_have_no_trailing_separator() {
    let mut p = Program::new();
    let params = ["a", "b", "c"]
        .iter()
        .map(|n| Param::new(tok(1), p.name(n), int()))
        .collect();
    let f = p.add_fn(Fn::new(tok(1), p.name("sum3")).with_params(params));
    let analysis = p.analyze();
    let codegen = CppCodegen::new(&p.decls, &p.interner, &analysis);

    assert_eq!(
        codegen.render_prototype(first_instance(&analysis, f)).unwrap(),
        "void _sum3(jule::Int _a, jule::Int _b, jule::Int _c);\n"
    );
}

#[test]
fn test_attributes_precede_result_in_declaration_order() {
    let mut p = Program::new();
    let f = p.add_fn(
        Fn::new(tok(1), p.name("cold_path"))
            .with_attribute(Attribute::new(tok(1), p.name("inline")))
            .with_attribute(Attribute::new(tok(1), p.name("__attribute__((cold))")))
            .with_result(int())
            .with_body(CheckedBlock::new(vec![CheckedStmt::Return {
                token: tok(2),
                value: Some(p.int_lit(2, 1)),
            }])),
    );
    let analysis = p.analyze();
    let codegen = CppCodegen::new(&p.decls, &p.interner, &analysis);

    let id = first_instance(&analysis, f);
    assert_eq!(
        codegen.render_fn(id, analysis.body(id).unwrap()).unwrap(),
        "inline __attribute__((cold)) jule::Int _cold_path() {\n    return 1;\n}\n"
    );
}

#[test]
fn test_any_parameter_gets_template_preamble() {
    let mut p = Program::new();
    let show = p.add_fn(
        Fn::new(tok(1), p.name("show"))
            .with_attribute(Attribute::new(tok(1), p.name("inline")))
            .with_params(vec![Param::new(tok(1), p.name("x"), Prim::Any.into())]),
    );
    let analysis = p.analyze();
    let codegen = CppCodegen::new(&p.decls, &p.interner, &analysis);

    let id = first_instance(&analysis, show);
    assert_eq!(
        codegen.render_fn(id, &[]).unwrap(),
        "template <typename any>\ninline void _show(any _x) {\n}\n"
    );
}

#[test]
fn test_nested_any_parameter_gets_template_preamble() {
    let mut p = Program::new();
    let each = p.add_fn(Fn::new(tok(1), p.name("each")).with_params(vec![Param::new(
        tok(1),
        p.name("xs"),
        TypeKind::slice(Prim::Any.into()),
    )]));
    let analysis = p.analyze();
    let codegen = CppCodegen::new(&p.decls, &p.interner, &analysis);

    let id = first_instance(&analysis, each);
    assert_eq!(
        codegen.render_prototype(id).unwrap(),
        "template <typename any>\nvoid _each(jule::Slice<any> _xs);\n"
    );
}

#[test]
fn test_operator_expressions_are_parenthesized() {
    let p = Program::new();
    let analysis = p.analyze();
    let codegen = CppCodegen::new(&p.decls, &p.interner, &analysis);

    let sum = ExprModel::Binary(BinaryOp {
        left: Box::new(local(&p, "a")),
        right: Box::new(ExprModel::Lit(Literal::Int(1))),
        op: "+".to_string(),
    });
    let product = ExprModel::Binary(BinaryOp {
        left: Box::new(sum.clone()),
        right: Box::new(local(&p, "b")),
        op: "*".to_string(),
    });
    assert_eq!(codegen.render_expr(&sum).unwrap(), "(_a + 1)");
    assert_eq!(codegen.render_expr(&product).unwrap(), "((_a + 1) * _b)");

    let neg = ExprModel::Unary(UnaryOp {
        operand: Box::new(local(&p, "a")),
        op: "-".to_string(),
    });
    assert_eq!(codegen.render_expr(&neg).unwrap(), "(-_a)");

    let take = ExprModel::TakeRef(Box::new(local(&p, "r")));
    assert_eq!(codegen.render_expr(&take).unwrap(), "(_r).alloc");
}

#[test]
fn test_literals() {
    let p = Program::new();
    let analysis = p.analyze();
    let codegen = CppCodegen::new(&p.decls, &p.interner, &analysis);
    let render = |lit: Literal| codegen.render_expr(&ExprModel::Lit(lit)).unwrap();

    assert_eq!(render(Literal::Int(-3)), "-3");
    assert_eq!(render(Literal::Int(i64::MIN)), "(-9223372036854775807 - 1)");
    assert_eq!(render(Literal::Int(i64::MAX)), "9223372036854775807");
    assert_eq!(render(Literal::Uint(7)), "7U");
    assert_eq!(render(Literal::Float(2.0)), "2.0");
    assert_eq!(render(Literal::Float(f64::INFINITY)), "INFINITY");
    assert_eq!(render(Literal::Bool(true)), "true");
    assert_eq!(render(Literal::Nil), "nullptr");
    assert_eq!(
        render(Literal::Str(p.name("say \"hi\"\n\\"))),
        "jule::Str(\"say \\\"hi\\\"\\n\\\\\")"
    );
    assert_eq!(render(Literal::Str(p.name("\u{7f}1"))), "jule::Str(\"\\1771\")");
}

#[test]
fn test_cast_idioms() {
    let p = Program::new();
    let analysis = p.analyze();
    let codegen = CppCodegen::new(&p.decls, &p.interner, &analysis);
    let cast = |operand: &str, from: TypeKind, to: TypeKind, idiom| {
        codegen
            .render_expr(&ExprModel::Cast(CastExpr {
                operand: Box::new(local(&p, operand)),
                kind: to,
                source_kind: from,
                idiom,
            }))
            .unwrap()
    };

    assert_eq!(
        cast("x", int(), Prim::F64.into(), CastIdiom::Static),
        "static_cast<jule::F64>(_x)"
    );
    assert_eq!(
        cast("bytes", TypeKind::slice(Prim::U8.into()), Prim::Str.into(), CastIdiom::Construct),
        "jule::Str(_bytes)"
    );
    assert_eq!(
        cast("s", Prim::Str.into(), TypeKind::slice(Prim::I32.into()), CastIdiom::Construct),
        "jule::Slice<jule::I32>(_s)"
    );
    assert_eq!(
        cast("p", TypeKind::ptr(int()), Prim::Uintptr.into(), CastIdiom::Reinterpret),
        "reinterpret_cast<jule::Uintptr>(_p)"
    );
}

#[test]
fn test_slice_literal_keeps_element_kind_when_empty() {
    let p = Program::new();
    let analysis = p.analyze();
    let codegen = CppCodegen::new(&p.decls, &p.interner, &analysis);

    let empty = ExprModel::Slice(SliceLiteral {
        elem_kind: int(),
        elems: vec![],
    });
    assert_eq!(codegen.render_expr(&empty).unwrap(), "jule::Slice<jule::Int>({})");

    let nested = ExprModel::Slice(SliceLiteral {
        elem_kind: TypeKind::slice(Prim::Str.into()),
        elems: vec![local(&p, "a"), local(&p, "b")],
    });
    assert_eq!(
        codegen.render_expr(&nested).unwrap(),
        "jule::Slice<jule::Slice<jule::Str>>({_a, _b})"
    );
}

#[test]
fn test_unresolved_generic_aborts_the_unit() {
    let mut p = Program::new();
    let helper = p.add_fn(Fn::new(tok(1), p.name("helper")));
    let analysis = p.analyze();
    let codegen = CppCodegen::new(&p.decls, &p.interner, &analysis);

    let bad = ExprModel::Cast(CastExpr {
        operand: Box::new(local(&p, "x")),
        kind: TypeKind::generic(p.name("T"), 0),
        source_kind: int(),
        idiom: CastIdiom::Static,
    });
    let err = codegen.render_expr(&bad).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E9001);

    let err = codegen
        .render_fn(first_instance(&analysis, helper), &[StmtModel::Expr(bad)])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "internal invariant violated while rendering `helper`: \
         unresolved generic in `T` reached the renderer"
    );
    assert_eq!(err.to_diagnostic().code, ErrorCode::E9001);
}

#[test]
fn test_nested_unresolved_generic_is_rejected_before_rendering() {
    let p = Program::new();
    let analysis = p.analyze();
    let codegen = CppCodegen::new(&p.decls, &p.interner, &analysis);

    let t = TypeKind::generic(p.name("T"), 0);
    let elems = ExprModel::Slice(SliceLiteral {
        elem_kind: TypeKind::slice(TypeKind::reference(t)),
        elems: vec![],
    });
    let err = codegen.render_expr(&elems).unwrap_err();
    assert_eq!(
        err.to_string(),
        "internal invariant violated: unresolved generic in `[]&T` reached the renderer"
    );
}

#[test]
fn test_heap_literal_keeps_field_declaration_order() {
    let mut p = Program::new();
    let (_, point) = p.add_point();
    // fn make(): &Point { ret &Point{y: 2, x: 1} }
    let lit = CheckedExpr::struct_lit(
        tok(5),
        point.clone(),
        vec![p.init("y", p.int_lit(5, 2)), p.init("x", p.int_lit(5, 1))],
    );
    let heap = CheckedExpr::reference(tok(5), TypeKind::reference(point.clone()), lit);
    let make = p.add_fn(
        Fn::new(tok(4), p.name("make"))
            .with_result(TypeKind::reference(point))
            .with_body(CheckedBlock::new(vec![CheckedStmt::Return {
                token: tok(5),
                value: Some(heap),
            }])),
    );
    let analysis = p.analyze();
    let codegen = CppCodegen::new(&p.decls, &p.interner, &analysis);

    let id = first_instance(&analysis, make);
    assert_eq!(
        codegen.render_fn(id, analysis.body(id).unwrap()).unwrap(),
        "jule::Ptr<_Point> _make() {\n    \
         return jule::new_struct<_Point>(new (std::nothrow) _Point{._x = 1, ._y = 2});\n\
         }\n"
    );
}

#[test]
fn test_field_access_through_pointer_and_value() {
    let mut p = Program::new();
    let (_, point) = p.add_point();
    let by_ref = CheckedExpr::field(
        tok(3),
        int(),
        p.ident(3, TypeKind::reference(point.clone()), "r"),
        p.name("x"),
    );
    let by_value = CheckedExpr::field(tok(4), int(), p.ident(4, point.clone(), "v"), p.name("y"));
    let f = p.add_fn(
        Fn::new(tok(2), p.name("read"))
            .with_params(vec![
                Param::new(tok(2), p.name("r"), TypeKind::reference(point.clone())),
                Param::new(tok(2), p.name("v"), point),
            ])
            .with_body(CheckedBlock::new(vec![
                CheckedStmt::Expr(by_ref),
                CheckedStmt::Expr(by_value),
            ])),
    );
    let analysis = p.analyze();
    let codegen = CppCodegen::new(&p.decls, &p.interner, &analysis);

    let id = first_instance(&analysis, f);
    assert_eq!(
        codegen.render_fn(id, analysis.body(id).unwrap()).unwrap(),
        "void _read(jule::Ptr<_Point> _r, _Point _v) {\n    _r->_x;\n    _v._y;\n}\n"
    );
}

#[test]
fn test_struct_definition() {
    let mut p = Program::new();
    let (sid, _) = p.add_point();
    let analysis = p.analyze();
    let codegen = CppCodegen::new(&p.decls, &p.interner, &analysis);

    let id = analysis.instances.lookup_struct(sid, &[]).unwrap();
    assert_eq!(
        codegen.render_struct(id).unwrap(),
        "struct _Point {\n    jule::Int _x;\n    jule::Int _y;\n};\n"
    );
}

#[test]
fn test_structs_follow_their_by_value_fields() {
    let mut p = Program::new();
    // struct Line { a: Point, b: Point } declared ahead of Point.
    let point_id = StructId::new(1);
    let point = TypeKind::strct(point_id, p.name("Point"), vec![]);
    p.decls.add_struct(
        Struct::new(tok(1), p.name("Line"))
            .with_field(Field::new(tok(1), p.name("a"), point.clone()))
            .with_field(Field::new(tok(1), p.name("b"), point)),
    );
    let (sid, _) = p.add_point();
    assert_eq!(sid, point_id);
    let analysis = p.analyze();

    let order: Vec<String> = structs::definition_order(&analysis.instances)
        .into_iter()
        .map(|id| analysis.instances.struct_ins(id).link_ident.clone())
        .collect();
    assert_eq!(order, vec!["Point".to_string(), "Line".to_string()]);
}

#[test]
fn test_cpp_linked_calls_use_raw_identifier() {
    let mut p = Program::new();
    let puts = p.add_fn(
        Fn::new(tok(1), p.name("puts"))
            .with_flags(FnFlags::CPP_LINKED)
            .with_params(vec![Param::new(tok(1), p.name("s"), Prim::Str.into())]),
    );
    let eof = p.add_fn(
        Fn::new(tok(2), p.name("EOF"))
            .with_flags(FnFlags::CPP_LINKED)
            .with_directive(Directive::new(tok(2), p.name("cdef")))
            .with_result(int()),
    );
    let hello = CheckedExpr::lit(tok(4), Prim::Str.into(), Literal::Str(p.name("hi")));
    let say = CheckedExpr::call(tok(4), int(), puts, vec![], vec![hello]);
    let end = CheckedExpr::call(tok(5), int(), eof, vec![], vec![]);
    p.add_fn(
        Fn::new(tok(3), p.name("main")).with_body(CheckedBlock::new(vec![
            CheckedStmt::Expr(say),
            CheckedStmt::Expr(end),
        ])),
    );
    let analysis = p.analyze();
    let result = CppCodegen::new(&p.decls, &p.interner, &analysis).render_program();

    assert!(result.success);
    assert!(result.code.contains("    puts(jule::Str(\"hi\"));\n"));
    assert!(result.code.contains("    EOF;\n"));
    assert!(!result.code.contains("_puts"));
    assert!(!result.code.contains("void puts"));
}

#[test]
fn test_program_layout() {
    let mut p = Program::new();
    let (_, point) = p.add_point();
    // fn main() { let p: Point = Point{x: 1} }
    let lit = CheckedExpr::struct_lit(tok(3), point.clone(), vec![p.init("x", p.int_lit(3, 1))]);
    p.add_fn(
        Fn::new(tok(2), p.name("main")).with_body(CheckedBlock::new(vec![CheckedStmt::Var {
            token: tok(3),
            ident: p.name("p"),
            kind: point,
            init: Some(lit),
        }])),
    );
    let analysis = p.analyze();
    let result = CppCodegen::new(&p.decls, &p.interner, &analysis).render_program();

    assert!(result.success);
    assert_eq!(
        result.code,
        "#include \"julec.hpp\"\n\
         \n\
         struct _Point;\n\
         \n\
         struct _Point {\n    \
         jule::Int _x;\n    \
         jule::Int _y;\n\
         };\n\
         \n\
         jule::I32 main() {\n\
         #pragma region JULE_ENTRY_POINT_STANDARD_CODES\n  \
         setlocale(0x0, \"\");\n\
         #pragma endregion JULE_ENTRY_POINT_STANDARD_CODES\n\
         \n    \
         _Point _p = _Point{._x = 1};\n\
         }\n"
    );
}

#[test]
fn test_prototypes_can_be_disabled() {
    let mut p = Program::new();
    p.add_fn(Fn::new(tok(1), p.name("tick")));
    let analysis = p.analyze();

    let with = CppCodegen::new(&p.decls, &p.interner, &analysis).render_program();
    assert!(with.code.contains("void _tick();\n"));

    let without = CppCodegen::new(&p.decls, &p.interner, &analysis)
        .with_config(CodegenConfig {
            emit_prototypes: false,
            ..CodegenConfig::default()
        })
        .render_program();
    assert!(!without.code.contains("void _tick();\n"));
    assert!(without.code.contains("void _tick() {\n}\n"));
}
