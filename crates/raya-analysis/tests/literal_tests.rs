mod common;

use common::{body_expr, Ast};
use raya_analysis::ast::*;
use raya_analysis::literal::{ElementsBacking, StoredKey};
use raya_analysis::{
    AnalysisError, AstValue, BoilerplateValue, ElementsKind, FunctionPreparer, Heap, LiteralContext,
    LiteralPolicy,
};
use std::sync::Arc;

fn object(expr: &Expression) -> &ObjectLiteral {
    expr.unwrap_object_literal()
}

fn array(expr: &Expression) -> &ArrayLiteral {
    expr.unwrap_array_literal()
}

/// Prepare a single-expression function and hand back the function
fn prepared(ast: &Ast, expr: Expression) -> FunctionLiteral {
    let policy = LiteralPolicy::default();
    let heap = Heap::unbounded();
    let mut func = ast.function_of("f", vec![expr]);
    FunctionPreparer::new(&ast.factory, &policy, &heap)
        .prepare(&mut func)
        .unwrap();
    func
}

// ============================================================================
// Depth
// ============================================================================

#[test]
fn test_depth_grows_with_nesting() {
    let ast = Ast::new();
    let expr = ast.object(vec![(
        "a",
        ast.object(vec![("b", ast.array(vec![ast.smi(1)]))]),
    )]);
    let func = prepared(&ast, expr);

    let outer = object(body_expr(&func, 0));
    let middle = object(&outer.properties()[0].value);
    let inner = array(&middle.properties()[0].value);

    assert_eq!(inner.depth(), 1);
    assert_eq!(middle.depth(), 2);
    assert_eq!(outer.depth(), 3);
    assert!(outer.depth() >= middle.depth() + 1);
}

#[test]
fn test_depth_ignores_literals_after_computed_name() {
    let ast = Ast::new();
    let literal = ast.object_literal(vec![
        ast.prop("a", ast.smi(1)),
        ast.computed_prop(ast.name("k"), ast.smi(2)),
        ast.prop("b", ast.array(vec![ast.array(vec![])])),
    ]);
    let func = prepared(&ast, Expression::ObjectLiteral(literal));

    let literal = object(body_expr(&func, 0));
    assert_eq!(literal.depth(), 1);
    assert!(!literal.is_simple());
}

#[test]
fn test_flat_literals_are_shallow() {
    let ast = Ast::new();
    let func = prepared(&ast, ast.array(vec![ast.smi(1), ast.string("x")]));
    let literal = array(body_expr(&func, 0));
    assert_eq!(literal.depth(), 1);
    assert!(literal.is_shallow());
}

// ============================================================================
// Memoization
// ============================================================================

#[test]
fn test_building_twice_reuses_tables() {
    let ast = Ast::new();
    let policy = LiteralPolicy::default();
    let heap = Heap::unbounded();
    let ctx = LiteralContext::new(&ast.factory, &policy, &heap);

    let expr = ast.object(vec![("x", ast.smi(1)), ("y", ast.array(vec![ast.smi(2)]))]);
    let literal = object(&expr);

    literal.build_constant_properties(&ctx).unwrap();
    let first = Arc::clone(literal.constant_properties().unwrap());
    let depth = literal.depth();
    let allocated = heap.tables_allocated();

    literal.build_constant_properties(&ctx).unwrap();
    literal.init_depth_and_flags(&ast.factory, &policy).unwrap();

    assert!(Arc::ptr_eq(&first, literal.constant_properties().unwrap()));
    assert_eq!(literal.depth(), depth);
    assert_eq!(heap.tables_allocated(), allocated);
}

#[test]
fn test_nested_boilerplate_is_shared_with_parent() {
    let ast = Ast::new();
    let func = prepared(&ast, ast.object(vec![("y", ast.array(vec![ast.smi(2), ast.smi(3)]))]));

    let outer = object(body_expr(&func, 0));
    let inner = array(&outer.properties()[0].value);
    let (_, value) = &outer.constant_properties().unwrap().entries()[0];

    match value {
        BoilerplateValue::Array(nested) => {
            assert!(Arc::ptr_eq(nested, inner.constant_elements().unwrap()));
        }
        other => panic!("expected nested array boilerplate, found {:?}", other),
    }
}

// ============================================================================
// Conflict resolution
// ============================================================================

fn emit_stores(literal: &ObjectLiteral) -> Vec<bool> {
    literal.properties().iter().map(ObjectLiteralProperty::emit_store).collect()
}

#[test]
fn test_duplicate_plain_keys() {
    let ast = Ast::new();
    let mut literal = ast.object_literal(vec![ast.prop("a", ast.smi(1)), ast.prop("a", ast.smi(2))]);
    literal.calculate_emit_store();
    assert_eq!(emit_stores(&literal), vec![false, true]);
}

#[test]
fn test_getter_setter_pair() {
    let ast = Ast::new();
    let mut literal = ast.object_literal(vec![ast.getter("a"), ast.setter("a")]);
    literal.calculate_emit_store();
    assert_eq!(emit_stores(&literal), vec![true, true]);
}

#[test]
fn test_accessor_demotes_plain_entry() {
    let ast = Ast::new();
    let mut literal = ast.object_literal(vec![ast.prop("a", ast.smi(1)), ast.getter("a")]);
    literal.calculate_emit_store();
    assert_eq!(emit_stores(&literal), vec![false, true]);
}

#[test]
fn test_plain_entry_between_getter_and_setter() {
    let ast = Ast::new();
    let mut literal = ast.object_literal(vec![ast.getter("a"), ast.prop("a", ast.smi(1)), ast.setter("a")]);
    literal.calculate_emit_store();
    // The plain entry erases the getter before the setter installs
    assert_eq!(emit_stores(&literal), vec![false, false, true]);
}

#[test]
fn test_repeated_accessor_pairs() {
    let ast = Ast::new();
    let mut literal = ast.object_literal(vec![ast.getter("a"), ast.setter("a"), ast.getter("a")]);
    literal.calculate_emit_store();
    assert_eq!(emit_stores(&literal), vec![true, true, true]);
}

#[test]
fn test_conflict_resolution_is_idempotent() {
    let ast = Ast::new();
    let mut literal = ast.object_literal(vec![
        ast.prop("a", ast.smi(1)),
        ast.prop("b", ast.smi(2)),
        ast.prop("a", ast.smi(3)),
    ]);
    literal.calculate_emit_store();
    literal.calculate_emit_store();
    assert_eq!(emit_stores(&literal), vec![false, true, true]);
}

// ============================================================================
// Simplicity and prototype
// ============================================================================

#[test]
fn test_simplicity() {
    let ast = Ast::new();
    let policy = LiteralPolicy::default();

    let constant = ast.object(vec![("x", ast.smi(1)), ("y", ast.array(vec![ast.smi(2), ast.smi(3)]))]);
    object(&constant).init_depth_and_flags(&ast.factory, &policy).unwrap();
    assert!(object(&constant).is_simple());

    let with_call = ast.object(vec![("x", ast.smi(1)), ("y", ast.call(ast.global("f"), vec![]))]);
    object(&with_call).init_depth_and_flags(&ast.factory, &policy).unwrap();
    assert!(!object(&with_call).is_simple());

    let object_proto = ast.object(vec![("__proto__", ast.object(vec![]))]);
    object(&object_proto).init_depth_and_flags(&ast.factory, &policy).unwrap();
    assert!(!object(&object_proto).is_simple());

    let null_proto = ast.object(vec![("__proto__", ast.null())]);
    let literal = object(&null_proto);
    literal.init_depth_and_flags(&ast.factory, &policy).unwrap();
    assert!(literal.is_simple());
    assert!(literal.has_null_prototype());
    assert!(literal.flags(false).contains(LiteralFlags::HAS_NULL_PROTOTYPE));
}

#[test]
fn test_prototype_is_not_stored() {
    let ast = Ast::new();
    let func = prepared(&ast, ast.object(vec![("__proto__", ast.null()), ("a", ast.smi(1))]));
    let boilerplate = object(body_expr(&func, 0)).constant_properties().unwrap();

    assert_eq!(boilerplate.len(), 1);
    assert!(boilerplate.plan().has_seen_proto);
    assert_eq!(boilerplate.backing_store_size(), 1);
}

// ============================================================================
// Object boilerplates
// ============================================================================

#[test]
fn test_object_keys_are_normalized() {
    let ast = Ast::new();
    let literal = ast.object_literal(vec![
        ast.prop("a", ast.smi(1)),
        ast.prop("7", ast.smi(2)),
        ObjectLiteralProperty::new(&ast.factory, ast.number(1.5), ast.smi(3), false),
        ObjectLiteralProperty::new(&ast.factory, ast.smi(4), ast.smi(4), false),
    ]);
    let func = prepared(&ast, Expression::ObjectLiteral(literal));
    let boilerplate = object(body_expr(&func, 0)).constant_properties().unwrap();

    let keys: Vec<StoredKey> = boilerplate.entries().iter().map(|(key, _)| *key).collect();
    assert_eq!(
        keys,
        vec![
            StoredKey::Name(ast.factory.symbol("a")),
            StoredKey::Index(7),
            StoredKey::Name(ast.factory.symbol("1.5")),
            StoredKey::Index(4),
        ]
    );
    assert_eq!(boilerplate.plan().index_keys, 2);
    assert_eq!(boilerplate.backing_store_size(), 2);
}

#[test]
fn test_computed_values_are_placeholders() {
    let ast = Ast::new();
    let func = prepared(
        &ast,
        ast.object(vec![("a", ast.call(ast.global("f"), vec![])), ("b", ast.smi(2))]),
    );
    let boilerplate = object(body_expr(&func, 0)).constant_properties().unwrap();

    assert!(boilerplate.entries()[0].1.is_uninitialized());
    assert_eq!(boilerplate.entries()[1].1, BoilerplateValue::Literal(AstValue::Smi(2)));
}

#[test]
fn test_boilerplate_stops_at_computed_name() {
    let ast = Ast::new();
    let literal = ast.object_literal(vec![
        ast.prop("a", ast.smi(1)),
        ast.computed_prop(ast.name("k"), ast.smi(2)),
        ast.prop("b", ast.smi(3)),
    ]);
    assert_eq!(literal.boilerplate_properties(), 1);

    let func = prepared(&ast, Expression::ObjectLiteral(literal));
    let boilerplate = object(body_expr(&func, 0)).constant_properties().unwrap();
    assert_eq!(boilerplate.len(), 1);
    assert_eq!(boilerplate.plan().total_properties, 3);
}

#[test]
fn test_fast_cloning_threshold() {
    let ast = Ast::new();
    let policy = LiteralPolicy::default();
    let names = ["a", "b", "c", "d", "e", "f", "g"];

    let at_limit = ast.object(names[..6].iter().map(|name| (*name, ast.smi(1))).collect());
    object(&at_limit).init_depth_and_flags(&ast.factory, &policy).unwrap();
    assert!(object(&at_limit).is_fast_cloning_supported(&policy));

    let over_limit = ast.object(names.iter().map(|name| (*name, ast.smi(1))).collect());
    object(&over_limit).init_depth_and_flags(&ast.factory, &policy).unwrap();
    assert!(!object(&over_limit).is_fast_cloning_supported(&policy));

    let nested = ast.object(vec![("a", ast.object(vec![]))]);
    object(&nested).init_depth_and_flags(&ast.factory, &policy).unwrap();
    assert!(!object(&nested).is_fast_cloning_supported(&policy));
}

// ============================================================================
// Array boilerplates
// ============================================================================

#[test]
fn test_copy_on_write_eligibility() {
    let ast = Ast::new();

    let func = prepared(&ast, ast.array(vec![ast.smi(1), ast.smi(2), ast.smi(3)]));
    let flat = array(body_expr(&func, 0)).constant_elements().unwrap();
    assert!(flat.is_copy_on_write());
    assert_eq!(flat.kind, ElementsKind::PackedSmi);

    let func = prepared(&ast, ast.array(vec![ast.smi(1), ast.array(vec![ast.smi(2)])]));
    let nested = array(body_expr(&func, 0)).constant_elements().unwrap();
    assert!(!nested.is_copy_on_write());
    assert_eq!(nested.kind, ElementsKind::Packed);
}

#[test]
fn test_holes_make_kind_holey() {
    let ast = Ast::new();
    let func = prepared(&ast, ast.array(vec![ast.smi(1), ast.hole(), ast.smi(3)]));
    let boilerplate = array(body_expr(&func, 0)).constant_elements().unwrap();

    assert_eq!(boilerplate.kind, ElementsKind::HoleySmi);
    match &boilerplate.backing {
        ElementsBacking::Fixed { values, .. } => assert!(values[1].is_the_hole()),
        other => panic!("expected fixed backing, found {:?}", other),
    }
}

#[test]
fn test_doubles_are_unboxed() {
    let ast = Ast::new();
    let func = prepared(&ast, ast.array(vec![ast.smi(1), ast.number(2.5), ast.hole()]));
    let boilerplate = array(body_expr(&func, 0)).constant_elements().unwrap();

    assert_eq!(boilerplate.kind, ElementsKind::HoleyDouble);
    assert!(!boilerplate.is_copy_on_write());
    assert_eq!(boilerplate.backing, ElementsBacking::Double(vec![Some(1.0), Some(2.5), None]));
}

#[test]
fn test_computed_elements_start_as_zero() {
    let ast = Ast::new();
    let func = prepared(&ast, ast.array(vec![ast.call(ast.global("f"), vec![]), ast.string("s")]));
    let literal = array(body_expr(&func, 0));
    let boilerplate = literal.constant_elements().unwrap();

    assert!(!literal.is_simple());
    assert_eq!(boilerplate.kind, ElementsKind::Packed);
    match &boilerplate.backing {
        ElementsBacking::Fixed { values, copy_on_write } => {
            assert_eq!(values[0], BoilerplateValue::Literal(AstValue::Smi(0)));
            assert!(!copy_on_write);
        }
        other => panic!("expected fixed backing, found {:?}", other),
    }
}

#[test]
fn test_empty_array_is_not_copy_on_write() {
    let ast = Ast::new();
    let func = prepared(&ast, ast.array(vec![]));
    let boilerplate = array(body_expr(&func, 0)).constant_elements().unwrap();
    assert!(boilerplate.is_empty());
    assert!(!boilerplate.is_copy_on_write());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unrewound_spread_fails_preparation() {
    let ast = Ast::new();
    let spread = Expression::Spread(Spread {
        expression: Box::new(ast.global("xs")),
        span: common::span(),
    });
    let policy = LiteralPolicy::default();
    let heap = Heap::unbounded();
    let mut func = ast.function_of("f", vec![ast.array(vec![ast.smi(1), spread])]);

    let err = FunctionPreparer::new(&ast.factory, &policy, &heap)
        .prepare(&mut func)
        .unwrap_err();
    assert!(matches!(err, AnalysisError::SpreadNotRewound { index: 1, .. }));
}

#[test]
fn test_table_limit_is_enforced() {
    let ast = Ast::new();
    let policy = LiteralPolicy {
        max_table_length: Some(2),
        ..LiteralPolicy::default()
    };
    let heap = Heap::new(&policy);
    let mut func = ast.function_of("f", vec![ast.array(vec![ast.smi(1), ast.smi(2), ast.smi(3)])]);

    let err = FunctionPreparer::new(&ast.factory, &policy, &heap)
        .prepare(&mut func)
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Alloc(_)));
}
