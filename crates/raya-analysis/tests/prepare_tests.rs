mod common;

use common::{body_expr, span, stmt, Ast};
use raya_analysis::ast::*;
use raya_analysis::{
    prepare_program, AnalysisConfig, AnalysisError, FeedbackSlotKind, FunctionPreparer, Heap,
    LiteralPolicy, PreparedFunction,
};
use std::io::Write;

// ============================================================================
// Single functions
// ============================================================================

#[test]
fn test_prepare_summary() {
    let ast = Ast::new();
    let policy = LiteralPolicy::default();
    let heap = Heap::unbounded();
    let mut func = ast.function_of(
        "main",
        vec![
            ast.call(ast.global("print"), vec![ast.object(vec![("a", ast.smi(1))])]),
            ast.array(vec![ast.regexp("x"), ast.smi(2)]),
        ],
    );

    let summary = FunctionPreparer::new(&ast.factory, &policy, &heap)
        .prepare(&mut func)
        .unwrap();

    assert_eq!(summary.name, "main");
    assert_eq!(summary.literal_count, 3);
    assert_eq!(summary.slot_count, summary.slot_kinds.len());
    assert_eq!(
        summary.slot_kinds,
        vec![
            FeedbackSlotKind::Call,
            FeedbackSlotKind::LoadGlobalNotInsideTypeof,
            FeedbackSlotKind::Literal,
            FeedbackSlotKind::Literal,
            FeedbackSlotKind::Literal,
            FeedbackSlotKind::StoreKeyedSloppy,
        ]
    );
    assert_eq!(func.feedback_spec().unwrap().kinds(), summary.slot_kinds.as_slice());

    let argument = &body_expr(&func, 0).unwrap_call().arguments[0];
    assert!(argument.unwrap_object_literal().constant_properties().is_some());
    assert!(body_expr(&func, 1).unwrap_array_literal().constant_elements().is_some());
}

#[test]
fn test_nested_units_have_their_own_specs() {
    let ast = Ast::new();
    let policy = LiteralPolicy::default();
    let heap = Heap::unbounded();

    let method_body = ast.function_of("m", vec![ast.global("x"), ast.array(vec![])]);
    let constructor = FunctionLiteral::new(
        None,
        FunctionKind::BaseConstructor,
        vec![stmt(ast.global("x"))],
        span(),
    );
    let class = ClassLiteral::new(
        None,
        None,
        constructor,
        vec![ClassLiteralProperty::new(
            ast.string("m"),
            Expression::FunctionLiteral(Box::new(method_body)),
            ClassPropertyKind::Method,
            false,
            false,
        )],
        span(),
    );
    let mut func = ast.function(
        "outer",
        vec![stmt(ast.global("x")), stmt(Expression::ClassLiteral(Box::new(class)))],
    );

    let summary = FunctionPreparer::new(&ast.factory, &policy, &heap)
        .prepare(&mut func)
        .unwrap();

    // The outer read of x and the member store; nested reads are their own
    assert_eq!(
        summary.slot_kinds,
        vec![
            FeedbackSlotKind::LoadGlobalNotInsideTypeof,
            FeedbackSlotKind::StoreDataPropertyInLiteral,
        ]
    );
    assert_eq!(summary.function_count(), 3);

    let constructor = &summary.nested[0];
    assert_eq!(constructor.name, "<anonymous>");
    assert_eq!(constructor.slot_kinds, vec![FeedbackSlotKind::LoadGlobalNotInsideTypeof]);

    let method = &summary.nested[1];
    assert_eq!(method.name, "m");
    assert_eq!(method.slot_count, 2);
    assert_eq!(method.literal_count, 1);
}

#[test]
fn test_error_in_nested_unit_aborts_outer() {
    let ast = Ast::new();
    let policy = LiteralPolicy::default();
    let heap = Heap::unbounded();

    let spread = Expression::Spread(Spread {
        expression: Box::new(ast.local("xs")),
        span: span(),
    });
    let inner = ast.function_of("inner", vec![ast.array(vec![spread])]);
    let mut func = ast.function_of("outer", vec![Expression::FunctionLiteral(Box::new(inner))]);

    let result = FunctionPreparer::new(&ast.factory, &policy, &heap).prepare(&mut func);
    assert!(matches!(result, Err(AnalysisError::SpreadNotRewound { index: 0, .. })));
    assert!(func.feedback_spec().is_none());
}

#[test]
fn test_summary_serializes() {
    let ast = Ast::new();
    let policy = LiteralPolicy::default();
    let heap = Heap::unbounded();
    let mut func = ast.function_of("f", vec![ast.binary(BinaryOp::Add, ast.global("a"), ast.smi(1))]);

    let summary = FunctionPreparer::new(&ast.factory, &policy, &heap)
        .prepare(&mut func)
        .unwrap();
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["name"], "f");
    assert_eq!(json["slot_count"], 2);
    assert_eq!(json["slot_kinds"][1], "BinaryOp");

    let restored: PreparedFunction = serde_json::from_value(json).unwrap();
    assert_eq!(restored, summary);
}

// ============================================================================
// Programs
// ============================================================================

fn program(ast: &Ast, count: usize) -> Vec<FunctionLiteral> {
    (0..count)
        .map(|i| {
            let name = format!("f{}", i);
            // Unit i performs i global reads of distinct names
            let reads = (0..i).map(|j| ast.global(&format!("g{}", j))).collect();
            ast.function_of(&name, reads)
        })
        .collect()
}

#[test]
fn test_program_results_keep_input_order() {
    let ast = Ast::new();
    let config = AnalysisConfig::from_str("[analysis]\nworkers = 4\n").unwrap();
    let heap = Heap::new(&config.policy);
    let mut units = program(&ast, 12);

    let results = prepare_program(&mut units, &config, &ast.factory, &heap);

    assert_eq!(results.len(), 12);
    for (i, result) in results.iter().enumerate() {
        let summary = result.as_ref().unwrap();
        assert_eq!(summary.name, format!("f{}", i));
        assert_eq!(summary.slot_count, i);
        assert_eq!(units[i].feedback_spec().unwrap().slot_count(), i);
    }
}

#[test]
fn test_program_failure_is_isolated() {
    let ast = Ast::new();
    let config = AnalysisConfig::from_str("[analysis]\nworkers = 2\n").unwrap();
    let heap = Heap::unbounded();

    let spread = Expression::Spread(Spread {
        expression: Box::new(ast.local("xs")),
        span: span(),
    });
    let mut units = vec![
        ast.function_of("ok", vec![ast.global("a")]),
        ast.function_of("bad", vec![ast.array(vec![spread])]),
        ast.function_of("also_ok", vec![ast.array(vec![])]),
    ];

    let results = prepare_program(&mut units, &config, &ast.factory, &heap);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    assert_eq!(results[2].as_ref().unwrap().literal_count, 1);
}

#[test]
fn test_empty_program() {
    let ast = Ast::new();
    let config = AnalysisConfig::default();
    let heap = Heap::unbounded();
    let results = prepare_program(&mut [], &config, &ast.factory, &heap);
    assert!(results.is_empty());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[literals]\nmax_cloned_shallow_array_elements = 50\nmax_table_length = 1000\n\n[analysis]\nworkers = 3"
    )
    .unwrap();

    let config = AnalysisConfig::from_file(file.path()).unwrap();
    assert_eq!(config.policy.max_cloned_shallow_array_elements, 50);
    assert_eq!(config.policy.max_table_length, Some(1000));
    assert_eq!(config.worker_count(), 3);
}

#[test]
fn test_config_policy_drives_cloning() {
    let ast = Ast::new();
    let config = AnalysisConfig::from_str("[literals]\nmax_cloned_shallow_object_properties = 1\n").unwrap();
    let heap = Heap::new(&config.policy);
    let mut func = ast.function_of("f", vec![ast.object(vec![("a", ast.smi(1)), ("b", ast.smi(2))])]);

    FunctionPreparer::new(&ast.factory, &config.policy, &heap)
        .prepare(&mut func)
        .unwrap();
    let literal = body_expr(&func, 0).unwrap_object_literal();

    assert!(!literal.is_fast_cloning_supported(&config.policy));
    assert!(literal.is_fast_cloning_supported(&LiteralPolicy::default()));
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = AnalysisConfig::from_file(&dir.path().join("missing.toml"));
    assert!(matches!(result, Err(raya_analysis::ConfigError::Io(_))));
}
