//! Constant boilerplate construction
//!
//! Builds the tables the runtime copies when a literal is first evaluated.
//! Building is memoized per literal: a second request is a no-op and
//! allocates nothing.

use super::{
    ArrayBoilerplate, BoilerplatePlan, BoilerplateValue, ElementsBacking, ElementsKind,
    LiteralContext, StoredKey,
};
use crate::ast::{
    ArrayLiteral, AstValue, AstValueFactory, Expression, LiteralProperty, MaterializedLiteral,
    ObjectLiteral,
};
use crate::error::{AnalysisError, AnalysisResult};
use std::sync::Arc;
use tracing::trace;

/// Value a boilerplate stores for `expr`: the literal itself, the nested
/// boilerplate of a simple literal, or a runtime placeholder
pub fn boilerplate_value(expr: &Expression) -> BoilerplateValue {
    if let Some(lit) = expr.as_literal() {
        return BoilerplateValue::from_literal(lit.value);
    }
    if expr.is_compile_time_value() {
        let nested = match expr.as_materialized_literal() {
            Some(MaterializedLiteral::Object(lit)) => {
                lit.constant_properties().cloned().map(BoilerplateValue::Object)
            }
            Some(MaterializedLiteral::Array(lit)) => {
                lit.constant_elements().cloned().map(BoilerplateValue::Array)
            }
            _ => None,
        };
        if let Some(value) = nested {
            return value;
        }
    }
    BoilerplateValue::Uninitialized
}

/// Normalize a static key: index strings become indices, non-index numbers
/// their canonical string form
fn stored_key(factory: &AstValueFactory, key: &AstValue) -> StoredKey {
    if let Some(index) = factory.array_index(key) {
        return StoredKey::Index(index);
    }
    match key {
        AstValue::String(name) => StoredKey::Name(*name),
        AstValue::Smi(_) | AstValue::Number(_) => {
            let number = key.as_number().unwrap_or(f64::NAN);
            StoredKey::Name(factory.number_to_string(number))
        }
        AstValue::Boolean(value) => StoredKey::Name(factory.symbol(if *value { "true" } else { "false" })),
        AstValue::Null => StoredKey::Name(factory.symbol("null")),
        AstValue::Undefined | AstValue::TheHole => StoredKey::Name(factory.undefined_string()),
    }
}

impl ObjectLiteral {
    /// Build the constant properties table
    pub fn build_constant_properties(&self, ctx: &LiteralContext<'_>) -> AnalysisResult<()> {
        if self.constant_properties.get().is_some() {
            return Ok(());
        }
        self.init_depth_and_flags(ctx.factory, ctx.policy)?;

        let mut index_keys = 0;
        let mut has_seen_proto = false;
        for property in self.properties() {
            if property.is_prototype() {
                has_seen_proto = true;
                continue;
            }
            if property.is_computed_name() {
                continue;
            }
            let is_index = property
                .key
                .as_literal()
                .map_or(false, |key| ctx.factory.array_index(&key.value).is_some());
            if is_index {
                index_keys += 1;
            }
        }

        let plan = BoilerplatePlan {
            boilerplate_properties: self.boilerplate_properties(),
            total_properties: self.properties().len() as u32,
            index_keys,
            has_seen_proto,
        };
        let mut boilerplate = ctx.heap.new_object_boilerplate(plan)?;

        for property in self.properties() {
            if property.is_prototype() {
                continue;
            }
            if boilerplate.len() == self.boilerplate_properties() as usize {
                break;
            }
            let Some(key) = property.key.as_literal() else {
                break;
            };

            if let Some(literal) = property.value.as_materialized_literal() {
                literal.build_constants(ctx)?;
            }

            // Computed values are filled in at runtime; order is preserved
            let key = stored_key(ctx.factory, &key.value);
            boilerplate.push(key, boilerplate_value(&property.value));
        }

        trace!(
            kind = "object",
            length = boilerplate.len(),
            index_keys,
            "materialized boilerplate"
        );
        self.constant_properties.get_or_init(|| Arc::new(boilerplate));
        Ok(())
    }
}

impl ArrayLiteral {
    /// Build the constant elements and choose their elements kind
    pub fn build_constant_elements(&self, ctx: &LiteralContext<'_>) -> AnalysisResult<()> {
        if let Some(index) = self.first_spread_index() {
            return Err(AnalysisError::SpreadNotRewound {
                span: self.span,
                index,
            });
        }
        if self.constant_elements.get().is_some() {
            return Ok(());
        }
        self.init_depth_and_flags(ctx.factory, ctx.policy)?;

        let length = self.values().len();
        let mut fixed = ctx.heap.new_fixed_array_with_holes(length)?;
        let mut kind = ElementsKind::FIRST;
        let mut is_holey = false;

        for (index, element) in self.values().iter().enumerate() {
            if let Some(literal) = element.as_materialized_literal() {
                literal.build_constants(ctx)?;
            }

            let mut value = boilerplate_value(element);
            if value.is_the_hole() {
                is_holey = true;
                continue;
            }
            if value.is_uninitialized() {
                value = BoilerplateValue::Literal(AstValue::Smi(0));
            }

            kind = kind.more_general(value.optimal_elements_kind());
            fixed[index] = value;
        }

        if is_holey {
            kind = kind.to_holey();
        }

        // Simple shallow arrays are never written before first use, so
        // clones may share the table
        let copy_on_write =
            self.is_simple() && self.depth() == 1 && length > 0 && kind.is_smi_or_object();

        let backing = if kind.is_double() {
            let mut doubles = ctx.heap.new_fixed_double_array(length)?;
            ctx.heap.copy_to_double(&fixed, &mut doubles);
            ElementsBacking::Double(doubles)
        } else {
            ElementsBacking::Fixed {
                values: fixed,
                copy_on_write,
            }
        };

        trace!(
            kind = "array",
            length,
            elements_kind = %kind,
            copy_on_write,
            "materialized boilerplate"
        );
        self.constant_elements
            .get_or_init(|| Arc::new(ArrayBoilerplate { kind, backing }));
        Ok(())
    }
}

impl MaterializedLiteral<'_> {
    /// Build constants of any materialized literal; regexps have none
    pub fn build_constants(&self, ctx: &LiteralContext<'_>) -> AnalysisResult<()> {
        match self {
            MaterializedLiteral::Object(lit) => lit.build_constant_properties(ctx),
            MaterializedLiteral::Array(lit) => lit.build_constant_elements(ctx),
            MaterializedLiteral::RegExp(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;
    use crate::config::LiteralPolicy;
    use crate::literal::Heap;
    use crate::span::Span;

    fn lit(value: AstValue) -> Expression {
        Expression::Literal(Literal::new(value, Span::default()))
    }

    fn array(values: Vec<Expression>) -> ArrayLiteral {
        ArrayLiteral::new(values, Span::default())
    }

    struct Fixture {
        factory: AstValueFactory,
        policy: LiteralPolicy,
        heap: Heap,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                factory: AstValueFactory::new(),
                policy: LiteralPolicy::default(),
                heap: Heap::unbounded(),
            }
        }

        fn ctx(&self) -> LiteralContext<'_> {
            LiteralContext::new(&self.factory, &self.policy, &self.heap)
        }
    }

    #[test]
    fn test_smi_array_is_copy_on_write() {
        let fx = Fixture::new();
        let literal = array(vec![lit(fx.factory.smi(1)), lit(fx.factory.smi(2)), lit(fx.factory.smi(3))]);
        literal.build_constant_elements(&fx.ctx()).unwrap();

        let constants = literal.constant_elements().unwrap();
        assert_eq!(constants.kind, ElementsKind::PackedSmi);
        assert!(constants.is_copy_on_write());
        assert_eq!(constants.len(), 3);
    }

    #[test]
    fn test_nested_array_is_not_copy_on_write() {
        let fx = Fixture::new();
        let inner = Expression::ArrayLiteral(array(vec![lit(fx.factory.smi(2))]));
        let literal = array(vec![lit(fx.factory.smi(1)), inner]);
        literal.build_constant_elements(&fx.ctx()).unwrap();

        let constants = literal.constant_elements().unwrap();
        assert_eq!(constants.kind, ElementsKind::Packed);
        assert!(!constants.is_copy_on_write());
        match &constants.backing {
            ElementsBacking::Fixed { values, .. } => {
                assert!(matches!(values[1], BoilerplateValue::Array(_)));
            }
            other => panic!("unexpected backing {other:?}"),
        }
    }

    #[test]
    fn test_double_array_is_transcoded() {
        let fx = Fixture::new();
        let literal = array(vec![lit(fx.factory.smi(1)), lit(fx.factory.the_hole()), lit(fx.factory.number(2.5))]);
        literal.build_constant_elements(&fx.ctx()).unwrap();

        let constants = literal.constant_elements().unwrap();
        assert_eq!(constants.kind, ElementsKind::HoleyDouble);
        assert!(!constants.is_copy_on_write());
        assert_eq!(constants.backing, ElementsBacking::Double(vec![Some(1.0), None, Some(2.5)]));
    }

    #[test]
    fn test_computed_element_is_uninitialized_smi() {
        let fx = Fixture::new();
        let call = Expression::Call(Call::new(
            Expression::VariableProxy(VariableProxy::new(fx.factory.symbol("f"), Span::default())),
            vec![],
            Span::default(),
        ));
        let literal = array(vec![call, lit(fx.factory.smi(4))]);
        literal.build_constant_elements(&fx.ctx()).unwrap();

        let constants = literal.constant_elements().unwrap();
        assert_eq!(constants.kind, ElementsKind::PackedSmi);
        assert!(!constants.is_copy_on_write());
        match &constants.backing {
            ElementsBacking::Fixed { values, .. } => {
                assert_eq!(values[0], BoilerplateValue::Literal(AstValue::Smi(0)));
            }
            other => panic!("unexpected backing {other:?}"),
        }
    }

    #[test]
    fn test_empty_array_is_not_copy_on_write() {
        let fx = Fixture::new();
        let literal = array(vec![]);
        literal.build_constant_elements(&fx.ctx()).unwrap();
        assert!(!literal.constant_elements().unwrap().is_copy_on_write());
    }

    #[test]
    fn test_object_keys_are_normalized() {
        let fx = Fixture::new();
        let f = &fx.factory;
        let property = |key: AstValue, value: Expression| ObjectLiteralProperty::new(f, lit(key), value, false);
        let literal = ObjectLiteral::new(
            vec![
                property(f.string("b"), lit(f.smi(1))),
                property(f.string("7"), lit(f.smi(2))),
                property(f.number(1.5), lit(f.smi(3))),
                property(f.string("__proto__"), lit(f.null())),
                property(f.smi(2), lit(f.smi(4))),
            ],
            Span::default(),
        );
        literal.build_constant_properties(&fx.ctx()).unwrap();

        let constants = literal.constant_properties().unwrap();
        let keys: Vec<StoredKey> = constants.entries().iter().map(|(key, _)| *key).collect();
        assert_eq!(
            keys,
            vec![
                StoredKey::Name(f.symbol("b")),
                StoredKey::Index(7),
                StoredKey::Name(f.symbol("1.5")),
                StoredKey::Index(2),
            ]
        );
        assert_eq!(constants.plan().index_keys, 2);
        assert!(constants.plan().has_seen_proto);
        assert_eq!(constants.backing_store_size(), 2);
    }

    #[test]
    fn test_object_stops_at_computed_name() {
        let fx = Fixture::new();
        let f = &fx.factory;
        let literal = ObjectLiteral::new(
            vec![
                ObjectLiteralProperty::new(f, lit(f.string("a")), lit(f.smi(1)), false),
                ObjectLiteralProperty::new(
                    f,
                    Expression::VariableProxy(VariableProxy::new(f.symbol("k"), Span::default())),
                    lit(f.smi(2)),
                    true,
                ),
                ObjectLiteralProperty::new(f, lit(f.string("c")), lit(f.smi(3)), false),
            ],
            Span::default(),
        );
        literal.build_constant_properties(&fx.ctx()).unwrap();

        let constants = literal.constant_properties().unwrap();
        assert_eq!(constants.len(), 1);
        assert_eq!(constants.plan().total_properties, 3);
    }

    #[test]
    fn test_build_is_memoized() {
        let fx = Fixture::new();
        let literal = array(vec![lit(fx.factory.smi(1))]);
        literal.build_constant_elements(&fx.ctx()).unwrap();
        let first = Arc::clone(literal.constant_elements().unwrap());
        let allocated = fx.heap.tables_allocated();

        literal.build_constant_elements(&fx.ctx()).unwrap();
        assert!(Arc::ptr_eq(&first, literal.constant_elements().unwrap()));
        assert_eq!(fx.heap.tables_allocated(), allocated);
    }

    #[test]
    fn test_allocation_failure_propagates() {
        let fx = Fixture::new();
        let policy = LiteralPolicy {
            max_table_length: Some(1),
            ..LiteralPolicy::default()
        };
        let heap = Heap::new(&policy);
        let ctx = LiteralContext::new(&fx.factory, &policy, &heap);
        let literal = array(vec![lit(fx.factory.smi(1)), lit(fx.factory.smi(2))]);

        let err = literal.build_constant_elements(&ctx).unwrap_err();
        assert!(matches!(err, AnalysisError::Alloc(_)));
        assert!(literal.constant_elements().is_none());
    }
}
