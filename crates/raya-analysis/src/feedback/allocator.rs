//! Feedback slot allocation
//!
//! Walks one function body and hands out slots in the order the bytecode
//! generator visits the same nodes. Slots are positional: the generator
//! reads them back by index, so any change to the visitation order here
//! needs the same change in the generator.
//!
//! Structured literals are analysed as they are visited (conflict
//! resolution plus depth and flags) because their slot layout depends on
//! both.

use super::{FeedbackSlot, FeedbackSlotCache, FeedbackVectorSpec, LanguageMode, TypeofMode};
use crate::ast::*;
use crate::config::LiteralPolicy;
use crate::error::{AnalysisError, AnalysisResult};
use tracing::trace;

/// Assigns feedback slots to one function unit
pub struct FeedbackSlotAllocator<'a> {
    factory: &'a AstValueFactory,
    policy: &'a LiteralPolicy,
    language_mode: LanguageMode,
    spec: FeedbackVectorSpec,
    cache: FeedbackSlotCache,
    error: Option<AnalysisError>,
}

impl<'a> FeedbackSlotAllocator<'a> {
    /// Allocator for one function of the given strictness
    pub fn new(factory: &'a AstValueFactory, policy: &'a LiteralPolicy, language_mode: LanguageMode) -> Self {
        Self {
            factory,
            policy,
            language_mode,
            spec: FeedbackVectorSpec::new(),
            cache: FeedbackSlotCache::new(),
            error: None,
        }
    }

    /// Number every feedback site in the function's body.
    ///
    /// Nested function literals are skipped; they are separate units.
    pub fn allocate(mut self, func: &mut FunctionLiteral) -> AnalysisResult<FeedbackVectorSpec> {
        walk_function_body(&mut self, func);
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.spec),
        }
    }

    fn record(&mut self, result: AnalysisResult<u32>) {
        if let Err(err) = result {
            self.error.get_or_insert(err);
        }
    }

    /// Load slot for a variable read. Globals share one slot per typeof
    /// mode; other lookup slots get a fresh one.
    fn assign_variable_load(&mut self, proxy: &mut VariableProxy, typeof_mode: TypeofMode) {
        if !proxy.uses_variable_feedback_slot() {
            return;
        }
        let Some(var) = proxy.var().copied() else {
            return;
        };

        if var.is_unallocated() || var.mode == VariableMode::DynamicGlobal {
            if let Some(slot) = self.cache.get(typeof_mode, var.id) {
                trace!(slot = slot.index(), variable = var.id.0, "reusing global load slot");
                proxy.set_feedback_slot(slot);
                return;
            }
            let slot = self.spec.add_load_global_slot(typeof_mode);
            self.cache.put(typeof_mode, var.id, slot);
            proxy.set_feedback_slot(slot);
        } else {
            let slot = self.spec.add_load_slot();
            proxy.set_feedback_slot(slot);
        }
    }

    /// Store slot for an assignment target, by target shape
    fn assign_store(&mut self, target: &Expression) -> Option<FeedbackSlot> {
        match Property::assign_type(target, self.factory) {
            LhsKind::Variable => {
                let is_global = target
                    .as_variable_proxy()
                    .and_then(VariableProxy::var)
                    .map_or(false, Variable::is_unallocated);
                is_global.then(|| self.spec.add_store_global_slot(self.language_mode))
            }
            LhsKind::NamedProperty => Some(self.spec.add_store_slot(self.language_mode)),
            LhsKind::KeyedProperty => Some(self.spec.add_keyed_store_slot(self.language_mode)),
            LhsKind::NamedSuperProperty | LhsKind::KeyedSuperProperty => None,
        }
    }

    /// Visit an assignment target without reading it
    fn visit_reference(&mut self, target: &mut Expression) {
        match target {
            Expression::VariableProxy(_) => {}
            Expression::Property(property) => walk_property(self, property),
            other => self.visit_expression(other),
        }
    }

    fn assign_object_literal_slots(&mut self, lit: &mut ObjectLiteral) {
        lit.set_literal_slot(self.spec.add_literal_slot());

        let language_mode = self.language_mode;
        let properties = lit.properties_mut();
        let mut index = 0;

        // Static prefix: the boilerplate already holds these keys
        while index < properties.len() {
            let property = &mut properties[index];
            if property.is_computed_name() {
                break;
            }
            index += 1;
            if property.is_compile_time_value() {
                continue;
            }

            let needs_home_object = FunctionLiteral::needs_home_object_for(&property.value);
            match property.kind() {
                ObjectPropertyKind::Computed | ObjectPropertyKind::MaterializedLiteral => {
                    if property.key.is_string_literal() {
                        if property.emit_store() {
                            property.slots.set(0, self.spec.add_store_own_slot());
                            if needs_home_object {
                                property.slots.set(1, self.spec.add_store_slot(language_mode));
                            }
                        }
                    } else if property.emit_store() && needs_home_object {
                        property.slots.set(0, self.spec.add_store_slot(language_mode));
                    }
                }
                ObjectPropertyKind::Getter | ObjectPropertyKind::Setter => {
                    if property.emit_store() && needs_home_object {
                        property.slots.set(0, self.spec.add_store_slot(language_mode));
                    }
                }
                ObjectPropertyKind::Prototype
                | ObjectPropertyKind::Constant
                | ObjectPropertyKind::Spread => {}
            }
        }

        // Dynamic suffix: defined one by one at runtime
        for property in &mut properties[index..] {
            if !property.is_prototype() && FunctionLiteral::needs_home_object_for(&property.value) {
                property.slots.set(0, self.spec.add_store_slot(language_mode));
            }
            let offset = property.store_data_property_offset();
            property
                .slots
                .set(offset, self.spec.add_store_data_property_in_literal_slot());
        }
    }

    fn assign_array_literal_slots(&mut self, lit: &mut ArrayLiteral) {
        lit.set_literal_slot(self.spec.add_literal_slot());

        // One keyed store slot, shared by every non-constant element
        if lit.values().iter().any(|value| !value.is_compile_time_value()) {
            lit.set_store_slot(self.spec.add_keyed_store_slot(self.language_mode));
        }
    }
}

impl VisitorMut for FeedbackSlotAllocator<'_> {
    fn visit_case_clause(&mut self, clause: &mut CaseClause) {
        walk_case_clause(self, clause);
        clause.set_compare_slot(self.spec.add_compare_slot());
    }

    fn visit_for_in_statement(&mut self, stmt: &mut ForInStatement) {
        self.visit_expression(&mut stmt.enumerable);
        self.visit_reference(&mut stmt.each);
        self.visit_statement(&mut stmt.body);

        let each = self.assign_store(&stmt.each);
        let for_in = self.spec.add_for_in_slot();
        stmt.set_slots(each, for_in);
    }

    fn visit_for_of_statement(&mut self, stmt: &mut ForOfStatement) {
        self.visit_expression(&mut stmt.iterable);
        self.visit_reference(&mut stmt.each);
        self.visit_statement(&mut stmt.body);

        let each = self.assign_store(&stmt.each);
        stmt.set_each_slot(each);
    }

    fn visit_variable_proxy(&mut self, proxy: &mut VariableProxy) {
        self.assign_variable_load(proxy, TypeofMode::NotInside);
    }

    fn visit_property(&mut self, property: &mut Property) {
        if !property.is_super_access() {
            let slot = if property.key.is_property_name(self.factory) {
                self.spec.add_load_slot()
            } else {
                self.spec.add_keyed_load_slot()
            };
            property.set_feedback_slot(slot);
        }
        walk_property(self, property);
    }

    fn visit_call(&mut self, call: &mut Call) {
        call.set_feedback_slot(self.spec.add_call_slot());
        walk_call(self, call);
    }

    fn visit_call_new(&mut self, call: &mut CallNew) {
        call.set_feedback_slot(self.spec.add_call_slot());
        walk_call_new(self, call);
    }

    fn visit_unary_operation(&mut self, expr: &mut UnaryOperation) {
        // typeof of an undeclared global must not throw
        let typeof_proxy = match expr.expression.as_mut() {
            Expression::VariableProxy(proxy) if expr.op == UnaryOp::Typeof => Some(proxy),
            _ => None,
        };
        match typeof_proxy {
            Some(proxy) => self.assign_variable_load(proxy, TypeofMode::Inside),
            None => walk_unary_operation(self, expr),
        }

        // Lowered to binary operations by the generator
        if matches!(expr.op, UnaryOp::Add | UnaryOp::Sub | UnaryOp::BitNot) {
            expr.set_feedback_slot(self.spec.add_binary_op_slot());
        }
    }

    fn visit_count_operation(&mut self, expr: &mut CountOperation) {
        walk_count_operation(self, expr);
        let store = self.assign_store(&expr.expression);
        let binary = self.spec.add_binary_op_slot();
        expr.set_slots(store, binary);
    }

    fn visit_binary_operation(&mut self, expr: &mut BinaryOperation) {
        walk_binary_operation(self, expr);
        if !matches!(expr.op, BinaryOp::Comma | BinaryOp::And | BinaryOp::Or) {
            expr.set_feedback_slot(self.spec.add_binary_op_slot());
        }
    }

    fn visit_compare_operation(&mut self, expr: &mut CompareOperation) {
        walk_compare_operation(self, expr);
        if !matches!(expr.op, CompareOp::InstanceOf | CompareOp::In) {
            expr.set_feedback_slot(self.spec.add_compare_slot());
        }
    }

    fn visit_assignment(&mut self, expr: &mut Assignment) {
        if expr.is_compound() {
            // The target is read before it is written
            self.visit_expression(&mut expr.target);
        } else {
            self.visit_reference(&mut expr.target);
        }
        self.visit_expression(&mut expr.value);

        if expr.is_compound() {
            expr.set_binary_operation_slot(self.spec.add_binary_op_slot());
        }
        let store = self.assign_store(&expr.target);
        expr.set_store_slot(store);
    }

    fn visit_object_literal(&mut self, lit: &mut ObjectLiteral) {
        walk_object_literal(self, lit);
        if self.error.is_some() {
            return;
        }

        let depth = lit.init_depth_and_flags(self.factory, self.policy);
        self.record(depth);
        lit.calculate_emit_store();
        self.assign_object_literal_slots(lit);
    }

    fn visit_array_literal(&mut self, lit: &mut ArrayLiteral) {
        walk_array_literal(self, lit);
        if self.error.is_some() {
            return;
        }

        let depth = lit.init_depth_and_flags(self.factory, self.policy);
        self.record(depth);
        self.assign_array_literal_slots(lit);
    }

    fn visit_regexp_literal(&mut self, lit: &mut RegExpLiteral) {
        lit.set_literal_slot(self.spec.add_literal_slot());
    }

    fn visit_class_literal(&mut self, class: &mut ClassLiteral) {
        // Class bodies are always strict code
        let enclosing_mode = std::mem::replace(&mut self.language_mode, LanguageMode::Strict);
        walk_class_literal(self, class);

        if class.constructor.needs_home_object {
            class.set_home_object_slot(self.spec.add_store_slot(self.language_mode));
        }
        if class.needs_proxy_slot() {
            class.set_proxy_slot(self.spec.add_store_slot(self.language_mode));
        }

        for property in &mut class.properties {
            if FunctionLiteral::needs_home_object_for(&property.value) {
                property.slots.set(0, self.spec.add_store_slot(self.language_mode));
            }
            let offset = property.store_data_property_offset();
            property
                .slots
                .set(offset, self.spec.add_store_data_property_in_literal_slot());
        }
        self.language_mode = enclosing_mode;
    }
}
