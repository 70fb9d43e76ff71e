//! Mutable AST visitor for the analysis passes
//!
//! The default traversal order is the order the bytecode generator visits
//! nodes. Passes that number feedback slots override individual `visit_*`
//! methods and call back into the matching `walk_*` function, so the
//! numbering follows the generator as long as these defaults do.
//!
//! Nested function literals are not descended: each is its own unit.
//!
//! # Example
//!
//! ```rust,ignore
//! use raya_analysis::ast::*;
//!
//! struct CountCalls {
//!     count: usize,
//! }
//!
//! impl VisitorMut for CountCalls {
//!     fn visit_call(&mut self, call: &mut Call) {
//!         self.count += 1;
//!         walk_call(self, call);
//!     }
//! }
//! ```

use super::*;

/// AST visitor trait over mutable nodes
///
/// Each visit method has a default implementation that calls the
/// corresponding walk function.
pub trait VisitorMut: Sized {
    // Statements
    /// Visit a statement
    fn visit_statement(&mut self, stmt: &mut Statement) {
        walk_statement(self, stmt);
    }

    /// Visit a block
    fn visit_block(&mut self, block: &mut Block) {
        walk_block(self, block);
    }

    /// Visit a switch statement
    fn visit_switch_statement(&mut self, stmt: &mut SwitchStatement) {
        walk_switch_statement(self, stmt);
    }

    /// Visit a case clause
    fn visit_case_clause(&mut self, clause: &mut CaseClause) {
        walk_case_clause(self, clause);
    }

    /// Visit a for-in statement
    fn visit_for_in_statement(&mut self, stmt: &mut ForInStatement) {
        walk_for_in_statement(self, stmt);
    }

    /// Visit a for-of statement
    fn visit_for_of_statement(&mut self, stmt: &mut ForOfStatement) {
        walk_for_of_statement(self, stmt);
    }

    // Expressions
    /// Visit an expression
    fn visit_expression(&mut self, expr: &mut Expression) {
        walk_expression(self, expr);
    }

    /// Visit a variable proxy
    fn visit_variable_proxy(&mut self, _proxy: &mut VariableProxy) {
        // Leaf node - no traversal needed
    }

    /// Visit a property
    fn visit_property(&mut self, property: &mut Property) {
        walk_property(self, property);
    }

    /// Visit a call
    fn visit_call(&mut self, call: &mut Call) {
        walk_call(self, call);
    }

    /// Visit a `new` call
    fn visit_call_new(&mut self, call: &mut CallNew) {
        walk_call_new(self, call);
    }

    /// Visit a unary operation
    fn visit_unary_operation(&mut self, expr: &mut UnaryOperation) {
        walk_unary_operation(self, expr);
    }

    /// Visit a count operation
    fn visit_count_operation(&mut self, expr: &mut CountOperation) {
        walk_count_operation(self, expr);
    }

    /// Visit a binary operation
    fn visit_binary_operation(&mut self, expr: &mut BinaryOperation) {
        walk_binary_operation(self, expr);
    }

    /// Visit a compare operation
    fn visit_compare_operation(&mut self, expr: &mut CompareOperation) {
        walk_compare_operation(self, expr);
    }

    /// Visit an assignment
    fn visit_assignment(&mut self, expr: &mut Assignment) {
        walk_assignment(self, expr);
    }

    /// Visit an object literal
    fn visit_object_literal(&mut self, lit: &mut ObjectLiteral) {
        walk_object_literal(self, lit);
    }

    /// Visit an array literal
    fn visit_array_literal(&mut self, lit: &mut ArrayLiteral) {
        walk_array_literal(self, lit);
    }

    /// Visit a regexp literal
    fn visit_regexp_literal(&mut self, _lit: &mut RegExpLiteral) {
        // Leaf node - no traversal needed
    }

    /// Visit a class literal
    fn visit_class_literal(&mut self, class: &mut ClassLiteral) {
        walk_class_literal(self, class);
    }

    /// Visit a function literal
    fn visit_function_literal(&mut self, _func: &mut FunctionLiteral) {
        // Separate unit - not descended
    }
}

// ============================================================================
// Walk Functions - Default Traversal Implementations
// ============================================================================

/// Visit every top-level statement of a function body
pub fn walk_function_body<V: VisitorMut>(visitor: &mut V, func: &mut FunctionLiteral) {
    for stmt in &mut func.body {
        visitor.visit_statement(stmt);
    }
}

/// Visit the children of a statement in generator order
pub fn walk_statement<V: VisitorMut>(visitor: &mut V, stmt: &mut Statement) {
    match stmt {
        Statement::Block(block) => visitor.visit_block(block),
        Statement::Expression(stmt) => visitor.visit_expression(&mut stmt.expression),
        Statement::Empty(_) | Statement::Debugger(_) => {}
        Statement::If(stmt) => {
            visitor.visit_expression(&mut stmt.condition);
            visitor.visit_statement(&mut stmt.then_statement);
            if let Some(else_statement) = &mut stmt.else_statement {
                visitor.visit_statement(else_statement);
            }
        }
        Statement::Continue(_) | Statement::Break(_) => {}
        Statement::Return(stmt) => {
            if let Some(expression) = &mut stmt.expression {
                visitor.visit_expression(expression);
            }
        }
        Statement::With(stmt) => {
            visitor.visit_expression(&mut stmt.object);
            visitor.visit_statement(&mut stmt.body);
        }
        Statement::Switch(stmt) => visitor.visit_switch_statement(stmt),
        Statement::DoWhile(stmt) => {
            visitor.visit_statement(&mut stmt.body);
            visitor.visit_expression(&mut stmt.condition);
        }
        Statement::While(stmt) => {
            visitor.visit_expression(&mut stmt.condition);
            visitor.visit_statement(&mut stmt.body);
        }
        Statement::For(stmt) => {
            if let Some(init) = &mut stmt.init {
                visitor.visit_statement(init);
            }
            if let Some(condition) = &mut stmt.condition {
                visitor.visit_expression(condition);
            }
            if let Some(next) = &mut stmt.next {
                visitor.visit_statement(next);
            }
            visitor.visit_statement(&mut stmt.body);
        }
        Statement::ForIn(stmt) => visitor.visit_for_in_statement(stmt),
        Statement::ForOf(stmt) => visitor.visit_for_of_statement(stmt),
        Statement::TryCatch(stmt) => {
            visitor.visit_block(&mut stmt.try_block);
            visitor.visit_block(&mut stmt.catch_block);
        }
        Statement::TryFinally(stmt) => {
            visitor.visit_block(&mut stmt.try_block);
            visitor.visit_block(&mut stmt.finally_block);
        }
        Statement::VariableDeclaration(_) => {}
        Statement::FunctionDeclaration(decl) => visitor.visit_function_literal(&mut decl.function),
    }
}

/// Visit the children of a block in generator order
pub fn walk_block<V: VisitorMut>(visitor: &mut V, block: &mut Block) {
    for stmt in &mut block.statements {
        visitor.visit_statement(stmt);
    }
}

/// Visit the children of a switch statement in generator order
pub fn walk_switch_statement<V: VisitorMut>(visitor: &mut V, stmt: &mut SwitchStatement) {
    visitor.visit_expression(&mut stmt.tag);
    for clause in &mut stmt.cases {
        visitor.visit_case_clause(clause);
    }
}

/// Visit the children of a case clause in generator order
pub fn walk_case_clause<V: VisitorMut>(visitor: &mut V, clause: &mut CaseClause) {
    if let Some(label) = &mut clause.label {
        visitor.visit_expression(label);
    }
    for stmt in &mut clause.statements {
        visitor.visit_statement(stmt);
    }
}

/// Visit the children of a for-in statement in generator order
pub fn walk_for_in_statement<V: VisitorMut>(visitor: &mut V, stmt: &mut ForInStatement) {
    visitor.visit_expression(&mut stmt.enumerable);
    visitor.visit_expression(&mut stmt.each);
    visitor.visit_statement(&mut stmt.body);
}

/// Visit the children of a for-of statement in generator order
pub fn walk_for_of_statement<V: VisitorMut>(visitor: &mut V, stmt: &mut ForOfStatement) {
    visitor.visit_expression(&mut stmt.iterable);
    visitor.visit_expression(&mut stmt.each);
    visitor.visit_statement(&mut stmt.body);
}

/// Visit the children of an expression in generator order
pub fn walk_expression<V: VisitorMut>(visitor: &mut V, expr: &mut Expression) {
    match expr {
        Expression::Literal(_)
        | Expression::ThisFunction(_)
        | Expression::SuperPropertyReference(_)
        | Expression::SuperCallReference(_)
        | Expression::EmptyParentheses(_) => {}
        Expression::RegExpLiteral(lit) => visitor.visit_regexp_literal(lit),
        Expression::ObjectLiteral(lit) => visitor.visit_object_literal(lit),
        Expression::ArrayLiteral(lit) => visitor.visit_array_literal(lit),
        Expression::VariableProxy(proxy) => visitor.visit_variable_proxy(proxy),
        Expression::Property(property) => visitor.visit_property(property),
        Expression::Call(call) => visitor.visit_call(call),
        Expression::CallNew(call) => visitor.visit_call_new(call),
        Expression::CallRuntime(call) => {
            for arg in &mut call.arguments {
                visitor.visit_expression(arg);
            }
        }
        Expression::UnaryOperation(unary) => visitor.visit_unary_operation(unary),
        Expression::CountOperation(count) => visitor.visit_count_operation(count),
        Expression::BinaryOperation(binary) => visitor.visit_binary_operation(binary),
        Expression::CompareOperation(compare) => visitor.visit_compare_operation(compare),
        Expression::Spread(spread) => visitor.visit_expression(&mut spread.expression),
        Expression::Conditional(cond) => {
            visitor.visit_expression(&mut cond.condition);
            visitor.visit_expression(&mut cond.then_expression);
            visitor.visit_expression(&mut cond.else_expression);
        }
        Expression::Assignment(assign) => visitor.visit_assignment(assign),
        Expression::Yield(expr) => visitor.visit_expression(&mut expr.expression),
        Expression::Await(expr) => visitor.visit_expression(&mut expr.expression),
        Expression::Throw(expr) => visitor.visit_expression(&mut expr.exception),
        Expression::FunctionLiteral(func) => visitor.visit_function_literal(func),
        Expression::ClassLiteral(class) => visitor.visit_class_literal(class),
    }
}

/// Visit the children of a property in generator order
pub fn walk_property<V: VisitorMut>(visitor: &mut V, property: &mut Property) {
    visitor.visit_expression(&mut property.key);
    visitor.visit_expression(&mut property.obj);
}

/// Visit the children of a call in generator order
pub fn walk_call<V: VisitorMut>(visitor: &mut V, call: &mut Call) {
    visitor.visit_expression(&mut call.expression);
    for arg in &mut call.arguments {
        visitor.visit_expression(arg);
    }
}

/// Visit the children of a `new` call in generator order
pub fn walk_call_new<V: VisitorMut>(visitor: &mut V, call: &mut CallNew) {
    visitor.visit_expression(&mut call.expression);
    for arg in &mut call.arguments {
        visitor.visit_expression(arg);
    }
}

/// Visit the children of a unary operation in generator order
pub fn walk_unary_operation<V: VisitorMut>(visitor: &mut V, expr: &mut UnaryOperation) {
    visitor.visit_expression(&mut expr.expression);
}

/// Visit the children of a count operation in generator order
pub fn walk_count_operation<V: VisitorMut>(visitor: &mut V, expr: &mut CountOperation) {
    visitor.visit_expression(&mut expr.expression);
}

/// Visit the children of a binary operation in generator order
pub fn walk_binary_operation<V: VisitorMut>(visitor: &mut V, expr: &mut BinaryOperation) {
    visitor.visit_expression(&mut expr.left);
    visitor.visit_expression(&mut expr.right);
}

/// Visit the children of a compare operation in generator order
pub fn walk_compare_operation<V: VisitorMut>(visitor: &mut V, expr: &mut CompareOperation) {
    visitor.visit_expression(&mut expr.left);
    visitor.visit_expression(&mut expr.right);
}

/// Visit the children of an assignment in generator order
pub fn walk_assignment<V: VisitorMut>(visitor: &mut V, expr: &mut Assignment) {
    visitor.visit_expression(&mut expr.target);
    visitor.visit_expression(&mut expr.value);
}

/// Visit the children of an object literal in generator order
pub fn walk_object_literal<V: VisitorMut>(visitor: &mut V, lit: &mut ObjectLiteral) {
    for property in lit.properties_mut() {
        visitor.visit_expression(&mut property.key);
        visitor.visit_expression(&mut property.value);
    }
}

/// Visit the children of an array literal in generator order
pub fn walk_array_literal<V: VisitorMut>(visitor: &mut V, lit: &mut ArrayLiteral) {
    for value in lit.values_mut() {
        visitor.visit_expression(value);
    }
}

/// Visit the children of a class literal in generator order
pub fn walk_class_literal<V: VisitorMut>(visitor: &mut V, class: &mut ClassLiteral) {
    if let Some(extends) = &mut class.extends {
        visitor.visit_expression(extends);
    }
    visitor.visit_function_literal(&mut class.constructor);
    for property in &mut class.properties {
        visitor.visit_expression(&mut property.key);
        visitor.visit_expression(&mut property.value);
    }
}
