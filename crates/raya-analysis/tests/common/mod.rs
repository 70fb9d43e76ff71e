//! AST construction helpers shared by the integration tests

#![allow(dead_code)]

use raya_analysis::ast::*;
use raya_analysis::{Span, Variable, VariableId, VariableLocation, VariableMode};
use std::cell::RefCell;
use std::collections::HashMap;

pub fn span() -> Span {
    Span::default()
}

pub fn stmt(expression: Expression) -> Statement {
    Statement::Expression(ExpressionStatement { expression, span: span() })
}

/// Builds expressions over one value factory; variables with the same name
/// resolve to the same variable
pub struct Ast {
    pub factory: AstValueFactory,
    variables: RefCell<HashMap<String, Variable>>,
}

impl Ast {
    pub fn new() -> Self {
        Self {
            factory: AstValueFactory::new(),
            variables: RefCell::new(HashMap::new()),
        }
    }

    // ------------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------------

    pub fn smi(&self, value: i32) -> Expression {
        Expression::Literal(Literal::new(self.factory.smi(value), span()))
    }

    pub fn number(&self, value: f64) -> Expression {
        Expression::Literal(Literal::new(self.factory.number(value), span()))
    }

    pub fn string(&self, value: &str) -> Expression {
        Expression::Literal(Literal::new(self.factory.string(value), span()))
    }

    pub fn null(&self) -> Expression {
        Expression::Literal(Literal::new(self.factory.null(), span()))
    }

    pub fn undefined(&self) -> Expression {
        Expression::Literal(Literal::new(self.factory.undefined(), span()))
    }

    pub fn hole(&self) -> Expression {
        Expression::Literal(Literal::new(self.factory.the_hole(), span()))
    }

    // ------------------------------------------------------------------------
    // Variables
    // ------------------------------------------------------------------------

    fn variable(&self, name: &str, mode: VariableMode, location: VariableLocation) -> Variable {
        let mut variables = self.variables.borrow_mut();
        let next = VariableId(variables.len() as u32);
        *variables
            .entry(name.to_string())
            .or_insert_with(|| Variable::new(next, self.factory.symbol(name), mode, location))
    }

    /// Unallocated global
    pub fn global(&self, name: &str) -> Expression {
        let var = self.variable(name, VariableMode::Var, VariableLocation::Unallocated);
        Expression::VariableProxy(VariableProxy::resolved(var, span()))
    }

    /// Stack-allocated local
    pub fn local(&self, name: &str) -> Expression {
        let var = self.variable(name, VariableMode::Let, VariableLocation::Local);
        Expression::VariableProxy(VariableProxy::resolved(var, span()))
    }

    /// Variable resolved dynamically, e.g. inside `with`
    pub fn dynamic(&self, name: &str) -> Expression {
        let var = self.variable(name, VariableMode::Dynamic, VariableLocation::Lookup);
        Expression::VariableProxy(VariableProxy::resolved(var, span()))
    }

    /// Unresolved reference, as the parser produces it
    pub fn name(&self, name: &str) -> Expression {
        Expression::VariableProxy(VariableProxy::new(self.factory.symbol(name), span()))
    }

    // ------------------------------------------------------------------------
    // Literals
    // ------------------------------------------------------------------------

    pub fn prop(&self, key: &str, value: Expression) -> ObjectLiteralProperty {
        ObjectLiteralProperty::new(&self.factory, self.string(key), value, false)
    }

    pub fn computed_prop(&self, key: Expression, value: Expression) -> ObjectLiteralProperty {
        ObjectLiteralProperty::new(&self.factory, key, value, true)
    }

    pub fn getter(&self, key: &str) -> ObjectLiteralProperty {
        let func = FunctionLiteral::new(None, FunctionKind::GetterFunction, vec![], span());
        ObjectLiteralProperty::with_kind(
            self.string(key),
            Expression::FunctionLiteral(Box::new(func)),
            ObjectPropertyKind::Getter,
            false,
        )
    }

    pub fn setter(&self, key: &str) -> ObjectLiteralProperty {
        let func = FunctionLiteral::new(None, FunctionKind::SetterFunction, vec![], span());
        ObjectLiteralProperty::with_kind(
            self.string(key),
            Expression::FunctionLiteral(Box::new(func)),
            ObjectPropertyKind::Setter,
            false,
        )
    }

    pub fn object_literal(&self, properties: Vec<ObjectLiteralProperty>) -> ObjectLiteral {
        ObjectLiteral::new(properties, span())
    }

    pub fn object(&self, entries: Vec<(&str, Expression)>) -> Expression {
        let properties = entries.into_iter().map(|(key, value)| self.prop(key, value)).collect();
        Expression::ObjectLiteral(self.object_literal(properties))
    }

    pub fn array(&self, values: Vec<Expression>) -> Expression {
        Expression::ArrayLiteral(ArrayLiteral::new(values, span()))
    }

    pub fn regexp(&self, pattern: &str) -> Expression {
        Expression::RegExpLiteral(RegExpLiteral::new(
            self.factory.symbol(pattern),
            self.factory.symbol(""),
            span(),
        ))
    }

    /// Concise method that references `super`
    pub fn method(&self) -> Expression {
        let func = FunctionLiteral::new(None, FunctionKind::ConciseMethod, vec![], span()).with_home_object();
        Expression::FunctionLiteral(Box::new(func))
    }

    // ------------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------------

    pub fn call(&self, callee: Expression, arguments: Vec<Expression>) -> Expression {
        Expression::Call(Call::new(callee, arguments, span()))
    }

    pub fn named(&self, obj: Expression, name: &str) -> Expression {
        Expression::Property(Property::new(obj, self.string(name), span()))
    }

    pub fn keyed(&self, obj: Expression, key: Expression) -> Expression {
        Expression::Property(Property::new(obj, key, span()))
    }

    pub fn assign(&self, target: Expression, value: Expression) -> Expression {
        Expression::Assignment(Assignment::new(AssignOp::Assign, target, value, span()))
    }

    pub fn compound(&self, op: BinaryOp, target: Expression, value: Expression) -> Expression {
        Expression::Assignment(Assignment::new(AssignOp::Compound(op), target, value, span()))
    }

    pub fn binary(&self, op: BinaryOp, left: Expression, right: Expression) -> Expression {
        Expression::BinaryOperation(BinaryOperation::new(op, left, right, span()))
    }

    pub fn compare(&self, op: CompareOp, left: Expression, right: Expression) -> Expression {
        Expression::CompareOperation(CompareOperation::new(op, left, right, span()))
    }

    pub fn unary(&self, op: UnaryOp, operand: Expression) -> Expression {
        Expression::UnaryOperation(UnaryOperation::new(op, operand, span()))
    }

    pub fn postfix(&self, op: CountOp, target: Expression) -> Expression {
        Expression::CountOperation(CountOperation::new(op, false, target, span()))
    }

    // ------------------------------------------------------------------------
    // Functions
    // ------------------------------------------------------------------------

    pub fn function(&self, name: &str, body: Vec<Statement>) -> FunctionLiteral {
        FunctionLiteral::new(Some(self.factory.symbol(name)), FunctionKind::Normal, body, span())
    }

    /// Function whose body evaluates each expression as a statement
    pub fn function_of(&self, name: &str, expressions: Vec<Expression>) -> FunctionLiteral {
        self.function(name, expressions.into_iter().map(stmt).collect())
    }
}

/// Expression of the `index`th top-level expression statement
pub fn body_expr(func: &FunctionLiteral, index: usize) -> &Expression {
    match &func.body[index] {
        Statement::Expression(stmt) => &stmt.expression,
        other => panic!("expected expression statement, found {}", other.node_type()),
    }
}
