//! Read-only expression pattern matchers
//!
//! Queried by later optimization stages to pick specialized bytecodes.
//! None of these touch the tree.

use crate::ast::{
    AstValueFactory, BinaryOp, BinaryOperation, CompareOperation, Expression, Literal, UnaryOp,
};

fn is_commutative_with_smi_literal(op: BinaryOp) -> bool {
    matches!(op, BinaryOp::Mul | BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor)
}

fn match_smi_literal<'a>(subject: &'a Expression, literal: &'a Expression) -> Option<(&'a Expression, i32)> {
    let value = literal.as_literal()?.value.as_smi()?;
    Some((subject, value))
}

fn typeof_operand(expr: &Expression) -> Option<&Expression> {
    expr.as_unary_operation()
        .filter(|unary| unary.op == UnaryOp::Typeof)
        .map(|unary| &*unary.expression)
}

fn match_typeof<'a>(candidate: &'a Expression, other: &'a Expression) -> Option<(&'a Expression, &'a Literal)> {
    let operand = typeof_operand(candidate)?;
    let literal = other.as_literal().filter(|lit| lit.value.is_string())?;
    Some((operand, literal))
}

fn is_void_of_literal(expr: &Expression) -> bool {
    expr.as_unary_operation()
        .map_or(false, |unary| unary.op == UnaryOp::Void && unary.expression.is_literal())
}

impl BinaryOperation {
    /// `x OP <smi>`, or `<smi> OP x` for operators where order does not
    /// matter. Returns the other operand and the small integer.
    pub fn is_smi_literal_operation(&self) -> Option<(&Expression, i32)> {
        match_smi_literal(&self.left, &self.right).or_else(|| {
            if is_commutative_with_smi_literal(self.op) {
                match_smi_literal(&self.right, &self.left)
            } else {
                None
            }
        })
    }
}

impl CompareOperation {
    /// `typeof x == "name"` on either side. Returns `x` and the string.
    pub fn is_literal_compare_typeof(&self) -> Option<(&Expression, &Literal)> {
        if !self.op.is_equality() {
            return None;
        }
        match_typeof(&self.left, &self.right).or_else(|| match_typeof(&self.right, &self.left))
    }

    /// Equality against `undefined`, spelled as the unshadowed global or as
    /// `void <literal>`. Returns the other operand.
    pub fn is_literal_compare_undefined(&self, factory: &AstValueFactory) -> Option<&Expression> {
        if !self.op.is_equality() {
            return None;
        }
        let is_undefined = |expr: &Expression| is_void_of_literal(expr) || expr.is_undefined_literal(factory);
        if is_undefined(&self.left) {
            Some(&self.right)
        } else if is_undefined(&self.right) {
            Some(&self.left)
        } else {
            None
        }
    }

    /// Equality against `null`. Returns the other operand.
    pub fn is_literal_compare_null(&self) -> Option<&Expression> {
        if !self.op.is_equality() {
            return None;
        }
        if self.left.is_null_literal() {
            Some(&self.right)
        } else if self.right.is_null_literal() {
            Some(&self.left)
        } else {
            None
        }
    }
}
