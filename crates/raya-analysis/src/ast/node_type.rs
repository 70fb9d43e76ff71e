//! Node discriminants and grouped kind sets

use std::fmt;

/// Discriminant of every statement and expression kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    // Statements
    /// `{ ... }`
    Block,
    /// Expression evaluated for effect
    ExpressionStatement,
    /// `;`
    EmptyStatement,
    /// `if`
    IfStatement,
    /// `continue`
    ContinueStatement,
    /// `break`
    BreakStatement,
    /// `return`
    ReturnStatement,
    /// `with`
    WithStatement,
    /// `switch`
    SwitchStatement,
    /// `do ... while`
    DoWhileStatement,
    /// `while`
    WhileStatement,
    /// `for (;;)`
    ForStatement,
    /// `for (k in o)`
    ForInStatement,
    /// `for (x of xs)`
    ForOfStatement,
    /// `try ... catch`
    TryCatchStatement,
    /// `try ... finally`
    TryFinallyStatement,
    /// `debugger`
    DebuggerStatement,
    /// `var`, `let` or `const`
    VariableDeclaration,
    /// `function f() {}`
    FunctionDeclaration,

    // Expressions
    /// Literal value
    Literal,
    /// `/re/`
    RegExpLiteral,
    /// `{ ... }` literal
    ObjectLiteral,
    /// `[ ... ]` literal
    ArrayLiteral,
    /// Variable reference
    VariableProxy,
    /// `o.x` or `o[k]`
    Property,
    /// `f()`
    Call,
    /// `new C()`
    CallNew,
    /// Runtime intrinsic call
    CallRuntime,
    /// `-x`, `!x`, `typeof x`
    UnaryOperation,
    /// `x++`, `--x`
    CountOperation,
    /// `x + y`
    BinaryOperation,
    /// `x < y`
    CompareOperation,
    /// `...xs`
    Spread,
    /// `c ? a : b`
    Conditional,
    /// `x = v`, `x += v`
    Assignment,
    /// `yield x`
    Yield,
    /// `await x`
    Await,
    /// `throw x`
    Throw,
    /// Function, arrow or method
    FunctionLiteral,
    /// Class body
    ClassLiteral,
    /// The enclosing function
    ThisFunction,
    /// `super.x`
    SuperPropertyReference,
    /// `super()`
    SuperCallReference,
    /// `()` before an arrow
    EmptyParentheses,
}

impl NodeType {
    /// Loop statements
    pub fn is_iteration_statement(self) -> bool {
        matches!(
            self,
            NodeType::DoWhileStatement
                | NodeType::WhileStatement
                | NodeType::ForStatement
                | NodeType::ForInStatement
                | NodeType::ForOfStatement
        )
    }

    /// Statements a `break` can target: blocks, switches and loops
    pub fn is_breakable_statement(self) -> bool {
        matches!(self, NodeType::Block | NodeType::SwitchStatement) || self.is_iteration_statement()
    }

    /// Expressions that materialize a fresh object from a boilerplate
    pub fn is_materialized_literal(self) -> bool {
        matches!(
            self,
            NodeType::ObjectLiteral | NodeType::ArrayLiteral | NodeType::RegExpLiteral
        )
    }

    /// Statement kinds precede expression kinds
    pub fn is_statement(self) -> bool {
        (self as u8) <= (NodeType::FunctionDeclaration as u8)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
