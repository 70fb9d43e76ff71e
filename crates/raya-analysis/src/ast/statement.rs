//! Statement AST nodes

use super::*;
use crate::feedback::FeedbackSlot;
use crate::interner::Symbol;
use crate::span::Span;

/// Statement (performs an action)
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// { ... }
    Block(Block),

    /// Expression followed by a semicolon
    Expression(ExpressionStatement),

    /// ;
    Empty(Span),

    /// if (c) a else b
    If(IfStatement),

    /// continue label?
    Continue(ContinueStatement),

    /// break label?
    Break(BreakStatement),

    /// return x?
    Return(ReturnStatement),

    /// with (o) body
    With(WithStatement),

    /// switch (tag) { case ...: }
    Switch(SwitchStatement),

    /// do body while (c)
    DoWhile(DoWhileStatement),

    /// while (c) body
    While(WhileStatement),

    /// for (init; cond; next) body
    For(ForStatement),

    /// for (each in enumerable) body
    ForIn(ForInStatement),

    /// for (each of iterable) body
    ForOf(ForOfStatement),

    /// try { } catch (e) { }
    TryCatch(TryCatchStatement),

    /// try { } finally { }
    TryFinally(TryFinallyStatement),

    /// debugger
    Debugger(Span),

    /// var/let/const x
    VariableDeclaration(VariableDeclaration),

    /// function f() {}
    FunctionDeclaration(FunctionDeclaration),
}

impl Statement {
    /// Get the span of this statement
    pub fn span(&self) -> &Span {
        match self {
            Statement::Block(s) => &s.span,
            Statement::Expression(s) => &s.span,
            Statement::Empty(span) => span,
            Statement::If(s) => &s.span,
            Statement::Continue(s) => &s.span,
            Statement::Break(s) => &s.span,
            Statement::Return(s) => &s.span,
            Statement::With(s) => &s.span,
            Statement::Switch(s) => &s.span,
            Statement::DoWhile(s) => &s.span,
            Statement::While(s) => &s.span,
            Statement::For(s) => &s.span,
            Statement::ForIn(s) => &s.span,
            Statement::ForOf(s) => &s.span,
            Statement::TryCatch(s) => &s.span,
            Statement::TryFinally(s) => &s.span,
            Statement::Debugger(span) => span,
            Statement::VariableDeclaration(s) => &s.span,
            Statement::FunctionDeclaration(s) => &s.span,
        }
    }

    /// Discriminant of this statement
    pub fn node_type(&self) -> NodeType {
        match self {
            Statement::Block(_) => NodeType::Block,
            Statement::Expression(_) => NodeType::ExpressionStatement,
            Statement::Empty(_) => NodeType::EmptyStatement,
            Statement::If(_) => NodeType::IfStatement,
            Statement::Continue(_) => NodeType::ContinueStatement,
            Statement::Break(_) => NodeType::BreakStatement,
            Statement::Return(_) => NodeType::ReturnStatement,
            Statement::With(_) => NodeType::WithStatement,
            Statement::Switch(_) => NodeType::SwitchStatement,
            Statement::DoWhile(_) => NodeType::DoWhileStatement,
            Statement::While(_) => NodeType::WhileStatement,
            Statement::For(_) => NodeType::ForStatement,
            Statement::ForIn(_) => NodeType::ForInStatement,
            Statement::ForOf(_) => NodeType::ForOfStatement,
            Statement::TryCatch(_) => NodeType::TryCatchStatement,
            Statement::TryFinally(_) => NodeType::TryFinallyStatement,
            Statement::Debugger(_) => NodeType::DebuggerStatement,
            Statement::VariableDeclaration(_) => NodeType::VariableDeclaration,
            Statement::FunctionDeclaration(_) => NodeType::FunctionDeclaration,
        }
    }

    /// The statement's only observable effect is a transfer of control
    pub fn is_jump(&self) -> bool {
        match self {
            Statement::Block(block) => block.statements.last().map_or(false, Statement::is_jump),
            Statement::Expression(stmt) => matches!(stmt.expression, Expression::Throw(_)),
            Statement::Continue(_) | Statement::Break(_) | Statement::Return(_) => true,
            Statement::If(stmt) => stmt
                .else_statement
                .as_deref()
                .map_or(false, |else_statement| {
                    stmt.then_statement.is_jump() && else_statement.is_jump()
                }),
            _ => false,
        }
    }

    /// Labels of a breakable statement; other statements carry none
    pub fn labels(&self) -> Option<&[Symbol]> {
        let labels = match self {
            Statement::Block(s) => &s.labels,
            Statement::Switch(s) => &s.labels,
            Statement::DoWhile(s) => &s.labels,
            Statement::While(s) => &s.labels,
            Statement::For(s) => &s.labels,
            Statement::ForIn(s) => &s.labels,
            Statement::ForOf(s) => &s.labels,
            _ => return None,
        };
        Some(labels)
    }
}

// ============================================================================
// Simple Statements
// ============================================================================

/// Block: { ... }
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Statements in order
    pub statements: Vec<Statement>,
    /// Labels naming this block
    pub labels: Vec<Symbol>,
    /// Source location
    pub span: Span,
}

/// Expression evaluated for its effect
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    /// Evaluated expression
    pub expression: Expression,
    /// Source location
    pub span: Span,
}

/// if (c) a else b
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    /// Test
    pub condition: Expression,
    /// Taken when the test is truthy
    pub then_statement: Box<Statement>,
    /// Taken otherwise
    pub else_statement: Option<Box<Statement>>,
    /// Source location
    pub span: Span,
}

/// continue [label]
#[derive(Debug, Clone, PartialEq)]
pub struct ContinueStatement {
    /// Loop to continue, if labelled
    pub target_label: Option<Symbol>,
    /// Source location
    pub span: Span,
}

/// break [label]
#[derive(Debug, Clone, PartialEq)]
pub struct BreakStatement {
    /// Statement to leave, if labelled
    pub target_label: Option<Symbol>,
    /// Source location
    pub span: Span,
}

/// return [x]
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    /// Returned value
    pub expression: Option<Expression>,
    /// Source location
    pub span: Span,
}

/// with (o) body
#[derive(Debug, Clone, PartialEq)]
pub struct WithStatement {
    /// Scope object
    pub object: Expression,
    /// Body
    pub body: Box<Statement>,
    /// Source location
    pub span: Span,
}

/// try { } catch (e) { }
#[derive(Debug, Clone, PartialEq)]
pub struct TryCatchStatement {
    /// Protected block
    pub try_block: Block,
    /// Catch binding, if any
    pub catch_variable: Option<VariableProxy>,
    /// Handler
    pub catch_block: Block,
    /// Source location
    pub span: Span,
}

/// try { } finally { }
#[derive(Debug, Clone, PartialEq)]
pub struct TryFinallyStatement {
    /// Protected block
    pub try_block: Block,
    /// Always runs
    pub finally_block: Block,
    /// Source location
    pub span: Span,
}

/// var/let/const declaration of one binding; initializers are lowered to
/// assignments by the parser
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    /// Declared binding
    pub proxy: VariableProxy,
    /// Source location
    pub span: Span,
}

/// function f() {}
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    /// Binding of the function name
    pub proxy: VariableProxy,
    /// Declared function, a separate unit
    pub function: FunctionLiteral,
    /// Source location
    pub span: Span,
}

// ============================================================================
// Switch
// ============================================================================

/// switch (tag) { ... }
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStatement {
    /// Discriminant expression
    pub tag: Expression,
    /// Clauses in source order
    pub cases: Vec<CaseClause>,
    /// Labels naming this switch
    pub labels: Vec<Symbol>,
    /// Source location
    pub span: Span,
}

/// `case label:` or `default:` with its statements
#[derive(Debug, Clone, PartialEq)]
pub struct CaseClause {
    /// None for `default`
    pub label: Option<Expression>,
    /// Clause body
    pub statements: Vec<Statement>,
    /// Source location
    pub span: Span,
    compare_slot: Option<FeedbackSlot>,
}

impl CaseClause {
    /// Clause for `label`, or `default` when None
    pub fn new(label: Option<Expression>, statements: Vec<Statement>, span: Span) -> Self {
        Self {
            label,
            statements,
            span,
            compare_slot: None,
        }
    }

    /// `default:`
    pub fn is_default(&self) -> bool {
        self.label.is_none()
    }

    /// Compare slot
    pub fn compare_slot(&self) -> Option<FeedbackSlot> {
        self.compare_slot
    }

    pub(crate) fn set_compare_slot(&mut self, slot: FeedbackSlot) {
        self.compare_slot = Some(slot);
    }
}

// ============================================================================
// Loops
// ============================================================================

/// do body while (c)
#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileStatement {
    /// Body
    pub body: Box<Statement>,
    /// Test, checked after each iteration
    pub condition: Expression,
    /// Labels naming this loop
    pub labels: Vec<Symbol>,
    /// Source location
    pub span: Span,
}

/// while (c) body
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    /// Test
    pub condition: Expression,
    /// Body
    pub body: Box<Statement>,
    /// Labels naming this loop
    pub labels: Vec<Symbol>,
    /// Source location
    pub span: Span,
}

/// for (init; c; next) body
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    /// Initializer
    pub init: Option<Box<Statement>>,
    /// Test, if any
    pub condition: Option<Expression>,
    /// Update
    pub next: Option<Box<Statement>>,
    /// Body
    pub body: Box<Statement>,
    /// Labels naming this loop
    pub labels: Vec<Symbol>,
    /// Source location
    pub span: Span,
}

/// for (each in enumerable) body
#[derive(Debug, Clone, PartialEq)]
pub struct ForInStatement {
    /// Target receiving each key
    pub each: Expression,
    /// Object whose keys are enumerated
    pub enumerable: Expression,
    /// Body
    pub body: Box<Statement>,
    /// Labels naming this loop
    pub labels: Vec<Symbol>,
    /// Source location
    pub span: Span,
    each_slot: Option<FeedbackSlot>,
    for_in_slot: Option<FeedbackSlot>,
}

impl ForInStatement {
    /// Unlabelled for-in loop
    pub fn new(each: Expression, enumerable: Expression, body: Statement, span: Span) -> Self {
        Self {
            each,
            enumerable,
            body: Box::new(body),
            labels: Vec::new(),
            span,
            each_slot: None,
            for_in_slot: None,
        }
    }

    /// Store slot for assigning each key to the target
    pub fn each_slot(&self) -> Option<FeedbackSlot> {
        self.each_slot
    }

    /// Enumeration state slot
    pub fn for_in_slot(&self) -> Option<FeedbackSlot> {
        self.for_in_slot
    }

    pub(crate) fn set_slots(&mut self, each: Option<FeedbackSlot>, for_in: FeedbackSlot) {
        self.each_slot = each;
        self.for_in_slot = Some(for_in);
    }
}

/// for (each of iterable) body
#[derive(Debug, Clone, PartialEq)]
pub struct ForOfStatement {
    /// Target receiving each value
    pub each: Expression,
    /// Iterated value
    pub iterable: Expression,
    /// Body
    pub body: Box<Statement>,
    /// Labels naming this loop
    pub labels: Vec<Symbol>,
    /// Source location
    pub span: Span,
    each_slot: Option<FeedbackSlot>,
}

impl ForOfStatement {
    /// Unlabelled for-of loop
    pub fn new(each: Expression, iterable: Expression, body: Statement, span: Span) -> Self {
        Self {
            each,
            iterable,
            body: Box::new(body),
            labels: Vec::new(),
            span,
            each_slot: None,
        }
    }

    /// Store slot for assigning each value to the target
    pub fn each_slot(&self) -> Option<FeedbackSlot> {
        self.each_slot
    }

    pub(crate) fn set_each_slot(&mut self, slot: Option<FeedbackSlot>) {
        self.each_slot = slot;
    }
}
