//! Function literals: the unit of preparation

use super::*;
use crate::feedback::{FeedbackVectorSpec, LanguageMode};
use crate::interner::Symbol;
use crate::span::Span;

/// Syntactic flavour of a function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    /// `function f() {}`
    Normal,
    /// `() => {}`
    Arrow,
    /// `async function f() {}`
    AsyncFunction,
    /// `async () => {}`
    AsyncArrow,
    /// `function* f() {}`
    Generator,
    /// `m() {}`
    ConciseMethod,
    /// `*m() {}`
    ConciseGeneratorMethod,
    /// `async m() {}`
    AsyncConciseMethod,
    /// `get x() {}`
    GetterFunction,
    /// `set x(v) {}`
    SetterFunction,
    /// Constructor of a class without `extends`
    BaseConstructor,
    /// Constructor of a class with `extends`
    DerivedConstructor,
}

impl FunctionKind {
    /// Arrow function, async or not
    pub fn is_arrow(self) -> bool {
        matches!(self, FunctionKind::Arrow | FunctionKind::AsyncArrow)
    }

    /// Method shorthand of any flavour
    pub fn is_concise_method(self) -> bool {
        matches!(
            self,
            FunctionKind::ConciseMethod
                | FunctionKind::ConciseGeneratorMethod
                | FunctionKind::AsyncConciseMethod
        )
    }

    /// Getter or setter
    pub fn is_accessor(self) -> bool {
        matches!(self, FunctionKind::GetterFunction | FunctionKind::SetterFunction)
    }

    /// Base or derived class constructor
    pub fn is_class_constructor(self) -> bool {
        matches!(
            self,
            FunctionKind::BaseConstructor | FunctionKind::DerivedConstructor
        )
    }
}

/// A function expression, declaration body, method or arrow.
///
/// Nested function literals are owned by the expression that defines them
/// but each is prepared as its own unit with its own feedback vector.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    /// Own name, if any
    pub name: Option<Symbol>,
    /// Syntactic flavour
    pub kind: FunctionKind,
    /// Strictness of the body
    pub language_mode: LanguageMode,
    /// The scope resolver found a `super` reference inside the body
    pub needs_home_object: bool,
    /// Unnamed function expression, eligible for name inference
    pub is_anonymous_expression: bool,
    /// Declared parameters
    pub parameter_count: u32,
    /// Top-level statements
    pub body: Vec<Statement>,
    /// Source location
    pub span: Span,
    feedback_spec: Option<FeedbackVectorSpec>,
}

impl FunctionLiteral {
    /// Sloppy function with no parameters
    pub fn new(name: Option<Symbol>, kind: FunctionKind, body: Vec<Statement>, span: Span) -> Self {
        Self {
            name,
            kind,
            language_mode: LanguageMode::Sloppy,
            needs_home_object: false,
            is_anonymous_expression: name.is_none(),
            parameter_count: 0,
            body,
            span,
            feedback_spec: None,
        }
    }

    /// Set the strictness of the body
    pub fn with_language_mode(mut self, language_mode: LanguageMode) -> Self {
        self.language_mode = language_mode;
        self
    }

    /// Mark the body as referencing `super`
    pub fn with_home_object(mut self) -> Self {
        self.needs_home_object = true;
        self
    }

    /// Unnamed function expression
    pub fn is_anonymous_function_definition(&self) -> bool {
        self.is_anonymous_expression
    }

    /// The value is a function literal whose body references `super`
    pub fn needs_home_object_for(expr: &Expression) -> bool {
        expr.as_function_literal()
            .map_or(false, |func| func.needs_home_object)
    }

    /// Feedback vector layout, present once the function has been prepared
    pub fn feedback_spec(&self) -> Option<&FeedbackVectorSpec> {
        self.feedback_spec.as_ref()
    }

    pub(crate) fn set_feedback_spec(&mut self, spec: FeedbackVectorSpec) {
        self.feedback_spec = Some(spec);
    }

    /// Name for diagnostics; anonymous functions print as `<anonymous>`
    pub fn debug_name(&self, factory: &AstValueFactory) -> String {
        match self.name {
            Some(name) => factory.resolve(name).to_string(),
            None => "<anonymous>".to_string(),
        }
    }
}
