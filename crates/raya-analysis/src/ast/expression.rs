//! Expression AST nodes
//!
//! This module defines all expression kinds, including:
//! - Literals and variable references
//! - Property access, calls and runtime calls
//! - Unary, binary, compare and count operations
//! - Assignments (plain and compound)
//!
//! Structured literals live in the `literal` module.

use super::*;
use crate::feedback::FeedbackSlot;
use crate::interner::Symbol;
use crate::span::Span;

/// Expression (produces a value)
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Literal value: 42, "str", true, null
    Literal(Literal),

    /// Regular expression literal: /ab+c/g
    RegExpLiteral(RegExpLiteral),

    /// Object literal: { x: 1, y: 2 }
    ObjectLiteral(ObjectLiteral),

    /// Array literal: [1, 2, 3]
    ArrayLiteral(ArrayLiteral),

    /// Variable reference: x
    VariableProxy(VariableProxy),

    /// Property access: obj.prop, obj[key]
    Property(Property),

    /// Function call: f(1, 2)
    Call(Call),

    /// Constructor call: new C(1)
    CallNew(CallNew),

    /// Call into a runtime intrinsic
    CallRuntime(CallRuntime),

    /// Unary operation: -x, !x, typeof x
    UnaryOperation(UnaryOperation),

    /// Count operation: x++, --y
    CountOperation(CountOperation),

    /// Binary operation: x + y, a && b
    BinaryOperation(BinaryOperation),

    /// Comparison: x === y, a < b
    CompareOperation(CompareOperation),

    /// Spread element: ...xs
    Spread(Spread),

    /// Ternary: c ? a : b
    Conditional(Conditional),

    /// Assignment: x = 1, o.p += 2
    Assignment(Assignment),

    /// yield x
    Yield(Yield),

    /// await x
    Await(Await),

    /// throw x
    Throw(Throw),

    /// Function expression, arrow or method
    FunctionLiteral(Box<FunctionLiteral>),

    /// Class expression or declaration body
    ClassLiteral(Box<ClassLiteral>),

    /// Reference to the enclosing function itself
    ThisFunction(Span),

    /// super.x / super[x]
    SuperPropertyReference(SuperPropertyReference),

    /// super(...)
    SuperCallReference(SuperCallReference),

    /// () in arrow parameter position
    EmptyParentheses(Span),
}

macro_rules! narrowing {
    ($($variant:ident => $ty:ty, $is:ident, $as_ref:ident, $as_mut:ident, $unwrap:ident;)*) => {
        impl Expression {
            $(
                #[doc = concat!("Whether this is a `", stringify!($variant), "`")]
                pub fn $is(&self) -> bool {
                    matches!(self, Expression::$variant(_))
                }

                #[doc = concat!("Narrow to `", stringify!($variant), "` if it is one")]
                pub fn $as_ref(&self) -> Option<&$ty> {
                    match self {
                        Expression::$variant(node) => {
                            let node: &$ty = node;
                            Some(node)
                        }
                        _ => None,
                    }
                }

                #[doc = concat!("Mutable narrowing to `", stringify!($variant), "`")]
                pub fn $as_mut(&mut self) -> Option<&mut $ty> {
                    match self {
                        Expression::$variant(node) => {
                            let node: &mut $ty = node;
                            Some(node)
                        }
                        _ => None,
                    }
                }

                /// Narrow to this kind.
                ///
                /// # Panics
                ///
                /// Panics if the expression is of another kind; callers must
                /// test before narrowing.
                pub fn $unwrap(&self) -> &$ty {
                    match self {
                        Expression::$variant(node) => {
                            let node: &$ty = node;
                            node
                        }
                        other => panic!(
                            "expected {}, found {}",
                            stringify!($variant),
                            other.node_type()
                        ),
                    }
                }
            )*
        }
    };
}

narrowing! {
    Literal => Literal, is_literal, as_literal, as_literal_mut, unwrap_literal;
    RegExpLiteral => RegExpLiteral, is_regexp_literal, as_regexp_literal, as_regexp_literal_mut, unwrap_regexp_literal;
    ObjectLiteral => ObjectLiteral, is_object_literal, as_object_literal, as_object_literal_mut, unwrap_object_literal;
    ArrayLiteral => ArrayLiteral, is_array_literal, as_array_literal, as_array_literal_mut, unwrap_array_literal;
    VariableProxy => VariableProxy, is_variable_proxy, as_variable_proxy, as_variable_proxy_mut, unwrap_variable_proxy;
    Property => Property, is_property, as_property, as_property_mut, unwrap_property;
    Call => Call, is_call, as_call, as_call_mut, unwrap_call;
    CallNew => CallNew, is_call_new, as_call_new, as_call_new_mut, unwrap_call_new;
    UnaryOperation => UnaryOperation, is_unary_operation, as_unary_operation, as_unary_operation_mut, unwrap_unary_operation;
    CountOperation => CountOperation, is_count_operation, as_count_operation, as_count_operation_mut, unwrap_count_operation;
    BinaryOperation => BinaryOperation, is_binary_operation, as_binary_operation, as_binary_operation_mut, unwrap_binary_operation;
    CompareOperation => CompareOperation, is_compare_operation, as_compare_operation, as_compare_operation_mut, unwrap_compare_operation;
    Spread => Spread, is_spread, as_spread, as_spread_mut, unwrap_spread;
    Assignment => Assignment, is_assignment, as_assignment, as_assignment_mut, unwrap_assignment;
    FunctionLiteral => FunctionLiteral, is_function_literal, as_function_literal, as_function_literal_mut, unwrap_function_literal;
    ClassLiteral => ClassLiteral, is_class_literal, as_class_literal, as_class_literal_mut, unwrap_class_literal;
}

impl Expression {
    /// Get the span of this expression
    pub fn span(&self) -> &Span {
        match self {
            Expression::Literal(e) => &e.span,
            Expression::RegExpLiteral(e) => &e.span,
            Expression::ObjectLiteral(e) => &e.span,
            Expression::ArrayLiteral(e) => &e.span,
            Expression::VariableProxy(e) => &e.span,
            Expression::Property(e) => &e.span,
            Expression::Call(e) => &e.span,
            Expression::CallNew(e) => &e.span,
            Expression::CallRuntime(e) => &e.span,
            Expression::UnaryOperation(e) => &e.span,
            Expression::CountOperation(e) => &e.span,
            Expression::BinaryOperation(e) => &e.span,
            Expression::CompareOperation(e) => &e.span,
            Expression::Spread(e) => &e.span,
            Expression::Conditional(e) => &e.span,
            Expression::Assignment(e) => &e.span,
            Expression::Yield(e) => &e.span,
            Expression::Await(e) => &e.span,
            Expression::Throw(e) => &e.span,
            Expression::FunctionLiteral(e) => &e.span,
            Expression::ClassLiteral(e) => &e.span,
            Expression::ThisFunction(span) => span,
            Expression::SuperPropertyReference(e) => &e.span,
            Expression::SuperCallReference(e) => &e.span,
            Expression::EmptyParentheses(span) => span,
        }
    }

    /// Discriminant of this expression
    pub fn node_type(&self) -> NodeType {
        match self {
            Expression::Literal(_) => NodeType::Literal,
            Expression::RegExpLiteral(_) => NodeType::RegExpLiteral,
            Expression::ObjectLiteral(_) => NodeType::ObjectLiteral,
            Expression::ArrayLiteral(_) => NodeType::ArrayLiteral,
            Expression::VariableProxy(_) => NodeType::VariableProxy,
            Expression::Property(_) => NodeType::Property,
            Expression::Call(_) => NodeType::Call,
            Expression::CallNew(_) => NodeType::CallNew,
            Expression::CallRuntime(_) => NodeType::CallRuntime,
            Expression::UnaryOperation(_) => NodeType::UnaryOperation,
            Expression::CountOperation(_) => NodeType::CountOperation,
            Expression::BinaryOperation(_) => NodeType::BinaryOperation,
            Expression::CompareOperation(_) => NodeType::CompareOperation,
            Expression::Spread(_) => NodeType::Spread,
            Expression::Conditional(_) => NodeType::Conditional,
            Expression::Assignment(_) => NodeType::Assignment,
            Expression::Yield(_) => NodeType::Yield,
            Expression::Await(_) => NodeType::Await,
            Expression::Throw(_) => NodeType::Throw,
            Expression::FunctionLiteral(_) => NodeType::FunctionLiteral,
            Expression::ClassLiteral(_) => NodeType::ClassLiteral,
            Expression::ThisFunction(_) => NodeType::ThisFunction,
            Expression::SuperPropertyReference(_) => NodeType::SuperPropertyReference,
            Expression::SuperCallReference(_) => NodeType::SuperCallReference,
            Expression::EmptyParentheses(_) => NodeType::EmptyParentheses,
        }
    }

    /// Literal whose value is a Smi
    pub fn is_smi_literal(&self) -> bool {
        self.as_literal().map_or(false, |lit| lit.value.is_smi())
    }

    /// Literal whose value is any number
    pub fn is_number_literal(&self) -> bool {
        self.as_literal().map_or(false, |lit| lit.value.is_number())
    }

    /// Literal whose value is a string
    pub fn is_string_literal(&self) -> bool {
        self.as_literal().map_or(false, |lit| lit.value.is_string())
    }

    /// Literal `null`
    pub fn is_null_literal(&self) -> bool {
        self.as_literal().map_or(false, |lit| lit.value.is_null())
    }

    /// String literal that is not an array index
    pub fn is_property_name(&self, factory: &AstValueFactory) -> bool {
        self.as_literal()
            .map_or(false, |lit| factory.is_property_name(&lit.value))
    }

    /// Literal `undefined`, or a reference to the global `undefined`.
    ///
    /// Only the global binding is immutable; any other variable named
    /// `undefined` could be reassigned.
    pub fn is_undefined_literal(&self, factory: &AstValueFactory) -> bool {
        match self {
            Expression::Literal(lit) => lit.value.is_undefined(),
            Expression::VariableProxy(proxy) => {
                proxy.raw_name == factory.undefined_string()
                    && proxy.var().map_or(false, Variable::is_unallocated)
            }
            _ => false,
        }
    }

    /// Literal that converts to `true`
    pub fn to_boolean_is_true(&self, factory: &AstValueFactory) -> bool {
        self.as_literal()
            .map_or(false, |lit| factory.to_boolean(&lit.value))
    }

    /// Literal that converts to `false`
    pub fn to_boolean_is_false(&self, factory: &AstValueFactory) -> bool {
        self.as_literal()
            .map_or(false, |lit| !factory.to_boolean(&lit.value))
    }

    /// Can appear on the left of an assignment
    pub fn is_valid_reference_expression(&self) -> bool {
        match self {
            Expression::Property(_) => true,
            Expression::VariableProxy(proxy) => proxy.is_valid_reference_expression(),
            _ => false,
        }
    }

    /// Function or class expression without a name of its own
    pub fn is_anonymous_function_definition(&self) -> bool {
        match self {
            Expression::FunctionLiteral(func) => func.is_anonymous_function_definition(),
            Expression::ClassLiteral(class) => class.is_anonymous_function_definition(),
            _ => false,
        }
    }

    /// Concise method, e.g. `m() {}` in an object literal
    pub fn is_concise_method_definition(&self) -> bool {
        self.as_function_literal()
            .map_or(false, |func| func.kind.is_concise_method())
    }

    /// Getter or setter function
    pub fn is_accessor_function_definition(&self) -> bool {
        self.as_function_literal()
            .map_or(false, |func| func.kind.is_accessor())
    }
}

// ============================================================================
// Operators
// ============================================================================

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `!x`
    Not,
    /// `~x`
    BitNot,
    /// `+x`
    Add,
    /// `-x`
    Sub,
    /// `typeof x`
    Typeof,
    /// `void x`
    Void,
    /// `delete x`
    Delete,
}

/// Increment and decrement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountOp {
    /// `++`
    Inc,
    /// `--`
    Dec,
}

/// Binary operators, including the short-circuit forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `,`
    Comma,
    /// `||`
    Or,
    /// `&&`
    And,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `&`
    BitAnd,
    /// `<<`
    Shl,
    /// `>>`
    Sar,
    /// `>>>`
    Shr,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `**`
    Exp,
}

/// Comparison operators.
///
/// The parser lowers `!=` and `!==` to a negated `==` / `===`, so only the
/// positive equality forms appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `==`
    Eq,
    /// `===`
    EqStrict,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Lte,
    /// `>=`
    Gte,
    /// `instanceof`
    InstanceOf,
    /// `in`
    In,
}

impl CompareOp {
    /// `==` or `===`
    pub fn is_equality(self) -> bool {
        matches!(self, CompareOp::Eq | CompareOp::EqStrict)
    }
}

/// Assignment operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    /// =
    Assign,
    /// +=, -=, ... (carries the underlying binary operator)
    Compound(BinaryOp),
}

// ============================================================================
// Leaf Expressions
// ============================================================================

/// Literal value
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    /// Interned value
    pub value: AstValue,
    /// Source location
    pub span: Span,
}

impl Literal {
    /// Literal at `span`
    pub fn new(value: AstValue, span: Span) -> Self {
        Self { value, span }
    }
}

/// Reference to a variable by name, bound to a `Variable` after scope
/// resolution
#[derive(Debug, Clone, PartialEq)]
pub struct VariableProxy {
    /// Name as written in source
    pub raw_name: Symbol,
    /// Proxy for `this`
    pub is_this: bool,
    /// Target of some assignment
    pub is_assigned: bool,
    /// Source location
    pub span: Span,
    var: Option<Variable>,
    feedback_slot: Option<FeedbackSlot>,
}

impl VariableProxy {
    /// Unresolved reference
    pub fn new(raw_name: Symbol, span: Span) -> Self {
        Self {
            raw_name,
            is_this: false,
            is_assigned: false,
            span,
            var: None,
            feedback_slot: None,
        }
    }

    /// Reference already bound to `var`
    pub fn resolved(var: Variable, span: Span) -> Self {
        let mut proxy = Self::new(var.name, span);
        proxy.is_this = var.is_this;
        proxy.bind_to(var);
        proxy
    }

    /// Bind to the variable the scope resolver found.
    ///
    /// The name must match, except for `this`.
    pub fn bind_to(&mut self, var: Variable) {
        debug_assert!(
            (self.is_this && var.is_this) || self.raw_name == var.name,
            "proxy bound to a variable of another name"
        );
        self.var = Some(var);
    }

    /// Bound variable, if resolved
    pub fn var(&self) -> Option<&Variable> {
        self.var.as_ref()
    }

    /// Whether `bind_to` has run
    pub fn is_resolved(&self) -> bool {
        self.var.is_some()
    }

    /// `this` is never assignable
    pub fn is_valid_reference_expression(&self) -> bool {
        !self.is_this
    }

    /// Reads of this variable observe feedback: globals and lookup slots
    pub fn uses_variable_feedback_slot(&self) -> bool {
        self.var
            .map_or(false, |var| var.is_unallocated() || var.is_lookup_slot())
    }

    /// Load slot assigned by the allocator
    pub fn feedback_slot(&self) -> Option<FeedbackSlot> {
        self.feedback_slot
    }

    pub(crate) fn set_feedback_slot(&mut self, slot: FeedbackSlot) {
        self.feedback_slot = Some(slot);
    }
}

/// Shape of an assignment target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LhsKind {
    /// Plain variable
    Variable,
    /// `o.name`
    NamedProperty,
    /// `o[key]`
    KeyedProperty,
    /// `super.name`
    NamedSuperProperty,
    /// `super[key]`
    KeyedSuperProperty,
}

/// Property access: obj.prop or obj[key]
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Receiver
    pub obj: Box<Expression>,
    /// Name or key expression
    pub key: Box<Expression>,
    /// Source location
    pub span: Span,
    feedback_slot: Option<FeedbackSlot>,
}

impl Property {
    /// Access `obj[key]`; a property-name key makes it a named access
    pub fn new(obj: Expression, key: Expression, span: Span) -> Self {
        Self {
            obj: Box::new(obj),
            key: Box::new(key),
            span,
            feedback_slot: None,
        }
    }

    /// Receiver is `super`
    pub fn is_super_access(&self) -> bool {
        matches!(*self.obj, Expression::SuperPropertyReference(_))
    }

    /// Classify an assignment target
    pub fn assign_type(target: &Expression, factory: &AstValueFactory) -> LhsKind {
        let Some(property) = target.as_property() else {
            return LhsKind::Variable;
        };
        let named = property.key.is_property_name(factory);
        match (property.is_super_access(), named) {
            (true, true) => LhsKind::NamedSuperProperty,
            (true, false) => LhsKind::KeyedSuperProperty,
            (false, true) => LhsKind::NamedProperty,
            (false, false) => LhsKind::KeyedProperty,
        }
    }

    /// Load slot; none for `super` accesses
    pub fn feedback_slot(&self) -> Option<FeedbackSlot> {
        self.feedback_slot
    }

    pub(crate) fn set_feedback_slot(&mut self, slot: FeedbackSlot) {
        self.feedback_slot = Some(slot);
    }
}

// ============================================================================
// Calls
// ============================================================================

/// How a call site resolves its callee
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallType {
    /// Unallocated global callee
    GlobalCall,
    /// Callee resolved through a `with` scope
    WithCall,
    /// `o.name(...)`
    NamedPropertyCall,
    /// `o[key](...)`
    KeyedPropertyCall,
    /// `super.name(...)`
    NamedSuperPropertyCall,
    /// `super[key](...)`
    KeyedSuperPropertyCall,
    /// `super(...)`
    SuperCall,
    /// Anything else, e.g. a local callee
    OtherCall,
}

/// Function call: f(a, b)
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// Callee
    pub expression: Box<Expression>,
    /// Arguments in source order
    pub arguments: Vec<Expression>,
    /// Source location
    pub span: Span,
    feedback_slot: Option<FeedbackSlot>,
}

impl Call {
    /// Call `expression(arguments)`
    pub fn new(expression: Expression, arguments: Vec<Expression>, span: Span) -> Self {
        Self {
            expression: Box::new(expression),
            arguments,
            span,
            feedback_slot: None,
        }
    }

    /// Classify the callee
    pub fn call_type(&self, factory: &AstValueFactory) -> CallType {
        if let Some(var) = self.expression.as_variable_proxy().and_then(VariableProxy::var) {
            if var.is_unallocated() {
                return CallType::GlobalCall;
            }
            if var.is_lookup_slot() {
                // Calls going through `with` always use Dynamic mode
                return if var.mode == VariableMode::Dynamic {
                    CallType::WithCall
                } else {
                    CallType::OtherCall
                };
            }
        }

        if matches!(*self.expression, Expression::SuperCallReference(_)) {
            return CallType::SuperCall;
        }

        if let Some(property) = self.expression.as_property() {
            let is_super = property.is_super_access();
            return match (property.key.is_property_name(factory), is_super) {
                (true, true) => CallType::NamedSuperPropertyCall,
                (true, false) => CallType::NamedPropertyCall,
                (false, true) => CallType::KeyedSuperPropertyCall,
                (false, false) => CallType::KeyedPropertyCall,
            };
        }

        CallType::OtherCall
    }

    /// Call slot
    pub fn feedback_slot(&self) -> Option<FeedbackSlot> {
        self.feedback_slot
    }

    pub(crate) fn set_feedback_slot(&mut self, slot: FeedbackSlot) {
        self.feedback_slot = Some(slot);
    }
}

/// Constructor call: new C(a)
#[derive(Debug, Clone, PartialEq)]
pub struct CallNew {
    /// Constructor expression
    pub expression: Box<Expression>,
    /// Arguments in source order
    pub arguments: Vec<Expression>,
    /// Source location
    pub span: Span,
    feedback_slot: Option<FeedbackSlot>,
}

impl CallNew {
    /// Construct `new expression(arguments)`
    pub fn new(expression: Expression, arguments: Vec<Expression>, span: Span) -> Self {
        Self {
            expression: Box::new(expression),
            arguments,
            span,
            feedback_slot: None,
        }
    }

    /// Call slot
    pub fn feedback_slot(&self) -> Option<FeedbackSlot> {
        self.feedback_slot
    }

    pub(crate) fn set_feedback_slot(&mut self, slot: FeedbackSlot) {
        self.feedback_slot = Some(slot);
    }
}

/// Call into a runtime intrinsic (no feedback)
#[derive(Debug, Clone, PartialEq)]
pub struct CallRuntime {
    /// Intrinsic name
    pub name: Symbol,
    /// Arguments in source order
    pub arguments: Vec<Expression>,
    /// Source location
    pub span: Span,
}

// ============================================================================
// Operations
// ============================================================================

/// Unary operation: -x, !x, typeof x
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOperation {
    /// Operator
    pub op: UnaryOp,
    /// Operand
    pub expression: Box<Expression>,
    /// Source location
    pub span: Span,
    feedback_slot: Option<FeedbackSlot>,
}

impl UnaryOperation {
    /// Apply `op` to `expression`
    pub fn new(op: UnaryOp, expression: Expression, span: Span) -> Self {
        Self {
            op,
            expression: Box::new(expression),
            span,
            feedback_slot: None,
        }
    }

    /// Binary-op slot for `+x`, `-x` and `~x`
    pub fn feedback_slot(&self) -> Option<FeedbackSlot> {
        self.feedback_slot
    }

    pub(crate) fn set_feedback_slot(&mut self, slot: FeedbackSlot) {
        self.feedback_slot = Some(slot);
    }
}

/// Count operation: ++x, x--
#[derive(Debug, Clone, PartialEq)]
pub struct CountOperation {
    /// Increment or decrement
    pub op: CountOp,
    /// `++x` rather than `x++`
    pub is_prefix: bool,
    /// Target
    pub expression: Box<Expression>,
    /// Source location
    pub span: Span,
    store_slot: Option<FeedbackSlot>,
    binary_operation_slot: Option<FeedbackSlot>,
}

impl CountOperation {
    /// Count operation on `expression`
    pub fn new(op: CountOp, is_prefix: bool, expression: Expression, span: Span) -> Self {
        Self {
            op,
            is_prefix,
            expression: Box::new(expression),
            span,
            store_slot: None,
            binary_operation_slot: None,
        }
    }

    /// Store slot for the target, if it needs one
    pub fn store_slot(&self) -> Option<FeedbackSlot> {
        self.store_slot
    }

    /// Slot for the implicit add or subtract
    pub fn binary_operation_slot(&self) -> Option<FeedbackSlot> {
        self.binary_operation_slot
    }

    pub(crate) fn set_slots(&mut self, store: Option<FeedbackSlot>, binary: FeedbackSlot) {
        self.store_slot = store;
        self.binary_operation_slot = Some(binary);
    }
}

/// Binary operation: x + y, a || b, (a, b)
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperation {
    /// Operator
    pub op: BinaryOp,
    /// Left operand
    pub left: Box<Expression>,
    /// Right operand
    pub right: Box<Expression>,
    /// Source location
    pub span: Span,
    feedback_slot: Option<FeedbackSlot>,
}

impl BinaryOperation {
    /// Combine `left` and `right` with `op`
    pub fn new(op: BinaryOp, left: Expression, right: Expression, span: Span) -> Self {
        Self {
            op,
            left: Box::new(left),
            right: Box::new(right),
            span,
            feedback_slot: None,
        }
    }

    /// Binary-op slot
    pub fn feedback_slot(&self) -> Option<FeedbackSlot> {
        self.feedback_slot
    }

    pub(crate) fn set_feedback_slot(&mut self, slot: FeedbackSlot) {
        self.feedback_slot = Some(slot);
    }
}

/// Comparison: x === y, a < b
#[derive(Debug, Clone, PartialEq)]
pub struct CompareOperation {
    /// Operator
    pub op: CompareOp,
    /// Left operand
    pub left: Box<Expression>,
    /// Right operand
    pub right: Box<Expression>,
    /// Source location
    pub span: Span,
    feedback_slot: Option<FeedbackSlot>,
}

impl CompareOperation {
    /// Compare `left` with `right`
    pub fn new(op: CompareOp, left: Expression, right: Expression, span: Span) -> Self {
        Self {
            op,
            left: Box::new(left),
            right: Box::new(right),
            span,
            feedback_slot: None,
        }
    }

    /// Compare slot
    pub fn feedback_slot(&self) -> Option<FeedbackSlot> {
        self.feedback_slot
    }

    pub(crate) fn set_feedback_slot(&mut self, slot: FeedbackSlot) {
        self.feedback_slot = Some(slot);
    }
}

/// Spread element: ...xs
#[derive(Debug, Clone, PartialEq)]
pub struct Spread {
    /// Spread operand
    pub expression: Box<Expression>,
    /// Source location
    pub span: Span,
}

/// Ternary: c ? a : b
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    /// Test
    pub condition: Box<Expression>,
    /// Value when the test is truthy
    pub then_expression: Box<Expression>,
    /// Value otherwise
    pub else_expression: Box<Expression>,
    /// Source location
    pub span: Span,
}

/// Assignment: x = v, o.p += v
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Plain or compound
    pub op: AssignOp,
    /// Assignment target
    pub target: Box<Expression>,
    /// Assigned value
    pub value: Box<Expression>,
    /// Source location
    pub span: Span,
    binary_operation_slot: Option<FeedbackSlot>,
    store_slot: Option<FeedbackSlot>,
}

impl Assignment {
    /// Assign `value` to `target`
    pub fn new(op: AssignOp, target: Expression, value: Expression, span: Span) -> Self {
        Self {
            op,
            target: Box::new(target),
            value: Box::new(value),
            span,
            binary_operation_slot: None,
            store_slot: None,
        }
    }

    /// `+=` and friends
    pub fn is_compound(&self) -> bool {
        matches!(self.op, AssignOp::Compound(_))
    }

    /// Slot for reading the target of a compound assignment: the target's
    /// own load slot
    pub fn load_slot(&self) -> Option<FeedbackSlot> {
        if !self.is_compound() {
            return None;
        }
        match &*self.target {
            Expression::VariableProxy(proxy) => proxy.feedback_slot(),
            Expression::Property(property) => property.feedback_slot(),
            _ => None,
        }
    }

    /// Slot for the implicit binary operation of a compound assignment
    pub fn binary_operation_slot(&self) -> Option<FeedbackSlot> {
        self.binary_operation_slot
    }

    /// Store slot for the target, if it needs one
    pub fn store_slot(&self) -> Option<FeedbackSlot> {
        self.store_slot
    }

    pub(crate) fn set_binary_operation_slot(&mut self, slot: FeedbackSlot) {
        self.binary_operation_slot = Some(slot);
    }

    pub(crate) fn set_store_slot(&mut self, slot: Option<FeedbackSlot>) {
        self.store_slot = slot;
    }
}

/// `yield x`
#[derive(Debug, Clone, PartialEq)]
pub struct Yield {
    /// Yielded value
    pub expression: Box<Expression>,
    /// Source location
    pub span: Span,
}

/// `await x`
#[derive(Debug, Clone, PartialEq)]
pub struct Await {
    /// Awaited value
    pub expression: Box<Expression>,
    /// Source location
    pub span: Span,
}

/// `throw x`
#[derive(Debug, Clone, PartialEq)]
pub struct Throw {
    /// Thrown value
    pub exception: Box<Expression>,
    /// Source location
    pub span: Span,
}

/// `super` as a property receiver
#[derive(Debug, Clone, PartialEq)]
pub struct SuperPropertyReference {
    /// Source location
    pub span: Span,
}

/// `super` as a callee
#[derive(Debug, Clone, PartialEq)]
pub struct SuperCallReference {
    /// Source location
    pub span: Span,
}
