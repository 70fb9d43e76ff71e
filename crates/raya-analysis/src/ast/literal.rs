//! Structured literal nodes
//!
//! Object, array, regexp and class literals. Each materialized literal owns
//! its memoized analysis cells; the analysis itself lives in the `literal`
//! module.

use super::*;
use crate::config::LiteralPolicy;
use crate::feedback::FeedbackSlot;
use crate::interner::Symbol;
use crate::literal::{ArrayBoilerplate, ArrayShape, ObjectBoilerplate, ObjectShape};
use crate::span::Span;
use once_cell::unsync::OnceCell;
use std::ops::BitOr;
use std::sync::Arc;

// ============================================================================
// Literal Properties
// ============================================================================

/// Up to two feedback slots attached to one literal property
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropertySlots([Option<FeedbackSlot>; 2]);

impl PropertySlots {
    /// Slot at `offset` (0 or 1), if assigned
    pub fn get(&self, offset: usize) -> Option<FeedbackSlot> {
        self.0[offset]
    }

    pub(crate) fn set(&mut self, offset: usize, slot: FeedbackSlot) {
        self.0[offset] = Some(slot);
    }
}

/// Behaviour shared by object and class literal properties
pub trait LiteralProperty {
    /// Key expression
    fn key(&self) -> &Expression;

    /// Value expression
    fn value(&self) -> &Expression;

    /// Key is only known at runtime
    fn is_computed_name(&self) -> bool;

    /// Slots assigned by the allocator
    fn slots(&self) -> &PropertySlots;

    /// Slot at `offset`
    fn slot(&self, offset: usize) -> Option<FeedbackSlot> {
        self.slots().get(offset)
    }

    /// Offset of the store-data-property slot: it follows the home object
    /// store when the value needs one
    fn store_data_property_offset(&self) -> usize {
        if FunctionLiteral::needs_home_object_for(self.value()) {
            1
        } else {
            0
        }
    }

    /// Slot for the runtime define-property fallback
    fn store_data_property_slot(&self) -> Option<FeedbackSlot> {
        self.slot(self.store_data_property_offset())
    }

    /// A computed key whose value must receive the key as its `name`
    fn needs_set_function_name(&self) -> bool {
        let value = self.value();
        self.is_computed_name()
            && (value.is_anonymous_function_definition()
                || value.is_concise_method_definition()
                || value.is_accessor_function_definition())
    }
}

/// How an object literal property is installed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectPropertyKind {
    /// Value is a literal
    Constant,
    /// Value is computed at runtime
    Computed,
    /// Value is a nested object, array or regexp literal
    MaterializedLiteral,
    /// `get key() {}`
    Getter,
    /// `set key(v) {}`
    Setter,
    /// `__proto__: value`
    Prototype,
    /// `...value`
    Spread,
}

/// One entry of an object literal
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectLiteralProperty {
    /// Key expression
    pub key: Expression,
    /// Value expression
    pub value: Expression,
    kind: ObjectPropertyKind,
    is_computed_name: bool,
    emit_store: bool,
    pub(crate) slots: PropertySlots,
}

impl ObjectLiteralProperty {
    /// Create a data property, deriving its kind from key and value
    pub fn new(
        factory: &AstValueFactory,
        key: Expression,
        value: Expression,
        is_computed_name: bool,
    ) -> Self {
        let is_proto = !is_computed_name
            && key
                .as_literal()
                .and_then(|lit| lit.value.as_string())
                .map_or(false, |name| name == factory.proto_string());

        let kind = if is_proto {
            ObjectPropertyKind::Prototype
        } else if value.as_materialized_literal().is_some() {
            ObjectPropertyKind::MaterializedLiteral
        } else if value.is_literal() {
            ObjectPropertyKind::Constant
        } else {
            ObjectPropertyKind::Computed
        };

        Self::with_kind(key, value, kind, is_computed_name)
    }

    /// Create a property of an explicit kind (accessors, spreads)
    pub fn with_kind(
        key: Expression,
        value: Expression,
        kind: ObjectPropertyKind,
        is_computed_name: bool,
    ) -> Self {
        Self {
            key,
            value,
            kind,
            // Spreads are never part of the static prefix
            is_computed_name: is_computed_name || kind == ObjectPropertyKind::Spread,
            emit_store: true,
            slots: PropertySlots::default(),
        }
    }

    /// Installation kind, derived at construction
    pub fn kind(&self) -> ObjectPropertyKind {
        self.kind
    }

    /// Whether construction must perform a store for this property
    pub fn emit_store(&self) -> bool {
        self.emit_store
    }

    /// Demote the store; never promoted back
    pub(crate) fn suppress_store(&mut self) {
        self.emit_store = false;
    }

    /// `__proto__: value`
    pub fn is_prototype(&self) -> bool {
        self.kind == ObjectPropertyKind::Prototype
    }

    /// `__proto__: null`, folded directly into the boilerplate
    pub fn is_null_prototype(&self) -> bool {
        self.is_prototype() && self.value.is_null_literal()
    }

    /// Value is known without running code
    pub fn is_compile_time_value(&self) -> bool {
        match self.kind {
            ObjectPropertyKind::Constant => true,
            ObjectPropertyKind::MaterializedLiteral => self.value.is_compile_time_value(),
            _ => false,
        }
    }
}

impl LiteralProperty for ObjectLiteralProperty {
    fn key(&self) -> &Expression {
        &self.key
    }

    fn value(&self) -> &Expression {
        &self.value
    }

    fn is_computed_name(&self) -> bool {
        self.is_computed_name
    }

    fn slots(&self) -> &PropertySlots {
        &self.slots
    }
}

// ============================================================================
// Literal Flags
// ============================================================================

/// Flags handed to the runtime's create-literal operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LiteralFlags(u8);

impl LiteralFlags {
    /// No flags
    pub const NO_FLAGS: Self = Self(0);
    /// Dense elements preferred
    pub const FAST_ELEMENTS: Self = Self(1);
    /// Object literal has depth 1
    pub const SHALLOW_PROPERTIES: Self = Self(1 << 1);
    /// Array literal has depth 1
    pub const SHALLOW_ELEMENTS: Self = Self(1 << 1);
    /// Skip allocation mementos
    pub const DISABLE_MEMENTOS: Self = Self(1 << 2);
    /// Created with a null prototype
    pub const HAS_NULL_PROTOTYPE: Self = Self(1 << 3);

    /// Raw bit pattern
    pub fn bits(self) -> u8 {
        self.0
    }

    /// All bits of `other` are set
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for LiteralFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

// ============================================================================
// Object Literal
// ============================================================================

/// Object literal: { a: 1, [k]: v, get x() {} }
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectLiteral {
    properties: Vec<ObjectLiteralProperty>,
    boilerplate_properties: u32,
    /// Source location
    pub span: Span,
    pub(crate) shape: OnceCell<ObjectShape>,
    pub(crate) constant_properties: OnceCell<Arc<ObjectBoilerplate>>,
    pub(crate) emit_store_calculated: bool,
    literal_slot: Option<FeedbackSlot>,
}

impl ObjectLiteral {
    /// Object literal over `properties`, in source order
    pub fn new(properties: Vec<ObjectLiteralProperty>, span: Span) -> Self {
        // Static prefix: non-prototype properties before the first computed name
        let boilerplate_properties = properties
            .iter()
            .take_while(|property| !property.is_computed_name())
            .filter(|property| !property.is_prototype())
            .count() as u32;

        Self {
            properties,
            boilerplate_properties,
            span,
            shape: OnceCell::new(),
            constant_properties: OnceCell::new(),
            emit_store_calculated: false,
            literal_slot: None,
        }
    }

    /// Properties in source order
    pub fn properties(&self) -> &[ObjectLiteralProperty] {
        &self.properties
    }

    pub(crate) fn properties_mut(&mut self) -> &mut [ObjectLiteralProperty] {
        &mut self.properties
    }

    /// Number of properties in the statically known prefix
    pub fn boilerplate_properties(&self) -> u32 {
        self.boilerplate_properties
    }

    /// Properties the boilerplate holds
    pub fn properties_count(&self) -> usize {
        self.boilerplate_properties as usize
    }

    /// Result of depth and flags analysis, once it has run
    pub fn shape(&self) -> Option<&ObjectShape> {
        self.shape.get()
    }

    /// Depth and flags analysis has run
    pub fn is_initialized(&self) -> bool {
        self.shape.get().is_some()
    }

    /// Nesting depth; reports 1 until analysed
    pub fn depth(&self) -> u32 {
        self.shape.get().map_or(1, |shape| shape.depth)
    }

    /// All participating values are compile-time constants; false until
    /// analysed
    pub fn is_simple(&self) -> bool {
        self.shape.get().map_or(false, |shape| shape.is_simple)
    }

    /// Depth 1
    pub fn is_shallow(&self) -> bool {
        self.depth() == 1
    }

    /// `__proto__: null` appears among the properties
    pub fn has_null_prototype(&self) -> bool {
        self.shape.get().map_or(false, |shape| shape.has_null_prototype)
    }

    /// Dense elements preferred
    pub fn fast_elements(&self) -> bool {
        self.shape.get().map_or(false, |shape| shape.fast_elements)
    }

    /// Some static key is an array index
    pub fn has_elements(&self) -> bool {
        self.shape.get().map_or(false, |shape| shape.has_elements)
    }

    /// A nested array needs an allocation site
    pub fn needs_initial_allocation_site(&self) -> bool {
        self.shape
            .get()
            .map_or(false, |shape| shape.needs_initial_allocation_site)
    }

    /// Eligible for the runtime's shallow-clone fast path
    pub fn is_fast_cloning_supported(&self, policy: &LiteralPolicy) -> bool {
        self.fast_elements()
            && self.is_shallow()
            && self.properties_count() <= policy.max_cloned_shallow_object_properties
    }

    /// Create-literal flags for the generator
    pub fn flags(&self, disable_mementos: bool) -> LiteralFlags {
        let mut flags = if self.fast_elements() {
            LiteralFlags::FAST_ELEMENTS
        } else {
            LiteralFlags::NO_FLAGS
        };
        if self.is_shallow() {
            flags = flags | LiteralFlags::SHALLOW_PROPERTIES;
        }
        if disable_mementos {
            flags = flags | LiteralFlags::DISABLE_MEMENTOS;
        }
        if self.has_null_prototype() {
            flags = flags | LiteralFlags::HAS_NULL_PROTOTYPE;
        }
        flags
    }

    /// Boilerplate description, once built
    pub fn constant_properties(&self) -> Option<&Arc<ObjectBoilerplate>> {
        self.constant_properties.get()
    }

    /// Create-literal slot
    pub fn literal_slot(&self) -> Option<FeedbackSlot> {
        self.literal_slot
    }

    pub(crate) fn set_literal_slot(&mut self, slot: FeedbackSlot) {
        self.literal_slot = Some(slot);
    }
}

// ============================================================================
// Array Literal
// ============================================================================

/// Array literal: [1, , x, ...xs]
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    values: Vec<Expression>,
    first_spread_index: Option<usize>,
    /// Source location
    pub span: Span,
    pub(crate) shape: OnceCell<ArrayShape>,
    pub(crate) constant_elements: OnceCell<Arc<ArrayBoilerplate>>,
    literal_slot: Option<FeedbackSlot>,
    store_slot: Option<FeedbackSlot>,
}

impl ArrayLiteral {
    /// Array literal over `values`; records the first spread
    pub fn new(values: Vec<Expression>, span: Span) -> Self {
        let first_spread_index = values.iter().position(Expression::is_spread);
        Self {
            values,
            first_spread_index,
            span,
            shape: OnceCell::new(),
            constant_elements: OnceCell::new(),
            literal_slot: None,
            store_slot: None,
        }
    }

    /// Elements in source order
    pub fn values(&self) -> &[Expression] {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [Expression] {
        &mut self.values
    }

    /// Index of the first spread element, if any
    pub fn first_spread_index(&self) -> Option<usize> {
        self.first_spread_index
    }

    /// Drop the first spread and everything after it.
    ///
    /// The caller emits those elements itself; the remaining prefix becomes
    /// eligible for analysis.
    pub fn rewind_spreads(&mut self) {
        if let Some(index) = self.first_spread_index.take() {
            self.values.truncate(index);
        }
    }

    /// Result of depth and flags analysis, once it has run
    pub fn shape(&self) -> Option<&ArrayShape> {
        self.shape.get()
    }

    /// Depth and flags analysis has run
    pub fn is_initialized(&self) -> bool {
        self.shape.get().is_some()
    }

    /// Nesting depth; reports 1 until analysed
    pub fn depth(&self) -> u32 {
        self.shape.get().map_or(1, |shape| shape.depth)
    }

    /// All elements are compile-time constants; false until analysed
    pub fn is_simple(&self) -> bool {
        self.shape.get().map_or(false, |shape| shape.is_simple)
    }

    /// Depth 1
    pub fn is_shallow(&self) -> bool {
        self.depth() == 1
    }

    /// Arrays always track elements kind transitions
    pub fn needs_initial_allocation_site(&self) -> bool {
        true
    }

    /// Eligible for the runtime's shallow-clone fast path
    pub fn is_fast_cloning_supported(&self, policy: &LiteralPolicy) -> bool {
        self.depth() <= 1 && self.values.len() <= policy.max_cloned_shallow_array_elements
    }

    /// Create-literal flags for the generator
    pub fn flags(&self, disable_mementos: bool) -> LiteralFlags {
        let flags = if self.is_shallow() {
            LiteralFlags::SHALLOW_ELEMENTS
        } else {
            LiteralFlags::NO_FLAGS
        };
        if disable_mementos {
            flags | LiteralFlags::DISABLE_MEMENTOS
        } else {
            flags
        }
    }

    /// Elements kind and backing store, once built
    pub fn constant_elements(&self) -> Option<&Arc<ArrayBoilerplate>> {
        self.constant_elements.get()
    }

    /// Create-literal slot
    pub fn literal_slot(&self) -> Option<FeedbackSlot> {
        self.literal_slot
    }

    /// Keyed store slot shared by every non-constant element
    pub fn store_slot(&self) -> Option<FeedbackSlot> {
        self.store_slot
    }

    pub(crate) fn set_literal_slot(&mut self, slot: FeedbackSlot) {
        self.literal_slot = Some(slot);
    }

    pub(crate) fn set_store_slot(&mut self, slot: FeedbackSlot) {
        self.store_slot = Some(slot);
    }
}

// ============================================================================
// RegExp Literal
// ============================================================================

/// Regular expression literal: /ab+c/g
#[derive(Debug, Clone, PartialEq)]
pub struct RegExpLiteral {
    /// Pattern source
    pub pattern: Symbol,
    /// Flag characters
    pub flags: Symbol,
    /// Source location
    pub span: Span,
    literal_slot: Option<FeedbackSlot>,
}

impl RegExpLiteral {
    /// Regexp literal with `pattern` and `flags`
    pub fn new(pattern: Symbol, flags: Symbol, span: Span) -> Self {
        Self {
            pattern,
            flags,
            span,
            literal_slot: None,
        }
    }

    /// Create-literal slot
    pub fn literal_slot(&self) -> Option<FeedbackSlot> {
        self.literal_slot
    }

    pub(crate) fn set_literal_slot(&mut self, slot: FeedbackSlot) {
        self.literal_slot = Some(slot);
    }
}

// ============================================================================
// Materialized Literals
// ============================================================================

/// Borrowed view over the three literal kinds that materialize a fresh
/// object from a boilerplate
#[derive(Debug, Clone, Copy)]
pub enum MaterializedLiteral<'a> {
    /// `{ ... }`
    Object(&'a ObjectLiteral),
    /// `[ ... ]`
    Array(&'a ArrayLiteral),
    /// `/.../`
    RegExp(&'a RegExpLiteral),
}

impl MaterializedLiteral<'_> {
    /// Regexps are never simple
    pub fn is_simple(&self) -> bool {
        match self {
            MaterializedLiteral::Object(lit) => lit.is_simple(),
            MaterializedLiteral::Array(lit) => lit.is_simple(),
            MaterializedLiteral::RegExp(_) => false,
        }
    }

    /// Nesting depth; 1 for regexps
    pub fn depth(&self) -> u32 {
        match self {
            MaterializedLiteral::Object(lit) => lit.depth(),
            MaterializedLiteral::Array(lit) => lit.depth(),
            MaterializedLiteral::RegExp(_) => 1,
        }
    }

    /// Whether the runtime allocates a site for this literal
    pub fn needs_initial_allocation_site(&self) -> bool {
        match self {
            MaterializedLiteral::Object(lit) => lit.needs_initial_allocation_site(),
            MaterializedLiteral::Array(lit) => lit.needs_initial_allocation_site(),
            MaterializedLiteral::RegExp(_) => false,
        }
    }
}

impl Expression {
    /// View as a materialized literal, if it is one
    pub fn as_materialized_literal(&self) -> Option<MaterializedLiteral<'_>> {
        match self {
            Expression::ObjectLiteral(lit) => Some(MaterializedLiteral::Object(lit)),
            Expression::ArrayLiteral(lit) => Some(MaterializedLiteral::Array(lit)),
            Expression::RegExpLiteral(lit) => Some(MaterializedLiteral::RegExp(lit)),
            _ => None,
        }
    }

    /// A literal, or a simple structured literal whose value is fully known
    /// after analysis
    pub fn is_compile_time_value(&self) -> bool {
        if self.is_literal() {
            return true;
        }
        match self.as_materialized_literal() {
            Some(MaterializedLiteral::RegExp(_)) | None => false,
            Some(literal) => literal.is_simple(),
        }
    }
}

// ============================================================================
// Class Literal
// ============================================================================

/// Kind of a class member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassPropertyKind {
    /// `m() {}`
    Method,
    /// `get m() {}`
    Getter,
    /// `set m(v) {}`
    Setter,
    /// Field initializer
    Field,
}

/// One member of a class body
#[derive(Debug, Clone, PartialEq)]
pub struct ClassLiteralProperty {
    /// Key expression
    pub key: Expression,
    /// Value: function for methods and accessors, initializer for fields
    pub value: Expression,
    /// Member kind
    pub kind: ClassPropertyKind,
    /// Declared `static`
    pub is_static: bool,
    is_computed_name: bool,
    pub(crate) slots: PropertySlots,
}

impl ClassLiteralProperty {
    /// Member with the given key and value
    pub fn new(
        key: Expression,
        value: Expression,
        kind: ClassPropertyKind,
        is_static: bool,
        is_computed_name: bool,
    ) -> Self {
        Self {
            key,
            value,
            kind,
            is_static,
            is_computed_name,
            slots: PropertySlots::default(),
        }
    }
}

impl LiteralProperty for ClassLiteralProperty {
    fn key(&self) -> &Expression {
        &self.key
    }

    fn value(&self) -> &Expression {
        &self.value
    }

    fn is_computed_name(&self) -> bool {
        self.is_computed_name
    }

    fn slots(&self) -> &PropertySlots {
        &self.slots
    }
}

/// Class expression or the body of a class declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ClassLiteral {
    /// Binding of the class name inside its own body
    pub class_variable: Option<VariableProxy>,
    /// Superclass expression
    pub extends: Option<Box<Expression>>,
    /// Constructor, explicit or synthesized
    pub constructor: FunctionLiteral,
    /// Members in source order
    pub properties: Vec<ClassLiteralProperty>,
    /// Source location
    pub span: Span,
    home_object_slot: Option<FeedbackSlot>,
    proxy_slot: Option<FeedbackSlot>,
}

impl ClassLiteral {
    /// Class literal; nested functions stay unprepared
    pub fn new(
        class_variable: Option<VariableProxy>,
        extends: Option<Expression>,
        constructor: FunctionLiteral,
        properties: Vec<ClassLiteralProperty>,
        span: Span,
    ) -> Self {
        Self {
            class_variable,
            extends: extends.map(Box::new),
            constructor,
            properties,
            span,
            home_object_slot: None,
            proxy_slot: None,
        }
    }

    /// Class without a name binding
    pub fn is_anonymous_function_definition(&self) -> bool {
        self.class_variable.is_none()
    }

    /// The class binding is a global and needs its own store
    pub fn needs_proxy_slot(&self) -> bool {
        self.class_variable
            .as_ref()
            .and_then(VariableProxy::var)
            .map_or(false, Variable::is_unallocated)
    }

    /// Store slot for the constructor's home object
    pub fn home_object_slot(&self) -> Option<FeedbackSlot> {
        self.home_object_slot
    }

    /// Store slot for a global class binding
    pub fn proxy_slot(&self) -> Option<FeedbackSlot> {
        self.proxy_slot
    }

    pub(crate) fn set_home_object_slot(&mut self, slot: FeedbackSlot) {
        self.home_object_slot = Some(slot);
    }

    pub(crate) fn set_proxy_slot(&mut self, slot: FeedbackSlot) {
        self.proxy_slot = Some(slot);
    }
}
