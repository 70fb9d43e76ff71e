//! Interned literal values and the factory that canonicalizes them

use crate::interner::{Interner, Symbol};
use crate::number;
use std::sync::Arc;

/// Immutable value wrapped by a `Literal` node
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AstValue {
    /// Interned string
    String(Symbol),
    /// Small integer immediate
    Smi(i32),
    /// Any number that is not a small integer
    Number(f64),
    /// `true` or `false`
    Boolean(bool),
    /// `null`
    Null,
    /// `undefined`
    Undefined,
    /// Elision in an array literal: `[1, , 3]`
    TheHole,
}

impl AstValue {
    /// Interned string
    pub fn is_string(&self) -> bool {
        matches!(self, AstValue::String(_))
    }

    /// Symbol of a string value
    pub fn as_string(&self) -> Option<Symbol> {
        match self {
            AstValue::String(sym) => Some(*sym),
            _ => None,
        }
    }

    /// Smi or heap number
    pub fn is_number(&self) -> bool {
        matches!(self, AstValue::Smi(_) | AstValue::Number(_))
    }

    /// Numeric value of a Smi or Number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AstValue::Smi(value) => Some(f64::from(*value)),
            AstValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Small integer
    pub fn is_smi(&self) -> bool {
        matches!(self, AstValue::Smi(_))
    }

    /// Value of a Smi
    pub fn as_smi(&self) -> Option<i32> {
        match self {
            AstValue::Smi(value) => Some(*value),
            _ => None,
        }
    }

    /// `null`
    pub fn is_null(&self) -> bool {
        matches!(self, AstValue::Null)
    }

    /// `undefined`
    pub fn is_undefined(&self) -> bool {
        matches!(self, AstValue::Undefined)
    }

    /// Array elision
    pub fn is_the_hole(&self) -> bool {
        matches!(self, AstValue::TheHole)
    }

    /// Exact `u32` value of a number
    pub fn to_uint32(&self) -> Option<u32> {
        self.as_number().and_then(number::to_uint32)
    }
}

/// Canonical factory for literal values.
///
/// Cloning the factory shares the underlying interner, so workers preparing
/// different functions see one string identity space.
#[derive(Debug, Clone)]
pub struct AstValueFactory {
    interner: Arc<Interner>,
    proto_string: Symbol,
    undefined_string: Symbol,
    empty_string: Symbol,
}

impl AstValueFactory {
    /// Create a factory with a fresh interner
    pub fn new() -> Self {
        Self::with_interner(Arc::new(Interner::new()))
    }

    /// Create a factory over an existing interner
    pub fn with_interner(interner: Arc<Interner>) -> Self {
        let proto_string = interner.intern("__proto__");
        let undefined_string = interner.intern("undefined");
        let empty_string = interner.intern("");
        Self {
            interner,
            proto_string,
            undefined_string,
            empty_string,
        }
    }

    /// Shared string table
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Intern a name
    pub fn symbol(&self, s: &str) -> Symbol {
        self.interner.intern(s)
    }

    /// Interned string value
    pub fn string(&self, s: &str) -> AstValue {
        AstValue::String(self.interner.intern(s))
    }

    /// Canonical number: integral values in `i32` range (except -0) become Smi
    pub fn number(&self, value: f64) -> AstValue {
        match number::as_smi(value) {
            Some(smi) => AstValue::Smi(smi),
            None => AstValue::Number(value),
        }
    }

    /// Smi value
    pub fn smi(&self, value: i32) -> AstValue {
        AstValue::Smi(value)
    }

    /// Boolean value
    pub fn boolean(&self, value: bool) -> AstValue {
        AstValue::Boolean(value)
    }

    /// `null`
    pub fn null(&self) -> AstValue {
        AstValue::Null
    }

    /// `undefined`
    pub fn undefined(&self) -> AstValue {
        AstValue::Undefined
    }

    /// Array elision marker
    pub fn the_hole(&self) -> AstValue {
        AstValue::TheHole
    }

    /// The `"__proto__"` name
    pub fn proto_string(&self) -> Symbol {
        self.proto_string
    }

    /// The `"undefined"` name
    pub fn undefined_string(&self) -> Symbol {
        self.undefined_string
    }

    /// Text of an interned symbol
    pub fn resolve(&self, sym: Symbol) -> Arc<str> {
        self.interner.resolve(sym)
    }

    /// Array index of a string symbol
    pub fn string_array_index(&self, sym: Symbol) -> Option<u32> {
        number::string_to_array_index(&self.interner.resolve(sym))
    }

    /// Array index of a key value, whether it is a number or an index string
    pub fn array_index(&self, value: &AstValue) -> Option<u32> {
        match value {
            AstValue::String(sym) => self.string_array_index(*sym),
            other => other.as_number().and_then(number::number_to_array_index),
        }
    }

    /// String that names a property but is not an array index
    pub fn is_property_name(&self, value: &AstValue) -> bool {
        match value {
            AstValue::String(sym) => self.string_array_index(*sym).is_none(),
            _ => false,
        }
    }

    /// Canonical string form of a number, interned
    pub fn number_to_string(&self, value: f64) -> Symbol {
        self.interner.intern(&number::number_to_string(value))
    }

    /// ToBoolean of a literal value
    pub fn to_boolean(&self, value: &AstValue) -> bool {
        match value {
            AstValue::String(sym) => *sym != self.empty_string,
            AstValue::Smi(value) => *value != 0,
            AstValue::Number(value) => !(*value == 0.0 || value.is_nan()),
            AstValue::Boolean(value) => *value,
            AstValue::Null | AstValue::Undefined | AstValue::TheHole => false,
        }
    }
}

impl Default for AstValueFactory {
    fn default() -> Self {
        Self::new()
    }
}
