//! Variable facts supplied by the scope resolver

use crate::interner::Symbol;

/// Identity of a resolved variable within one program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(pub u32);

/// Declaration mode of a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableMode {
    /// `var` binding
    Var,
    /// `let` binding
    Let,
    /// `const` binding
    Const,
    /// Compiler-introduced temporary
    Temporary,
    /// Always looked up dynamically (inside `with`)
    Dynamic,
    /// Dynamically looked up, but most likely a global
    DynamicGlobal,
    /// Dynamically looked up, but most likely a local
    DynamicLocal,
}

impl VariableMode {
    /// Any of the dynamic lookup modes
    pub fn is_dynamic(self) -> bool {
        matches!(
            self,
            VariableMode::Dynamic | VariableMode::DynamicGlobal | VariableMode::DynamicLocal
        )
    }
}

/// Where the variable's storage lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableLocation {
    /// Global-like: a property of the global object
    Unallocated,
    /// Function parameter
    Parameter,
    /// Stack slot
    Local,
    /// Slot in a heap-allocated context
    Context,
    /// Resolved at runtime by name
    Lookup,
    /// Module import or export
    Module,
}

/// A resolved variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variable {
    /// Program-wide identity
    pub id: VariableId,
    /// Declared name
    pub name: Symbol,
    /// Declaration mode
    pub mode: VariableMode,
    /// Storage location
    pub location: VariableLocation,
    /// The receiver binding
    pub is_this: bool,
}

impl Variable {
    /// Ordinary variable with the given facts
    pub fn new(id: VariableId, name: Symbol, mode: VariableMode, location: VariableLocation) -> Self {
        Self {
            id,
            name,
            mode,
            location,
            is_this: false,
        }
    }

    /// Lives on the global object
    pub fn is_unallocated(&self) -> bool {
        self.location == VariableLocation::Unallocated
    }

    /// Resolved by name at runtime
    pub fn is_lookup_slot(&self) -> bool {
        self.location == VariableLocation::Lookup
    }
}
