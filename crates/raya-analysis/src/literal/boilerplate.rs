//! Boilerplate representation consumed by the literal allocator

use super::ElementsKind;
use crate::ast::AstValue;
use crate::interner::Symbol;
use std::sync::Arc;

/// A value stored in a boilerplate table
#[derive(Debug, Clone, PartialEq)]
pub enum BoilerplateValue {
    /// Literal value known at compile time
    Literal(AstValue),
    /// Missing element of a holey array
    TheHole,
    /// Filled in at runtime
    Uninitialized,
    /// Nested simple object literal
    Object(Arc<ObjectBoilerplate>),
    /// Nested simple array literal
    Array(Arc<ArrayBoilerplate>),
}

impl BoilerplateValue {
    /// Wrap a literal value; elisions become holes
    pub fn from_literal(value: AstValue) -> Self {
        match value {
            AstValue::TheHole => BoilerplateValue::TheHole,
            other => BoilerplateValue::Literal(other),
        }
    }

    /// Missing element
    pub fn is_the_hole(&self) -> bool {
        matches!(self, BoilerplateValue::TheHole)
    }

    /// Placeholder filled at runtime
    pub fn is_uninitialized(&self) -> bool {
        matches!(self, BoilerplateValue::Uninitialized)
    }

    /// Numeric value of a Smi or heap number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            BoilerplateValue::Literal(value) => value.as_number(),
            _ => None,
        }
    }

    /// Most specific elements kind able to store this value
    pub fn optimal_elements_kind(&self) -> ElementsKind {
        match self {
            BoilerplateValue::Literal(AstValue::Smi(_)) | BoilerplateValue::Uninitialized => {
                ElementsKind::PackedSmi
            }
            BoilerplateValue::Literal(AstValue::Number(_)) => ElementsKind::PackedDouble,
            _ => ElementsKind::Packed,
        }
    }
}

/// Key as stored in an object boilerplate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoredKey {
    /// Named property (canonical string form for non-index numbers)
    Name(Symbol),
    /// Array index, including index strings like `"3"`
    Index(u32),
}

/// Capacity plan for an object boilerplate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoilerplatePlan {
    /// Entries in the statically known prefix
    pub boilerplate_properties: u32,
    /// All properties of the literal, including dynamic ones
    pub total_properties: u32,
    /// Static keys that are array indices
    pub index_keys: u32,
    /// A `__proto__` property is present
    pub has_seen_proto: bool,
}

impl BoilerplatePlan {
    /// Named properties the runtime reserves in the object's own store
    pub fn backing_store_size(&self) -> u32 {
        self.total_properties
            .saturating_sub(self.index_keys)
            .saturating_sub(u32::from(self.has_seen_proto))
    }
}

/// Ordered constant properties of an object literal.
///
/// Entry order defines the runtime enumeration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectBoilerplate {
    plan: BoilerplatePlan,
    entries: Vec<(StoredKey, BoilerplateValue)>,
}

impl ObjectBoilerplate {
    /// Empty table sized by `plan`
    pub fn with_plan(plan: BoilerplatePlan) -> Self {
        Self {
            plan,
            entries: Vec::with_capacity(plan.boilerplate_properties as usize),
        }
    }

    /// Capacity plan the table was built for
    pub fn plan(&self) -> &BoilerplatePlan {
        &self.plan
    }

    /// Key and value pairs in enumeration order
    pub fn entries(&self) -> &[(StoredKey, BoilerplateValue)] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Backing store slots for named properties
    pub fn backing_store_size(&self) -> u32 {
        self.plan.backing_store_size()
    }

    pub(crate) fn push(&mut self, key: StoredKey, value: BoilerplateValue) {
        self.entries.push((key, value));
    }
}

/// Backing store of an array boilerplate
#[derive(Debug, Clone, PartialEq)]
pub enum ElementsBacking {
    /// Tagged values; `copy_on_write` tables are shared between clones
    Fixed {
        /// Element values in index order
        values: Vec<BoilerplateValue>,
        /// Table may be shared until the first write
        copy_on_write: bool,
    },
    /// Unboxed doubles; `None` is a hole
    Double(Vec<Option<f64>>),
}

/// Constant elements of an array literal paired with their elements kind
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayBoilerplate {
    /// Representation of the elements
    pub kind: ElementsKind,
    /// Element storage
    pub backing: ElementsBacking,
}

impl ArrayBoilerplate {
    /// Number of elements
    pub fn len(&self) -> usize {
        match &self.backing {
            ElementsBacking::Fixed { values, .. } => values.len(),
            ElementsBacking::Double(values) => values.len(),
        }
    }

    /// No elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clones may share the backing table
    pub fn is_copy_on_write(&self) -> bool {
        matches!(
            self.backing,
            ElementsBacking::Fixed {
                copy_on_write: true,
                ..
            }
        )
    }
}
