//! Depth and flags analysis of structured literals
//!
//! Bottom-up and memoized: a literal's shape is computed on first request,
//! after the shapes of its nested literals, and read from the cell after
//! that.

use crate::ast::{ArrayLiteral, AstValueFactory, MaterializedLiteral, ObjectLiteral};
use crate::config::LiteralPolicy;
use crate::error::{AnalysisError, AnalysisResult};

/// Analysis result of an object literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectShape {
    /// 1 + deepest nested literal in the static prefix
    pub depth: u32,
    /// Every participating value is a compile-time constant and there is
    /// no prototype override other than `__proto__: null`
    pub is_simple: bool,
    /// `__proto__: null` is present
    pub has_null_prototype: bool,
    /// Some nested literal tracks elements kind transitions
    pub needs_initial_allocation_site: bool,
    /// At least one static key is an array index
    pub has_elements: bool,
    /// Index keys are dense enough for a fast elements store
    pub fast_elements: bool,
}

/// Analysis result of an array literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayShape {
    /// 1 + deepest nested literal
    pub depth: u32,
    /// Every element is a compile-time constant
    pub is_simple: bool,
}

impl ObjectLiteral {
    /// Compute depth and flags, returning the depth
    pub fn init_depth_and_flags(
        &self,
        factory: &AstValueFactory,
        policy: &LiteralPolicy,
    ) -> AnalysisResult<u32> {
        if let Some(shape) = self.shape.get() {
            return Ok(shape.depth);
        }

        let mut is_simple = true;
        let mut has_seen_prototype = false;
        let mut has_null_prototype = false;
        let mut needs_initial_allocation_site = false;
        let mut depth = 1;
        let mut nof_properties = 0u32;
        let mut elements = 0u32;
        let mut max_element_index = 0u32;

        let properties = self.properties();
        for (i, property) in properties.iter().enumerate() {
            if property.is_prototype() {
                has_seen_prototype = true;
                // __proto__: null has no side effects and is set directly on
                // the boilerplate
                if property.is_null_prototype() {
                    has_null_prototype = true;
                } else {
                    is_simple = false;
                }
                continue;
            }

            if nof_properties == self.boilerplate_properties() {
                // First computed name: the shape ends here, but a later
                // __proto__: null still applies
                is_simple = false;
                if !has_seen_prototype {
                    has_null_prototype = properties[i..]
                        .iter()
                        .any(|property| property.is_null_prototype());
                }
                break;
            }

            if let Some(literal) = property.value.as_materialized_literal() {
                depth = depth.max(literal.init_depth_and_flags(factory, policy)? + 1);
                needs_initial_allocation_site |= literal.needs_initial_allocation_site();
            }

            is_simple = is_simple && property.value.is_compile_time_value();

            let index = property
                .key
                .as_literal()
                .and_then(|key| factory.array_index(&key.value));
            if let Some(index) = index {
                max_element_index = max_element_index.max(index);
                elements += 1;
            }

            nof_properties += 1;
        }

        let shape = ObjectShape {
            depth,
            is_simple,
            has_null_prototype,
            needs_initial_allocation_site,
            has_elements: elements > 0,
            fast_elements: policy.prefers_dense_elements(elements, max_element_index),
        };
        Ok(self.shape.get_or_init(|| shape).depth)
    }
}

impl ArrayLiteral {
    /// Compute depth and simplicity, returning the depth.
    ///
    /// Spreads must have been rewound first.
    pub fn init_depth_and_flags(
        &self,
        factory: &AstValueFactory,
        policy: &LiteralPolicy,
    ) -> AnalysisResult<u32> {
        if let Some(index) = self.first_spread_index() {
            return Err(AnalysisError::SpreadNotRewound {
                span: self.span,
                index,
            });
        }
        if let Some(shape) = self.shape.get() {
            return Ok(shape.depth);
        }

        let mut is_simple = true;
        let mut depth = 1;
        for element in self.values() {
            if let Some(literal) = element.as_materialized_literal() {
                depth = depth.max(literal.init_depth_and_flags(factory, policy)? + 1);
            }
            if !element.is_compile_time_value() {
                is_simple = false;
            }
        }

        Ok(self.shape.get_or_init(|| ArrayShape { depth, is_simple }).depth)
    }
}

impl MaterializedLiteral<'_> {
    /// Depth and flags of any materialized literal; a regexp has depth 1
    pub fn init_depth_and_flags(
        &self,
        factory: &AstValueFactory,
        policy: &LiteralPolicy,
    ) -> AnalysisResult<u32> {
        match self {
            MaterializedLiteral::Object(lit) => lit.init_depth_and_flags(factory, policy),
            MaterializedLiteral::Array(lit) => lit.init_depth_and_flags(factory, policy),
            MaterializedLiteral::RegExp(_) => Ok(1),
        }
    }
}
