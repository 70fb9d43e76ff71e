//! Structured literal analysis
//!
//! Three steps prepare an object or array literal for the generator:
//! - conflict resolution decides which static properties need a store
//!   (`emit_store`)
//! - shape analysis computes depth, simplicity and representation flags
//!   (`shape`)
//! - constant building materializes the boilerplate tables (`constants`)
//!
//! Each step is memoized on the literal node, so nested literals analysed
//! on the way up are never recomputed.

pub mod boilerplate;
pub mod constants;
pub mod elements;
pub mod emit_store;
pub mod heap;
pub mod shape;

pub use boilerplate::{
    ArrayBoilerplate, BoilerplatePlan, BoilerplateValue, ElementsBacking, ObjectBoilerplate,
    StoredKey,
};
pub use constants::boilerplate_value;
pub use elements::ElementsKind;
pub use heap::{BoilerplateAllocator, Heap};
pub use shape::{ArrayShape, ObjectShape};

use crate::ast::AstValueFactory;
use crate::config::LiteralPolicy;

/// Collaborators needed to build boilerplates
#[derive(Clone, Copy)]
pub struct LiteralContext<'a> {
    /// Canonical values and interned names
    pub factory: &'a AstValueFactory,
    /// Runtime thresholds
    pub policy: &'a LiteralPolicy,
    /// Table allocator
    pub heap: &'a dyn BoilerplateAllocator,
}

impl<'a> LiteralContext<'a> {
    /// Bundle the collaborators
    pub fn new(
        factory: &'a AstValueFactory,
        policy: &'a LiteralPolicy,
        heap: &'a dyn BoilerplateAllocator,
    ) -> Self {
        Self {
            factory,
            policy,
            heap,
        }
    }
}
