//! Allocator capability for boilerplate tables
//!
//! The analysis never allocates runtime objects itself; it asks an injected
//! [`BoilerplateAllocator`] for tables. [`Heap`] is the default allocator,
//! bounded by the policy's `max_table_length`.

use super::{BoilerplatePlan, BoilerplateValue, ObjectBoilerplate};
use crate::config::LiteralPolicy;
use crate::error::AllocError;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Allocator for constant tables, shared by all workers of a program
pub trait BoilerplateAllocator: Send + Sync {
    /// Growable property table sized by `plan`
    fn new_object_boilerplate(&self, plan: BoilerplatePlan) -> Result<ObjectBoilerplate, AllocError>;

    /// Tagged elements table of `length` holes
    fn new_fixed_array_with_holes(&self, length: usize) -> Result<Vec<BoilerplateValue>, AllocError>;

    /// Unboxed double table of `length` holes
    fn new_fixed_double_array(&self, length: usize) -> Result<Vec<Option<f64>>, AllocError>;

    /// Transcode tagged numeric elements into a double table
    fn copy_to_double(&self, from: &[BoilerplateValue], to: &mut [Option<f64>]) {
        for (slot, value) in to.iter_mut().zip(from) {
            *slot = value.as_number();
        }
    }
}

/// Default allocator
#[derive(Debug)]
pub struct Heap {
    /// Largest table handed out, if bounded
    max_table_length: Option<usize>,
    /// Tables allocated so far
    tables_allocated: AtomicUsize,
}

impl Heap {
    /// Create a heap bounded by the policy's table limit
    pub fn new(policy: &LiteralPolicy) -> Self {
        Heap {
            max_table_length: policy.max_table_length,
            tables_allocated: AtomicUsize::new(0),
        }
    }

    /// Unbounded heap
    pub fn unbounded() -> Self {
        Heap {
            max_table_length: None,
            tables_allocated: AtomicUsize::new(0),
        }
    }

    /// Number of tables allocated by this heap
    pub fn tables_allocated(&self) -> usize {
        self.tables_allocated.load(Ordering::Relaxed)
    }

    fn reserve(&self, requested: usize) -> Result<(), AllocError> {
        if let Some(limit) = self.max_table_length {
            if requested > limit {
                return Err(AllocError::CapacityExceeded { requested, limit });
            }
        }
        self.tables_allocated.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

impl BoilerplateAllocator for Heap {
    fn new_object_boilerplate(&self, plan: BoilerplatePlan) -> Result<ObjectBoilerplate, AllocError> {
        self.reserve(plan.boilerplate_properties as usize)?;
        Ok(ObjectBoilerplate::with_plan(plan))
    }

    fn new_fixed_array_with_holes(&self, length: usize) -> Result<Vec<BoilerplateValue>, AllocError> {
        self.reserve(length)?;
        Ok(vec![BoilerplateValue::TheHole; length])
    }

    fn new_fixed_double_array(&self, length: usize) -> Result<Vec<Option<f64>>, AllocError> {
        self.reserve(length)?;
        Ok(vec![None; length])
    }
}
