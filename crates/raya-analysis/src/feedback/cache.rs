//! Per-function cache of global load slots

use super::{FeedbackSlot, TypeofMode};
use crate::ast::VariableId;
use rustc_hash::FxHashMap;

/// Slots already issued for global variable loads.
///
/// Reads of the same global with the same typeof mode share one slot within
/// a function. Scoped to a single function; never shared across units.
#[derive(Debug, Default)]
pub struct FeedbackSlotCache {
    map: FxHashMap<(TypeofMode, VariableId), FeedbackSlot>,
}

impl FeedbackSlotCache {
    /// Empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot issued earlier for this global and mode
    pub fn get(&self, typeof_mode: TypeofMode, var: VariableId) -> Option<FeedbackSlot> {
        self.map.get(&(typeof_mode, var)).copied()
    }

    /// Remember the slot issued for this global and mode
    pub fn put(&mut self, typeof_mode: TypeofMode, var: VariableId, slot: FeedbackSlot) {
        self.map.insert((typeof_mode, var), slot);
    }

    /// Number of cached slots
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// No slot cached yet
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
