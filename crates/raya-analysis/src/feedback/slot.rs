//! Feedback slots and the per-function vector layout

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index into a function's feedback vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeedbackSlot(u32);

impl FeedbackSlot {
    /// Slot at `index`
    pub fn new(index: u32) -> Self {
        FeedbackSlot(index)
    }

    /// Position in the vector
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FeedbackSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Strictness of the enclosing function; selects the store variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LanguageMode {
    /// Sloppy-mode code
    #[default]
    Sloppy,
    /// Strict-mode code
    Strict,
}

/// Whether a global load sits directly under `typeof` (and must not throw
/// on a missing binding)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeofMode {
    /// Operand of `typeof`
    Inside,
    /// Any other read
    NotInside,
}

/// Runtime event a slot observes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackSlotKind {
    /// Allocation site of a materialized literal
    Literal,
    /// Global read under `typeof`
    LoadGlobalInsideTypeof,
    /// Global read elsewhere
    LoadGlobalNotInsideTypeof,
    /// Named property load
    Load,
    /// Keyed property load
    LoadKeyed,
    /// Global store in sloppy code
    StoreGlobalSloppy,
    /// Global store in strict code
    StoreGlobalStrict,
    /// Named store in sloppy code
    StoreNamedSloppy,
    /// Named store in strict code
    StoreNamedStrict,
    /// Define an own property on a fresh literal
    StoreOwnNamed,
    /// Keyed store in sloppy code
    StoreKeyedSloppy,
    /// Keyed store in strict code
    StoreKeyedStrict,
    /// Call or construct site
    Call,
    /// Arithmetic, bitwise or shift operation
    BinaryOp,
    /// Comparison
    CompareOp,
    /// for-in enumeration state
    ForIn,
    /// Property defined on a literal at runtime
    StoreDataPropertyInLiteral,
}

impl FeedbackSlotKind {
    /// Any store kind
    pub fn is_store(self) -> bool {
        matches!(
            self,
            FeedbackSlotKind::StoreGlobalSloppy
                | FeedbackSlotKind::StoreGlobalStrict
                | FeedbackSlotKind::StoreNamedSloppy
                | FeedbackSlotKind::StoreNamedStrict
                | FeedbackSlotKind::StoreOwnNamed
                | FeedbackSlotKind::StoreKeyedSloppy
                | FeedbackSlotKind::StoreKeyedStrict
                | FeedbackSlotKind::StoreDataPropertyInLiteral
        )
    }

    /// Either global load kind
    pub fn is_load_global(self) -> bool {
        matches!(
            self,
            FeedbackSlotKind::LoadGlobalInsideTypeof | FeedbackSlotKind::LoadGlobalNotInsideTypeof
        )
    }
}

/// Append-only record of the slots requested for one function.
///
/// The final length is the size of the function's runtime feedback vector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackVectorSpec {
    kinds: Vec<FeedbackSlotKind>,
}

impl FeedbackVectorSpec {
    /// Empty spec
    pub fn new() -> Self {
        Self { kinds: Vec::new() }
    }

    /// Append a slot of the given kind
    pub fn add_slot(&mut self, kind: FeedbackSlotKind) -> FeedbackSlot {
        let slot = FeedbackSlot(self.kinds.len() as u32);
        self.kinds.push(kind);
        slot
    }

    /// Create-literal site
    pub fn add_literal_slot(&mut self) -> FeedbackSlot {
        self.add_slot(FeedbackSlotKind::Literal)
    }

    /// Global load for the given typeof mode
    pub fn add_load_global_slot(&mut self, typeof_mode: TypeofMode) -> FeedbackSlot {
        self.add_slot(match typeof_mode {
            TypeofMode::Inside => FeedbackSlotKind::LoadGlobalInsideTypeof,
            TypeofMode::NotInside => FeedbackSlotKind::LoadGlobalNotInsideTypeof,
        })
    }

    /// Named property load, or a lookup-slot variable read
    pub fn add_load_slot(&mut self) -> FeedbackSlot {
        self.add_slot(FeedbackSlotKind::Load)
    }

    /// Keyed property load
    pub fn add_keyed_load_slot(&mut self) -> FeedbackSlot {
        self.add_slot(FeedbackSlotKind::LoadKeyed)
    }

    /// Global store
    pub fn add_store_global_slot(&mut self, language_mode: LanguageMode) -> FeedbackSlot {
        self.add_slot(match language_mode {
            LanguageMode::Sloppy => FeedbackSlotKind::StoreGlobalSloppy,
            LanguageMode::Strict => FeedbackSlotKind::StoreGlobalStrict,
        })
    }

    /// Named property store
    pub fn add_store_slot(&mut self, language_mode: LanguageMode) -> FeedbackSlot {
        self.add_slot(match language_mode {
            LanguageMode::Sloppy => FeedbackSlotKind::StoreNamedSloppy,
            LanguageMode::Strict => FeedbackSlotKind::StoreNamedStrict,
        })
    }

    /// Own property define on a fresh literal
    pub fn add_store_own_slot(&mut self) -> FeedbackSlot {
        self.add_slot(FeedbackSlotKind::StoreOwnNamed)
    }

    /// Keyed property store
    pub fn add_keyed_store_slot(&mut self, language_mode: LanguageMode) -> FeedbackSlot {
        self.add_slot(match language_mode {
            LanguageMode::Sloppy => FeedbackSlotKind::StoreKeyedSloppy,
            LanguageMode::Strict => FeedbackSlotKind::StoreKeyedStrict,
        })
    }

    /// Call or construct
    pub fn add_call_slot(&mut self) -> FeedbackSlot {
        self.add_slot(FeedbackSlotKind::Call)
    }

    /// Binary operation
    pub fn add_binary_op_slot(&mut self) -> FeedbackSlot {
        self.add_slot(FeedbackSlotKind::BinaryOp)
    }

    /// Comparison
    pub fn add_compare_slot(&mut self) -> FeedbackSlot {
        self.add_slot(FeedbackSlotKind::CompareOp)
    }

    /// for-in state
    pub fn add_for_in_slot(&mut self) -> FeedbackSlot {
        self.add_slot(FeedbackSlotKind::ForIn)
    }

    /// Runtime data property define on a literal
    pub fn add_store_data_property_in_literal_slot(&mut self) -> FeedbackSlot {
        self.add_slot(FeedbackSlotKind::StoreDataPropertyInLiteral)
    }

    /// Number of slots, i.e. the runtime vector length
    pub fn slot_count(&self) -> usize {
        self.kinds.len()
    }

    /// No slots
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Kind of `slot`, if it exists
    pub fn kind(&self, slot: FeedbackSlot) -> Option<FeedbackSlotKind> {
        self.kinds.get(slot.0 as usize).copied()
    }

    /// Kinds in slot order
    pub fn kinds(&self) -> &[FeedbackSlotKind] {
        &self.kinds
    }

    /// Slots with their kinds, in order
    pub fn iter(&self) -> impl Iterator<Item = (FeedbackSlot, FeedbackSlotKind)> + '_ {
        self.kinds
            .iter()
            .enumerate()
            .map(|(index, kind)| (FeedbackSlot(index as u32), *kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_are_positional() {
        let mut spec = FeedbackVectorSpec::new();
        let call = spec.add_call_slot();
        let store = spec.add_store_slot(LanguageMode::Strict);
        let global = spec.add_load_global_slot(TypeofMode::Inside);

        assert_eq!(call.index(), 0);
        assert_eq!(store.index(), 1);
        assert_eq!(global.index(), 2);
        assert_eq!(spec.slot_count(), 3);
        assert_eq!(spec.kind(store), Some(FeedbackSlotKind::StoreNamedStrict));
        assert_eq!(spec.kind(FeedbackSlot::new(9)), None);
        assert!(FeedbackSlotKind::StoreNamedStrict.is_store());
        assert!(spec.kind(global).map_or(false, FeedbackSlotKind::is_load_global));
    }

    #[test]
    fn test_language_mode_selects_store_kind() {
        let mut spec = FeedbackVectorSpec::new();
        spec.add_keyed_store_slot(LanguageMode::Sloppy);
        spec.add_store_global_slot(LanguageMode::Strict);
        assert_eq!(
            spec.kinds(),
            &[FeedbackSlotKind::StoreKeyedSloppy, FeedbackSlotKind::StoreGlobalStrict]
        );
    }
}
