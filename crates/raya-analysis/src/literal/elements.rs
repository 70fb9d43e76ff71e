//! Elements kinds: the representation of an array's backing store

use serde::{Deserialize, Serialize};
use std::fmt;

/// Backing store representation, ordered by generality.
///
/// Small integers generalize to doubles, which generalize to tagged values.
/// Each kind has a holey twin that admits missing elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementsKind {
    /// Small integers only
    PackedSmi,
    /// Small integers with holes
    HoleySmi,
    /// Unboxed doubles
    PackedDouble,
    /// Unboxed doubles with holes
    HoleyDouble,
    /// Any tagged value
    Packed,
    /// Any tagged value with holes
    Holey,
}

impl ElementsKind {
    /// Most specific kind: the starting point of inference
    pub const FIRST: ElementsKind = ElementsKind::PackedSmi;

    fn rank(self) -> u8 {
        match self {
            ElementsKind::PackedSmi | ElementsKind::HoleySmi => 0,
            ElementsKind::PackedDouble | ElementsKind::HoleyDouble => 1,
            ElementsKind::Packed | ElementsKind::Holey => 2,
        }
    }

    /// Admits missing elements
    pub fn is_holey(self) -> bool {
        matches!(
            self,
            ElementsKind::HoleySmi | ElementsKind::HoleyDouble | ElementsKind::Holey
        )
    }

    /// Unboxed double storage
    pub fn is_double(self) -> bool {
        self.rank() == 1
    }

    /// Tagged storage
    pub fn is_smi_or_object(self) -> bool {
        !self.is_double()
    }

    /// Holey twin of this kind
    pub fn to_holey(self) -> ElementsKind {
        match self {
            ElementsKind::PackedSmi | ElementsKind::HoleySmi => ElementsKind::HoleySmi,
            ElementsKind::PackedDouble | ElementsKind::HoleyDouble => ElementsKind::HoleyDouble,
            ElementsKind::Packed | ElementsKind::Holey => ElementsKind::Holey,
        }
    }

    /// Least kind that can hold values of both kinds
    pub fn more_general(self, other: ElementsKind) -> ElementsKind {
        let general = if other.rank() > self.rank() { other } else { self };
        if self.is_holey() || other.is_holey() {
            general.to_holey()
        } else {
            general
        }
    }
}

impl fmt::Display for ElementsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementsKind::PackedSmi => "PACKED_SMI_ELEMENTS",
            ElementsKind::HoleySmi => "HOLEY_SMI_ELEMENTS",
            ElementsKind::PackedDouble => "PACKED_DOUBLE_ELEMENTS",
            ElementsKind::HoleyDouble => "HOLEY_DOUBLE_ELEMENTS",
            ElementsKind::Packed => "PACKED_ELEMENTS",
            ElementsKind::Holey => "HOLEY_ELEMENTS",
        };
        f.write_str(name)
    }
}
