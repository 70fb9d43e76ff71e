//! Conflict resolution for duplicate object literal keys

use crate::ast::{Expression, LiteralProperty, ObjectLiteral, ObjectPropertyKind};
use crate::interner::Symbol;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

/// Key identity: same interned string, or bit-identical number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum LiteralKey {
    String(Symbol),
    Number(u64),
}

impl LiteralKey {
    fn of(key: &Expression) -> Option<Self> {
        let value = &key.as_literal()?.value;
        if let Some(name) = value.as_string() {
            return Some(LiteralKey::String(name));
        }
        value.as_number().map(|n| LiteralKey::Number(n.to_bits()))
    }
}

fn is_accessor_pair(a: ObjectPropertyKind, b: ObjectPropertyKind) -> bool {
    matches!(
        (a, b),
        (ObjectPropertyKind::Getter, ObjectPropertyKind::Setter)
            | (ObjectPropertyKind::Setter, ObjectPropertyKind::Getter)
    )
}

impl ObjectLiteral {
    /// Demote stores that a lexically later property with the same key
    /// shadows at construction time.
    ///
    /// Only the static prefix takes part. Each property is checked against
    /// the next later property with its key; a getter followed by a setter
    /// (or the reverse) both install.
    pub fn calculate_emit_store(&mut self) {
        if self.emit_store_calculated {
            return;
        }
        self.emit_store_calculated = true;

        let properties = self.properties_mut();
        let prefix = properties
            .iter()
            .position(|property| property.is_computed_name())
            .unwrap_or(properties.len());

        // Each key maps to the kind of its nearest later occurrence
        let mut table: FxHashMap<LiteralKey, ObjectPropertyKind> = FxHashMap::default();
        for property in properties[..prefix].iter_mut().rev() {
            if property.is_prototype() {
                continue;
            }
            let Some(key) = LiteralKey::of(&property.key) else {
                continue;
            };
            match table.entry(key) {
                Entry::Vacant(entry) => {
                    entry.insert(property.kind());
                }
                Entry::Occupied(mut entry) => {
                    if !is_accessor_pair(property.kind(), *entry.get()) {
                        property.suppress_store();
                    }
                    entry.insert(property.kind());
                }
            }
        }
    }
}
