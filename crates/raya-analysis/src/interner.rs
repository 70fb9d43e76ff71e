//! Thread-safe string interning
//!
//! Names and string literals are stored once and referred to by small
//! integer symbols, so string equality is symbol equality. Function units
//! may be prepared on separate worker threads that all intern into one
//! table, so the tables sit behind a read-write lock.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::num::NonZeroU32;
use std::sync::Arc;

/// An interned string symbol (32-bit index).
///
/// Symbols are small (4 bytes) and can be copied cheaply.
/// Use `Interner::resolve()` to get the actual string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(NonZeroU32);

impl Symbol {
    #[inline]
    fn from_index(index: usize) -> Self {
        Symbol(NonZeroU32::MIN.saturating_add(index as u32))
    }

    #[inline]
    fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

#[derive(Default)]
struct Tables {
    map: FxHashMap<Arc<str>, Symbol>,
    strings: Vec<Arc<str>>,
}

/// Deduplicating string table, safe for concurrent lookup and insert
#[derive(Default)]
pub struct Interner {
    tables: RwLock<Tables>,
}

impl Interner {
    /// Create a new empty interner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning its symbol.
    ///
    /// Lookups only take the read lock; the write lock is taken when the
    /// string is new.
    pub fn intern(&self, s: &str) -> Symbol {
        if let Some(&sym) = self.tables.read().map.get(s) {
            return sym;
        }

        let mut tables = self.tables.write();
        // Another thread may have inserted it between the two locks
        if let Some(&sym) = tables.map.get(s) {
            return sym;
        }
        let sym = Symbol::from_index(tables.strings.len());
        let shared: Arc<str> = Arc::from(s);
        tables.strings.push(shared.clone());
        tables.map.insert(shared, sym);
        sym
    }

    /// Look up a string without interning it
    pub fn get(&self, s: &str) -> Option<Symbol> {
        self.tables.read().map.get(s).copied()
    }

    /// Resolve a symbol back to its string.
    ///
    /// # Panics
    ///
    /// Panics if the symbol is invalid (not from this interner).
    pub fn resolve(&self, sym: Symbol) -> Arc<str> {
        self.tables.read().strings[sym.index()].clone()
    }

    /// Get the number of interned strings.
    pub fn len(&self) -> usize {
        self.tables.read().strings.len()
    }

    /// Check if the interner is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Interner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interner").field("len", &self.len()).finish()
    }
}
