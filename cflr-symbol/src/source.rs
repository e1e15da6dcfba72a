//! A source of symbols interning label text.

use elsa::FrozenIndexSet;

use crate::Symbol;

/// Maps label text to symbols with stable indices. Interning goes
/// through a shared reference, so loaders for several inputs can feed
/// one source without threading `&mut` through them.
pub struct SymbolSource {
    set: FrozenIndexSet<String>,
}

impl SymbolSource {
    /// Creates a source with an empty symbol space.
    pub fn new() -> Self {
        SymbolSource {
            set: FrozenIndexSet::new(),
        }
    }

    /// Returns the symbol for a label, allocating one on first sight.
    pub fn intern(&self, label: &str) -> Symbol {
        self.set.insert_full(label.to_string()).0.into()
    }

    /// Returns the symbol for a label if it was interned before.
    pub fn get(&self, label: &str) -> Option<Symbol> {
        self.set.get_full(label).map(|(id, _)| id.into())
    }

    /// Returns the label a symbol was interned from.
    pub fn name_of(&self, sym: Symbol) -> Option<&str> {
        self.set.get_index(sym.usize())
    }
}

impl Default for SymbolSource {
    fn default() -> Self {
        Self::new()
    }
}
