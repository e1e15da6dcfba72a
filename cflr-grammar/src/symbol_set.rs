//! A set of symbols in the form of a bit vector.

use bit_vec::BitVec;
use cflr_symbol::Symbol;

/// A growable bit set over symbol IDs.
#[derive(Clone, Debug, Default)]
pub struct SymbolBitSet {
    bits: BitVec,
}

impl SymbolBitSet {
    /// Constructs an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, sym: Symbol) {
        let index = sym.usize();
        if index >= self.bits.len() {
            self.bits.grow(index + 1 - self.bits.len(), false);
        }
        self.bits.set(index, true);
    }

    pub fn contains(&self, sym: Symbol) -> bool {
        self.bits.get(sym.usize()).unwrap_or(false)
    }

    /// Iterates over symbols in the set.
    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(id, present)| if present { Some(id.into()) } else { None })
    }
}
