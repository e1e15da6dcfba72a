//! Definitions for our symbol type.
//!
//! A symbol can be thought of as simply an integer, which only works
//! for the `SymbolSource` where it was grabbed from. Best to be careful
//! not to mix symbols between different sources.

use std::num::NonZeroU32;

/// Our common label symbol type.
///
/// Stored with a +1 offset so that `Option<Symbol>` stays word-sized.
#[derive(Clone, Copy, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub struct Symbol {
    n: NonZeroU32,
}

impl Symbol {
    /// Returns the symbol's numeric value.
    pub fn usize(self) -> usize {
        self.n.get() as usize - 1
    }
}

impl From<u32> for Symbol {
    #[inline]
    fn from(id: u32) -> Self {
        debug_assert_ne!(id, u32::MAX, "invalid conversion from a null id");
        Symbol {
            n: NonZeroU32::new(id.wrapping_add(1)).unwrap(),
        }
    }
}

impl From<Symbol> for u32 {
    #[inline]
    fn from(val: Symbol) -> u32 {
        val.n.get() - 1
    }
}

impl From<usize> for Symbol {
    #[inline]
    fn from(id: usize) -> Self {
        Symbol::from(id as u32)
    }
}

impl From<Symbol> for usize {
    #[inline]
    fn from(val: Symbol) -> usize {
        val.usize()
    }
}
