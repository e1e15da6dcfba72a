//! Grammars in the extended Chomsky normal form consumed by the
//! reachability engine, with the text-format loader, rule
//! classification, and `_i`-template expansion.

#![deny(unsafe_code)]

pub mod classify;
pub mod grammar;
pub mod load;
pub mod symbol_set;
pub mod template;

pub use crate::classify::ClassifiedRules;
pub use crate::grammar::{BinaryRule, CnfGrammar, UnitRule};
pub use crate::load::{GrammarError, RawGrammar};
pub use crate::symbol_set::SymbolBitSet;
