//! Classification of two-symbol rules into the four shapes the engine
//! multiplies differently.

use crate::{BinaryRule, CnfGrammar, SymbolBitSet};

/// Two-symbol rules split into disjoint buckets by whether each
/// right-hand symbol is a nonterminal.
#[derive(Debug)]
pub struct ClassifiedRules {
    /// Symbols that may derive something: every rule's left-hand side,
    /// plus the start symbol. Pinning the set to exactly this closure is
    /// what makes the four buckets disjoint.
    pub nonterminals: SymbolBitSet,
    /// `A -> B C` with both nonterminal.
    pub cnf: Vec<BinaryRule>,
    /// `A -> B t` with a terminal on the right.
    pub extended_left: Vec<BinaryRule>,
    /// `A -> t B` with a terminal on the left.
    pub extended_right: Vec<BinaryRule>,
    /// `A -> t u`, both terminal.
    pub double_terminal: Vec<BinaryRule>,
}

impl CnfGrammar {
    /// The nonterminal set: the left-hand sides of all rule sets plus
    /// the start symbol.
    pub fn nonterminal_set(&self) -> SymbolBitSet {
        let mut set = SymbolBitSet::new();
        set.set(self.start());
        for &lhs in self.epsilon_rules() {
            set.set(lhs);
        }
        for rule in self.unit_rules() {
            set.set(rule.lhs);
        }
        for rule in self.binary_rules() {
            set.set(rule.lhs);
        }
        set
    }

    /// Places every two-symbol rule into exactly one bucket.
    pub fn classify(&self) -> ClassifiedRules {
        let nonterminals = self.nonterminal_set();
        let mut rules = ClassifiedRules {
            nonterminals,
            cnf: vec![],
            extended_left: vec![],
            extended_right: vec![],
            double_terminal: vec![],
        };
        for &rule in self.binary_rules() {
            let bucket = match (
                rules.nonterminals.contains(rule.rhs0),
                rules.nonterminals.contains(rule.rhs1),
            ) {
                (true, true) => &mut rules.cnf,
                (true, false) => &mut rules.extended_left,
                (false, true) => &mut rules.extended_right,
                (false, false) => &mut rules.double_terminal,
            };
            bucket.push(rule);
        }
        rules
    }
}
