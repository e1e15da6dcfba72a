//! Basic representation of grammars in extended Chomsky normal form.

use cflr_symbol::Symbol;

/// A unit rule `A -> B`. The right-hand side may be a terminal or a
/// nonterminal; classification tells them apart.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UnitRule {
    pub lhs: Symbol,
    pub rhs: Symbol,
}

/// A two-symbol rule `A -> X Y`, before classification.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BinaryRule {
    pub lhs: Symbol,
    pub rhs0: Symbol,
    pub rhs1: Symbol,
}

/// A grammar in extended Chomsky normal form: epsilon rules `A -> ()`,
/// unit rules `A -> B`, and two-symbol rules `A -> X Y` where X and Y
/// may each be a terminal or a nonterminal.
#[derive(Clone, Debug)]
pub struct CnfGrammar {
    start: Symbol,
    epsilon_rules: Vec<Symbol>,
    unit_rules: Vec<UnitRule>,
    binary_rules: Vec<BinaryRule>,
}

impl CnfGrammar {
    /// Creates a grammar with no rules.
    pub fn new(start: Symbol) -> Self {
        CnfGrammar {
            start,
            epsilon_rules: vec![],
            unit_rules: vec![],
            binary_rules: vec![],
        }
    }

    pub fn start(&self) -> Symbol {
        self.start
    }

    /// Adds an epsilon rule `lhs -> ()`.
    pub fn epsilon_rule(&mut self, lhs: Symbol) -> &mut Self {
        self.epsilon_rules.push(lhs);
        self
    }

    /// Adds a unit rule `lhs -> rhs`.
    pub fn unit_rule(&mut self, lhs: Symbol, rhs: Symbol) -> &mut Self {
        self.unit_rules.push(UnitRule { lhs, rhs });
        self
    }

    /// Adds a two-symbol rule `lhs -> rhs0 rhs1`.
    pub fn binary_rule(&mut self, lhs: Symbol, rhs0: Symbol, rhs1: Symbol) -> &mut Self {
        self.binary_rules.push(BinaryRule { lhs, rhs0, rhs1 });
        self
    }

    pub fn epsilon_rules(&self) -> &[Symbol] {
        &self.epsilon_rules
    }

    pub fn unit_rules(&self) -> &[UnitRule] {
        &self.unit_rules
    }

    pub fn binary_rules(&self) -> &[BinaryRule] {
        &self.binary_rules
    }
}
