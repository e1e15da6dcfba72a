#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use cflr_grammar::{CnfGrammar, RawGrammar};
use cflr_graph::LabelGraph;
use cflr_solve::{SolveConfig, SolveStats, Solver, Variant};
use cflr_symbol::{Symbol, SymbolSource};

pub const ALL_VARIANTS: [Variant; 5] = [
    Variant::Incremental,
    Variant::TrivialOpt,
    Variant::LazyAdd,
    Variant::Full,
    Variant::Auto,
];

/// Loads both inputs, expands grammar templates if needed, solves, and
/// returns the start relation as a sorted coordinate list.
pub fn solve_pairs(grammar_text: &str, graph_text: &str, config: SolveConfig) -> Vec<(u32, u32)> {
    solve_with_stats(grammar_text, graph_text, config).0
}

pub fn solve_with_stats(
    grammar_text: &str,
    graph_text: &str,
    config: SolveConfig,
) -> (Vec<(u32, u32)>, SolveStats) {
    let syms = SymbolSource::new();
    let graph = LabelGraph::load_str(graph_text, &syms).expect("graph parses");
    let raw = RawGrammar::load_str(grammar_text).expect("grammar parses");
    let raw = raw.expand_for_labels(graph.labels().filter_map(|label| syms.name_of(label)));
    let grammar = raw.intern(&syms);

    let mut solver = Solver::new(&grammar, &graph, config);
    let mut pairs = solver.solve().pairs();
    pairs.sort_unstable();
    (pairs, solver.stats().clone())
}

pub fn solve_variant(grammar_text: &str, graph_text: &str, variant: Variant) -> Vec<(u32, u32)> {
    solve_pairs(grammar_text, graph_text, SolveConfig::with_variant(variant))
}

/// Asserts that every variant produces exactly the expected relation.
pub fn assert_all_variants(grammar_text: &str, graph_text: &str, expected: &[(u32, u32)]) {
    for variant in ALL_VARIANTS {
        let pairs = solve_variant(grammar_text, graph_text, variant);
        assert_eq!(
            pairs, expected,
            "variant {} disagrees with the expected relation",
            variant
        );
    }
}

/// An independent set-based closure over derivation triples, used as a
/// reference against the matrix engine on small inputs.
pub fn oracle_pairs(grammar_text: &str, graph_text: &str) -> Vec<(u32, u32)> {
    let syms = SymbolSource::new();
    let graph = LabelGraph::load_str(graph_text, &syms).expect("graph parses");
    let raw = RawGrammar::load_str(grammar_text).expect("grammar parses");
    let raw = raw.expand_for_labels(graph.labels().filter_map(|label| syms.name_of(label)));
    let grammar = raw.intern(&syms);

    let pairs = naive_closure(&grammar, &graph);
    pairs.into_iter().collect()
}

fn naive_closure(grammar: &CnfGrammar, graph: &LabelGraph) -> BTreeSet<(u32, u32)> {
    let rules = grammar.classify();
    let node_count = graph.node_count() as u32;
    let graph_pairs = |label: Symbol| -> BTreeSet<(u32, u32)> {
        graph
            .get(label)
            .map(|matrix| matrix.pairs().into_iter().collect())
            .unwrap_or_default()
    };

    let mut rel: BTreeMap<Symbol, BTreeSet<(u32, u32)>> = BTreeMap::new();
    for &lhs in grammar.epsilon_rules() {
        rel.entry(lhs)
            .or_default()
            .extend((0..node_count).map(|i| (i, i)));
    }

    loop {
        let mut changed = false;

        for rule in grammar.unit_rules() {
            let addition = if rules.nonterminals.contains(rule.rhs) {
                rel.get(&rule.rhs).cloned().unwrap_or_default()
            } else {
                graph_pairs(rule.rhs)
            };
            let target = rel.entry(rule.lhs).or_default();
            for pair in addition {
                changed |= target.insert(pair);
            }
        }

        for rule in grammar.binary_rules() {
            let relation_of = |label: Symbol| {
                if rules.nonterminals.contains(label) {
                    rel.get(&label).cloned().unwrap_or_default()
                } else {
                    graph_pairs(label)
                }
            };
            let left = relation_of(rule.rhs0);
            let right = relation_of(rule.rhs1);
            let mut composed = vec![];
            for &(u, mid_left) in &left {
                for &(mid_right, v) in &right {
                    if mid_left == mid_right {
                        composed.push((u, v));
                    }
                }
            }
            let target = rel.entry(rule.lhs).or_default();
            for pair in composed {
                changed |= target.insert(pair);
            }
        }

        if !changed {
            break;
        }
    }

    rel.get(&grammar.start()).cloned().unwrap_or_default()
}
