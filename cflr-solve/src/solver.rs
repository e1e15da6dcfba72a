//! The fixed-point driver.
//!
//! The engine keeps two relations per nonterminal: the accumulator M of
//! everything derived so far, and the frontier delta of pairs first
//! seen in the previous round. Each round multiplies only against the
//! frontier, collects the products in a lazy bag, absorbs the old
//! frontier into M, and keeps as the new frontier exactly the produced
//! pairs not already in M. An empty frontier is the convergence
//! witness.

use std::time::Instant;

use log::{debug, info, warn};

use cflr_grammar::{ClassifiedRules, CnfGrammar};
use cflr_graph::LabelGraph;
use cflr_matrix::{BoolMatrix, LazyMatrixMap, MatrixMap};
use cflr_symbol::Symbol;

use crate::{OptFlags, SolveConfig, SolveStats};

/// One reachability computation over a grammar and a graph.
pub struct Solver<'a> {
    grammar: &'a CnfGrammar,
    graph: &'a LabelGraph,
    rules: ClassifiedRules,
    node_count: usize,
    flags: OptFlags,
    config: SolveConfig,
    stats: SolveStats,
    empty: BoolMatrix,
}

impl<'a> Solver<'a> {
    pub fn new(grammar: &'a CnfGrammar, graph: &'a LabelGraph, config: SolveConfig) -> Self {
        let node_count = graph.node_count();
        Solver {
            rules: grammar.classify(),
            flags: config.variant.flags(node_count),
            empty: BoolMatrix::new(node_count),
            stats: SolveStats::default(),
            node_count,
            grammar,
            graph,
            config,
        }
    }

    /// Runs to convergence and returns the start nonterminal's relation,
    /// owned by the caller. If the start nonterminal derived nothing the
    /// result is the empty n-by-n matrix.
    pub fn solve(&mut self) -> BoolMatrix {
        let started = Instant::now();
        let mut stats = SolveStats::default();
        info!(
            "solving: {} nodes, {} labels, variant {}",
            self.node_count,
            self.graph.label_count(),
            self.config.variant
        );

        let mut delta = self.init_frontier(&mut stats);
        let mut m = MatrixMap::new(self.node_count);
        debug!("initial frontier: {} pairs", delta.total_nnz());

        loop {
            if delta.is_empty() {
                break;
            }
            if stats.iterations >= self.config.max_iterations {
                warn!(
                    "no convergence after {} iterations, returning current accumulator",
                    stats.iterations
                );
                stats.hit_iteration_limit = true;
                break;
            }
            stats.iterations += 1;

            let mut bag = self.new_bag();

            // The three cases are independent, never mutually exclusive.
            // A label in both M and delta (e.g. S with a rule S -> S S)
            // must produce all applicable products; the subtraction below
            // is what keeps the frontier shrinking regardless.
            for rule in &self.rules.cnf {
                if delta.is_nonempty(rule.rhs0) && delta.is_nonempty(rule.rhs1) {
                    emit(
                        self.flags,
                        &mut stats,
                        &mut bag,
                        rule.lhs,
                        operand(&delta, &self.empty, rule.rhs0),
                        operand(&delta, &self.empty, rule.rhs1),
                    );
                }
                if m.is_nonempty(rule.rhs0) && delta.is_nonempty(rule.rhs1) {
                    emit(
                        self.flags,
                        &mut stats,
                        &mut bag,
                        rule.lhs,
                        operand(&m, &self.empty, rule.rhs0),
                        operand(&delta, &self.empty, rule.rhs1),
                    );
                }
                if delta.is_nonempty(rule.rhs0) && m.is_nonempty(rule.rhs1) {
                    emit(
                        self.flags,
                        &mut stats,
                        &mut bag,
                        rule.lhs,
                        operand(&delta, &self.empty, rule.rhs0),
                        operand(&m, &self.empty, rule.rhs1),
                    );
                }
            }

            for rule in &self.rules.extended_left {
                let graph_matrix = graph_operand(self.graph, &self.empty, rule.rhs1);
                emit(
                    self.flags,
                    &mut stats,
                    &mut bag,
                    rule.lhs,
                    operand(&delta, &self.empty, rule.rhs0),
                    graph_matrix,
                );
                emit(
                    self.flags,
                    &mut stats,
                    &mut bag,
                    rule.lhs,
                    operand(&m, &self.empty, rule.rhs0),
                    graph_matrix,
                );
            }

            // Both the frontier and the accumulator case apply here too.
            for rule in &self.rules.extended_right {
                let graph_matrix = graph_operand(self.graph, &self.empty, rule.rhs0);
                emit(
                    self.flags,
                    &mut stats,
                    &mut bag,
                    rule.lhs,
                    graph_matrix,
                    operand(&delta, &self.empty, rule.rhs1),
                );
                emit(
                    self.flags,
                    &mut stats,
                    &mut bag,
                    rule.lhs,
                    graph_matrix,
                    operand(&m, &self.empty, rule.rhs1),
                );
            }

            // Unit rules replay the frontier only; the accumulator side
            // was already copied in earlier rounds.
            for rule in self.grammar.unit_rules() {
                if !self.rules.nonterminals.contains(rule.rhs) {
                    continue;
                }
                let source = match delta.get(rule.rhs) {
                    Some(matrix) if !matrix.is_empty() => matrix.duplicate(),
                    _ => continue,
                };
                if bag.add(rule.lhs, source) && self.flags.lazy_add {
                    stats.lazy_additions += 1;
                }
            }

            // Absorb the old frontier, then keep only truly-new pairs.
            m.union_with(&delta);
            stats.concrete_additions += bag.merge_count();
            stats.concrete_additions += bag.entry_count() - bag.label_count();
            let produced = bag.into_map();
            delta = produced.difference(&m);

            debug!(
                "iteration {}: |delta| = {}, |M| = {}",
                stats.iterations,
                delta.total_nnz(),
                m.total_nnz()
            );
        }

        stats.elapsed = started.elapsed();
        info!(
            "converged after {} iterations, {} multiplications",
            stats.iterations, stats.multiplications
        );

        let result = match m.get(self.grammar.start()) {
            Some(matrix) => matrix.duplicate(),
            None => BoolMatrix::new(self.node_count),
        };
        self.stats = stats;
        result
    }

    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    /// Fires the non-recursive productions once, before the loop:
    /// epsilon rules contribute the identity, unit rules copy graph
    /// matrices (or an already-populated frontier entry), and
    /// double-terminal rules contribute one graph-graph product each.
    fn init_frontier(&self, stats: &mut SolveStats) -> MatrixMap {
        let mut delta = MatrixMap::new(self.node_count);

        if !self.grammar.epsilon_rules().is_empty() {
            let identity = BoolMatrix::identity(self.node_count);
            for &lhs in self.grammar.epsilon_rules() {
                delta.get_or_create(lhs).or_with(&identity);
            }
        }

        for rule in self.grammar.unit_rules() {
            if self.rules.nonterminals.contains(rule.rhs) {
                let source = match delta.get(rule.rhs) {
                    Some(matrix) if !matrix.is_empty() => matrix.duplicate(),
                    _ => continue,
                };
                delta.get_or_create(rule.lhs).or_with(&source);
            } else if let Some(graph_matrix) = self.graph.get(rule.rhs) {
                if !graph_matrix.is_empty() {
                    delta.get_or_create(rule.lhs).or_with(graph_matrix);
                }
            }
        }

        for rule in &self.rules.double_terminal {
            let left = graph_operand(self.graph, &self.empty, rule.rhs0);
            let right = graph_operand(self.graph, &self.empty, rule.rhs1);
            if self.flags.trivial_ops && (left.is_empty() || right.is_empty()) {
                stats.skipped_multiplications += 1;
                continue;
            }
            let product = left.matmul(right);
            stats.multiplications += 1;
            if !product.is_empty() {
                delta.get_or_create(rule.lhs).or_with(&product);
            }
        }

        delta
    }

    fn new_bag(&self) -> LazyMatrixMap {
        if self.flags.lazy_add {
            LazyMatrixMap::with_exponent(self.node_count, self.config.lazy_exponent)
        } else {
            LazyMatrixMap::eager(self.node_count)
        }
    }
}

/// Computes one product and feeds it to the bag. With trivial-op
/// elision on, a multiplication with an empty operand is skipped
/// outright; either way an empty product is dropped.
fn emit(
    flags: OptFlags,
    stats: &mut SolveStats,
    bag: &mut LazyMatrixMap,
    lhs: Symbol,
    left: &BoolMatrix,
    right: &BoolMatrix,
) {
    if flags.trivial_ops && (left.is_empty() || right.is_empty()) {
        stats.skipped_multiplications += 1;
        return;
    }
    let product = left.matmul(right);
    stats.multiplications += 1;
    if product.is_empty() {
        return;
    }
    if bag.add(lhs, product) && flags.lazy_add {
        stats.lazy_additions += 1;
    }
}

/// A map operand, with absent labels standing in as the empty matrix.
fn operand<'m>(map: &'m MatrixMap, empty: &'m BoolMatrix, label: Symbol) -> &'m BoolMatrix {
    map.get(label).unwrap_or(empty)
}

fn graph_operand<'m>(
    graph: &'m LabelGraph,
    empty: &'m BoolMatrix,
    label: Symbol,
) -> &'m BoolMatrix {
    graph.get(label).unwrap_or(empty)
}
