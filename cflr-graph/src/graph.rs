//! The graph type and its text loader.

use std::collections::BTreeMap;
use std::fmt;

use cflr_matrix::BoolMatrix;
use cflr_symbol::{Symbol, SymbolSource};

/// A directed graph with labeled edges, decomposed by label: for every
/// label t, a boolean matrix with a 1 at (u, v) iff the graph has an
/// edge u -t-> v.
#[derive(Debug)]
pub struct LabelGraph {
    node_count: usize,
    matrices: BTreeMap<Symbol, BoolMatrix>,
}

#[derive(Debug)]
pub enum GraphError {
    Malformed { line: usize, reason: String },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GraphError::Malformed { line, reason } => {
                write!(f, "malformed graph line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for GraphError {}

impl LabelGraph {
    /// Creates a graph with no edges.
    pub fn new(node_count: usize) -> Self {
        LabelGraph {
            node_count,
            matrices: BTreeMap::new(),
        }
    }

    /// Builds a graph from an edge list. The node count is one past the
    /// highest vertex mentioned.
    pub fn from_edges(edges: &[(u32, u32, &str)], syms: &SymbolSource) -> Self {
        let node_count = edges
            .iter()
            .map(|&(src, dst, _)| src.max(dst) as usize + 1)
            .max()
            .unwrap_or(0);
        let mut coords: BTreeMap<Symbol, Vec<(u32, u32)>> = BTreeMap::new();
        for &(src, dst, label) in edges {
            coords.entry(syms.intern(label)).or_default().push((src, dst));
        }
        let matrices = coords
            .into_iter()
            .map(|(label, pairs)| (label, BoolMatrix::from_pairs(node_count, &pairs)))
            .collect();
        LabelGraph {
            node_count,
            matrices,
        }
    }

    /// Parses graph text: one edge per line as `src dst label`, with
    /// blank lines and `#` comments ignored.
    pub fn load_str(text: &str, syms: &SymbolSource) -> Result<LabelGraph, GraphError> {
        let mut edges: Vec<(u32, u32, &str)> = vec![];
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            let &[src, dst, label] = fields.as_slice() else {
                return Err(GraphError::Malformed {
                    line: index + 1,
                    reason: format!("expected `src dst label`, got {} fields", fields.len()),
                });
            };
            let parse_vertex = |field: &str| {
                field.parse::<u32>().map_err(|_| GraphError::Malformed {
                    line: index + 1,
                    reason: format!("vertex `{}` is not an unsigned integer", field),
                })
            };
            edges.push((parse_vertex(src)?, parse_vertex(dst)?, label));
        }
        Ok(Self::from_edges(&edges, syms))
    }

    /// The number of vertices, one past the highest vertex mentioned.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// The adjacency matrix for a label, if any edge carries it.
    pub fn get(&self, label: Symbol) -> Option<&BoolMatrix> {
        self.matrices.get(&label)
    }

    pub fn is_nonempty(&self, label: Symbol) -> bool {
        self.matrices.get(&label).is_some_and(|m| m.nnz() > 0)
    }

    /// Labels that appear on at least one edge.
    pub fn labels(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.matrices.keys().copied()
    }

    /// The number of distinct labels.
    pub fn label_count(&self) -> usize {
        self.matrices.len()
    }
}
