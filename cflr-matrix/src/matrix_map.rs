//! A mapping from label symbols to boolean matrices.

use std::collections::{BTreeMap, HashSet};

use cflr_symbol::Symbol;

use crate::BoolMatrix;

/// Label-keyed matrices. The map owns every matrix it holds; lookups
/// lend out shared references, and inserts take matrices by move.
///
/// Keyed by a `BTreeMap` so iteration order is deterministic.
#[derive(Debug)]
pub struct MatrixMap {
    size: usize,
    entries: BTreeMap<Symbol, BoolMatrix>,
}

impl MatrixMap {
    pub fn new(size: usize) -> Self {
        MatrixMap {
            size,
            entries: BTreeMap::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the matrix for a label, creating an empty one if absent.
    pub fn get_or_create(&mut self, label: Symbol) -> &mut BoolMatrix {
        self.entries
            .entry(label)
            .or_insert_with(|| BoolMatrix::new(self.size))
    }

    pub fn get(&self, label: Symbol) -> Option<&BoolMatrix> {
        self.entries.get(&label)
    }

    /// Whether an entry exists, empty or not.
    pub fn contains(&self, label: Symbol) -> bool {
        self.entries.contains_key(&label)
    }

    /// Whether an entry exists with at least one pair. Callers reasoning
    /// about the reachability relation must use this, not [`contains`].
    ///
    /// [`contains`]: Self::contains
    pub fn is_nonempty(&self, label: Symbol) -> bool {
        self.entries.get(&label).is_some_and(|m| m.nnz() > 0)
    }

    pub fn insert(&mut self, label: Symbol, matrix: BoolMatrix) {
        debug_assert_eq!(matrix.size(), self.size, "size mismatch");
        self.entries.insert(label, matrix);
    }

    /// ORs every matrix of `other` into this map, creating entries as
    /// needed. The donor is only read.
    pub fn union_with(&mut self, other: &MatrixMap) {
        for (&label, matrix) in &other.entries {
            self.get_or_create(label).or_with(matrix);
        }
    }

    /// Returns the per-label set difference `self \ other`. Labels absent
    /// from `other` are copied wholesale. Neither input is modified.
    ///
    /// Implemented on coordinate lists: anything cheaper that does not
    /// match exact set-difference semantics breaks the convergence of the
    /// fixed-point loop built on top of this.
    pub fn difference(&self, other: &MatrixMap) -> MatrixMap {
        let mut result = MatrixMap::new(self.size);
        for (&label, matrix) in &self.entries {
            if matrix.is_empty() {
                continue;
            }
            match other.get(label) {
                Some(rhs) if !rhs.is_empty() => {
                    let removed: HashSet<(u32, u32)> = rhs.pairs().into_iter().collect();
                    let kept: Vec<(u32, u32)> = matrix
                        .pairs()
                        .into_iter()
                        .filter(|pair| !removed.contains(pair))
                        .collect();
                    if !kept.is_empty() {
                        result.insert(label, BoolMatrix::from_pairs(self.size, &kept));
                    }
                }
                _ => {
                    result.insert(label, matrix.duplicate());
                }
            }
        }
        result
    }

    /// Returns a deep copy, every matrix duplicated.
    pub fn duplicate(&self) -> MatrixMap {
        let mut result = MatrixMap::new(self.size);
        for (&label, matrix) in &self.entries {
            result.insert(label, matrix.duplicate());
        }
        result
    }

    /// Structural equality restricted to nonempty matrices: the label
    /// sets of nonempty matrices must match, and matching matrices must
    /// agree entry by entry.
    pub fn eq_nonempty(&self, other: &MatrixMap) -> bool {
        let nonempty = |map: &'_ MatrixMap| {
            map.entries
                .iter()
                .filter(|(_, m)| !m.is_empty())
                .map(|(&label, _)| label)
                .collect::<Vec<_>>()
        };
        if nonempty(self) != nonempty(other) {
            return false;
        }
        self.entries
            .iter()
            .filter(|(_, m)| !m.is_empty())
            .all(|(label, matrix)| other.get(*label) == Some(matrix))
    }

    /// Whether every matrix in the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(BoolMatrix::is_empty)
    }

    /// Total number of pairs over all labels.
    pub fn total_nnz(&self) -> usize {
        self.entries.values().map(BoolMatrix::nnz).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &BoolMatrix)> {
        self.entries.iter().map(|(&label, matrix)| (label, matrix))
    }

    pub fn labels(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.entries.keys().copied()
    }
}
