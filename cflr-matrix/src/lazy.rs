//! Lazy summation of matrix contributions.
//!
//! Instead of one matrix per label we keep a bag of component matrices
//! whose OR is the logical value. Additions then cost only a push; the
//! expensive concrete ORs happen when two components grow close enough
//! in population count that merging them is worth it.
//!
//! Invariant: no two entries i != j satisfy
//! `threshold * min(nnz_i, nnz_j) >= max(nnz_i, nnz_j)` -- in an
//! nnz-sorted view, adjacent entries differ by a factor exceeding the
//! threshold. The threshold is `b = n^c` with `c` in (0, 1].

use std::collections::BTreeMap;

use cflr_symbol::Symbol;

use crate::{BoolMatrix, MatrixMap};

/// One label's bag of component matrices.
#[derive(Debug)]
pub struct LazyMatrixSet {
    size: usize,
    threshold: f64,
    entries: Vec<BoolMatrix>,
    merges: usize,
}

impl LazyMatrixSet {
    /// Creates a bag with an explicit merge threshold.
    pub fn new(size: usize, threshold: f64) -> Self {
        LazyMatrixSet {
            size,
            threshold,
            entries: vec![],
            merges: 0,
        }
    }

    /// Creates a bag with threshold `n^c`.
    pub fn with_exponent(size: usize, c: f64) -> Self {
        Self::new(size, (size.max(1) as f64).powf(c))
    }

    /// Creates a bag that merges on every add, i.e. plain eager
    /// OR-in-place accumulation behind the same interface.
    pub fn eager(size: usize) -> Self {
        Self::new(size, f64::INFINITY)
    }

    /// Adds a component. Empty matrices are dropped without insertion.
    /// Returns whether the component was kept.
    pub fn add(&mut self, matrix: BoolMatrix) -> bool {
        if matrix.is_empty() {
            return false;
        }
        debug_assert_eq!(matrix.size(), self.size, "size mismatch");
        self.entries.push(matrix);
        self.restore_invariant();
        true
    }

    /// Merges entries until no pair violates the invariant, then sorts
    /// by population count. Terminates because each merge removes one
    /// entry.
    fn restore_invariant(&mut self) {
        loop {
            let mut merged = false;
            'search: for i in 0..self.entries.len() {
                for j in (i + 1)..self.entries.len() {
                    let lo = self.entries[i].nnz().min(self.entries[j].nnz());
                    let hi = self.entries[i].nnz().max(self.entries[j].nnz());
                    if self.threshold * lo as f64 >= hi as f64 {
                        // j > i, so removing j first keeps i valid.
                        let right = self.entries.swap_remove(j);
                        let mut left = self.entries.swap_remove(i);
                        left.or_with(&right);
                        self.entries.push(left);
                        self.merges += 1;
                        merged = true;
                        break 'search;
                    }
                }
            }
            if !merged {
                break;
            }
        }
        self.entries.sort_by_key(BoolMatrix::nnz);
    }

    /// Returns a fresh matrix equal to the OR of all components. The bag
    /// itself stays intact.
    pub fn materialize(&self) -> BoolMatrix {
        match self.entries.split_first() {
            None => BoolMatrix::new(self.size),
            Some((first, rest)) => {
                let mut result = first.duplicate();
                for matrix in rest {
                    result.or_with(matrix);
                }
                result
            }
        }
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Population counts of the components, in sorted order.
    pub fn entry_sizes(&self) -> Vec<usize> {
        self.entries.iter().map(BoolMatrix::nnz).collect()
    }

    /// Concrete merges performed while restoring the invariant.
    pub fn merge_count(&self) -> usize {
        self.merges
    }
}

/// Per-label bags, the frontier-accumulator shape of [`MatrixMap`] with
/// lazy addition.
#[derive(Debug)]
pub struct LazyMatrixMap {
    size: usize,
    threshold: f64,
    sets: BTreeMap<Symbol, LazyMatrixSet>,
}

impl LazyMatrixMap {
    pub fn new(size: usize, threshold: f64) -> Self {
        LazyMatrixMap {
            size,
            threshold,
            sets: BTreeMap::new(),
        }
    }

    pub fn with_exponent(size: usize, c: f64) -> Self {
        Self::new(size, (size.max(1) as f64).powf(c))
    }

    pub fn eager(size: usize) -> Self {
        Self::new(size, f64::INFINITY)
    }

    /// Adds a component matrix under a label, by move. Returns whether
    /// the component was kept (empty ones are dropped).
    pub fn add(&mut self, label: Symbol, matrix: BoolMatrix) -> bool {
        if matrix.is_empty() {
            return false;
        }
        let size = self.size;
        let threshold = self.threshold;
        self.sets
            .entry(label)
            .or_insert_with(|| LazyMatrixSet::new(size, threshold))
            .add(matrix)
    }

    pub fn get(&self, label: Symbol) -> Option<&LazyMatrixSet> {
        self.sets.get(&label)
    }

    /// Total components across all labels.
    pub fn entry_count(&self) -> usize {
        self.sets.values().map(LazyMatrixSet::entry_count).sum()
    }

    /// Labels holding at least one component.
    pub fn label_count(&self) -> usize {
        self.sets
            .values()
            .filter(|set| set.entry_count() > 0)
            .count()
    }

    /// Concrete merges performed across all labels.
    pub fn merge_count(&self) -> usize {
        self.sets.values().map(LazyMatrixSet::merge_count).sum()
    }

    /// Materializes every label into a fresh map.
    pub fn into_map(self) -> MatrixMap {
        let mut result = MatrixMap::new(self.size);
        for (label, set) in &self.sets {
            if set.entry_count() > 0 {
                result.insert(*label, set.materialize());
            }
        }
        result
    }
}
