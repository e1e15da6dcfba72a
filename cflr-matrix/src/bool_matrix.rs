//! A square boolean matrix over vertex pairs.
//!
//! Rows are bit vectors, so unions and the inner step of multiplication
//! are block-level ORs, and the population count sums `count_ones` over
//! raw blocks. The count is maintained eagerly: every mutating
//! operation leaves `nnz` correct, so reads are O(1).

use bit_vec::BitVec;

const BLOCK_BITS: usize = u32::BITS as usize;

/// A boolean n-by-n matrix.
///
/// A value type with exactly one owner. Copies are made only through
/// [`BoolMatrix::duplicate`]; there is deliberately no `Clone` impl.
#[derive(Debug)]
pub struct BoolMatrix {
    size: usize,
    rows: Vec<BitVec>,
    nnz: usize,
}

impl BoolMatrix {
    /// Creates an empty matrix, immediately usable.
    pub fn new(size: usize) -> Self {
        BoolMatrix {
            size,
            rows: (0..size).map(|_| BitVec::from_elem(size, false)).collect(),
            nnz: 0,
        }
    }

    /// Creates the identity matrix.
    pub fn identity(size: usize) -> Self {
        let mut result = BoolMatrix::new(size);
        for i in 0..size {
            result.rows[i].set(i, true);
        }
        result.nnz = size;
        result
    }

    /// Bulk-constructs a matrix from a coordinate list.
    pub fn from_pairs(size: usize, pairs: &[(u32, u32)]) -> Self {
        let mut result = BoolMatrix::new(size);
        for &(row, col) in pairs {
            result.set(row as usize, col as usize);
        }
        result
    }

    /// Returns a deep copy. The only way to extend ownership.
    pub fn duplicate(&self) -> Self {
        BoolMatrix {
            size: self.size,
            rows: self.rows.clone(),
            nnz: self.nnz,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// The number of nonzero entries.
    pub fn nnz(&self) -> usize {
        self.nnz
    }

    pub fn is_empty(&self) -> bool {
        self.nnz == 0
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.rows[row].get(col).unwrap_or(false)
    }

    /// Sets a single entry.
    pub fn set(&mut self, row: usize, col: usize) {
        debug_assert!(row < self.size && col < self.size, "entry out of range");
        if !self.contains(row, col) {
            self.rows[row].set(col, true);
            self.nnz += 1;
        }
    }

    /// Extracts the coordinate list, in row-major order.
    pub fn pairs(&self) -> Vec<(u32, u32)> {
        let mut result = Vec::with_capacity(self.nnz);
        for (row, bits) in self.rows.iter().enumerate() {
            for col in ones(bits) {
                result.push((row as u32, col as u32));
            }
        }
        result
    }

    /// In-place element-wise OR.
    pub fn or_with(&mut self, other: &BoolMatrix) {
        debug_assert_eq!(self.size, other.size, "size mismatch");
        for (row, other_row) in self.rows.iter_mut().zip(other.rows.iter()) {
            row.or(other_row);
        }
        self.nnz = self.rows.iter().map(popcount).sum();
    }

    /// Boolean matrix product: `result[i, j] = OR_k self[i, k] AND other[k, j]`.
    ///
    /// Row-level formulation: for every set bit (i, k) of `self`, row k of
    /// `other` is ORed into row i of the product.
    pub fn matmul(&self, other: &BoolMatrix) -> BoolMatrix {
        debug_assert_eq!(self.size, other.size, "size mismatch");
        let mut result = BoolMatrix::new(self.size);
        for (row, self_row) in self.rows.iter().enumerate() {
            for k in ones(self_row) {
                result.rows[row].or(&other.rows[k]);
            }
        }
        result.nnz = result.rows.iter().map(popcount).sum();
        result
    }
}

impl PartialEq for BoolMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.nnz == other.nnz && self.rows == other.rows
    }
}

impl Eq for BoolMatrix {}

fn popcount(bits: &BitVec) -> usize {
    bits.blocks().map(|block| block.count_ones() as usize).sum()
}

/// Iterates the indices of set bits, block by block.
fn ones(bits: &BitVec) -> impl Iterator<Item = usize> + '_ {
    bits.blocks().enumerate().flat_map(|(i, mut block)| {
        std::iter::from_fn(move || {
            if block == 0 {
                None
            } else {
                let bit = block.trailing_zeros() as usize;
                block &= block - 1;
                Some(i * BLOCK_BITS + bit)
            }
        })
    })
}
