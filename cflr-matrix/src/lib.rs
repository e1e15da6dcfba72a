//! Boolean matrix layers for the reachability engine: the square matrix
//! itself, maps from labels to matrices, and the lazy-summation bag that
//! amortizes repeated additions.

#![deny(unsafe_code)]

mod bool_matrix;
mod lazy;
mod matrix_map;

pub use self::bool_matrix::BoolMatrix;
pub use self::lazy::{LazyMatrixMap, LazyMatrixSet};
pub use self::matrix_map::MatrixMap;
