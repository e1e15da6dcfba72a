//! Facade over the reachability engine's member crates.

pub use cflr_grammar::*;
pub use cflr_symbol::*;

pub use cflr_graph as graph;
pub use cflr_matrix as matrix;
pub use cflr_solve as solve;
