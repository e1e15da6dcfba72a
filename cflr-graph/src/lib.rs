//! Label-decomposed graphs: a directed edge-labeled graph stored as one
//! boolean adjacency matrix per label.

#![deny(unsafe_code)]

mod graph;

pub use crate::graph::{GraphError, LabelGraph};
