//! The matrix-based fixed-point engine for context-free graph
//! reachability: given a grammar in extended Chomsky normal form and a
//! label-decomposed graph, computes for every nonterminal A the relation
//! of vertex pairs (u, v) connected by a path whose label word A
//! derives, and returns the start nonterminal's relation.

#![deny(unsafe_code)]

mod config;
mod solver;
mod stats;

pub use crate::config::{OptFlags, SolveConfig, UnknownVariant, Variant};
pub use crate::solver::Solver;
pub use crate::stats::SolveStats;
