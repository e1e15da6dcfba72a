//! Solver configuration: the externally visible algorithm variants and
//! the optimization flags they resolve to.

use std::fmt;
use std::str::FromStr;

/// Which optimizations to run the engine with. All variants share one
/// driver and produce bit-identical start matrices; they differ only in
/// cost.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Variant {
    /// Incremental frontier only.
    Incremental,
    /// Skip multiplications with an empty operand.
    TrivialOpt,
    /// Accumulate products in a lazy bag instead of eager ORs.
    LazyAdd,
    /// Both optimizations.
    Full,
    /// Pick by graph size: `TrivialOpt` below 500 nodes, else `Full`.
    #[default]
    Auto,
}

/// The per-optimization switches a [`Variant`] resolves to.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct OptFlags {
    pub trivial_ops: bool,
    pub lazy_add: bool,
}

impl Variant {
    pub fn flags(self, node_count: usize) -> OptFlags {
        match self {
            Variant::Incremental => OptFlags {
                trivial_ops: false,
                lazy_add: false,
            },
            Variant::TrivialOpt => OptFlags {
                trivial_ops: true,
                lazy_add: false,
            },
            Variant::LazyAdd => OptFlags {
                trivial_ops: false,
                lazy_add: true,
            },
            Variant::Full => OptFlags {
                trivial_ops: true,
                lazy_add: true,
            },
            Variant::Auto => {
                if node_count < 500 {
                    Variant::TrivialOpt.flags(node_count)
                } else {
                    Variant::Full.flags(node_count)
                }
            }
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Variant::Incremental => "incremental",
            Variant::TrivialOpt => "trivial-opt",
            Variant::LazyAdd => "lazy-add",
            Variant::Full => "full",
            Variant::Auto => "auto",
        };
        f.write_str(name)
    }
}

/// Error for an unrecognized variant name.
#[derive(Debug)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "unknown variant `{}`, expected one of: incremental, trivial-opt, lazy-add, full, auto",
            self.0
        )
    }
}

impl std::error::Error for UnknownVariant {}

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "incremental" => Ok(Variant::Incremental),
            "trivial-opt" | "trivial" => Ok(Variant::TrivialOpt),
            "lazy-add" | "lazy" => Ok(Variant::LazyAdd),
            "full" | "fully-optimized" => Ok(Variant::Full),
            "auto" => Ok(Variant::Auto),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Everything the solver takes besides the grammar and the graph.
#[derive(Clone, Copy, Debug)]
pub struct SolveConfig {
    pub variant: Variant,
    /// Exponent c of the lazy-bag merge threshold b = n^c, c in (0, 1].
    pub lazy_exponent: f64,
    /// Safety bound on fixed-point iterations. Not reachable on correct
    /// instances of practical size; hitting it degrades to the current
    /// accumulator with a warning.
    pub max_iterations: usize,
}

impl Default for SolveConfig {
    fn default() -> Self {
        SolveConfig {
            variant: Variant::default(),
            lazy_exponent: 0.5,
            max_iterations: 100,
        }
    }
}

impl SolveConfig {
    pub fn with_variant(variant: Variant) -> Self {
        SolveConfig {
            variant,
            ..SolveConfig::default()
        }
    }
}
