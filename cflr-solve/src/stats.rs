//! Execution counters. Purely observational; nothing in the engine
//! reads them back.

use std::fmt;
use std::time::Duration;

#[derive(Clone, Debug, Default)]
pub struct SolveStats {
    pub iterations: usize,
    pub multiplications: usize,
    pub skipped_multiplications: usize,
    pub lazy_additions: usize,
    pub concrete_additions: usize,
    pub elapsed: Duration,
    /// Set when the iteration safety bound was hit and the result was
    /// returned as-if converged. Tests treat this as failure.
    pub hit_iteration_limit: bool,
}

impl fmt::Display for SolveStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "iterations: {}", self.iterations)?;
        write!(f, "multiplications: {}", self.multiplications)?;
        if self.skipped_multiplications > 0 {
            write!(f, " (skipped as trivial: {})", self.skipped_multiplications)?;
        }
        writeln!(f)?;
        if self.lazy_additions > 0 {
            writeln!(
                f,
                "lazy additions: {}, concrete additions: {}",
                self.lazy_additions, self.concrete_additions
            )?;
        }
        if self.hit_iteration_limit {
            writeln!(f, "iteration limit hit; result may be incomplete")?;
        }
        write!(f, "elapsed: {:.6} s", self.elapsed.as_secs_f64())
    }
}
