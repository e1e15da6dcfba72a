//! Command-line driver: load a grammar and a graph, expand grammar
//! templates if needed, solve, and print the reachable pairs.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use cflr::graph::LabelGraph;
use cflr::solve::{SolveConfig, Solver, Variant};
use cflr::{RawGrammar, SymbolSource};

#[derive(Parser)]
#[command(name = "cflr")]
#[command(about = "Context-free language reachability over labeled graphs")]
struct Cli {
    /// Grammar file in extended Chomsky normal form
    #[arg(long)]
    grammar: PathBuf,
    /// Graph file, one `src dst label` edge per line
    #[arg(long)]
    graph: PathBuf,
    /// Algorithm variant: incremental, trivial-opt, lazy-add, full, auto
    #[arg(long, default_value = "auto")]
    algo: String,
    /// Exponent c of the lazy-add merge threshold b = n^c
    #[arg(long, default_value_t = 0.5)]
    lazy_exponent: f64,
    /// Safety bound on fixed-point iterations
    #[arg(long, default_value_t = 100)]
    max_iterations: usize,
    /// Print solver statistics to stderr
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let variant: Variant = cli.algo.parse()?;

    let syms = SymbolSource::new();
    let graph_text = fs::read_to_string(&cli.graph)
        .with_context(|| format!("reading graph file {}", cli.graph.display()))?;
    let graph = LabelGraph::load_str(&graph_text, &syms)
        .with_context(|| format!("parsing graph file {}", cli.graph.display()))?;

    let grammar_text = fs::read_to_string(&cli.grammar)
        .with_context(|| format!("reading grammar file {}", cli.grammar.display()))?;
    let raw = RawGrammar::load_str(&grammar_text)
        .with_context(|| format!("parsing grammar file {}", cli.grammar.display()))?;
    let raw = raw.expand_for_labels(graph.labels().filter_map(|label| syms.name_of(label)));
    let grammar = raw.intern(&syms);

    let config = SolveConfig {
        variant,
        lazy_exponent: cli.lazy_exponent,
        max_iterations: cli.max_iterations,
    };
    let mut solver = Solver::new(&grammar, &graph, config);
    let result = solver.solve();

    info!("{} reachable pairs", result.nnz());
    for (row, col) in result.pairs() {
        println!("{}\t{}", row, col);
    }
    if cli.stats {
        eprintln!("{}", solver.stats());
    }
    Ok(())
}
