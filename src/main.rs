//! Sliding-Block Escape Puzzle Solver
//!
//! Reads a puzzle description with the exit marked on any side, normalizes
//! it to the canonical exit-on-the-right layout, runs the selected search
//! strategy, and prints the move-by-move solution with timing and
//! expanded-state statistics.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use gridlock::heuristic::Heuristic;
use gridlock::parse;
use gridlock::solver::Solver;

/// Solves a sliding-block escape puzzle.
#[derive(Parser)]
#[command(name = "gridlock")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the puzzle description file.
    file: PathBuf,
    /// Search strategy.
    #[arg(short, long, value_enum, default_value = "a-star")]
    algorithm: Algorithm,
    /// Heuristic name (DUMBASS or LAZY); unrecognized names fall back to
    /// DUMBASS. Ignored by UCS, which always uses the zero heuristic.
    #[arg(short = 'H', long, default_value = "DUMBASS")]
    heuristic: String,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    /// Uniform-cost search (zero heuristic, optimal).
    Ucs,
    /// A* (optimal with an admissible heuristic).
    AStar,
    /// Greedy best-first search (fast, not optimal).
    Greedy,
    /// Iterative-deepening A* (optimal, low memory).
    IdaStar,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let text = fs::read_to_string(&cli.file)
        .with_context(|| format!("cannot read {}", cli.file.display()))?;
    let board = parse::parse_puzzle(&text)
        .with_context(|| format!("cannot parse {}", cli.file.display()))?;

    let heuristic = match cli.algorithm {
        Algorithm::Ucs => Heuristic::Zero,
        _ => Heuristic::from_name(&cli.heuristic),
    };
    info!("running {:?} heuristic", heuristic);

    let mut solver = Solver::new(board, heuristic);
    let start = Instant::now();
    let path = match cli.algorithm {
        Algorithm::Ucs | Algorithm::AStar => solver.solve_complete(),
        Algorithm::Greedy => solver.solve_greedy(),
        Algorithm::IdaStar => solver.solve_low_memory(),
    };
    let elapsed = start.elapsed();

    println!("{}", elapsed.as_millis());
    println!("{}", solver.expanded());
    println!("{}", path.len());

    if path.is_empty() {
        println!("no solution");
        return Ok(());
    }

    // row/column counts may be a rotated pair relative to the original input
    println!("{} {}", path[0].rows, path[0].cols);
    for board in &path {
        print!("{}", board.render());
    }

    Ok(())
}
