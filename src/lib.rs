//! Sliding-Block Escape Puzzle Solver Library
//!
//! Solves "exit the primary piece through the board edge" puzzles: pieces
//! occupy contiguous cells, slide along one axis without overlapping, and
//! the horizontal primary piece must reach the right edge. Three search
//! strategies with different optimality/memory trade-offs are provided:
//! uniform-cost/A*, greedy best-first, and iterative-deepening A*.

pub mod board;
pub mod heuristic;
pub mod parse;
pub mod pieces;
pub mod solver;
