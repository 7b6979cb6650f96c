//! Three search strategies over board states.
//!
//! All three walk the same successor graph and share the fingerprint-keyed
//! dedup machinery, but differ in frontier policy:
//! - `solve_complete`: best-first on `f = g + h` (uniform-cost with the zero
//!   heuristic, A* otherwise); optimal given an admissible heuristic.
//! - `solve_greedy`: best-first on `h` alone; fast, no length guarantee.
//! - `solve_low_memory`: iterative deepening on an `f` threshold; trades
//!   repeated work for a memory footprint bounded by the current path.
//!
//! Every call returns the move-by-move path from the initial board to a
//! solved board, or an empty vector once the reachable space is exhausted.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::Board;
use crate::heuristic::Heuristic;

/// Sentinel reported upward when a pruned branch cannot tighten the next
/// deepening threshold.
const NO_BOUND: i32 = i32::MAX;

/// Frontier ordering policy shared by the two best-first searches.
#[derive(Clone, Copy)]
enum Priority {
    /// Order by `g + h`, accumulate real path cost.
    FullCost,
    /// Order by `h` alone, path cost pinned to zero.
    HeuristicOnly,
}

/// A search tree node. Nodes live in an arena; `parent` is an index into it,
/// used only to reconstruct the path once a solved board is popped.
struct Node {
    board: Board,
    g: i32,
    parent: Option<usize>,
}

/// Min-heap entry: lowest priority first, ties broken by insertion order so
/// expansion among equal-priority states is stable.
struct OpenEntry {
    priority: i32,
    seq: u64,
    node: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed: BinaryHeap is a max-heap
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Outcome of one bounded depth-first descent.
enum DfsOutcome {
    /// A solved board was reached; the shared path stack holds the solution.
    Found,
    /// No solution under the current threshold; carries the smallest
    /// over-threshold `f` seen, or `NO_BOUND` if the branch was exhausted.
    Bound(i32),
}

/// Binds an initial board and a heuristic to the three search strategies.
///
/// The expanded-state counter is reset at the start of each solve call and
/// readable afterwards.
pub struct Solver {
    initial: Board,
    heuristic: Heuristic,
    expanded: usize,
}

impl Solver {
    pub fn new(initial: Board, heuristic: Heuristic) -> Self {
        Self {
            initial,
            heuristic,
            expanded: 0,
        }
    }

    /// Number of unique states expanded by the most recent solve call.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Best-first search on `f = g + h`: uniform-cost search with the zero
    /// heuristic, A* otherwise. Returns the shortest path in moves when the
    /// heuristic never overestimates.
    pub fn solve_complete(&mut self) -> Vec<Board> {
        self.solve_best_first(Priority::FullCost)
    }

    /// Greedy best-first search ordered by `h` alone. Terminates with a
    /// solution or exhaustion, with no guarantee on solution length.
    pub fn solve_greedy(&mut self) -> Vec<Board> {
        self.solve_best_first(Priority::HeuristicOnly)
    }

    fn solve_best_first(&mut self, priority: Priority) -> Vec<Board> {
        self.expanded = 0;

        let mut arena: Vec<Node> = Vec::new();
        let mut open = BinaryHeap::new();
        let mut expanded_keys: FxHashSet<String> = FxHashSet::default();
        let mut seq = 0u64;

        let h0 = self.heuristic.evaluate(&self.initial);
        arena.push(Node {
            board: self.initial.clone(),
            g: 0,
            parent: None,
        });
        open.push(OpenEntry {
            priority: h0,
            seq,
            node: 0,
        });

        while let Some(entry) = open.pop() {
            // stale frontier entries for an already-expanded state are dropped
            let key = arena[entry.node].board.fingerprint();
            if !expanded_keys.insert(key) {
                continue;
            }
            self.expanded += 1;

            if arena[entry.node].board.is_solved() {
                return reconstruct_path(&arena, entry.node);
            }

            let g = match priority {
                Priority::FullCost => arena[entry.node].g + 1,
                Priority::HeuristicOnly => 0,
            };

            let mut successors = arena[entry.node].board.generate_successors();
            if matches!(priority, Priority::HeuristicOnly) {
                // stable expansion order among equal-h successors
                successors.sort_by_cached_key(|board| board.fingerprint());
            }

            for successor in successors {
                if expanded_keys.contains(&successor.fingerprint()) {
                    continue;
                }
                let h = self.heuristic.evaluate(&successor);
                let f = match priority {
                    Priority::FullCost => g + h,
                    Priority::HeuristicOnly => h,
                };
                seq += 1;
                let index = arena.len();
                arena.push(Node {
                    board: successor,
                    g,
                    parent: Some(entry.node),
                });
                open.push(OpenEntry {
                    priority: f,
                    seq,
                    node: index,
                });
            }
        }

        Vec::new()
    }

    /// Iterative-deepening A*: depth-first search bounded by an increasing
    /// `f` threshold. Auxiliary memory is the current path plus a best-f map
    /// that is cleared at the start of every iteration.
    pub fn solve_low_memory(&mut self) -> Vec<Board> {
        self.expanded = 0;

        let h0 = self.heuristic.evaluate(&self.initial);
        let mut threshold = h0;

        loop {
            let mut best_f: FxHashMap<String, i32> = FxHashMap::default();
            let mut on_path: FxHashSet<String> = FxHashSet::default();
            let mut path: Vec<Board> = Vec::new();

            let outcome = self.bounded_dfs(
                self.initial.clone(),
                0,
                h0,
                threshold,
                &mut best_f,
                &mut on_path,
                &mut path,
            );

            match outcome {
                DfsOutcome::Found => return path,
                DfsOutcome::Bound(NO_BOUND) => return Vec::new(),
                DfsOutcome::Bound(next) => {
                    debug!("deepening threshold {threshold} -> {next}");
                    threshold = next;
                }
            }
        }
    }

    /// One depth-first descent under `threshold`. The path stack mirrors the
    /// recursion: pushed on entry, popped on backtrack, left intact on
    /// success so it doubles as the reconstructed solution.
    #[allow(clippy::too_many_arguments)]
    fn bounded_dfs(
        &mut self,
        board: Board,
        g: i32,
        h: i32,
        threshold: i32,
        best_f: &mut FxHashMap<String, i32>,
        on_path: &mut FxHashSet<String>,
        path: &mut Vec<Board>,
    ) -> DfsOutcome {
        let key = board.fingerprint();
        let f = g + h;

        if f > threshold {
            return DfsOutcome::Bound(f);
        }

        // dead end for this iteration: state already reached at least as
        // cheaply elsewhere
        if best_f.get(&key).is_some_and(|&seen| seen <= f) {
            return DfsOutcome::Bound(NO_BOUND);
        }
        best_f.insert(key.clone(), f);

        if on_path.contains(&key) {
            return DfsOutcome::Bound(NO_BOUND);
        }

        if board.is_solved() {
            path.push(board);
            return DfsOutcome::Found;
        }

        on_path.insert(key.clone());
        self.expanded += 1;

        let heuristic = self.heuristic;
        let mut scored: Vec<(i32, Board)> = board
            .generate_successors()
            .into_iter()
            .map(|successor| (heuristic.evaluate(&successor), successor))
            .collect();
        // best-first ordering within the depth-first frontier
        scored.sort_by_key(|(succ_h, _)| g + 1 + succ_h);

        path.push(board);

        let mut min_bound = NO_BOUND;
        for (succ_h, successor) in scored {
            if on_path.contains(&successor.fingerprint()) {
                continue;
            }
            match self.bounded_dfs(successor, g + 1, succ_h, threshold, best_f, on_path, path) {
                DfsOutcome::Found => return DfsOutcome::Found,
                DfsOutcome::Bound(bound) => min_bound = min_bound.min(bound),
            }
        }

        on_path.remove(&key);
        path.pop();
        DfsOutcome::Bound(min_bound)
    }
}

/// Walks parent indices from a solved node back to the root and reverses.
fn reconstruct_path(arena: &[Node], mut index: usize) -> Vec<Board> {
    let mut path = vec![arena[index].board.clone()];
    while let Some(parent) = arena[index].parent {
        path.push(arena[parent].board.clone());
        index = parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Orientation;
    use std::collections::VecDeque;

    fn board_from(rows: &[&str]) -> Board {
        let grid: Vec<Vec<char>> = rows.iter().map(|r| r.chars().collect()).collect();
        Board::from_grid(&grid).unwrap()
    }

    /// 6x6 board: one vertical blocker between the primary piece and the exit.
    /// Optimal: move A clear of row 2, then slide P to the edge (2 moves).
    fn blocked_board() -> Board {
        board_from(&[
            "......", //
            "...A..", //
            "PP.A..", //
            "......", //
            "......", //
            "......", //
        ])
    }

    /// A full-height vertical wall the primary piece can never pass.
    fn walled_board() -> Board {
        board_from(&[
            "....A.", //
            "....A.", //
            "PP..A.", //
            "....A.", //
            "....A.", //
            "....A.", //
        ])
    }

    /// Reference shortest solution length (in moves) by plain breadth-first
    /// enumeration over fingerprints.
    fn bfs_optimal_moves(initial: &Board) -> Option<usize> {
        let mut seen = FxHashSet::default();
        let mut queue = VecDeque::new();
        seen.insert(initial.fingerprint());
        queue.push_back((initial.clone(), 0usize));

        while let Some((board, depth)) = queue.pop_front() {
            if board.is_solved() {
                return Some(depth);
            }
            for successor in board.generate_successors() {
                if seen.insert(successor.fingerprint()) {
                    queue.push_back((successor, depth + 1));
                }
            }
        }
        None
    }

    /// Number of distinct states reachable from a board.
    fn reachable_states(initial: &Board) -> usize {
        let mut seen = FxHashSet::default();
        let mut queue = VecDeque::new();
        seen.insert(initial.fingerprint());
        queue.push_back(initial.clone());
        while let Some(board) = queue.pop_front() {
            for successor in board.generate_successors() {
                if seen.insert(successor.fingerprint()) {
                    queue.push_back(successor);
                }
            }
        }
        seen.len()
    }

    /// Consecutive path boards must differ in exactly one piece, moved along
    /// its own axis with shape preserved.
    fn assert_single_slide_steps(path: &[Board]) {
        for pair in path.windows(2) {
            let changed: Vec<_> = pair[0]
                .pieces()
                .values()
                .filter(|p| pair[1].pieces()[&p.id].anchor != p.anchor)
                .collect();
            assert_eq!(changed.len(), 1);
            let before = changed[0];
            let after = pair[1].pieces()[&before.id];
            assert_eq!(after.length, before.length);
            assert_eq!(after.orientation, before.orientation);
            match before.orientation {
                Orientation::Horizontal => assert_eq!(after.anchor.0, before.anchor.0),
                Orientation::Vertical => assert_eq!(after.anchor.1, before.anchor.1),
            }
        }
    }

    #[test]
    fn test_uniform_cost_path_is_optimal() {
        let board = blocked_board();
        let reference = bfs_optimal_moves(&board).unwrap();
        assert_eq!(reference, 2);

        let mut solver = Solver::new(board.clone(), Heuristic::Zero);
        let path = solver.solve_complete();
        assert_eq!(path.len(), reference + 1);
        assert_eq!(path[0].fingerprint(), board.fingerprint());
        assert!(path.last().unwrap().is_solved());
        assert_single_slide_steps(&path);
    }

    #[test]
    fn test_astar_with_blocking_count_is_optimal() {
        let board = blocked_board();
        let reference = bfs_optimal_moves(&board).unwrap();

        let mut solver = Solver::new(board, Heuristic::BlockingCount);
        let path = solver.solve_complete();
        assert_eq!(path.len(), reference + 1);
        assert!(path.last().unwrap().is_solved());
    }

    #[test]
    fn test_low_memory_matches_complete_length() {
        let board = blocked_board();
        let mut complete = Solver::new(board.clone(), Heuristic::Zero);
        let optimal = complete.solve_complete().len();

        let mut low_memory = Solver::new(board.clone(), Heuristic::BlockingCount);
        let path = low_memory.solve_low_memory();
        assert_eq!(path.len(), optimal);
        assert_eq!(path[0].fingerprint(), board.fingerprint());
        assert!(path.last().unwrap().is_solved());
        assert_single_slide_steps(&path);
    }

    #[test]
    fn test_greedy_returns_a_wellformed_solution() {
        let board = blocked_board();
        let mut solver = Solver::new(board.clone(), Heuristic::BlockingCount);
        let path = solver.solve_greedy();

        assert!(!path.is_empty());
        assert_eq!(path[0].fingerprint(), board.fingerprint());
        assert!(path.last().unwrap().is_solved());
        assert_single_slide_steps(&path);
    }

    #[test]
    fn test_all_strategies_report_unsolvable_as_empty() {
        let board = walled_board();
        assert!(bfs_optimal_moves(&board).is_none());

        for heuristic in [Heuristic::Zero, Heuristic::BlockingCount] {
            let mut solver = Solver::new(board.clone(), heuristic);
            assert!(solver.solve_complete().is_empty());
            assert!(solver.solve_greedy().is_empty());
            assert!(solver.solve_low_memory().is_empty());
        }
    }

    #[test]
    fn test_expanded_counter_bounded_by_unique_states() {
        let board = blocked_board();
        let unique = reachable_states(&board);

        let mut solver = Solver::new(board.clone(), Heuristic::Zero);
        solver.solve_complete();
        assert!(solver.expanded() > 0);
        assert!(solver.expanded() <= unique);

        let mut greedy = Solver::new(board.clone(), Heuristic::BlockingCount);
        greedy.solve_greedy();
        assert!(greedy.expanded() > 0);
        assert!(greedy.expanded() <= unique);
    }

    #[test]
    fn test_already_solved_board_yields_single_state_path() {
        let board = board_from(&["..PP", "A..."]);
        assert!(board.is_solved());

        let mut solver = Solver::new(board.clone(), Heuristic::Zero);
        let path = solver.solve_complete();
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].fingerprint(), board.fingerprint());

        let mut low_memory = Solver::new(board, Heuristic::BlockingCount);
        assert_eq!(low_memory.solve_low_memory().len(), 1);
    }

    #[test]
    fn test_inadmissible_distance_heuristic_still_solves() {
        // DistanceToExit may go negative near the exit; the searches must
        // still terminate with a valid (if not necessarily optimal) solution
        let board = blocked_board();
        let mut solver = Solver::new(board.clone(), Heuristic::DistanceToExit);
        let path = solver.solve_complete();
        assert!(!path.is_empty());
        assert!(path.last().unwrap().is_solved());
        assert_single_slide_steps(&path);
    }
}
