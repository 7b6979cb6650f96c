//! Heuristic estimates of remaining moves for a board state.

use crate::board::Board;
use crate::pieces::Orientation;

/// Estimate of the cost remaining to solve a board, selected by name.
///
/// `DistanceToExit` keeps the original off-by-one arithmetic and can return
/// -1 when the primary piece touches the exit, so it is not admissible in
/// every configuration; callers wanting guaranteed-optimal search should use
/// `Zero` or `BlockingCount`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heuristic {
    /// Always 0; turns best-first search into uniform-cost search.
    Zero,
    /// Number of vertical pieces standing between the primary piece and the
    /// exit. Admissible: each blocker needs at least one move to clear.
    BlockingCount,
    /// Columns between the primary piece's trailing edge and the exit,
    /// minus one. Unclamped, may be negative.
    DistanceToExit,
}

impl Heuristic {
    /// Selects a heuristic by name: `"UCS"`, `"DUMBASS"`, or `"LAZY"`.
    ///
    /// Unrecognized names silently fall back to `BlockingCount`; selection
    /// never fails.
    pub fn from_name(name: &str) -> Self {
        match name {
            "UCS" => Heuristic::Zero,
            "DUMBASS" => Heuristic::BlockingCount,
            "LAZY" => Heuristic::DistanceToExit,
            _ => Heuristic::BlockingCount,
        }
    }

    /// Evaluates this heuristic for a board.
    pub fn evaluate(self, board: &Board) -> i32 {
        match self {
            Heuristic::Zero => 0,
            Heuristic::BlockingCount => blocking_count(board),
            Heuristic::DistanceToExit => distance_to_exit(board),
        }
    }
}

/// Counts vertical pieces whose column lies strictly right of the primary
/// piece's trailing edge and whose row span covers the primary piece's row.
fn blocking_count(board: &Board) -> i32 {
    if board.is_solved() {
        return 0;
    }

    let primary = board.primary();
    let row = primary.anchor.0;
    let col_end = primary.anchor.1 + primary.length - 1;

    let mut blockers = 0;
    for piece in board.pieces().values() {
        if piece.is_primary() || piece.orientation != Orientation::Vertical {
            continue;
        }
        let col = piece.anchor.1;
        let row_start = piece.anchor.0;
        let row_end = row_start + piece.length - 1;
        if col > col_end && row_start <= row && row_end >= row {
            blockers += 1;
        }
    }
    blockers
}

fn distance_to_exit(board: &Board) -> i32 {
    let primary = board.primary();
    board.cols as i32 - (primary.anchor.1 + primary.length) as i32 - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(rows: &[&str]) -> Board {
        let grid: Vec<Vec<char>> = rows.iter().map(|r| r.chars().collect()).collect();
        Board::from_grid(&grid).unwrap()
    }

    #[test]
    fn test_zero_is_always_zero() {
        let board = board_from(&["PP.A..", "...A.."]);
        assert_eq!(Heuristic::Zero.evaluate(&board), 0);
    }

    #[test]
    fn test_blocking_count_counts_covering_verticals_only() {
        let board = board_from(&[
            "...B..", //
            "PP.B.C", //
            ".A...C", //
            ".A....", //
        ]);
        // B (col 3) covers the primary row; C (col 5) covers it too;
        // A (col 1) is left of the primary's trailing edge
        assert_eq!(Heuristic::BlockingCount.evaluate(&board), 2);
    }

    #[test]
    fn test_blocking_count_is_zero_when_solved() {
        let board = board_from(&["..PP", "A..."]);
        assert_eq!(Heuristic::BlockingCount.evaluate(&board), 0);
    }

    #[test]
    fn test_distance_to_exit_is_unclamped() {
        let far = board_from(&["PP....", "......"]);
        assert_eq!(Heuristic::DistanceToExit.evaluate(&far), 3);

        // trailing edge one short of the exit: estimate is already 0
        let near = board_from(&["...PP.", "......"]);
        assert_eq!(Heuristic::DistanceToExit.evaluate(&near), 0);

        // solved: the off-by-one term goes negative
        let solved = board_from(&["....PP", "......"]);
        assert_eq!(Heuristic::DistanceToExit.evaluate(&solved), -1);
    }

    #[test]
    fn test_unrecognized_name_falls_back_silently() {
        assert_eq!(Heuristic::from_name("UCS"), Heuristic::Zero);
        assert_eq!(Heuristic::from_name("LAZY"), Heuristic::DistanceToExit);
        assert_eq!(Heuristic::from_name("DUMBASS"), Heuristic::BlockingCount);
        assert_eq!(Heuristic::from_name("nonsense"), Heuristic::BlockingCount);
        assert_eq!(Heuristic::from_name(""), Heuristic::BlockingCount);
    }
}
