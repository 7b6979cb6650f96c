//! Board state: piece map, successor generation, and canonical fingerprints.
//!
//! A `Board` is a value type. Every legal move produces a fresh `Board` with
//! exactly one piece's anchor changed; boards handed to a search frontier are
//! never mutated afterwards. Search identity is defined entirely by the
//! fingerprint, which serializes pieces in identifier order.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use anyhow::{bail, Result};

use crate::pieces::{Orientation, Piece, EMPTY_CELL, PRIMARY_ID};

/// A sliding-block puzzle state, normalized so the exit is on the right edge
/// of the primary piece's row.
#[derive(Clone, Debug)]
pub struct Board {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Pieces keyed by identifier; BTreeMap iteration order makes the
    /// fingerprint canonical.
    pieces: BTreeMap<char, Piece>,
}

impl Board {
    /// Builds a board from a normalized grid of piece identifiers.
    ///
    /// Contiguous runs of the same character form one piece; a run is
    /// vertical when the cell directly below the first scanned cell carries
    /// the same identifier. Fails fast on a missing or vertical primary
    /// piece, non-rectangular input, or an empty grid.
    pub fn from_grid(grid: &[Vec<char>]) -> Result<Self> {
        let rows = grid.len();
        if rows == 0 {
            bail!("board grid has no rows");
        }
        let cols = grid[0].len();
        if cols == 0 {
            bail!("board grid has no columns");
        }
        if grid.iter().any(|row| row.len() != cols) {
            bail!("board grid is not rectangular");
        }

        let mut pieces = BTreeMap::new();
        let mut claimed = vec![false; rows * cols];

        for row in 0..rows {
            for col in 0..cols {
                let id = grid[row][col];
                if id == EMPTY_CELL || claimed[row * cols + col] {
                    continue;
                }
                claimed[row * cols + col] = true;

                let vertical = row + 1 < rows && grid[row + 1][col] == id;
                let mut length = 1;
                if vertical {
                    while row + length < rows && grid[row + length][col] == id {
                        claimed[(row + length) * cols + col] = true;
                        length += 1;
                    }
                } else {
                    while col + length < cols && grid[row][col + length] == id {
                        claimed[row * cols + col + length] = true;
                        length += 1;
                    }
                }

                let orientation = if vertical {
                    Orientation::Vertical
                } else {
                    Orientation::Horizontal
                };
                let piece = Piece {
                    id,
                    length,
                    orientation,
                    anchor: (row, col),
                };
                if pieces.insert(id, piece).is_some() {
                    bail!("piece '{id}' occupies disconnected cells");
                }
            }
        }

        match pieces.get(&PRIMARY_ID) {
            None => bail!("board has no primary piece '{PRIMARY_ID}'"),
            Some(p) if p.orientation == Orientation::Vertical => {
                bail!("primary piece must be horizontal after normalization")
            }
            Some(_) => {}
        }

        Ok(Self { rows, cols, pieces })
    }

    /// All pieces on the board, keyed by identifier.
    pub fn pieces(&self) -> &BTreeMap<char, Piece> {
        &self.pieces
    }

    /// The primary escape piece. Present by construction.
    pub fn primary(&self) -> &Piece {
        &self.pieces[&PRIMARY_ID]
    }

    /// True once the primary piece's trailing edge reaches the right board
    /// edge, which is the canonical exit side.
    pub fn is_solved(&self) -> bool {
        let primary = self.primary();
        primary.anchor.1 + primary.length == self.cols
    }

    /// Canonical state key: `id`, anchor row, anchor col, orientation tag,
    /// length for every piece in identifier order. Two boards are the same
    /// search state iff their fingerprints are equal.
    pub fn fingerprint(&self) -> String {
        let mut key = String::with_capacity(self.pieces.len() * 8);
        for piece in self.pieces.values() {
            let (row, col) = piece.anchor;
            let _ = write!(
                key,
                "{}{},{},{}{};",
                piece.id,
                row,
                col,
                piece.orientation.tag(),
                piece.length
            );
        }
        key
    }

    /// Rebuilds the flat occupancy grid from the piece map.
    fn occupancy(&self) -> Vec<char> {
        let mut grid = vec![EMPTY_CELL; self.rows * self.cols];
        for piece in self.pieces.values() {
            for (row, col) in piece.cells() {
                grid[row * self.cols + col] = piece.id;
            }
        }
        grid
    }

    /// Clone of this board with one piece's anchor replaced.
    fn with_anchor(&self, id: char, anchor: (usize, usize)) -> Self {
        let mut next = self.clone();
        if let Some(piece) = next.pieces.get_mut(&id) {
            piece.anchor = anchor;
        }
        next
    }

    /// Generates every board reachable by sliding one piece.
    ///
    /// Each piece is probed cell-by-cell in both directions along its own
    /// axis; every empty in-bounds position along the way yields its own
    /// successor (a 3-cell slide contributes 3 boards), and probing stops at
    /// the first occupied cell or the board edge. A slide of any distance
    /// counts as one move.
    pub fn generate_successors(&self) -> Vec<Board> {
        let grid = self.occupancy();
        let occupied = |row: usize, col: usize| grid[row * self.cols + col] != EMPTY_CELL;

        let mut successors = Vec::new();
        for piece in self.pieces.values() {
            let (row, col) = piece.anchor;
            match piece.orientation {
                Orientation::Vertical => {
                    // upward: probe the cell above the anchor
                    for r in (0..row).rev() {
                        if occupied(r, col) {
                            break;
                        }
                        successors.push(self.with_anchor(piece.id, (r, col)));
                    }
                    // downward: probe the cell below the trailing edge
                    for r in row + piece.length..self.rows {
                        if occupied(r, col) {
                            break;
                        }
                        successors.push(self.with_anchor(piece.id, (r + 1 - piece.length, col)));
                    }
                }
                Orientation::Horizontal => {
                    // leftward
                    for c in (0..col).rev() {
                        if occupied(row, c) {
                            break;
                        }
                        successors.push(self.with_anchor(piece.id, (row, c)));
                    }
                    // rightward
                    for c in col + piece.length..self.cols {
                        if occupied(row, c) {
                            break;
                        }
                        successors.push(self.with_anchor(piece.id, (row, c + 1 - piece.length)));
                    }
                }
            }
        }
        successors
    }

    /// Formats the board as a character grid, one row per line.
    pub fn render(&self) -> String {
        let grid = self.occupancy();
        let mut output = String::with_capacity((self.cols + 1) * self.rows);
        for row in 0..self.rows {
            for col in 0..self.cols {
                output.push(grid[row * self.cols + col]);
            }
            output.push('\n');
        }
        output
    }
}
