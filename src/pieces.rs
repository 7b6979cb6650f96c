//! Sliding piece definitions and board cell conventions.
//!
//! A piece occupies `length` consecutive cells extending right (horizontal)
//! or down (vertical) from its anchor, the top-left occupied cell. Pieces
//! never rotate; they only slide along their own axis.

/// Identifier of the primary piece, the one that must reach the exit.
pub const PRIMARY_ID: char = 'P';

/// Grid character for an empty cell.
pub const EMPTY_CELL: char = '.';

/// Sliding axis of a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Occupies cells to the right of the anchor; slides left/right.
    Horizontal,
    /// Occupies cells below the anchor; slides up/down.
    Vertical,
}

impl Orientation {
    /// Single-character tag used in board fingerprints.
    pub fn tag(self) -> char {
        match self {
            Orientation::Horizontal => 'H',
            Orientation::Vertical => 'V',
        }
    }
}

/// A puzzle piece: immutable shape, mutable position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    /// Unique single-character identifier within a board.
    pub id: char,
    /// Number of occupied cells, at least 1.
    pub length: usize,
    /// Sliding axis.
    pub orientation: Orientation,
    /// Top-left occupied cell as (row, col).
    pub anchor: (usize, usize),
}

impl Piece {
    /// Returns the cells occupied by this piece as (row, col) pairs.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (row, col) = self.anchor;
        (0..self.length).map(move |i| match self.orientation {
            Orientation::Horizontal => (row, col + i),
            Orientation::Vertical => (row + i, col),
        })
    }

    /// Whether this piece is the primary escape piece.
    pub fn is_primary(&self) -> bool {
        self.id == PRIMARY_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_cells_extend_right() {
        let piece = Piece {
            id: 'A',
            length: 3,
            orientation: Orientation::Horizontal,
            anchor: (2, 1),
        };
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_vertical_cells_extend_down() {
        let piece = Piece {
            id: 'B',
            length: 2,
            orientation: Orientation::Vertical,
            anchor: (0, 4),
        };
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(0, 4), (1, 4)]);
    }
}
