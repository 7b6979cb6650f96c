//! Raw puzzle text parsing and exit-side normalization.
//!
//! Puzzle files carry the exit marker `K` just outside the grid on one of
//! the four sides. The solver core only understands "exit on the right", so
//! the raw grid is rotated into that layout before a board is built:
//! top exit rotates 90 degrees clockwise, bottom 270, left 180, right is
//! already canonical. Rotation swaps the row/column counts and flips piece
//! orientations, which the grid scan in `Board::from_grid` re-derives.
//!
//! File format, in lines: `rows cols`, then the non-primary piece count,
//! then the grid rows.

use anyhow::{bail, Context, Result};

use crate::board::Board;

/// Marker character for the exit cell in raw puzzle text.
pub const EXIT_MARKER: char = 'K';

/// Parses a raw puzzle description into a normalized board.
pub fn parse_puzzle(text: &str) -> Result<Board> {
    let mut lines = text.lines();

    let header = lines.next().context("missing dimensions line")?;
    let mut dims = header.split_whitespace();
    let rows: usize = dims
        .next()
        .context("missing row count")?
        .parse()
        .context("invalid row count")?;
    let cols: usize = dims
        .next()
        .context("missing column count")?
        .parse()
        .context("invalid column count")?;
    if rows == 0 || cols == 0 {
        bail!("board dimensions must be positive");
    }

    let _piece_count: usize = lines
        .next()
        .context("missing piece count line")?
        .trim()
        .parse()
        .context("invalid piece count")?;

    let raw: Vec<Vec<char>> = lines
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().collect())
        .collect();
    if raw.is_empty() {
        bail!("missing grid");
    }

    let grid = normalize(&raw, rows, cols)?;
    Board::from_grid(&grid)
}

/// Detects the exit side and rotates the grid so the exit ends up on the
/// right edge.
fn normalize(raw: &[Vec<char>], rows: usize, cols: usize) -> Result<Vec<Vec<char>>> {
    // an extra grid line means a top or bottom exit; an extra leading column
    // means a left exit; otherwise the exit is already on the right
    let (mut grid, clockwise_turns) = if raw.len() > rows {
        if raw[0].contains(&EXIT_MARKER) {
            (extract(&raw[1..], rows, cols, 0)?, 1)
        } else {
            (extract(raw, rows, cols, 0)?, 3)
        }
    } else if raw[0].len() > cols {
        (extract(raw, rows, cols, 1)?, 2)
    } else {
        (extract(raw, rows, cols, 0)?, 0)
    };

    for _ in 0..clockwise_turns {
        grid = rotate_clockwise(&grid);
    }
    Ok(grid)
}

/// Copies the `rows` x `cols` cell region starting at `col_offset` out of the
/// raw lines, leaving any exit marker column or row behind.
fn extract(
    raw: &[Vec<char>],
    rows: usize,
    cols: usize,
    col_offset: usize,
) -> Result<Vec<Vec<char>>> {
    if raw.len() < rows {
        bail!("grid has {} rows, expected {rows}", raw.len());
    }
    let mut grid = Vec::with_capacity(rows);
    for (index, line) in raw[..rows].iter().enumerate() {
        if line.len() < col_offset + cols {
            bail!("grid row {index} has {} cells, expected {cols}", line.len());
        }
        grid.push(line[col_offset..col_offset + cols].to_vec());
    }
    Ok(grid)
}

/// Rotates a grid 90 degrees clockwise: cell (i, j) moves to (j, n-1-i).
fn rotate_clockwise(grid: &[Vec<char>]) -> Vec<Vec<char>> {
    let n = grid.len();
    let m = grid[0].len();
    let mut rotated = vec![vec![' '; n]; m];
    for (i, row) in grid.iter().enumerate() {
        for (j, &cell) in row.iter().enumerate() {
            rotated[j][n - 1 - i] = cell;
        }
    }
    rotated
}
