/// A cell coordinate. Row 0 is the top of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Step `n` times by `(d_row, d_col)`. `None` when the result would be negative.
    pub(crate) fn offset(self, d_row: isize, d_col: isize, n: isize) -> Option<Position> {
        let row = self.row as isize + d_row * n;
        let col = self.col as isize + d_col * n;
        if row < 0 || col < 0 {
            return None;
        }
        Some(Position::new(row as usize, col as usize))
    }
}

/// Number of aligned discs needed to win.
pub const WIN_LENGTH: usize = 4;

/// Four contiguous, collinear cells: one candidate winning set.
///
/// Cells are kept sorted, so two lines compare equal (and hash equal) exactly
/// when they cover the same coordinates, whatever order they were found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Line {
    cells: [Position; WIN_LENGTH],
}

impl Line {
    pub fn new(mut cells: [Position; WIN_LENGTH]) -> Self {
        cells.sort();
        Line { cells }
    }

    pub fn cells(&self) -> &[Position; WIN_LENGTH] {
        &self.cells
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }
}
