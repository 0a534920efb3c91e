use std::collections::BTreeMap;
use std::fmt;

use super::line::Position;
use super::player::Player;
use crate::error::ParseError;

pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 7;

/// Separates rows in a board encoding.
pub const ROW_DELIMITER: char = ';';
/// Separates cells within a row.
pub const CELL_DELIMITER: char = ',';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    One,
    Two,
}

impl Cell {
    /// Parse one encoded cell value: `0` empty, `1`/`2` a player's disc.
    pub fn from_token(token: &str) -> Option<Cell> {
        match token {
            "0" => Some(Cell::Empty),
            "1" => Some(Cell::One),
            "2" => Some(Cell::Two),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::One => 1,
            Cell::Two => 2,
        }
    }

    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::One => Some(Player::One),
            Cell::Two => Some(Player::Two),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column is full")]
    ColumnFull,
    #[error("column is outside the board")]
    InvalidColumn,
}

/// The grid of discs plus the landing row of every column that still has room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    available: BTreeMap<usize, usize>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut board = Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
            available: BTreeMap::new(),
        };
        board.refresh_available_moves();
        board
    }

    /// Build a board of the given size from an encoding such as `0,0;1,2`.
    pub fn parse(rows: usize, cols: usize, encoding: &str) -> Result<Self, ParseError> {
        let mut board = Board::new(rows, cols);
        board.load(encoding)?;
        Ok(board)
    }

    /// Replace the whole grid with the given encoding.
    ///
    /// Rows are separated by `;`, cells by `,`. On error the board is left
    /// untouched.
    pub fn load(&mut self, encoding: &str) -> Result<(), ParseError> {
        let encoded_rows: Vec<&str> = encoding.trim().split(ROW_DELIMITER).collect();
        if encoded_rows.len() != self.rows {
            return Err(ParseError::RowCount {
                expected: self.rows,
                found: encoded_rows.len(),
            });
        }

        let mut cells = Vec::with_capacity(self.rows * self.cols);
        for (row, encoded) in encoded_rows.iter().enumerate() {
            let tokens: Vec<&str> = encoded.split(CELL_DELIMITER).map(str::trim).collect();
            if tokens.len() != self.cols {
                return Err(ParseError::ColumnCount {
                    row,
                    expected: self.cols,
                    found: tokens.len(),
                });
            }
            for (col, token) in tokens.into_iter().enumerate() {
                let cell = Cell::from_token(token).ok_or_else(|| ParseError::InvalidToken {
                    row,
                    col,
                    token: token.to_string(),
                })?;
                cells.push(cell);
            }
        }

        // Gravity: nothing may sit above an empty cell
        for row in 0..self.rows.saturating_sub(1) {
            for col in 0..self.cols {
                let here = cells[row * self.cols + col];
                let below = cells[(row + 1) * self.cols + col];
                if !here.is_empty() && below.is_empty() {
                    return Err(ParseError::FloatingDisc { row, col });
                }
            }
        }

        self.cells = cells;
        self.refresh_available_moves();
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the cell at a specific position.
    /// Row 0 is the top, the last row is the bottom.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.row * self.cols + pos.col]
    }

    /// Cell lookup with signed coordinates; `None` off the board.
    pub fn cell_at(&self, row: isize, col: isize) -> Option<Cell> {
        if self.is_valid_location(row, col) {
            Some(self.cells[row as usize * self.cols + col as usize])
        } else {
            None
        }
    }

    pub fn is_valid_location(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Column -> landing row, for every column that is not full.
    pub fn available_moves(&self) -> &BTreeMap<usize, usize> {
        &self.available
    }

    pub fn landing_row(&self, col: usize) -> Option<usize> {
        self.available.get(&col).copied()
    }

    /// True when a disc dropped now would land exactly on `pos`.
    pub fn is_available(&self, pos: Position) -> bool {
        self.landing_row(pos.col) == Some(pos.row)
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        col >= self.cols || !self.available.contains_key(&col)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.available.is_empty()
    }

    /// For each row, the columns that are still empty at that row.
    pub fn free_locations_by_row(&self) -> Vec<Vec<usize>> {
        (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .filter(|&col| self.get(Position::new(row, col)).is_empty())
                    .collect()
            })
            .collect()
    }

    /// Column -> rows holding `cell`. `Cell::Empty` lists the free cells.
    /// Columns without a match are omitted.
    pub fn owned_locations(&self, cell: Cell) -> BTreeMap<usize, Vec<usize>> {
        let mut locations = BTreeMap::new();
        for col in 0..self.cols {
            let rows: Vec<usize> = (0..self.rows)
                .filter(|&row| self.get(Position::new(row, col)) == cell)
                .collect();
            if !rows.is_empty() {
                locations.insert(col, rows);
            }
        }
        locations
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, cell: Cell) -> Result<usize, MoveError> {
        if col >= self.cols {
            return Err(MoveError::InvalidColumn);
        }
        let row = self.landing_row(col).ok_or(MoveError::ColumnFull)?;
        self.cells[row * self.cols + col] = cell;
        self.refresh_available_moves();
        Ok(row)
    }

    /// Test fixture: one string per row, one digit per cell, top row first.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Board {
        let encoding = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join(";");
        Board::parse(rows.len(), rows[0].len(), &encoding).expect("fixture board is valid")
    }

    fn refresh_available_moves(&mut self) {
        self.available.clear();
        for col in 0..self.cols {
            // Lowest empty cell, scanning up from the bottom
            if let Some(row) = (0..self.rows)
                .rev()
                .find(|&row| self.get(Position::new(row, col)).is_empty())
            {
                self.available.insert(col, row);
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

/// Writes the board in the same encoding `load` accepts.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                write!(f, "{ROW_DELIMITER}")?;
            }
            for col in 0..self.cols {
                if col > 0 {
                    write!(f, "{CELL_DELIMITER}")?;
                }
                write!(f, "{}", self.get(Position::new(row, col)).id())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(rows: &[&str]) -> String {
        rows.join(";")
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::default();
        for row in 0..DEFAULT_ROWS {
            for col in 0..DEFAULT_COLS {
                assert_eq!(board.get(Position::new(row, col)), Cell::Empty);
            }
        }
        assert_eq!(board.available_moves().len(), DEFAULT_COLS);
        assert!(board.available_moves().values().all(|&row| row == DEFAULT_ROWS - 1));
    }

    #[test]
    fn test_load_sets_cells_and_landing_rows() {
        let encoding = encode(&[
            "0,0,0,0",
            "0,0,0,1",
            "0,2,0,2",
            "1,1,0,1",
        ]);
        let board = Board::parse(4, 4, &encoding).unwrap();

        assert_eq!(board.get(Position::new(3, 0)), Cell::One);
        assert_eq!(board.get(Position::new(2, 1)), Cell::Two);
        assert_eq!(board.landing_row(0), Some(2));
        assert_eq!(board.landing_row(1), Some(1));
        assert_eq!(board.landing_row(2), Some(3));
        assert_eq!(board.landing_row(3), Some(0));
    }

    #[test]
    fn test_full_column_is_not_available() {
        let encoding = encode(&["1,0", "2,0", "1,0"]);
        let board = Board::parse(3, 2, &encoding).unwrap();
        assert!(board.is_column_full(0));
        assert_eq!(board.available_moves().keys().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_load_rejects_wrong_row_count() {
        let err = Board::parse(3, 2, "0,0;0,0").unwrap_err();
        assert_eq!(err, ParseError::RowCount { expected: 3, found: 2 });
    }

    #[test]
    fn test_load_rejects_wrong_column_count() {
        let err = Board::parse(2, 2, "0,0;0,0,0").unwrap_err();
        assert_eq!(
            err,
            ParseError::ColumnCount {
                row: 1,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_load_rejects_invalid_tokens() {
        for token in ["3", "-1", "a", ""] {
            let encoding = format!("0,0;0,{token}");
            let err = Board::parse(2, 2, &encoding).unwrap_err();
            assert!(
                matches!(err, ParseError::InvalidToken { row: 1, col: 1, .. }),
                "token {token:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_load_rejects_floating_disc() {
        let err = Board::parse(3, 2, "0,0;1,0;0,0").unwrap_err();
        assert_eq!(err, ParseError::FloatingDisc { row: 1, col: 0 });
    }

    #[test]
    fn test_failed_load_leaves_board_untouched() {
        let mut board = Board::parse(2, 2, "0,0;1,0").unwrap();
        let before = board.clone();
        assert!(board.load("0,0;9,0").is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn test_load_is_idempotent() {
        let encoding = encode(&["0,0,0", "0,2,0", "1,1,2"]);
        let mut board = Board::new(3, 3);
        board.load(&encoding).unwrap();
        let first = board.clone();
        board.load(&encoding).unwrap();
        assert_eq!(board, first);
        assert_eq!(board.available_moves(), first.available_moves());
    }

    #[test]
    fn test_display_matches_encoding() {
        let encoding = "0,0,0;0,2,0;1,1,2";
        let board = Board::parse(3, 3, encoding).unwrap();
        assert_eq!(board.to_string(), encoding);
    }

    #[test]
    fn test_available_moves_are_lowest_empty_cells() {
        let encoding = encode(&[
            "0,0,0,0,0",
            "0,0,1,0,0",
            "0,2,2,0,0",
            "1,1,2,0,2",
        ]);
        let board = Board::parse(4, 5, &encoding).unwrap();
        for col in 0..board.cols() {
            let empty_rows: Vec<usize> = (0..board.rows())
                .filter(|&row| board.get(Position::new(row, col)).is_empty())
                .collect();
            assert_eq!(board.landing_row(col), empty_rows.last().copied());
        }
    }

    #[test]
    fn test_free_locations_by_row() {
        let board = Board::parse(2, 3, "0,0,0;1,0,2").unwrap();
        assert_eq!(board.free_locations_by_row(), vec![vec![0, 1, 2], vec![1]]);
    }

    #[test]
    fn test_owned_locations() {
        let board = Board::parse(3, 3, "0,0,0;2,0,0;1,1,0").unwrap();

        let ones = board.owned_locations(Cell::One);
        assert_eq!(ones.get(&0), Some(&vec![2]));
        assert_eq!(ones.get(&1), Some(&vec![2]));
        assert_eq!(ones.get(&2), None);

        let free = board.owned_locations(Cell::Empty);
        assert_eq!(free.get(&0), Some(&vec![0]));
        assert_eq!(free.get(&2), Some(&vec![0, 1, 2]));
    }

    #[test]
    fn test_drop_piece() {
        let mut board = Board::default();

        // Drop first piece in column 3
        let row = board.drop_piece(3, Cell::One).unwrap();
        assert_eq!(row, 5); // Should land at bottom
        assert_eq!(board.get(Position::new(5, 3)), Cell::One);

        // Drop second piece in same column
        let row = board.drop_piece(3, Cell::Two).unwrap();
        assert_eq!(row, 4); // Should land on top of first piece
        assert_eq!(board.landing_row(3), Some(3));
    }

    #[test]
    fn test_drop_piece_errors() {
        let mut board = Board::new(2, 2);
        board.drop_piece(0, Cell::One).unwrap();
        board.drop_piece(0, Cell::Two).unwrap();
        assert_eq!(board.drop_piece(0, Cell::One), Err(MoveError::ColumnFull));
        assert_eq!(board.drop_piece(2, Cell::One), Err(MoveError::InvalidColumn));
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::default();
        for col in 0..DEFAULT_COLS {
            for _ in 0..DEFAULT_ROWS {
                board.drop_piece(col, Cell::One).unwrap();
            }
        }
        assert!(board.is_full());
        assert!(board.available_moves().is_empty());
    }

    #[test]
    fn test_valid_location_bounds() {
        let board = Board::new(6, 7);
        assert!(board.is_valid_location(0, 0));
        assert!(board.is_valid_location(5, 6));
        assert!(!board.is_valid_location(-1, 0));
        assert!(!board.is_valid_location(0, 7));
        assert!(!board.is_valid_location(6, 0));
        assert_eq!(board.cell_at(6, 0), None);
    }
}
