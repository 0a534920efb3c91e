//! Board representation: cells, players, coordinates and four-cell lines.

mod board;
mod line;
mod player;

pub use board::{
    Board, Cell, MoveError, CELL_DELIMITER, DEFAULT_COLS, DEFAULT_ROWS, ROW_DELIMITER,
};
pub use line::{Line, Position, WIN_LENGTH};
pub use player::Player;
