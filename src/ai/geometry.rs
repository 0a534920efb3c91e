use std::collections::BTreeSet;

use crate::error::EngineError;
use crate::game::{Board, Cell, Line, Player, Position, WIN_LENGTH};

/// The four axes a line can run along, as (row step, col step):
/// horizontal, vertical, `\` diagonal and `/` diagonal.
const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// A scan never walks further than this from its origin, so every window it
/// produces contains the origin.
const MAX_REACH: usize = WIN_LENGTH - 1;

/// Line and win-window queries over a board.
#[derive(Debug, Clone, Copy)]
pub struct LineGeometry<'a> {
    board: &'a Board,
}

impl<'a> LineGeometry<'a> {
    pub fn new(board: &'a Board) -> Self {
        LineGeometry { board }
    }

    pub fn board(&self) -> &'a Board {
        self.board
    }

    fn check_location(&self, pos: Position) -> Result<(), EngineError> {
        if self.board.contains(pos) {
            Ok(())
        } else {
            Err(EngineError::InvalidLocation {
                row: pos.row as isize,
                col: pos.col as isize,
            })
        }
    }

    /// Number of steps a scan from `origin` can take in one direction.
    ///
    /// A step is allowed onto an empty cell or a cell of the scan's owner. An
    /// empty origin has no owner yet and adopts the first disc it meets, so the
    /// extent covers the longest run either side could use through `origin`.
    fn reach(&self, origin: Position, d_row: isize, d_col: isize) -> usize {
        let mut owner = self.board.get(origin);
        let mut steps = 0;
        while steps < MAX_REACH {
            let Some(next) = origin
                .offset(d_row, d_col, steps as isize + 1)
                .filter(|&pos| self.board.contains(pos))
            else {
                break;
            };
            let cell = self.board.get(next);
            if cell.is_empty() || cell == owner {
                steps += 1;
            } else if owner.is_empty() {
                owner = cell;
                steps += 1;
            } else {
                break;
            }
        }
        steps
    }

    /// Farthest cell reachable from `origin` walking by `(d_row, d_col)`.
    pub fn scan_direction(
        &self,
        origin: Position,
        d_row: isize,
        d_col: isize,
    ) -> Result<Position, EngineError> {
        self.check_location(origin)?;
        let steps = self.reach(origin, d_row, d_col);
        Ok(step(origin, d_row, d_col, steps))
    }

    /// Every four-cell window through `pos` that is not cut by a disc of the
    /// side opposing the run it belongs to.
    pub fn possible_wins(&self, pos: Position) -> Result<BTreeSet<Line>, EngineError> {
        self.check_location(pos)?;
        let mut wins = BTreeSet::new();
        for (d_row, d_col) in AXES {
            let back = self.reach(pos, -d_row, -d_col);
            let forward = self.reach(pos, d_row, d_col);
            let length = back + forward + 1;
            if length < WIN_LENGTH {
                continue;
            }
            let start = step(pos, -d_row, -d_col, back);
            for offset in 0..=(length - WIN_LENGTH) {
                let cells = std::array::from_fn(|i| step(start, d_row, d_col, offset + i));
                wins.insert(Line::new(cells));
            }
        }
        Ok(wins)
    }

    /// `possible_wins` restricted to lines holding no disc of `player`'s opponent.
    pub fn possible_wins_for(
        &self,
        pos: Position,
        player: Player,
    ) -> Result<BTreeSet<Line>, EngineError> {
        let blocker = player.other().to_cell();
        let mut wins = self.possible_wins(pos)?;
        wins.retain(|line| self.count_tokens(line, blocker) == 0);
        Ok(wins)
    }

    /// True when `pos` is empty and a disc of `player` there would complete a line.
    pub fn position_to_win(&self, pos: Position, player: Player) -> Result<bool, EngineError> {
        self.check_location(pos)?;
        if !self.board.get(pos).is_empty() {
            return Ok(false);
        }
        let own = player.to_cell();
        Ok(self
            .possible_wins_for(pos, player)?
            .iter()
            .any(|line| self.count_tokens(line, own) == WIN_LENGTH - 1))
    }

    /// True when the cell directly above `pos` wins for `player`. Playing `pos`
    /// would hand that square over.
    pub fn below_is_winning_position(
        &self,
        pos: Position,
        player: Player,
    ) -> Result<bool, EngineError> {
        self.check_location(pos)?;
        if pos.row == 0 {
            return Ok(false);
        }
        self.position_to_win(Position::new(pos.row - 1, pos.col), player)
    }

    /// Cells of `line` holding `cell`. `Cell::Empty` counts the free ones.
    pub fn count_tokens(&self, line: &Line, cell: Cell) -> usize {
        line.cells()
            .iter()
            .filter(|&&pos| self.board.get(pos) == cell)
            .count()
    }

    /// The only other playable gap in `line`, ignoring `exclude`.
    ///
    /// `None` when there are zero or several playable gaps, or when some other
    /// empty cell of the line cannot be played yet.
    pub fn find_unique_open_cell(&self, line: &Line, exclude: Position) -> Option<Position> {
        let mut open = None;
        for &pos in line.cells().iter().filter(|&&pos| pos != exclude) {
            if self.board.is_available(pos) {
                if open.is_some() {
                    return None;
                }
                open = Some(pos);
            } else if self.board.get(pos).is_empty() {
                return None;
            }
        }
        open
    }

    /// For each line `player` could still complete through `pos`, the single
    /// playable gap left in it. A cell appears once per line it closes.
    pub fn follow_up_cells(
        &self,
        pos: Position,
        player: Player,
    ) -> Result<Vec<Position>, EngineError> {
        Ok(self
            .possible_wins_for(pos, player)?
            .iter()
            .filter_map(|line| self.find_unique_open_cell(line, pos))
            .collect())
    }
}

/// `pos` moved `n` steps along `(d_row, d_col)`. Callers only pass in-bounds walks.
fn step(pos: Position, d_row: isize, d_col: isize, n: usize) -> Position {
    let n = n as isize;
    Position::new(
        (pos.row as isize + d_row * n) as usize,
        (pos.col as isize + d_col * n) as usize,
    )
}
