use std::collections::BTreeSet;

use super::geometry::LineGeometry;
use crate::error::EngineError;
use crate::game::{Player, Position};

/// Finds forced-win setups: forks through one landing cell (middle traps)
/// and two stacked winning squares in one column (stack traps).
#[derive(Debug, Clone, Copy)]
pub struct TrapAnalyzer<'a> {
    geometry: LineGeometry<'a>,
}

impl<'a> TrapAnalyzer<'a> {
    pub fn new(geometry: LineGeometry<'a>) -> Self {
        TrapAnalyzer { geometry }
    }

    fn follow_up_columns(&self, pos: Position, player: Player) -> Result<Vec<usize>, EngineError> {
        Ok(self
            .geometry
            .follow_up_cells(pos, player)?
            .into_iter()
            .map(|cell| cell.col)
            .collect())
    }

    /// Columns where a disc of `player` opens two different winning gaps at
    /// once, so the opponent can block only one.
    pub fn middle_trap_columns(&self, player: Player) -> Result<BTreeSet<usize>, EngineError> {
        let mut columns = BTreeSet::new();
        for (&col, &row) in self.geometry.board().available_moves() {
            let gaps: BTreeSet<Position> = self
                .geometry
                .follow_up_cells(Position::new(row, col), player)?
                .into_iter()
                .collect();
            if gaps.len() > 1 {
                columns.insert(col);
            }
        }
        Ok(columns)
    }

    /// Columns that spring a stack trap for `player`.
    ///
    /// For each column whose landing cell has an empty cell above it:
    /// - landing cell wins: play the follow-ups of the upper cell, the opponent
    ///   must block below and `player` takes the square above;
    /// - upper cell wins: play the follow-ups of the landing cell, forcing the
    ///   opponent under the winning square;
    /// - otherwise: the follow-ups shared by both cells, which threaten
    ///   whichever of the two the opponent leaves.
    pub fn stack_trap_columns(&self, player: Player) -> Result<BTreeSet<usize>, EngineError> {
        let mut columns = BTreeSet::new();
        for (&col, &row) in self.geometry.board().available_moves() {
            if row == 0 {
                continue;
            }
            let lower = Position::new(row, col);
            let upper = Position::new(row - 1, col);
            let lower_cols = self.follow_up_columns(lower, player)?;
            let upper_cols = self.follow_up_columns(upper, player)?;

            if self.geometry.position_to_win(lower, player)? {
                columns.extend(upper_cols);
            } else if self.geometry.position_to_win(upper, player)? {
                columns.extend(lower_cols);
            } else {
                columns.extend(lower_cols.into_iter().filter(|col| upper_cols.contains(col)));
            }
        }
        Ok(columns)
    }
}
