use super::agent::{Agent, Decision};
use super::pipeline::MoveFilter;
use crate::config::EngineConfig;
use crate::error::{ConfigError, EngineError};
use crate::game::{Board, Player};

/// Plays for one side: win, block, then set and deny traps.
#[derive(Debug, Clone)]
pub struct TrapAgent {
    player: Player,
    rows: usize,
    cols: usize,
}

impl TrapAgent {
    pub fn new(player: Player, rows: usize, cols: usize) -> Self {
        TrapAgent { player, rows, cols }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(TrapAgent::new(
            config.player()?,
            config.board.rows,
            config.board.columns,
        ))
    }

    pub fn player(&self) -> Player {
        self.player
    }

    /// Pick a column for `board`, reporting which step decided it.
    /// The board must have the dimensions the agent was built with.
    pub fn decide(&self, board: &Board) -> Result<Decision, EngineError> {
        if board.rows() != self.rows || board.cols() != self.cols {
            return Err(EngineError::BoardSize {
                expected_rows: self.rows,
                expected_cols: self.cols,
                rows: board.rows(),
                cols: board.cols(),
            });
        }
        MoveFilter::choose(board, self.player)
    }

    /// Rebuild the board from an encoding and pick a column for it.
    pub fn decide_encoded(&self, encoding: &str) -> Result<Decision, EngineError> {
        let board = Board::parse(self.rows, self.cols, encoding)?;
        self.decide(&board)
    }
}

impl Agent for TrapAgent {
    fn select_column(&mut self, board: &Board) -> Result<usize, EngineError> {
        self.decide(board).map(|decision| decision.column)
    }

    fn name(&self) -> &str {
        "Trap"
    }
}
