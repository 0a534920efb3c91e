use serde::Serialize;

use crate::error::EngineError;
use crate::game::Board;

/// Why a column was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reason {
    /// The column completes a line for the mover.
    Win,
    /// The column stops the opponent completing a line.
    Block,
    /// Chosen by the filter heuristics among the surviving candidates.
    Heuristic { candidates: Vec<usize> },
}

/// A chosen column and the step that settled it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub column: usize,
    pub reason: Reason,
}

impl Decision {
    pub fn new(column: usize, reason: Reason) -> Self {
        Decision { column, reason }
    }
}

/// Interface for anything that picks a column for a board snapshot.
pub trait Agent {
    /// Select a column to play on `board`.
    fn select_column(&mut self, board: &Board) -> Result<usize, EngineError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
