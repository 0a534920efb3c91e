//! # Trap Connect Four
//!
//! A heuristic Connect Four engine. Given a board snapshot it wins when it
//! can, blocks when it must, and otherwise narrows the open columns through
//! threat-parity and trap heuristics.
//!
//! ## Modules
//!
//! - [`game`]: board, discs, players and the four-cell lines they form
//! - [`ai`]: line geometry, threat and trap analysis, the move filter and the agent
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
