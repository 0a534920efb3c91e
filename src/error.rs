use std::path::PathBuf;

/// Errors raised while reading a board encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("board encoding has {found} rows, expected {expected}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid cell value '{token}' at ({row}, {col})")]
    InvalidToken {
        row: usize,
        col: usize,
        token: String,
    },

    #[error("disc at ({row}, {col}) is floating above an empty cell")]
    FloatingDisc { row: usize, col: usize },
}

/// Errors that can occur while choosing a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("location ({row}, {col}) is outside the board")]
    InvalidLocation { row: isize, col: isize },

    #[error("no available move: every column is full")]
    NoAvailableMove,

    #[error("board is {rows}x{cols}, engine expects {expected_rows}x{expected_cols}")]
    BoardSize {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
