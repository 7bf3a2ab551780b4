//! Error types for the tile-slide crate

use thiserror::Error;

/// Main error type for the tile-slide crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PuzzleError {
    #[error("layout is empty")]
    EmptyLayout,

    #[error("row {row} of layout '{layout}' has no tiles")]
    EmptyRow { row: usize, layout: String },

    #[error("row {row} has {got} tiles, expected {expected} in '{layout}'")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
        layout: String,
    },

    #[error("invalid token '{token}' at row {row}, column {col}")]
    InvalidToken { token: String, row: usize, col: usize },

    #[error("layout '{layout}' has no empty cell (marker '{marker}')")]
    MissingEmpty { layout: String, marker: String },

    #[error("layout '{layout}' has {count} empty cells (marker '{marker}'), expected one")]
    MultipleEmpty {
        layout: String,
        marker: String,
        count: usize,
    },

    #[error("tile {value} is out of range 1..={max}")]
    TileOutOfRange { value: u32, max: u32 },

    #[error("tile {value} appears more than once")]
    DuplicateTile { value: u32 },

    #[error("board is {got_rows}x{got_cols} but target is {rows}x{cols}")]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        got_rows: usize,
        got_cols: usize,
    },

    #[error("board '{board}' cannot reach the target")]
    Unsolvable { board: String },

    #[error("frontier exhausted after expanding {expanded} nodes without reaching the target")]
    SearchExhausted { expanded: usize },

    #[error("expansion limit of {limit} nodes reached")]
    ExpansionLimit { limit: usize },

    #[error("search cancelled after expanding {expanded} nodes")]
    Cancelled { expanded: usize },

    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using the crate's error type
pub type Result<T> = std::result::Result<T, PuzzleError>;

impl From<toml::de::Error> for PuzzleError {
    fn from(err: toml::de::Error) -> Self {
        PuzzleError::Config {
            message: err.to_string(),
        }
    }
}
