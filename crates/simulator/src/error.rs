//! Error types for world loading and simulation runs.
use std::path::PathBuf;

use navigator::Position;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

/// Reasons a world file is rejected.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("failed to read world file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("world contains no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid cell {symbol:?} at row {row}, column {column}")]
    InvalidCell {
        row: usize,
        column: usize,
        symbol: char,
    },

    #[error("world has no agent start marker '@'")]
    MissingStart,

    #[error("world has more than one start marker: {first} and {second}")]
    MultipleStarts { first: Position, second: Position },

    #[error("world has no finish marker 'r'")]
    MissingFinish,
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    World(#[from] WorldError),

    #[error("failed to write simulation output")]
    Io(#[from] std::io::Error),

    #[error("failed to encode turn record")]
    Encode(#[from] serde_json::Error),

    #[error("batch worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("batch worker pool closed")]
    WorkersClosed,
}
