//! Errors surfaced at the encoder/IO boundary.
//!
//! This is the only recoverable error surface in the crate (spec §7):
//! the solver core never returns `Result` — trivial UNSAT is reported
//! through `SolveStatus::Unsat`, not an error.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("puzzle file is empty")]
    EmptyGrid,

    #[error("row {row} has {len} values, expected {expected} (grid must be N x N)")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("grid size {0} is not a perfect square (N must be 9, 16, 25, ...)")]
    NotPerfectSquare(usize),

    #[error("invalid token {0:?}: expected a non-negative integer")]
    InvalidToken(String),

    #[error("value {value} at row {row}, column {col} is out of range [0, {max}]")]
    OutOfRange {
        value: usize,
        row: usize,
        col: usize,
        max: usize,
    },

    #[error("failed to read puzzle file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
