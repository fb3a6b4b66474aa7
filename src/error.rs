//! Error taxonomy for the repair pipeline and its callers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixError {
    /// A normalizer met input it cannot safely transform. The only current
    /// emitter is an unclosed `/* ... */` comment.
    #[error("{message} at position {position}")]
    Pipeline { message: String, position: usize },

    /// `on_repair` was [`OnRepair::Error`](crate::OnRepair::Error) and the
    /// pipeline recorded at least one repair; carries the first repair's
    /// coordinates and message.
    #[error("repair needed at line {line}, column {column}: {message}")]
    RepairNeeded {
        line: usize,
        column: usize,
        message: String,
    },

    /// The text was still invalid JSON after normalization. The strict
    /// parser's diagnostic is passed through unchanged.
    #[error("invalid JSON after repair: {0}")]
    Parse(#[from] serde_json::Error),

    /// An `on_repair` spelling that is not `ignore`, `warn`, or `error`.
    #[error("invalid on_repair value: {0:?}")]
    InvalidOption(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
