//! Grid-subsystem error type.

use thiserror::Error;

/// Errors produced while loading or validating a grid asset directory.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("missing asset: {0}")]
    MissingAsset(String),

    #[error("shape mismatch: {what} is {got:?}, expected {expected:?}")]
    ShapeMismatch {
        what: String,
        got: (usize, usize),
        expected: (usize, usize),
    },

    #[error("cell class out of range: {0}")]
    ClassOutOfRange(u8),

    #[error("malformed .npy header in {path}: {reason}")]
    NpyHeader { path: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type GridResult<T> = Result<T, GridError>;
