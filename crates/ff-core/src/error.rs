//! Framework error type.
//!
//! Sub-crates define their own error enums and convert into them via `From`;
//! `CoreError` only covers failures that can occur inside `ff-core` itself.

use thiserror::Error;

/// The error type for `ff-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `ff-core`.
pub type CoreResult<T> = Result<T, CoreError>;
