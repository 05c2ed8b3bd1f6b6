//! PackBits-specific error types.

use thiserror::Error;

/// PackBits packing/unpacking errors.
#[derive(Debug, Error)]
pub enum PackBitsError {
    /// The input ended in the middle of a run.
    #[error("unexpected end of input inside a {expected}-byte run")]
    UnexpectedEof {
        /// Length the run's header announced.
        expected: usize,
    },

    /// I/O error from the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for PackBits operations.
pub type Result<T> = std::result::Result<T, PackBitsError>;
