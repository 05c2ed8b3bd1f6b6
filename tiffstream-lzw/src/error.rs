//! LZW-specific error types.

use thiserror::Error;

/// LZW compression/decompression errors.
#[derive(Debug, Error)]
pub enum LzwError {
    /// Decoder received a code beyond the next free table slot.
    ///
    /// The only code allowed to reference a missing entry is the one equal
    /// to the current table size, which refers to the entry being formed in
    /// the same step. Anything past that is not LZW output; PackBits data is
    /// a common source of such streams.
    #[error("invalid LZW code {code} with table size {table_size}; input may be PackBits data")]
    InvalidCode {
        /// The offending code.
        code: u16,
        /// Table size at the time the code was read.
        table_size: u16,
    },

    /// Nonzero bits were left in the bit buffer after EndOfInformation.
    ///
    /// TIFF 6.0 requires the stream to be byte-aligned after EOI, so the
    /// bits between EOI and the next byte boundary must all be zero.
    #[error("nonzero bits remain after EndOfInformation code")]
    UnalignedEoi,

    /// Code widths outside the range supported by the format.
    #[error("invalid code width range {min}..={max} (must lie within 9..=12)")]
    InvalidBitRange {
        /// Configured minimum width.
        min: u8,
        /// Configured maximum width.
        max: u8,
    },

    /// I/O error from the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for LZW operations.
pub type Result<T> = std::result::Result<T, LzwError>;
