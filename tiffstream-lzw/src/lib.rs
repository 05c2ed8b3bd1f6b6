//! # tiffstream-lzw: TIFF/PDF-style LZW compression
//!
//! A streaming encoder and decoder for the variable-width LZW scheme of the
//! TIFF 6.0 specification (pp. 58-63), which is also the form embedded in
//! PDF image streams.
//!
//! ## Wire format
//!
//! - **MSB-first bit order**: codes are packed from the most significant bit
//! - **9-12 bit codes**: the width grows with the dictionary and both sides
//!   bump it in lockstep
//! - **Special codes**: 256 resets the dictionary (ClearCode), 257 marks the
//!   end of a strip or of the data (EndOfInformation), with zero padding to
//!   the next byte boundary after it
//!
//! Two framing dialects are supported, selected by [`Dialect`] on the
//! configuration: strict TIFF (ClearCode and EOI around every 8 KiB strip)
//! and lax PDF (one ClearCode at the start, one EOI at the very end, state
//! carried across strips).
//!
//! ## Example
//!
//! ```rust
//! use tiffstream_lzw::{LzwConfig, compress, decompress};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//! let packed = compress(original, LzwConfig::TIFF).unwrap();
//! let unpacked = decompress(&packed, LzwConfig::TIFF).unwrap();
//! assert_eq!(unpacked, original);
//! ```
//!
//! The encoder and decoder also run directly over [`std::io::Read`] /
//! [`std::io::Write`] pairs; see [`LzwEncoder::encode_stream`] and
//! [`LzwDecoder::decode_stream`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod codestream;
mod config;
mod decoder;
mod dictionary;
mod encoder;
mod error;

pub use codestream::{CodeReader, CodeWriter};
pub use config::{DEFAULT_STRIP_SIZE, Dialect, LzwConfig};
pub use decoder::LzwDecoder;
pub use encoder::LzwEncoder;
pub use error::{LzwError, Result};

/// Compress `data` into an LZW bit stream with the given configuration.
///
/// # Example
///
/// ```rust
/// use tiffstream_lzw::{LzwConfig, compress};
///
/// let packed = compress(b"aaaaaaaaaaaaaaaa", LzwConfig::TIFF).unwrap();
/// assert!(!packed.is_empty());
/// ```
pub fn compress(data: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    let mut encoder = LzwEncoder::new(config)?;
    let mut out = Vec::new();
    encoder.encode_stream(data, &mut out)?;
    Ok(out)
}

/// Decompress an LZW bit stream with the given configuration.
///
/// # Example
///
/// ```rust
/// use tiffstream_lzw::{LzwConfig, compress, decompress};
///
/// let packed = compress(b"Hello, World!", LzwConfig::PDF).unwrap();
/// let unpacked = decompress(&packed, LzwConfig::PDF).unwrap();
/// assert_eq!(unpacked, b"Hello, World!");
/// ```
pub fn decompress(data: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    let mut decoder = LzwDecoder::new(config)?;
    let mut out = Vec::new();
    decoder.decode_stream(data, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_both_dialects() {
        let original = b"TOBEORNOTTOBEORTOBEORNOT";
        for config in [LzwConfig::TIFF, LzwConfig::PDF] {
            let packed = compress(original, config).unwrap();
            let unpacked = decompress(&packed, config).unwrap();
            assert_eq!(unpacked, original);
        }
    }

    #[test]
    fn test_repetitive_input_compresses() {
        let original = vec![b'X'; 1000];
        let packed = compress(&original, LzwConfig::TIFF).unwrap();
        assert!(packed.len() < original.len() / 2);
        assert_eq!(decompress(&packed, LzwConfig::TIFF).unwrap(), original);
    }
}
