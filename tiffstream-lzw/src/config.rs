//! LZW configuration: code widths, special codes, and strip framing dialect.

use crate::error::{LzwError, Result};

/// Default uncompressed strip size, per the 8K recommendation in TIFF 6.0.
pub const DEFAULT_STRIP_SIZE: usize = 8192;

/// Strip framing dialect of the LZW bit stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// TIFF 6.0 framing: every strip begins with ClearCode, ends with
    /// EndOfInformation, and the stream is byte-aligned after EOI.
    StrictTiff,
    /// Framing observed in PDF image streams: a single ClearCode at the
    /// start (plus one after each full table), a single EndOfInformation at
    /// the end of all data, and dictionary state carried across strips.
    LaxPdf,
}

/// LZW configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwConfig {
    /// Minimum code size in bits (typically 9).
    pub min_bits: u8,
    /// Maximum code size in bits (typically 12).
    pub max_bits: u8,
    /// Whether codes 256/257 are reserved for ClearCode and EndOfInformation.
    ///
    /// Raw code sequences (e.g. the Rosetta Code examples) reserve nothing,
    /// so their table entries start right at 256.
    pub special_codes: bool,
    /// Strip framing dialect.
    pub dialect: Dialect,
    /// Uncompressed strip size; the strict dialect compresses each strip
    /// independently.
    pub strip_size: usize,
}

impl LzwConfig {
    /// Strict TIFF 6.0 configuration: 9-12 bit codes, reserved special
    /// codes, ClearCode/EOI per strip.
    pub const TIFF: Self = Self {
        min_bits: 9,
        max_bits: 12,
        special_codes: true,
        dialect: Dialect::StrictTiff,
        strip_size: DEFAULT_STRIP_SIZE,
    };

    /// Lax PDF configuration: same code widths, but one ClearCode at the
    /// start and one EOI at the end of all data.
    pub const PDF: Self = Self {
        dialect: Dialect::LaxPdf,
        ..Self::TIFF
    };

    /// Check that the configured widths fit the wire format.
    pub fn validate(&self) -> Result<()> {
        if self.min_bits < 9 || self.min_bits > self.max_bits || self.max_bits > 12 {
            return Err(LzwError::InvalidBitRange {
                min: self.min_bits,
                max: self.max_bits,
            });
        }
        Ok(())
    }

    /// The ClearCode value (256 for 9-bit minimum width).
    pub fn clear_code(&self) -> u16 {
        1 << (self.min_bits - 1)
    }

    /// The EndOfInformation code value (ClearCode + 1).
    pub fn eoi_code(&self) -> u16 {
        self.clear_code() + 1
    }

    /// The largest code representable at the maximum width.
    pub fn max_code(&self) -> u16 {
        (1 << self.max_bits) - 1
    }
}
