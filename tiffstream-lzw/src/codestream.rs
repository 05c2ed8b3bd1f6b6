//! Variable-width code I/O for the LZW bit stream.
//!
//! TIFF LZW packs codes MSB-first: within a byte the first code occupies the
//! high bits, and codes straddle byte boundaries as needed. The reader and
//! writer convert between a byte-oriented transport and a code-oriented one.
//! Neither knows anything about the code table; the current code width is
//! owned by the caller and pushed down through
//! [`CodeReader::set_bit_length`] / [`CodeWriter::set_bit_length`].

use std::io::{self, Read, Write};

use crate::config::LzwConfig;
use crate::error::{LzwError, Result};

/// Pull-based source of variable-width codes over a byte stream.
///
/// Codes are read MSB-first at the current bit width. After an
/// EndOfInformation code the remaining buffered bits must all be zero (TIFF
/// strips are byte-aligned after EOI) and are discarded.
#[derive(Debug)]
pub struct CodeReader<R: Read> {
    reader: R,
    /// Pending bits, MSB-first in the low `bits` positions.
    buffer: u32,
    bits: u8,
    bit_length: u8,
    min_bits: u8,
    max_bits: u8,
    /// EndOfInformation code, when special codes are in use.
    eoi_code: Option<u16>,
    total_bits_read: u64,
}

impl<R: Read> CodeReader<R> {
    /// Create a reader over `reader`, starting at the minimum code width.
    pub fn new(reader: R, config: &LzwConfig) -> Self {
        Self {
            reader,
            buffer: 0,
            bits: 0,
            bit_length: config.min_bits,
            min_bits: config.min_bits,
            max_bits: config.max_bits,
            eoi_code: config.special_codes.then(|| config.eoi_code()),
            total_bits_read: 0,
        }
    }

    /// Current code width in bits.
    pub fn bit_length(&self) -> u8 {
        self.bit_length
    }

    /// Set the width used for the next code.
    pub fn set_bit_length(&mut self, bits: u8) {
        debug_assert!(bits >= self.min_bits && bits <= self.max_bits);
        self.bit_length = bits;
    }

    /// Total bits consumed so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Read the next code, or `None` once the input is exhausted.
    ///
    /// At end of input an all-zero residue (TIFF pad bits) is dropped; a
    /// residue with a set bit is zero-filled up to one final code so that no
    /// part of the stream is lost.
    pub fn next_code(&mut self) -> Result<Option<u16>> {
        while self.bits < self.bit_length {
            match self.read_byte()? {
                Some(byte) => {
                    self.buffer = (self.buffer << 8) | u32::from(byte);
                    self.bits += 8;
                }
                None => {
                    if self.bits == 0 || self.buffer == 0 {
                        return Ok(None);
                    }
                    let pad = self.bit_length - self.bits;
                    self.buffer <<= pad;
                    self.bits = self.bit_length;
                }
            }
        }

        let shift = self.bits - self.bit_length;
        let code = ((self.buffer >> shift) & ((1u32 << self.bit_length) - 1)) as u16;
        self.bits -= self.bit_length;
        self.buffer &= (1u32 << self.bits) - 1;
        self.total_bits_read += u64::from(self.bit_length);

        if Some(code) == self.eoi_code {
            if self.buffer != 0 {
                return Err(LzwError::UnalignedEoi);
            }
            self.bits = 0;
        }
        Ok(Some(code))
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Push-based sink accepting variable-width codes over a byte stream.
///
/// Whole bytes are emitted as soon as eight bits accumulate; [`align`]
/// zero-pads to the next byte boundary, as required after EndOfInformation.
///
/// [`align`]: CodeWriter::align
#[derive(Debug)]
pub struct CodeWriter<W: Write> {
    writer: W,
    /// Pending bits, MSB-first in the low `bits` positions.
    buffer: u32,
    bits: u8,
    bit_length: u8,
    min_bits: u8,
    max_bits: u8,
    total_bits_written: u64,
}

impl<W: Write> CodeWriter<W> {
    /// Create a writer over `writer`, starting at the minimum code width.
    pub fn new(writer: W, config: &LzwConfig) -> Self {
        Self {
            writer,
            buffer: 0,
            bits: 0,
            bit_length: config.min_bits,
            min_bits: config.min_bits,
            max_bits: config.max_bits,
            total_bits_written: 0,
        }
    }

    /// Current code width in bits.
    pub fn bit_length(&self) -> u8 {
        self.bit_length
    }

    /// Set the width used for the next code.
    pub fn set_bit_length(&mut self, bits: u8) {
        debug_assert!(bits >= self.min_bits && bits <= self.max_bits);
        self.bit_length = bits;
    }

    /// Total bits pushed so far, pad bits included.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Append one code at the current width.
    pub fn write_code(&mut self, code: u16) -> Result<()> {
        debug_assert!(u32::from(code) < 1 << self.bit_length);
        self.buffer = (self.buffer << self.bit_length) | u32::from(code);
        self.bits += self.bit_length;
        self.total_bits_written += u64::from(self.bit_length);
        self.drain()
    }

    /// Zero-pad to the next byte boundary and emit the final byte.
    pub fn align(&mut self) -> Result<()> {
        if self.bits > 0 {
            let pad = 8 - self.bits;
            self.buffer <<= pad;
            self.bits = 8;
            self.total_bits_written += u64::from(pad);
            self.drain()?;
        }
        Ok(())
    }

    /// Align to a byte boundary and flush the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.align()?;
        self.writer.flush()?;
        Ok(())
    }

    fn drain(&mut self) -> Result<()> {
        while self.bits >= 8 {
            let byte = (self.buffer >> (self.bits - 8)) as u8;
            self.writer.write_all(&[byte])?;
            self.bits -= 8;
            self.buffer &= (1u32 << self.bits) - 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(data: &[u8]) -> CodeReader<&[u8]> {
        CodeReader::new(data, &LzwConfig::TIFF)
    }

    fn drain_codes<R: Read>(reader: &mut CodeReader<R>) -> Vec<u16> {
        let mut codes = Vec::new();
        while let Some(code) = reader.next_code().unwrap() {
            codes.push(code);
        }
        codes
    }

    #[test]
    fn test_nine_bytes_yield_eight_codes() {
        // 72 bits of alternating 01 split cleanly into eight 9-bit codes.
        let mut r = reader(b"UUUUUUUUU");
        assert_eq!(drain_codes(&mut r), [170, 341, 170, 341, 170, 341, 170, 341]);
    }

    #[test]
    fn test_final_partial_code_zero_filled() {
        // 64 bits leave a lone set bit after seven codes; zero-filling it
        // produces 0b100000000.
        let mut r = reader(b"UUUUUUUU");
        assert_eq!(drain_codes(&mut r), [170, 341, 170, 341, 170, 341, 170, 256]);
    }

    #[test]
    fn test_zero_residue_dropped() {
        // One 9-bit code, then seven pad zeros.
        let mut r = reader(&[0x80, 0x00]);
        assert_eq!(drain_codes(&mut r), [256]);
        assert_eq!(r.bits_read(), 9);
    }

    #[test]
    fn test_eoi_resynchronizes_to_byte_boundary() {
        let mut data = Vec::new();
        {
            let mut w = CodeWriter::new(&mut data, &LzwConfig::TIFF);
            w.write_code(256).unwrap();
            w.write_code(257).unwrap();
            w.align().unwrap();
            w.write_code(256).unwrap();
            w.flush().unwrap();
        }
        let mut r = reader(&data);
        assert_eq!(r.next_code().unwrap(), Some(256));
        assert_eq!(r.next_code().unwrap(), Some(257));
        // Pad bits after EOI were dropped; the next code starts on the
        // following byte boundary.
        assert_eq!(r.next_code().unwrap(), Some(256));
        assert_eq!(r.next_code().unwrap(), None);
    }

    #[test]
    fn test_eoi_rejects_nonzero_residue() {
        // 100000001 (EOI) followed by a set bit.
        let mut r = reader(&[0x80, 0xC0]);
        assert!(matches!(r.next_code(), Err(LzwError::UnalignedEoi)));
    }

    #[test]
    fn test_writer_packs_msb_first() {
        // Example from p. 60 of TIFF 6.0.
        let mut out = Vec::new();
        let mut w = CodeWriter::new(&mut out, &LzwConfig::TIFF);
        for code in [7u16, 258, 8, 8, 258, 6] {
            w.write_code(code).unwrap();
        }
        w.flush().unwrap();
        assert_eq!(out, b"\x03\xc0\x81\x00\x88\x10\x18");
    }

    #[test]
    fn test_writer_reader_roundtrip_with_width_changes() {
        let mut out = Vec::new();
        let mut w = CodeWriter::new(&mut out, &LzwConfig::TIFF);
        w.write_code(300).unwrap();
        w.write_code(511).unwrap();
        w.set_bit_length(10);
        w.write_code(700).unwrap();
        w.set_bit_length(12);
        w.write_code(4094).unwrap();
        w.flush().unwrap();

        let mut r = reader(&out);
        assert_eq!(r.next_code().unwrap(), Some(300));
        assert_eq!(r.next_code().unwrap(), Some(511));
        r.set_bit_length(10);
        assert_eq!(r.next_code().unwrap(), Some(700));
        r.set_bit_length(12);
        assert_eq!(r.next_code().unwrap(), Some(4094));
    }

    #[test]
    fn test_empty_input() {
        let mut r = reader(&[]);
        assert_eq!(r.next_code().unwrap(), None);
    }
}
