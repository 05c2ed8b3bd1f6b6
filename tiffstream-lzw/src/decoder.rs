//! LZW decoder.
//!
//! The per-code procedure follows the TIFF 6.0 pseudocode (p. 61), with the
//! in-table and not-yet-in-table branches folded into a single emit/store
//! step. The one legitimate unknown code is the entry being created in this
//! very step; it resolves to the previous string plus its own first byte.

use std::io::{Read, Write};

use log::{debug, trace, warn};

use crate::codestream::CodeReader;
use crate::config::{Dialect, LzwConfig};
use crate::dictionary::DecodeTable;
use crate::error::{LzwError, Result};

/// Outcome of feeding one code to the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Bytes were appended to the output.
    Emitted,
    /// ClearCode reset the table.
    Cleared,
    /// EndOfInformation closed the current strip.
    StripEnd,
}

/// LZW decoder.
///
/// All state (table, code width, previous code) is owned by the instance;
/// each call to [`decode_stream`] or [`decode_codes`] starts a fresh
/// session.
///
/// [`decode_stream`]: LzwDecoder::decode_stream
/// [`decode_codes`]: LzwDecoder::decode_codes
#[derive(Debug)]
pub struct LzwDecoder {
    config: LzwConfig,
    table: DecodeTable,
    bit_length: u8,
    old_code: Option<u16>,
}

impl LzwDecoder {
    /// Create a decoder for `config`.
    pub fn new(config: LzwConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            table: DecodeTable::new(&config),
            bit_length: config.min_bits,
            old_code: None,
            config,
        })
    }

    /// Reset all session state.
    pub fn reset(&mut self) {
        self.table.reset();
        self.bit_length = self.config.min_bits;
        self.old_code = None;
    }

    /// Decode an LZW bit stream from `input` into `output`, returning the
    /// number of bytes written.
    ///
    /// Decoding ends when the input is exhausted. Under the strict dialect
    /// each EndOfInformation closes a strip (the stream must be byte-aligned
    /// there) and decoding resumes on the next strip's ClearCode; under the
    /// lax dialect EOI merely realigns the bit stream.
    pub fn decode_stream<R: Read, W: Write>(&mut self, input: R, mut output: W) -> Result<u64> {
        self.reset();
        let mut reader = CodeReader::new(input, &self.config);
        let mut chunk = Vec::new();
        let mut written = 0u64;
        loop {
            reader.set_bit_length(self.bit_length);
            let Some(code) = reader.next_code()? else {
                break;
            };
            chunk.clear();
            self.process_code(code, &mut chunk)?;
            if !chunk.is_empty() {
                output.write_all(&chunk)?;
                written += chunk.len() as u64;
            }
        }
        output.flush()?;
        Ok(written)
    }

    /// Decode a raw sequence of codes, without any bit-level framing.
    ///
    /// Under the strict dialect an EndOfInformation code terminates the
    /// sequence; under the lax dialect it is skipped. This is the natural
    /// surface for code streams quoted in references.
    pub fn decode_codes<I>(&mut self, codes: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = u16>,
    {
        self.reset();
        let mut out = Vec::new();
        for code in codes {
            let step = self.process_code(code, &mut out)?;
            if step == Step::StripEnd && self.config.dialect == Dialect::StrictTiff {
                break;
            }
        }
        Ok(out)
    }

    fn process_code(&mut self, code: u16, out: &mut Vec<u8>) -> Result<Step> {
        if self.config.special_codes && code == self.config.clear_code() {
            trace!("ClearCode: resetting table and code width");
            self.table.reset();
            self.bit_length = self.config.min_bits;
            self.old_code = None;
            return Ok(Step::Cleared);
        }
        if self.config.special_codes && code == self.config.eoi_code() {
            trace!("EndOfInformation: resetting code width");
            self.bit_length = self.config.min_bits;
            return Ok(Step::StripEnd);
        }

        let next = self.table.next_code();
        if self.table.contains(code) {
            let first = self.table.append_string(code, out);
            if let Some(old) = self.old_code
                && let Some(added) = self.table.add(old, first)
            {
                self.widen_after(added);
            }
        } else if code == next
            && let Some(old) = self.old_code
        {
            // The code refers to the entry formed in this very step: the
            // previous string extended by its own first byte.
            let first = self.table.first_byte(old);
            match self.table.add(old, first) {
                Some(added) => {
                    self.table.append_string(added, out);
                    self.widen_after(added);
                }
                None => {
                    return Err(LzwError::InvalidCode {
                        code,
                        table_size: next,
                    });
                }
            }
        } else {
            warn!("code {code} is not decodable here; input may be PackBits data, not LZW");
            return Err(LzwError::InvalidCode {
                code,
                table_size: next,
            });
        }
        self.old_code = Some(code);
        Ok(Step::Emitted)
    }

    /// Widen as soon as the table index forces a wider representation, i.e.
    /// right after entries 510, 1022 and 2046 are stored.
    fn widen_after(&mut self, added: u16) {
        let next = u32::from(added) + 1;
        if self.bit_length < self.config.max_bits && bit_width(next + 1) > bit_width(next) {
            self.bit_length += 1;
            debug!(
                "reading {}-bit codes after storing entry {}",
                self.bit_length, added
            );
        }
    }
}

fn bit_width(value: u32) -> u32 {
    u32::BITS - value.leading_zeros()
}
