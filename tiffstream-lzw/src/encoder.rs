//! LZW encoder.
//!
//! The byte loop is the TIFF 6.0 pseudocode (p. 58): grow the prefix while
//! it matches a table entry, otherwise emit the prefix's code and store the
//! extended string. Code-width bumps are driven by the number of codes
//! written since the last ClearCode, which is what keeps the decoder's
//! reading width in lockstep even across the final code of a strip
//! (TIFF 6.0 p. 60).

use std::io::{self, Read, Write};

use log::{debug, trace};

use crate::codestream::CodeWriter;
use crate::config::{Dialect, LzwConfig};
use crate::dictionary::EncodeTable;
use crate::error::Result;

/// LZW encoder.
///
/// All state (table, prefix, code width, written-code counter) is owned by
/// the instance; each call to [`encode_stream`] starts a fresh session.
///
/// [`encode_stream`]: LzwEncoder::encode_stream
#[derive(Debug)]
pub struct LzwEncoder {
    config: LzwConfig,
    table: EncodeTable,
    /// Longest match so far; carried across strips under the lax dialect.
    prefix: Vec<u8>,
    bit_length: u8,
    /// Codes written since the last ClearCode, counted from the 256 root
    /// entries so the `+ 2` bump threshold matches the decoder's table.
    written: u32,
}

impl LzwEncoder {
    /// Create an encoder for `config`.
    pub fn new(config: LzwConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            table: EncodeTable::new(&config),
            prefix: Vec::new(),
            bit_length: config.min_bits,
            written: u32::from(config.clear_code()),
            config,
        })
    }

    /// Reset all session state.
    pub fn reset(&mut self) {
        self.reset_generation();
        self.prefix.clear();
    }

    /// Encode raw bytes from `input` into an LZW bit stream on `output`,
    /// returning the number of bytes written.
    ///
    /// The strict dialect compresses each strip independently (ClearCode,
    /// codes, EndOfInformation, zero padding to the byte boundary); the lax
    /// dialect opens with one ClearCode, carries the dictionary and prefix
    /// across strip boundaries, and closes with a single EndOfInformation.
    pub fn encode_stream<R: Read, W: Write>(&mut self, mut input: R, output: W) -> Result<u64> {
        self.reset();
        let mut sink = CodeWriter::new(output, &self.config);
        match self.config.dialect {
            Dialect::StrictTiff => self.encode_strips(&mut input, &mut sink)?,
            Dialect::LaxPdf => self.encode_continuous(&mut input, &mut sink)?,
        }
        sink.flush()?;
        Ok(sink.bits_written() / 8)
    }

    fn encode_strips<R: Read, W: Write>(
        &mut self,
        input: &mut R,
        sink: &mut CodeWriter<W>,
    ) -> Result<()> {
        let mut strip = vec![0u8; self.config.strip_size];
        let mut first = true;
        loop {
            let filled = read_full(input, &mut strip)?;
            if filled == 0 && !first {
                break;
            }
            first = false;
            trace!("compressing a {filled}-byte strip");
            self.begin_generation(sink)?;
            for &byte in &strip[..filled] {
                self.push_byte(sink, byte)?;
            }
            self.end_strip(sink)?;
            if filled < strip.len() {
                break;
            }
        }
        Ok(())
    }

    fn encode_continuous<R: Read, W: Write>(
        &mut self,
        input: &mut R,
        sink: &mut CodeWriter<W>,
    ) -> Result<()> {
        self.begin_generation(sink)?;
        let mut buf = vec![0u8; self.config.strip_size];
        loop {
            let filled = read_full(input, &mut buf)?;
            for &byte in &buf[..filled] {
                self.push_byte(sink, byte)?;
            }
            if filled < buf.len() {
                break;
            }
        }
        self.end_strip(sink)
    }

    /// Feed one input byte through the prefix-match loop.
    fn push_byte<W: Write>(&mut self, sink: &mut CodeWriter<W>, byte: u8) -> Result<()> {
        self.prefix.push(byte);
        if self.table.contains(&self.prefix) {
            return Ok(());
        }
        self.prefix.pop();

        let code = self
            .table
            .get(&self.prefix)
            .expect("prefix was matched against the table when it was formed");
        self.emit(sink, code)?;

        if self.config.special_codes && self.table.next_code() == self.config.max_code() {
            // The next entry would take the last representable code; clear
            // instead, at the width the decoder is still reading.
            debug!(
                "table full at {} codes written, emitting ClearCode",
                self.written
            );
            self.emit(sink, self.config.clear_code())?;
            self.reset_generation();
        } else if !self.table.is_full() {
            self.prefix.push(byte);
            self.table.add(self.prefix.clone());
            self.prefix.pop();
        }

        self.prefix.clear();
        self.prefix.push(byte);
        Ok(())
    }

    /// Reset table, width and counter, then write the opening ClearCode.
    fn begin_generation<W: Write>(&mut self, sink: &mut CodeWriter<W>) -> Result<()> {
        self.reset_generation();
        if self.config.special_codes {
            self.emit(sink, self.config.clear_code())?;
        }
        Ok(())
    }

    /// Flush the pending prefix, write EndOfInformation and pad to the byte
    /// boundary.
    fn end_strip<W: Write>(&mut self, sink: &mut CodeWriter<W>) -> Result<()> {
        if !self.prefix.is_empty() {
            let code = self
                .table
                .get(&self.prefix)
                .expect("prefix was matched against the table when it was formed");
            self.emit(sink, code)?;
            self.prefix.clear();
        }
        if self.config.special_codes {
            self.emit(sink, self.config.eoi_code())?;
        }
        sink.align()
    }

    fn reset_generation(&mut self) {
        self.table.reset();
        self.bit_length = self.config.min_bits;
        self.written = u32::from(self.config.clear_code());
    }

    /// Write one code and apply the codes-written bump rule.
    fn emit<W: Write>(&mut self, sink: &mut CodeWriter<W>, code: u16) -> Result<()> {
        sink.set_bit_length(self.bit_length);
        sink.write_code(code)?;
        if self.config.special_codes && code == self.config.clear_code() {
            self.written = u32::from(self.config.clear_code());
            return Ok(());
        }
        self.written += 1;
        let offset = if self.config.special_codes { 2 } else { 0 };
        if self.bit_length < self.config.max_bits && self.written + offset == 1 << self.bit_length {
            self.bit_length += 1;
            debug!(
                "writing {}-bit codes after {} codes",
                self.bit_length, self.written
            );
        }
        Ok(())
    }
}

/// Fill `buf` as far as the input allows; a short count means end of input.
fn read_full<R: Read>(input: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
