//! PackBits encoder.
//!
//! Run selection follows p. 42 of TIFF 6.0: runs of three or more identical
//! bytes become replicate runs, single bytes join a literal run, and a
//! two-byte repeat becomes a replicate run *except* when both its neighbors
//! are literals, in which case the three runs merge into one literal run.
//! The look-ahead that rule needs is a single pending slot: a twopeat after
//! an open literal is held back until the next run's kind is known.

use std::io::{self, Read, Write};

use log::trace;

use crate::error::Result;

/// Refill granularity for the streaming tokenizer.
const BUFFER_SIZE: usize = 4096;

/// PackBits encoder options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackBitsConfig {
    /// Append a no-op `0x80` header as an end-of-data marker, the way PDF
    /// RunLength streams are terminated. TIFF writes nothing after the last
    /// run.
    pub trailing_eod: bool,
}

impl PackBitsConfig {
    /// TIFF flavor: the stream ends with its last run.
    pub const TIFF: Self = Self {
        trailing_eod: false,
    };

    /// PDF flavor: a trailing `0x80` end-of-data marker.
    pub const PDF: Self = Self { trailing_eod: true };
}

/// Compress `input` into a PackBits stream on `output`, returning the
/// number of bytes written.
pub fn pack_stream<R: Read, W: Write>(
    mut input: R,
    mut output: W,
    config: PackBitsConfig,
) -> Result<u64> {
    let mut packer = Packer::new(&mut output);
    let mut buf = vec![0u8; BUFFER_SIZE];
    // Current maximal run of identical bytes, carried across refills.
    let mut pending: Option<(u8, usize)> = None;
    loop {
        let filled = read_full(&mut input, &mut buf)?;
        for &byte in &buf[..filled] {
            pending = match pending {
                Some((run_byte, len)) if run_byte == byte => Some((run_byte, len + 1)),
                Some((run_byte, len)) => {
                    packer.run(run_byte, len)?;
                    Some((byte, 1))
                }
                None => Some((byte, 1)),
            };
        }
        if filled < buf.len() {
            break;
        }
    }
    if let Some((run_byte, len)) = pending {
        packer.run(run_byte, len)?;
    }
    packer.finish(config)?;
    let written = packer.written;
    output.flush()?;
    Ok(written)
}

/// Compress a byte slice into a PackBits stream.
pub fn pack(data: &[u8], config: PackBitsConfig) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len() / 2 + 16);
    pack_stream(data, &mut out, config)?;
    Ok(out)
}

/// Chunk assembler with the one-run look-ahead for twopeats.
struct Packer<'a, W: Write> {
    output: &'a mut W,
    /// Open literal run, not yet committed.
    literal: Vec<u8>,
    /// Two-byte repeat waiting for its right neighbor's kind. Only set
    /// while a literal is open to its left.
    twopeat: Option<u8>,
    written: u64,
}

impl<'a, W: Write> Packer<'a, W> {
    fn new(output: &'a mut W) -> Self {
        Self {
            output,
            literal: Vec::with_capacity(128),
            twopeat: None,
            written: 0,
        }
    }

    /// Consume one maximal run of `len` copies of `byte`.
    fn run(&mut self, byte: u8, len: usize) -> Result<()> {
        if let Some(held) = self.twopeat.take() {
            if len == 1 {
                // Literal on both sides: fold the pair into the literal run.
                self.push_literal(held)?;
                self.push_literal(held)?;
            } else {
                self.flush_literal()?;
                self.emit_replicate(held, 2)?;
            }
        }
        match len {
            1 => self.push_literal(byte)?,
            2 if !self.literal.is_empty() => self.twopeat = Some(byte),
            _ => {
                self.flush_literal()?;
                self.emit_run(byte, len)?;
            }
        }
        Ok(())
    }

    /// Commit whatever is still open. A held twopeat at end of input has no
    /// right literal to merge into, so it ships as a replicate.
    fn finish(&mut self, config: PackBitsConfig) -> Result<()> {
        if let Some(held) = self.twopeat.take() {
            self.flush_literal()?;
            self.emit_replicate(held, 2)?;
        }
        self.flush_literal()?;
        if config.trailing_eod {
            self.output.write_all(&[0x80])?;
            self.written += 1;
        }
        Ok(())
    }

    fn push_literal(&mut self, byte: u8) -> Result<()> {
        self.literal.push(byte);
        if self.literal.len() == 128 {
            self.flush_literal()?;
        }
        Ok(())
    }

    fn flush_literal(&mut self) -> Result<()> {
        if !self.literal.is_empty() {
            trace!("literal run of {} bytes", self.literal.len());
            self.output.write_all(&[(self.literal.len() - 1) as u8])?;
            self.output.write_all(&self.literal)?;
            self.written += 1 + self.literal.len() as u64;
            self.literal.clear();
        }
        Ok(())
    }

    /// Ship a replicate run, splitting so no fragment is shorter than 2.
    fn emit_run(&mut self, byte: u8, mut len: usize) -> Result<()> {
        while len > 128 {
            let take = if len == 129 { 127 } else { 128 };
            self.emit_replicate(byte, take)?;
            len -= take;
        }
        self.emit_replicate(byte, len)
    }

    fn emit_replicate(&mut self, byte: u8, len: usize) -> Result<()> {
        debug_assert!((2..=128).contains(&len));
        trace!("replicate run of {len} x {byte:#04x}");
        self.output.write_all(&[(257 - len) as u8, byte])?;
        self.written += 2;
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
