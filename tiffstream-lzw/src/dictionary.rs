//! LZW code tables.
//!
//! The decoder table stores each entry as a (prefix code, suffix byte) pair
//! and materializes strings on emit by walking the chain into a reusable
//! scratch buffer, so inserting an entry is O(1) and memory stays linear in
//! the table size. The encoder table is the inverse mapping from byte string
//! to code; the two reserved special codes are accounted for by an offset
//! rather than stored.

use std::collections::HashMap;

use crate::config::LzwConfig;

/// Prefix sentinel for root (single-byte) entries.
const ROOT: u16 = u16::MAX;
/// Prefix sentinel for the reserved ClearCode / EndOfInformation slots.
const RESERVED: u16 = u16::MAX - 1;

#[derive(Debug, Clone, Copy)]
struct Entry {
    prefix: u16,
    suffix: u8,
}

/// Decoder-side code table: code to byte string.
#[derive(Debug)]
pub struct DecodeTable {
    entries: Vec<Entry>,
    max_code: u16,
    special_codes: bool,
    scratch: Vec<u8>,
}

impl DecodeTable {
    /// Create a table in its initial state for `config`.
    pub fn new(config: &LzwConfig) -> Self {
        let mut table = Self {
            entries: Vec::with_capacity(usize::from(config.max_code()) + 1),
            max_code: config.max_code(),
            special_codes: config.special_codes,
            scratch: Vec::new(),
        };
        table.reset();
        table
    }

    /// Reset to the initial state: one root entry per byte value, plus the
    /// two reserved slots when special codes are in use.
    pub fn reset(&mut self) {
        self.entries.clear();
        for byte in 0..=255u8 {
            self.entries.push(Entry {
                prefix: ROOT,
                suffix: byte,
            });
        }
        if self.special_codes {
            self.entries.push(Entry {
                prefix: RESERVED,
                suffix: 0,
            });
            self.entries.push(Entry {
                prefix: RESERVED,
                suffix: 0,
            });
        }
    }

    /// Whether `code` maps to a byte string (reserved slots do not).
    pub fn contains(&self, code: u16) -> bool {
        self.entries
            .get(usize::from(code))
            .is_some_and(|entry| entry.prefix != RESERVED)
    }

    /// The index the next insertion will occupy.
    pub fn next_code(&self) -> u16 {
        self.entries.len() as u16
    }

    /// Whether every representable code has been assigned.
    pub fn is_full(&self) -> bool {
        self.entries.len() > usize::from(self.max_code)
    }

    /// Insert the string `table[prefix] + suffix`, returning its index, or
    /// `None` once the table is full.
    pub fn add(&mut self, prefix: u16, suffix: u8) -> Option<u16> {
        if self.is_full() {
            return None;
        }
        let code = self.next_code();
        self.entries.push(Entry { prefix, suffix });
        Some(code)
    }

    /// First byte of the string behind `code`.
    ///
    /// `code` must refer to a data entry.
    pub fn first_byte(&self, code: u16) -> u8 {
        let mut current = usize::from(code);
        loop {
            let entry = self.entries[current];
            debug_assert!(entry.prefix != RESERVED);
            if entry.prefix == ROOT {
                return entry.suffix;
            }
            current = usize::from(entry.prefix);
        }
    }

    /// Materialize the string behind `code` and append it to `out`,
    /// returning its first byte.
    ///
    /// `code` must refer to a data entry.
    pub fn append_string(&mut self, code: u16, out: &mut Vec<u8>) -> u8 {
        self.scratch.clear();
        let mut current = usize::from(code);
        loop {
            let entry = self.entries[current];
            debug_assert!(entry.prefix != RESERVED);
            self.scratch.push(entry.suffix);
            if entry.prefix == ROOT {
                break;
            }
            current = usize::from(entry.prefix);
        }
        self.scratch.reverse();
        out.extend_from_slice(&self.scratch);
        self.scratch[0]
    }
}

/// Encoder-side code table: byte string to code.
#[derive(Debug)]
pub struct EncodeTable {
    map: HashMap<Vec<u8>, u16>,
    /// 2 when ClearCode/EndOfInformation occupy slots, 0 otherwise.
    offset: u16,
    max_code: u16,
}

impl EncodeTable {
    /// Create a table in its initial state for `config`.
    pub fn new(config: &LzwConfig) -> Self {
        let mut table = Self {
            map: HashMap::new(),
            offset: if config.special_codes { 2 } else { 0 },
            max_code: config.max_code(),
        };
        table.reset();
        table
    }

    /// Reset to the 256 single-byte entries.
    pub fn reset(&mut self) {
        self.map.clear();
        for byte in 0..=255u8 {
            self.map.insert(vec![byte], u16::from(byte));
        }
    }

    /// Look up the code for `seq`.
    pub fn get(&self, seq: &[u8]) -> Option<u16> {
        self.map.get(seq).copied()
    }

    /// Whether `seq` already has a code.
    pub fn contains(&self, seq: &[u8]) -> bool {
        self.map.contains_key(seq)
    }

    /// The code the next insertion will be assigned.
    pub fn next_code(&self) -> u16 {
        self.map.len() as u16 + self.offset
    }

    /// Whether every representable code has been assigned.
    pub fn is_full(&self) -> bool {
        self.next_code() > self.max_code
    }

    /// Insert `seq` under the next free code and return that code.
    pub fn add(&mut self, seq: Vec<u8>) -> u16 {
        let code = self.next_code();
        debug_assert!(code <= self.max_code);
        self.map.insert(seq, code);
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_table_init() {
        let table = DecodeTable::new(&LzwConfig::TIFF);
        assert_eq!(table.next_code(), 258);
        assert!(table.contains(0));
        assert!(table.contains(255));
        // Reserved slots occupy indices but hold no string.
        assert!(!table.contains(256));
        assert!(!table.contains(257));
        assert!(!table.contains(258));
    }

    #[test]
    fn test_decode_table_without_special_codes() {
        let config = LzwConfig {
            special_codes: false,
            ..LzwConfig::TIFF
        };
        let table = DecodeTable::new(&config);
        assert_eq!(table.next_code(), 256);
    }

    #[test]
    fn test_decode_table_materializes_chains() {
        let mut table = DecodeTable::new(&LzwConfig::TIFF);
        let ab = table.add(u16::from(b'A'), b'B').unwrap();
        assert_eq!(ab, 258);
        let abc = table.add(ab, b'C').unwrap();
        assert_eq!(abc, 259);

        let mut out = Vec::new();
        assert_eq!(table.append_string(abc, &mut out), b'A');
        assert_eq!(out, b"ABC");
        assert_eq!(table.first_byte(abc), b'A');
        assert_eq!(table.first_byte(u16::from(b'Z')), b'Z');
    }

    #[test]
    fn test_decode_table_full() {
        let mut table = DecodeTable::new(&LzwConfig::TIFF);
        while !table.is_full() {
            assert!(table.add(0, b'x').is_some());
        }
        assert_eq!(table.next_code(), 4096);
        assert_eq!(table.add(0, b'x'), None);
    }

    #[test]
    fn test_encode_table_codes_skip_reserved_slots() {
        let mut table = EncodeTable::new(&LzwConfig::TIFF);
        assert_eq!(table.get(b"A"), Some(65));
        assert_eq!(table.next_code(), 258);
        assert_eq!(table.add(b"AB".to_vec()), 258);
        assert_eq!(table.get(b"AB"), Some(258));
        assert!(!table.contains(b"XYZ"));
    }

    #[test]
    fn test_encode_table_reset() {
        let mut table = EncodeTable::new(&LzwConfig::TIFF);
        table.add(b"AB".to_vec());
        table.reset();
        assert_eq!(table.next_code(), 258);
        assert_eq!(table.get(b"AB"), None);
    }
}
