//! # tiffstream-packbits: PackBits byte-run compression
//!
//! The byte-oriented run-length scheme of TIFF 6.0 (p. 42), also used by the
//! netpbm tools and as PDF's RunLength filter. A header byte distinguishes
//! literal runs from replicate runs; the encoder makes the three-way
//! run/literal decision with one run of look-ahead so that a two-byte repeat
//! surrounded by literals merges into a single literal run.
//!
//! ## Example
//!
//! ```rust
//! use tiffstream_packbits::{PackBitsConfig, pack, unpack};
//!
//! let original = b"111aaaaaaaabbbdccc5555555555s";
//! let packed = pack(original, PackBitsConfig::TIFF).unwrap();
//! assert!(packed.len() < original.len());
//! assert_eq!(unpack(&packed).unwrap(), original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod error;
mod pack;
mod unpack;

pub use error::{PackBitsError, Result};
pub use pack::{PackBitsConfig, pack, pack_stream};
pub use unpack::{unpack, unpack_stream};
