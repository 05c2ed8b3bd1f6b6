//! Shared plumbing for the tiffstream command-line codecs.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod stream;
