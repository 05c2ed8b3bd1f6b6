//! Input/output binding for the command-line codecs.
//!
//! A single dash stands for the standard stream on either side; anything
//! else is opened as a file, buffered.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};

/// Open `path` for reading, with `-` meaning standard input.
pub fn open_input(path: &str) -> io::Result<Box<dyn Read>> {
    if path == "-" {
        Ok(Box::new(io::stdin().lock()))
    } else {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}

/// Open `path` for writing, with `-` meaning standard output.
pub fn open_output(path: &str) -> io::Result<Box<dyn Write>> {
    if path == "-" {
        Ok(Box::new(io::stdout().lock()))
    } else {
        Ok(Box::new(BufWriter::new(File::create(path)?)))
    }
}
