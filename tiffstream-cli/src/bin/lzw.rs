//! TIFF/PDF-style LZW compressor and decompressor.
//!
//! `EOI_IS_EOD` set to a non-empty value selects the strict TIFF dialect
//! (ClearCode and EndOfInformation around every strip); otherwise the lax
//! PDF dialect is used. `RUST_LOG=debug` turns on tracing.

use clap::{Parser, Subcommand};
use log::debug;
use std::env;

use tiffstream_cli::stream::{open_input, open_output};
use tiffstream_lzw::{Dialect, LzwConfig, LzwDecoder, LzwEncoder};

#[derive(Parser)]
#[command(name = "lzw", version)]
#[command(about = "TIFF/PDF-style LZW compressor and decompressor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress raw bytes into an LZW code stream
    Encode {
        /// Input file, or `-` for standard input
        #[arg(default_value = "-")]
        input: String,

        /// Output file, or `-` for standard output
        #[arg(default_value = "-")]
        output: String,
    },

    /// Expand an LZW code stream back into raw bytes
    Decode {
        /// Input file, or `-` for standard input
        #[arg(default_value = "-")]
        input: String,

        /// Output file, or `-` for standard output
        #[arg(default_value = "-")]
        output: String,
    },
}

fn dialect_from_env() -> Dialect {
    match env::var_os("EOI_IS_EOD") {
        Some(value) if !value.is_empty() => Dialect::StrictTiff,
        _ => Dialect::LaxPdf,
    }
}

fn run(cli: Cli) -> tiffstream_lzw::Result<()> {
    let config = LzwConfig {
        dialect: dialect_from_env(),
        ..LzwConfig::TIFF
    };
    debug!("dialect: {:?}", config.dialect);
    match cli.command {
        Commands::Encode { input, output } => {
            let source = open_input(&input)?;
            let sink = open_output(&output)?;
            let mut encoder = LzwEncoder::new(config)?;
            let written = encoder.encode_stream(source, sink)?;
            debug!("wrote {} compressed bytes", written);
        }
        Commands::Decode { input, output } => {
            let source = open_input(&input)?;
            let sink = open_output(&output)?;
            let mut decoder = LzwDecoder::new(config)?;
            let written = decoder.decode_stream(source, sink)?;
            debug!("wrote {} decompressed bytes", written);
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
