//! PackBits byte-run compressor and decompressor.
//!
//! Writes the TIFF flavor (no trailing end-of-data marker), which is what
//! the netpbm tools emit. `RUST_LOG=debug` turns on tracing.

use clap::{Parser, Subcommand};
use log::debug;

use tiffstream_cli::stream::{open_input, open_output};
use tiffstream_packbits::{PackBitsConfig, pack_stream, unpack_stream};

#[derive(Parser)]
#[command(name = "packbits", version)]
#[command(about = "PackBits byte-run compressor and decompressor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress raw bytes into a PackBits stream
    Pack {
        /// Input file, or `-` for standard input
        #[arg(default_value = "-")]
        input: String,

        /// Output file, or `-` for standard output
        #[arg(default_value = "-")]
        output: String,
    },

    /// Expand a PackBits stream back into raw bytes
    Unpack {
        /// Input file, or `-` for standard input
        #[arg(default_value = "-")]
        input: String,

        /// Output file, or `-` for standard output
        #[arg(default_value = "-")]
        output: String,
    },
}

fn run(cli: Cli) -> tiffstream_packbits::Result<()> {
    match cli.command {
        Commands::Pack { input, output } => {
            let source = open_input(&input)?;
            let sink = open_output(&output)?;
            let written = pack_stream(source, sink, PackBitsConfig::TIFF)?;
            debug!("wrote {} packed bytes", written);
        }
        Commands::Unpack { input, output } => {
            let source = open_input(&input)?;
            let sink = open_output(&output)?;
            let written = unpack_stream(source, sink)?;
            debug!("wrote {} unpacked bytes", written);
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
