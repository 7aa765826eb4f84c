use std::fs;
use std::path::PathBuf;
use structopt::StructOpt;

/// Encode and decode `.pfmf` mask containers from the shell.
///
/// This binary is a thin boundary layer only: it reads/writes raw flat
/// byte files and calls straight into `pfmf::encode`/`pfmf::decode`. It
/// contains no compression logic of its own.
#[derive(StructOpt)]
enum Command {
    /// Pack a raw headerless mask file (height*width bytes, row-major)
    /// into a `.pfmf` container.
    Encode {
        /// Path to the raw mask bytes.
        input: PathBuf,
        /// Path to write the encoded container to.
        output: PathBuf,
        #[structopt(long)]
        height: u32,
        #[structopt(long)]
        width: u32,
    },
    /// Unpack a `.pfmf` container back into a raw headerless mask file.
    Decode {
        /// Path to the encoded container.
        input: PathBuf,
        /// Path to write the raw mask bytes to.
        output: PathBuf,
    },
    /// Print a container's header fields without decoding the payload.
    Inspect {
        /// Path to the encoded container.
        input: PathBuf,
    },
}

fn main() {
    let command = Command::from_args();

    match command {
        Command::Encode {
            input,
            output,
            height,
            width,
        } => {
            let mask = fs::read(&input).unwrap_or_else(|e| {
                eprintln!("failed to read {}: {e}", input.display());
                std::process::exit(1);
            });

            match pfmf::encode(&mask, height, width) {
                Ok(encoded) => {
                    fs::write(&output, encoded).unwrap_or_else(|e| {
                        eprintln!("failed to write {}: {e}", output.display());
                        std::process::exit(1);
                    });
                }
                Err(e) => {
                    eprintln!("encode failed: {e}");
                    std::process::exit(1);
                }
            }
        }

        Command::Decode { input, output } => {
            let buf = fs::read(&input).unwrap_or_else(|e| {
                eprintln!("failed to read {}: {e}", input.display());
                std::process::exit(1);
            });

            match pfmf::decode(&buf) {
                Ok((mask, (height, width))) => {
                    println!("decoded {height}x{width} mask ({} bytes)", mask.len());
                    fs::write(&output, mask).unwrap_or_else(|e| {
                        eprintln!("failed to write {}: {e}", output.display());
                        std::process::exit(1);
                    });
                }
                Err(e) => {
                    eprintln!("decode failed: {e}");
                    std::process::exit(1);
                }
            }
        }

        Command::Inspect { input } => {
            let buf = fs::read(&input).unwrap_or_else(|e| {
                eprintln!("failed to read {}: {e}", input.display());
                std::process::exit(1);
            });

            match pfmf::header_of(&buf) {
                Ok(info) => {
                    println!("shape: ({}, {})", info.height, info.width);
                    println!("unique symbols: {}", info.unique_symbols_count);
                    println!("symbol_bit_width: {}", info.symbol_bit_width);
                    println!("count_bit_width: {}", info.count_bit_width);
                    println!("line_count_bit_width: {}", info.line_count_bit_width);
                }
                Err(e) => {
                    eprintln!("inspect failed: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}
