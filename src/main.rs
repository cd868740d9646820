//! CLI for j2c-check: validate a tiled codestream against the 0xFFFF trigger rule.

use anyhow::{Context, Result};
use clap::Parser;
use j2c_check::{ValidationOptions, ValidationReport, Validator, DEFAULT_TILE_PART_COUNT};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "j2c-check")]
#[command(about = "Check a tiled JPEG 2000 codestream for 0xFFFF at 256-byte trigger positions", long_about = None)]
struct Args {
    /// Path to the codestream file
    path: PathBuf,

    /// Number of tile-parts the TLM segment must describe
    #[arg(long = "tile-parts", value_name = "N", default_value_t = DEFAULT_TILE_PART_COUNT)]
    tile_parts: usize,

    /// Reject TLM segments that carry more records than --tile-parts
    #[arg(long)]
    strict: bool,

    /// Scan tile-parts concurrently
    #[arg(long)]
    parallel: bool,

    /// Read the file through a memory map
    #[cfg(feature = "mmap")]
    #[arg(long)]
    mmap: bool,

    /// Log progress to stderr (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<ValidationReport> {
    let options = ValidationOptions::new()
        .with_tile_part_count(args.tile_parts)
        .with_strict_entry_count(args.strict)
        .with_parallel(args.parallel);
    let validator = Validator::new(options);

    #[cfg(feature = "mmap")]
    if args.mmap {
        return validator
            .validate_file_mmap(&args.path)
            .with_context(|| format!("{} failed validation", args.path.display()));
    }

    validator
        .validate_file(&args.path)
        .with_context(|| format!("{} failed validation", args.path.display()))
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(report) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
