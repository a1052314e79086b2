// Command-line interface for romweave.
//
// Two subcommands: `interleave` combines two ROM dump halves into one
// image, `info` scans a .bin image for its sync marker and reports the
// address range. Command functions return process exit codes; the legacy
// tool's codes are preserved (interleave: 1 = invalid word size,
// 2 = size mismatch).

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::binfmt;
use crate::interleave::{Endianness, WordSize};
use crate::io::{self, IoError};

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// ROM dump interleaver and .bin flash image inspector.
#[derive(Parser, Debug)]
#[command(
    name = "romweave",
    version,
    about = "ROM dump interleaver and WinCE .bin image inspector",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON to stderr.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Combine two files into one by interleaving bytes from both files.
    Interleave(InterleaveArgs),
    /// Scan a .bin image for its sync marker and report the address range.
    Info(InfoArgs),
}

#[derive(Args, Debug)]
struct InterleaveArgs {
    /// Use big endian. Same as swapping FILE_LOW and FILE_HIGH.
    #[arg(short = 'b', long = "big-endian")]
    big_endian: bool,

    /// Word size to build: 16, 32, or 64.
    #[arg(short = 'w', long = "word", value_name = "BITS", default_value_t = 16)]
    word: u32,

    /// Low-half input file.
    #[arg(value_hint = ValueHint::FilePath)]
    file_low: PathBuf,

    /// High-half input file.
    #[arg(value_hint = ValueHint::FilePath)]
    file_high: PathBuf,

    /// Output file.
    #[arg(value_hint = ValueHint::FilePath)]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct InfoArgs {
    /// Base address to subtract from the image start address (hex).
    #[arg(short = 'b', long = "base", value_name = "HEX", default_value = "0x0")]
    base: String,

    /// Read the address fields as big endian.
    #[arg(long = "big-endian")]
    big_endian: bool,

    /// Image file to inspect.
    #[arg(value_hint = ValueHint::FilePath)]
    file: PathBuf,
}

// ---------------------------------------------------------------------------
// Shared flags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Common {
    quiet: bool,
    verbose: u8,
    json_output: bool,
}

fn endianness(big_endian: bool) -> Endianness {
    if big_endian {
        Endianness::Big
    } else {
        Endianness::Little
    }
}

// ---------------------------------------------------------------------------
// Interleave command
// ---------------------------------------------------------------------------

/// Exit code for an invalid word size (legacy).
const EXIT_INVALID_WORD: i32 = 1;
/// Exit code for a file size mismatch (legacy).
const EXIT_SIZE_MISMATCH: i32 = 2;

fn cmd_interleave(args: &InterleaveArgs, common: &Common) -> i32 {
    // Word size is validated before any file is touched.
    let word = match WordSize::from_bits(args.word) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("romweave: {e}");
            return EXIT_INVALID_WORD;
        }
    };
    let endian = endianness(args.big_endian);

    log::debug!("file low path = {}", args.file_low.display());
    log::debug!("file high path = {}", args.file_high.display());
    log::debug!("output file path = {}", args.output.display());
    log::debug!("word size = {}", word.bits());
    log::debug!("use little endian = {}", endian == Endianness::Little);

    let stats = match io::interleave_file(&args.file_low, &args.file_high, &args.output, word, endian)
    {
        Ok(stats) => stats,
        Err(IoError::Interleave(e)) => {
            eprintln!("romweave: {e}");
            return EXIT_SIZE_MISMATCH;
        }
        Err(e) => {
            eprintln!("romweave: {e}");
            return 1;
        }
    };

    if common.verbose > 0 && !common.quiet {
        eprintln!(
            "romweave: interleave: low size: {}, high size: {}, output size: {}",
            stats.low_size, stats.high_size, stats.output_size
        );
    }

    if common.json_output {
        let json = serde_json::json!({
            "command": "interleave",
            "low_size": stats.low_size,
            "high_size": stats.high_size,
            "output_size": stats.output_size,
            "word_size": word.bits(),
        });
        eprintln!("{}", serde_json::to_string_pretty(&json).unwrap());
    }

    if !common.quiet {
        eprintln!("romweave: done");
    }
    0
}

// ---------------------------------------------------------------------------
// Info command
// ---------------------------------------------------------------------------

fn cmd_info(args: &InfoArgs, common: &Common) -> i32 {
    let base = match binfmt::parse_hex_address(&args.base) {
        Ok(base) => base,
        Err(e) => {
            eprintln!("romweave: base address: {e}");
            return 1;
        }
    };
    let endian = endianness(args.big_endian);

    log::debug!("input file path = {}", args.file.display());
    log::debug!("base address = {base:#X}");

    let report = match io::inspect_file(&args.file, base, endian) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("romweave: {}: {e}", args.file.display());
            return 1;
        }
    };

    let info = report.info;
    println!("Image file size:        {}", report.file_size);
    println!("Sync marker offset:     {:#X}", info.marker_offset);
    println!("Image start address:    {:#X}", info.least);
    println!("Image greatest address: {:#X}", info.greatest);
    println!("Relative start:         {:#X}", info.least_relative);
    println!("Record length:          {:#X}", info.range_len);

    if common.json_output {
        let json = serde_json::json!({
            "command": "info",
            "file_size": report.file_size,
            "marker_offset": info.marker_offset,
            "least": info.least,
            "greatest": info.greatest,
            "least_relative": info.least_relative,
            "range_len": info.range_len,
        });
        eprintln!("{}", serde_json::to_string_pretty(&json).unwrap());
    }

    0
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    let cli = Cli::parse();

    let default_filter = if cli.quiet {
        "error"
    } else if cli.verbose > 0 {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let common = Common {
        quiet: cli.quiet,
        verbose: cli.verbose.min(2),
        json_output: cli.json_output,
    };

    let exit_code = match &cli.command {
        Cmd::Interleave(args) => cmd_interleave(args, &common),
        Cmd::Info(args) => cmd_info(args, &common),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
