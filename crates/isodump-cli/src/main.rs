/// isodump command-line tool — decode, inspect, validate, and summarise
/// ISO-8583-family transaction dumps.
///
/// # Command overview
///
/// ```text
/// isodump <COMMAND> [OPTIONS]
///
/// Commands:
///   decode     Decode dump files and emit records as JSON lines
///   inspect    Print a human-readable per-record summary (PANs masked)
///   validate   Check decoded records against a field specification
///   stats      Print record counts by message type and format
///   help       Print help information
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                          |
/// |------|--------------------------------------------------|
/// | 0    | Success                                          |
/// | 1    | Error (I/O failure, bad spec dir, no records, …) |
///
/// Records go to stdout; warnings and errors go to stderr so stdout
/// can be piped cleanly.
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use isodump_decoder::{BoundaryMode, DumpDecoder};
use isodump_types::spec::SpecSet;

mod cmd_decode;
mod cmd_inspect;
mod cmd_stats;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The isodump transaction-dump decoder.
#[derive(Parser)]
#[command(name = "isodump", version, about = "ISO-8583 transaction dump decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Decode dump files and emit records as JSON lines on stdout.
    Decode(DecodeArgs),
    /// Print a human-readable per-record summary with PANs masked.
    Inspect(InspectArgs),
    /// Check decoded records against a field specification.
    Validate(ValidateArgs),
    /// Print record counts by message type and record format.
    Stats(StatsArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `isodump decode`.
///
/// Each record becomes one JSON object on its own line, carrying the
/// decoded fields plus `mti`, `record_format`, and `source`. Decode
/// warnings are printed to stderr prefixed with the originating file.
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Dump files to decode, in order.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Directory of field specification documents (`1240.json`,
    /// `default.json`, …). Enables length overrides and conformance
    /// validation.
    #[arg(long)]
    pub spec_dir: Option<PathBuf>,

    /// Accept record boundaries on the MTI pattern alone, without
    /// requiring an account-number shape to confirm them.
    #[arg(long)]
    pub lax_boundaries: bool,
}

/// Arguments for `isodump inspect`.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Dump file to inspect.
    pub file: PathBuf,

    /// Show only the first N records.
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Arguments for `isodump validate`.
///
/// Decodes the file with validation on and reports per-record
/// pass/fail. Without `--spec-dir` the built-in registry-derived
/// specification is used. Exits 1 when any record fails.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Dump file to validate.
    pub file: PathBuf,

    /// Directory of field specification documents.
    #[arg(long)]
    pub spec_dir: Option<PathBuf>,
}

/// Arguments for `isodump stats`.
#[derive(clap::Args)]
pub struct StatsArgs {
    /// Dump files to summarise.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

// ── Shared engine construction ────────────────────────────────────────────────

/// Build an engine from the common decode options.
fn build_engine(spec_dir: Option<&PathBuf>, lax_boundaries: bool) -> Result<DumpDecoder> {
    let mut engine = DumpDecoder::new();
    if let Some(dir) = spec_dir {
        let specs = SpecSet::load_dir(dir)
            .with_context(|| format!("cannot load spec directory {}", dir.display()))?;
        engine = engine.with_specs(specs);
    }
    if lax_boundaries {
        engine = engine.with_boundary_mode(BoundaryMode::MtiOnly);
    }
    Ok(engine)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decode(args) => cmd_decode::run(&args),
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
        Commands::Stats(args) => cmd_stats::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
