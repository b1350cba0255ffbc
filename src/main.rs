//! polyproj command line interface
//!
//! Usage:
//!   polyproj [OPTIONS] [FILE]
//!   polyproj --help
//!
//! Examples:
//!   polyproj systems.txt                     # Emptiness and projections, integer scalars
//!   polyproj --scalar rational systems.txt   # Exact rational arithmetic
//!   polyproj --format json < systems.txt     # One JSON report per block
//!   polyproj --max-rows 10000 big.txt        # Give up on runaway eliminations

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use num_rational::Rational64;
use polyproj::driver::{run_batch, BatchConfig, BatchSummary, OutputFormat};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

/// polyproj - Fourier-Motzkin projection and emptiness testing
#[derive(Parser, Debug)]
#[command(name = "polyproj")]
#[command(version)]
#[command(about = "Project polyhedra and test them for emptiness", long_about = None)]
struct Cli {
    /// Input file (defaults to stdin; `-` also reads stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Scalar type for coefficients and bounds
    #[arg(short, long, default_value = "int")]
    scalar: ScalarArg,

    /// Report format
    #[arg(short, long, default_value = "text")]
    format: FormatArg,

    /// Abort the emptiness test once a system would exceed this many rows
    #[arg(long, value_name = "N")]
    max_rows: Option<usize>,

    /// Skip the emptiness test
    #[arg(long)]
    no_emptiness: bool,

    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress warnings)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScalarArg {
    /// 64-bit integers
    Int,
    /// 64-bit floating point
    Float,
    /// Exact 64-bit rationals
    Rational,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// JSON lines
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.quiet {
        log::LevelFilter::Error
    } else {
        match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    info!("polyproj v{}", polyproj::VERSION);

    let config = build_config(&cli);
    debug!("Batch config: {:?}", config);

    let input = open_input(&cli.input)?;
    let mut output = open_output(&cli.output)?;

    let summary = match cli.scalar {
        ScalarArg::Int => run_batch::<i64, _, _>(input, &mut output, &config),
        ScalarArg::Float => run_batch::<f64, _, _>(input, &mut output, &config),
        ScalarArg::Rational => run_batch::<Rational64, _, _>(input, &mut output, &config),
    }?;
    output.flush().context("Failed to flush output")?;

    report(summary)
}

fn build_config(cli: &Cli) -> BatchConfig {
    let mut config = BatchConfig::default()
        .with_format(cli.format.into())
        .with_emptiness(!cli.no_emptiness);
    if let Some(limit) = cli.max_rows {
        config = config.with_max_rows(limit);
    }
    config
}

fn open_input(path: &Option<PathBuf>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(p) if p.as_os_str() != "-" => {
            debug!("Input file: {:?}", p);
            let file = File::open(p)
                .with_context(|| format!("Failed to read input file: {:?}", p))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn open_output(path: &Option<PathBuf>) -> Result<Box<dyn Write>> {
    match path {
        Some(p) => {
            let file = File::create(p)
                .with_context(|| format!("Failed to write output file: {:?}", p))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

fn report(summary: BatchSummary) -> Result<()> {
    if summary.all_succeeded() {
        Ok(())
    } else {
        bail!(
            "{} of {} blocks failed, {} projections failed",
            summary.failed,
            summary.processed,
            summary.failed_projections
        )
    }
}
