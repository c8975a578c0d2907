//! edgepipe - graymap smoothing and edge detection CLI
//!
//! Runs the Gaussian + Sobel pipeline over single images or numbered batches.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod logging;

#[derive(Parser)]
#[command(name = "edgepipe")]
#[command(author, version, about = "Graymap smoothing and edge detection")]
#[command(long_about = "
Smooths PGM graymaps with a 5x5 Gaussian and extracts Sobel edges from the
result. Each input yields a blurred_* and an edges_* image.

Examples:
  edgepipe info a0.pgm                     # Show header and sample stats
  edgepipe process a0.pgm                  # Writes blurred_a0.pgm, edges_a0.pgm
  edgepipe process a0.pgm --binary --edges out.pgm
  edgepipe batch -i images -o out          # images/a0.pgm .. images/a30.pgm
  edgepipe batch --pattern 'scans/*.pgm' -o out -j 4
  edgepipe batch --config batch.yaml
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Also write the log to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display graymap header and sample statistics
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Smooth and edge-detect a single image
    #[command(visible_alias = "p")]
    Process(ProcessArgs),

    /// Process a numbered series or a glob of images in parallel
    #[command(visible_alias = "b")]
    Batch(BatchArgs),
}

/// Output layout shared by `process` and `batch`.
#[derive(Args, Debug, Clone, Default)]
struct OutputArgs {
    /// Write binary (P5) instead of text (P2) graymaps
    #[arg(long)]
    binary: bool,

    /// Text only: right-align samples to three columns
    #[arg(long)]
    padded: bool,

    /// Text only: samples per line before wrapping (0 = one line per row)
    #[arg(long)]
    wrap: Option<usize>,
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Args)]
struct ProcessArgs {
    /// Input image
    input: PathBuf,

    /// Smoothed output (default: blurred_<name>.pgm next to the input)
    #[arg(short, long)]
    blurred: Option<PathBuf>,

    /// Edge output (default: edges_<name>.pgm next to the input)
    #[arg(short, long)]
    edges: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct BatchArgs {
    /// YAML config file; flags given here override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding <prefix><index>.pgm inputs
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Directory for blurred_* and edges_* outputs
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// First index (inclusive)
    #[arg(long)]
    first: Option<u32>,

    /// Last index (inclusive)
    #[arg(long)]
    last: Option<u32>,

    /// Input file name prefix
    #[arg(long)]
    prefix: Option<String>,

    /// Glob selecting inputs instead of the numbered series
    #[arg(long)]
    pattern: Option<String>,

    #[command(flatten)]
    output: OutputArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = logging::init(cli.verbose, cli.log_file.as_deref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Process(args) => commands::process::run(args, cli.verbose),
        Commands::Batch(args) => commands::batch::run(args, cli.verbose),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_batch_flags() {
        let cli = Cli::parse_from([
            "edgepipe", "-vv", "-j", "4", "batch", "-i", "in", "--last", "3", "--binary",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.threads, 4);
        let Commands::Batch(args) = cli.command else {
            panic!("expected batch");
        };
        assert_eq!(args.input_dir, Some(PathBuf::from("in")));
        assert_eq!(args.first, None);
        assert_eq!(args.last, Some(3));
        assert!(args.output.binary);
        assert_eq!(args.output.wrap, None);
    }

    #[test]
    fn test_parse_process_outputs() {
        let cli = Cli::parse_from([
            "edgepipe", "process", "a0.pgm", "--edges", "e.pgm", "--padded", "--wrap", "16",
        ]);
        let Commands::Process(args) = cli.command else {
            panic!("expected process");
        };
        assert_eq!(args.input, PathBuf::from("a0.pgm"));
        assert_eq!(args.blurred, None);
        assert_eq!(args.edges, Some(PathBuf::from("e.pgm")));
        assert!(args.output.padded);
        assert_eq!(args.output.wrap, Some(16));
    }
}
