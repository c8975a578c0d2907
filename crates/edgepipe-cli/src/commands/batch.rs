//! Batch processing command
//!
//! Inputs come either from the numbered series `<input_dir>/<prefix><i>.pgm`
//! for `i` in `first..=last`, or from a glob. A failed image is reported and
//! counted; the rest of the batch still runs.

use crate::config::BatchConfig;
use crate::BatchArgs;
use anyhow::{bail, Context, Result};
use edgepipe_io::EncodeOptions;
use edgepipe_ops::pipeline;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, trace};

/// One input and its two output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub blurred: PathBuf,
    pub edges: PathBuf,
}

/// Counts reported after a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

pub fn run(args: BatchArgs, verbose: u8) -> Result<()> {
    let config = resolve_config(&args)?;
    let summary = run_config(&config, verbose)?;

    println!("Processed: {} success, {} failed", summary.succeeded, summary.failed);

    if summary.failed > 0 {
        bail!("{} files failed", summary.failed);
    }

    Ok(())
}

/// Merges the optional config file with command-line overrides.
pub fn resolve_config(args: &BatchArgs) -> Result<BatchConfig> {
    let mut config = match &args.config {
        Some(path) => BatchConfig::from_file(path)?,
        None => BatchConfig::default(),
    };

    if let Some(dir) = &args.input_dir {
        config.input_dir = dir.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(first) = args.first {
        config.first = first;
    }
    if let Some(last) = args.last {
        config.last = last;
    }
    if let Some(prefix) = &args.prefix {
        config.prefix = prefix.clone();
    }
    if let Some(pattern) = &args.pattern {
        config.pattern = Some(pattern.clone());
    }
    config.binary |= args.output.binary;
    config.padded |= args.output.padded;
    if let Some(wrap) = args.output.wrap {
        config.wrap = wrap;
    }

    config.validate()?;
    Ok(config)
}

/// Lists the jobs a config describes, in processing order.
pub fn plan(config: &BatchConfig) -> Result<Vec<Job>> {
    let inputs: Vec<PathBuf> = match &config.pattern {
        Some(pattern) => {
            let mut files: Vec<PathBuf> = glob::glob(pattern)
                .with_context(|| format!("Invalid pattern: {}", pattern))?
                .filter_map(|r| r.ok())
                .collect();
            if files.is_empty() {
                bail!("No files match pattern: {}", pattern);
            }
            files.sort();
            files
        }
        None => (config.first..=config.last)
            .map(|i| config.input_dir.join(format!("{}{}.pgm", config.prefix, i)))
            .collect(),
    };

    Ok(inputs
        .into_iter()
        .map(|input| {
            let (blurred, edges) =
                super::derived_paths(&config.output_dir, &super::file_stem(&input));
            Job {
                input,
                blurred,
                edges,
            }
        })
        .collect())
}

/// Runs every job of a config in parallel and reports failures in order.
pub fn run_config(config: &BatchConfig, verbose: u8) -> Result<BatchSummary> {
    trace!(input_dir = %config.input_dir.display(), output_dir = %config.output_dir.display(), "batch::run_config");

    let jobs = plan(config)?;
    let options = config.encode_options();

    info!(files = jobs.len(), output_dir = %config.output_dir.display(), "Starting batch processing");

    if verbose > 0 {
        println!("Processing {} images into {}", jobs.len(), config.output_dir.display());
    }

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("Failed to create output directory: {}", config.output_dir.display())
    })?;

    let results: Vec<Result<()>> = jobs
        .par_iter()
        .map(|job| process_job(job, &options, verbose))
        .collect();

    let mut summary = BatchSummary::default();
    for (job, result) in jobs.iter().zip(results) {
        match result {
            Ok(()) => summary.succeeded += 1,
            Err(e) => {
                summary.failed += 1;
                error!(input = %job.input.display(), "{:#}", e);
                eprintln!("Error: {:#}", e);
            }
        }
    }

    info!(success = summary.succeeded, failed = summary.failed, "Batch processing complete");
    Ok(summary)
}

fn process_job(job: &Job, options: &EncodeOptions, verbose: u8) -> Result<()> {
    let raw = super::read_bytes(&job.input)?;
    let output = pipeline::process(&raw, options)
        .with_context(|| format!("Failed to process: {}", job.input.display()))?;

    super::write_pair(&job.blurred, &output.blurred, &job.edges, &output.edges)?;

    debug!(input = %job.input.display(), "Image processed");
    if verbose > 0 {
        println!("  {} -> {}", job.input.display(), display_name(&job.edges));
    }
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
