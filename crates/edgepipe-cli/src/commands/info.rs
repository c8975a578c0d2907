//! Image info command.
//!
//! Displays the graymap variant, geometry, max value and sample statistics.

use crate::InfoArgs;
use anyhow::{Context, Result};
use edgepipe_core::Image;
use edgepipe_io::{decode, parse_header, Variant};
use std::fmt::Write;
use std::path::Path;

/// Sample statistics of one image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub min: u8,
    pub max: u8,
    pub mean: f64,
}

/// Runs the info command, one block per input.
pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    for path in &args.input {
        let bytes = super::read_bytes(path)?;
        let variant = Variant::detect(&bytes)
            .with_context(|| format!("Not a graymap: {}", path.display()))?;
        let image = decode(&bytes).with_context(|| format!("Failed to decode: {}", path.display()))?;

        print!("{}", render_text(path, &image, variant, bytes.len() as u64));
        if verbose > 0 {
            let (_, offset) = parse_header(&bytes)?;
            println!("  Header:     {} bytes", offset);
        }

        if args.input.len() > 1 {
            println!();
        }
    }

    Ok(())
}

/// Formats info in human-readable text format.
pub fn render_text(path: &Path, image: &Image, variant: Variant, file_size: u64) -> String {
    let stats = compute_stats(image);
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "{}", path.display());
    let _ = writeln!(out, "  Format:     {}", variant);
    let _ = writeln!(out, "  Resolution: {}x{}", image.width(), image.height());
    let _ = writeln!(out, "  Max value:  {}", image.max_value());
    let _ = writeln!(out, "  Pixels:     {}", image.pixel_count());
    let _ = writeln!(out, "  File size:  {}", super::format_size(file_size));
    let _ = writeln!(out, "  Min sample: {}", stats.min);
    let _ = writeln!(out, "  Max sample: {}", stats.max);
    let _ = writeln!(out, "  Mean:       {:.3}", stats.mean);
    out
}

/// Computes min, max and mean over all samples.
pub fn compute_stats(image: &Image) -> Stats {
    let data = image.data();
    let (min, max, sum) = data
        .iter()
        .fold((u8::MAX, u8::MIN, 0u64), |(lo, hi, sum), &v| {
            (lo.min(v), hi.max(v), sum + v as u64)
        });
    Stats {
        min,
        max,
        mean: sum as f64 / data.len() as f64,
    }
}
