//! CLI command implementations

pub mod batch;
pub mod info;
pub mod process;

use crate::OutputArgs;
use anyhow::{Context, Result};
use edgepipe_io::{EncodeOptions, Variant, DEFAULT_WRAP};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Read a whole input file
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Write an encoded image
pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Write both derived images, or neither.
///
/// If the edges file cannot be written the blurred file just written is
/// removed again, so an index never ends up with half an output pair.
pub fn write_pair(blurred: &Path, blurred_bytes: &[u8], edges: &Path, edges_bytes: &[u8]) -> Result<()> {
    write_bytes(blurred, blurred_bytes)?;
    if let Err(e) = write_bytes(edges, edges_bytes) {
        if let Err(cleanup) = std::fs::remove_file(blurred) {
            warn!(path = %blurred.display(), error = %cleanup, "Failed to remove partial output");
        }
        return Err(e);
    }
    Ok(())
}

/// Encoder layout from the shared output flags
pub fn encode_options(args: &OutputArgs) -> EncodeOptions {
    EncodeOptions {
        variant: if args.binary { Variant::Binary } else { Variant::Text },
        wrap: args.wrap.unwrap_or(DEFAULT_WRAP),
        padded: args.padded,
    }
}

/// `blurred_<stem>.pgm` and `edges_<stem>.pgm` inside `dir`
pub fn derived_paths(dir: &Path, stem: &str) -> (PathBuf, PathBuf) {
    (
        dir.join(format!("blurred_{}.pgm", stem)),
        dir.join(format!("edges_{}.pgm", stem)),
    )
}

/// File name without extension, lossily converted
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string())
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
