//! # edgepipe-io
//!
//! Graymap (PGM) codec.
//!
//! Two on-disk variants are supported, told apart by their magic token:
//!
//! | Magic | Variant | Samples |
//! |-------|---------|---------|
//! | `P2` | [`Variant::Text`] | whitespace-separated ASCII decimals |
//! | `P5` | [`Variant::Binary`] | raw single bytes |
//!
//! Both share the header `magic width height max_value`, where `#` starts a
//! comment running to the end of the line. Only 8-bit graymaps
//! (`max_value <= 255`) are handled.
//!
//! # Architecture
//!
//! - [`pgm::decode`] / [`pgm::encode`] - byte-level codec, no filesystem access
//! - [`read`] / [`write`] - thin file helpers for callers that own paths
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use edgepipe_io::{read, write, EncodeOptions};
//!
//! let image = read("a0.pgm")?;
//! write("copy.pgm", &image, &EncodeOptions::binary())?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
pub mod header;
pub mod pgm;

pub use detect::Variant;
pub use header::{parse_header, Header};
pub use pgm::{decode, encode, encode_variant, EncodeOptions, DEFAULT_WRAP};

use edgepipe_core::{Image, Result};
use std::path::Path;

/// Reads and decodes a graymap file.
///
/// # Errors
///
/// [`edgepipe_core::Error::Io`] if the file cannot be read, otherwise any
/// error from [`decode`].
pub fn read<P: AsRef<Path>>(path: P) -> Result<Image> {
    let bytes = std::fs::read(path.as_ref())?;
    decode(&bytes)
}

/// Encodes an image and writes it to a file.
///
/// # Errors
///
/// [`edgepipe_core::Error::Io`] if the file cannot be written.
pub fn write<P: AsRef<Path>>(path: P, image: &Image, options: &EncodeOptions) -> Result<()> {
    std::fs::write(path.as_ref(), encode(image, options))?;
    Ok(())
}
