//! Graymap (PGM) encoding and decoding.
//!
//! One codec serves both variants; [`Variant`] selects how samples are laid
//! out after the shared header.
//!
//! # Example
//!
//! ```rust
//! use edgepipe_core::Image;
//! use edgepipe_io::pgm::{decode, encode, EncodeOptions};
//!
//! let img = Image::from_data(3, 1, 255, vec![0, 128, 255]).unwrap();
//! let bytes = encode(&img, &EncodeOptions::text());
//! assert_eq!(bytes, b"P2\n3 1\n255\n0 128 255\n");
//! assert_eq!(decode(&bytes).unwrap(), img);
//! ```

use crate::header::{lossy, parse_header, parse_unsigned, Cursor, Header};
use crate::Variant;
use edgepipe_core::{Error, Image, Result};
use tracing::{debug, trace};

/// Samples per text line before a wrap, matching common viewer expectations.
pub const DEFAULT_WRAP: usize = 32;

/// Layout options for [`encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Output variant.
    pub variant: Variant,
    /// Text only: break a row after this many samples (0 = one line per row).
    pub wrap: usize,
    /// Text only: right-align every sample to three columns.
    pub padded: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            variant: Variant::Text,
            wrap: DEFAULT_WRAP,
            padded: false,
        }
    }
}

impl EncodeOptions {
    /// Text output with the default layout.
    pub fn text() -> Self {
        Self::default()
    }

    /// Binary output.
    pub fn binary() -> Self {
        Self {
            variant: Variant::Binary,
            ..Default::default()
        }
    }

    /// Default layout for the given variant.
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            ..Default::default()
        }
    }
}

/// Decodes a graymap byte stream.
///
/// # Errors
///
/// - [`Error::Format`] - unknown magic token, bad header, malformed sample
/// - [`Error::InvalidDimensions`] - width or height not positive
/// - [`Error::Truncated`] - fewer than `width * height` samples
/// - [`Error::InvalidSample`] - a sample above the declared max value
/// - [`Error::AllocationFailed`] - the sample buffer could not be reserved
pub fn decode(bytes: &[u8]) -> Result<Image> {
    trace!(len = bytes.len(), "pgm::decode");

    let (header, offset) = parse_header(bytes)?;
    let data = match header.variant {
        Variant::Binary => decode_binary(&header, &bytes[offset.min(bytes.len())..])?,
        Variant::Text => decode_text(&header, Cursor::new(bytes, offset))?,
    };

    debug!(
        variant = %header.variant,
        width = header.width,
        height = header.height,
        max_value = header.max_value,
        "Decoded graymap"
    );
    Image::from_data(header.width, header.height, header.max_value, data)
}

fn decode_binary(header: &Header, payload: &[u8]) -> Result<Vec<u8>> {
    let expected = header.sample_count();
    if payload.len() < expected {
        return Err(Error::truncated(expected, payload.len()));
    }

    let mut data = reserve(expected)?;
    data.extend_from_slice(&payload[..expected]);
    if let Some(index) = data.iter().position(|&s| s > header.max_value) {
        return Err(Error::invalid_sample(index, data[index] as u32, header.max_value));
    }
    Ok(data)
}

fn decode_text(header: &Header, mut cursor: Cursor<'_>) -> Result<Vec<u8>> {
    let expected = header.sample_count();
    cursor.skip_whitespace_and_comments();

    // Each text sample takes at least one byte, so a short stream cannot
    // need the full reservation.
    let mut data = reserve(expected.min(cursor.remaining().len()))?;
    while data.len() < expected {
        cursor.skip_whitespace();
        let Some(token) = cursor.next_token() else {
            if cursor.remaining().is_empty() {
                return Err(Error::truncated(expected, data.len()));
            }
            // Only '#' stops a token without consuming anything
            return Err(Error::format(format!("comment inside sample data at index {}", data.len())));
        };
        let index = data.len();
        let value = parse_unsigned(token).ok_or_else(|| {
            Error::format(format!("invalid sample token {:?} at index {}", lossy(token), index))
        })?;
        if value > header.max_value as u32 {
            return Err(Error::invalid_sample(index, value, header.max_value));
        }
        data.push(value as u8);
    }
    Ok(data)
}

fn reserve(count: usize) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    data.try_reserve_exact(count)
        .map_err(|e| Error::allocation_failed(count, e.to_string()))?;
    Ok(data)
}

/// Encodes an image as a graymap byte stream.
///
/// The header is always `magic\nwidth height\nmax_value\n`. Binary output is
/// then a straight dump of the samples. Text output separates samples with
/// single spaces and ends every row with a newline, breaking long rows every
/// `options.wrap` samples.
pub fn encode(image: &Image, options: &EncodeOptions) -> Vec<u8> {
    trace!(
        width = image.width(),
        height = image.height(),
        variant = %options.variant,
        "pgm::encode"
    );

    let per_sample = if options.variant.is_binary() { 1 } else { 4 };
    let mut out = Vec::with_capacity(32 + image.pixel_count() * per_sample);
    out.extend_from_slice(options.variant.magic());
    out.push(b'\n');
    out.extend_from_slice(
        format!("{} {}\n{}\n", image.width(), image.height(), image.max_value()).as_bytes(),
    );

    match options.variant {
        Variant::Binary => out.extend_from_slice(image.data()),
        Variant::Text => {
            for row in image.rows() {
                for (i, &sample) in row.iter().enumerate() {
                    if i > 0 {
                        let wrap_here = options.wrap > 0 && i % options.wrap == 0;
                        out.push(if wrap_here { b'\n' } else { b' ' });
                    }
                    push_decimal(&mut out, sample, options.padded);
                }
                out.push(b'\n');
            }
        }
    }
    out
}

/// Encodes with the default layout for `variant`.
pub fn encode_variant(image: &Image, variant: Variant) -> Vec<u8> {
    encode(image, &EncodeOptions::for_variant(variant))
}

fn push_decimal(out: &mut Vec<u8>, value: u8, padded: bool) {
    let digits = [value / 100, value / 10 % 10, value % 10];
    let first = match value {
        100..=255 => 0,
        10..=99 => 1,
        _ => 2,
    };
    if padded {
        out.extend(std::iter::repeat_n(b' ', first));
    }
    out.extend(digits[first..].iter().map(|d| b'0' + d));
}
