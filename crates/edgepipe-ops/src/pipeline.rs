//! Decode, smooth, detect edges, encode.
//!
//! The stage order is fixed: the Sobel stage always reads the Gaussian
//! output, never the source. Every call owns its buffers, so [`process`] can
//! run on many threads at once.

use crate::gaussian::blur;
use crate::sobel::detect_edges;
use edgepipe_core::{Image, Result};
use edgepipe_io::{decode, encode, EncodeOptions};
use tracing::{debug, trace};

/// Derived images of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stages {
    /// Gaussian-smoothed source.
    pub blurred: Image,
    /// Sobel gradient magnitude of `blurred`.
    pub edges: Image,
}

/// Encoded outputs of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    /// Encoded smoothed image.
    pub blurred: Vec<u8>,
    /// Encoded gradient image.
    pub edges: Vec<u8>,
}

/// Runs both stages on a decoded image.
pub fn run(source: &Image) -> Stages {
    let blurred = blur(source);
    let edges = detect_edges(&blurred);
    Stages { blurred, edges }
}

/// Runs the full pipeline on an encoded graymap.
///
/// Both outputs use `options` and carry the source geometry and max value.
///
/// # Errors
///
/// Any decode error, unchanged. Nothing is encoded when decoding fails.
///
/// # Example
///
/// ```rust
/// use edgepipe_io::EncodeOptions;
/// use edgepipe_ops::pipeline::process;
///
/// let raw = b"P2\n3 3\n255\n10 10 10\n10 10 10\n10 10 10\n";
/// let out = process(raw, &EncodeOptions::text()).unwrap();
/// assert!(out.edges.starts_with(b"P2\n3 3\n255\n"));
/// ```
pub fn process(raw: &[u8], options: &EncodeOptions) -> Result<PipelineOutput> {
    trace!(len = raw.len(), variant = %options.variant, "pipeline::process");

    let source = decode(raw)?;
    let stages = run(&source);
    debug!(
        width = source.width(),
        height = source.height(),
        "pipeline stages complete"
    );

    Ok(PipelineOutput {
        blurred: encode(&stages.blurred, options),
        edges: encode(&stages.edges, options),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgepipe_io::Variant;

    fn binary_uniform(width: u32, height: u32, value: u8) -> Vec<u8> {
        let mut raw = format!("P5\n{} {}\n255\n", width, height).into_bytes();
        raw.extend(std::iter::repeat_n(value, (width * height) as usize));
        raw
    }

    #[test]
    fn test_uniform_binary_source() {
        let raw = binary_uniform(5, 5, 100);
        let out = process(&raw, &EncodeOptions::binary()).unwrap();

        let blurred = decode(&out.blurred).unwrap();
        assert_eq!(blurred.dimensions(), (5, 5));
        assert_eq!(blurred.pixel(2, 2), 100);

        let edges = decode(&out.edges).unwrap();
        assert_eq!(edges.dimensions(), (5, 5));
        assert_eq!(edges.max_value(), 255);
        // Ring is always 0, the padded blur darkens the rest toward the border
        assert!(edges.row(0).iter().all(|&v| v == 0));
    }

    #[test]
    fn test_edges_read_blurred_not_source() {
        let source = Image::filled(6, 6, 255, 200).unwrap();
        let stages = run(&source);
        assert_eq!(stages.edges, detect_edges(&stages.blurred));
        // Uniform source has no edges, but its blur does
        assert_ne!(stages.edges, detect_edges(&source));
    }

    #[test]
    fn test_text_outputs() {
        let raw = b"P2\n# tiny\n4 3\n255\n0 0 9 9\n0 0 9 9\n0 0 9 9\n";
        let out = process(raw, &EncodeOptions::text()).unwrap();
        assert!(out.blurred.starts_with(b"P2\n4 3\n255\n"));
        assert!(out.edges.starts_with(b"P2\n4 3\n255\n"));
    }

    #[test]
    fn test_output_variant_follows_options() {
        let raw = b"P2\n3 3\n255\n1 2 3 4 5 6 7 8 9\n";
        let out = process(raw, &EncodeOptions::for_variant(Variant::Binary)).unwrap();
        assert_eq!(Variant::detect(&out.blurred).unwrap(), Variant::Binary);
        assert_eq!(Variant::detect(&out.edges).unwrap(), Variant::Binary);
    }

    #[test]
    fn test_max_value_carried() {
        let raw = b"P2\n5 3\n40\n0 0 40 40 40\n0 0 40 40 40\n0 0 40 40 40\n";
        let out = process(raw, &EncodeOptions::text()).unwrap();
        let blurred = decode(&out.blurred).unwrap();
        let edges = decode(&out.edges).unwrap();
        assert_eq!(blurred.max_value(), 40);
        assert_eq!(edges.max_value(), 40);
    }

    #[test]
    fn test_bad_magic_propagates() {
        let err = process(b"P6\n1 1\n255\n\0\0\0", &EncodeOptions::text()).unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn test_truncated_propagates() {
        let err = process(b"P5\n4 4\n255\n\x01\x02\x03", &EncodeOptions::text()).unwrap_err();
        assert!(err.is_truncated());
    }

    #[test]
    fn test_dimension_error_propagates() {
        let err = process(b"P2\n0 4\n255\n", &EncodeOptions::text()).unwrap_err();
        assert!(err.is_dimension_error());
    }
}
