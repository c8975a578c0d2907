//! Sobel edge detection stage.

use crate::convolve::{convolve_interior, SOBEL_X, SOBEL_Y};
use edgepipe_core::Image;
use tracing::debug;

/// Gradient magnitude `round(sqrt(gx^2 + gy^2))`, saturated at 255.
///
/// ```rust
/// use edgepipe_ops::sobel::magnitude;
///
/// assert_eq!(magnitude(3, 4), 5);
/// assert_eq!(magnitude(1000, 0), 255);
/// ```
#[inline]
pub fn magnitude(gx: i32, gy: i32) -> u8 {
    let (gx, gy) = (gx as f64, gy as f64);
    (gx * gx + gy * gy).sqrt().round().min(255.0) as u8
}

/// Computes the Sobel gradient magnitude of an image.
///
/// Only pixels with a full 3x3 neighborhood are evaluated; the one-pixel
/// border is always 0, as is every pixel of an image narrower or shorter
/// than 3. Magnitudes are capped at the source max value so the result
/// stays a valid graymap with the same header.
///
/// That cap is the only difference from a plain 0..=255 clamp, and it only
/// bites when the source max value is below 255; a 255 source always gets
/// a 255 header and the unmodified magnitudes.
pub fn detect_edges(src: &Image) -> Image {
    let gx = convolve_interior(src, &SOBEL_X);
    let gy = convolve_interior(src, &SOBEL_Y);

    debug!(width = src.width(), height = src.height(), "Sobel edges computed");
    src.derive_with(|i| magnitude(gx[i], gy[i]))
}
