//! Gaussian smoothing stage.

use crate::convolve::{convolve, GAUSSIAN_5X5};
use edgepipe_core::Image;
use tracing::debug;

/// Smooths an image with the fixed 5x5 Gaussian kernel (divisor 159).
///
/// Every pixel is processed, borders included; near the edges the
/// zero-padded footprint pulls values down. The output keeps the input's
/// dimensions and max value.
///
/// # Example
///
/// ```rust
/// use edgepipe_core::Image;
/// use edgepipe_ops::gaussian::blur;
///
/// let src = Image::filled(5, 5, 255, 100).unwrap();
/// let out = blur(&src);
/// assert_eq!(out.pixel(2, 2), 100);
/// ```
pub fn blur(src: &Image) -> Image {
    let max = src.max_value() as i32;
    let sums = convolve(src, &GAUSSIAN_5X5);

    debug!(width = src.width(), height = src.height(), "Gaussian blur applied");
    src.derive_with(|i| sums[i].clamp(0, max) as u8)
}
