//! Fixed-kernel integer convolution.
//!
//! Every output sample is the kernel-weighted sum of the input footprint
//! around it, divided by the kernel's divisor with truncation toward zero.
//! Footprint positions outside the image read as 0 (zero-padding, never
//! clamping or mirroring), so borders come out darker than the interior.
//!
//! # Kernels
//!
//! - [`GAUSSIAN_5X5`] - weighted average, divisor 159
//! - [`SOBEL_X`] - horizontal derivative, divisor 1
//! - [`SOBEL_Y`] - vertical derivative, divisor 1
//!
//! # Example
//!
//! ```rust
//! use edgepipe_core::Image;
//! use edgepipe_ops::convolve::{convolve, GAUSSIAN_5X5};
//!
//! let src = Image::filled(5, 5, 255, 200).unwrap();
//! let out = convolve(&src, &GAUSSIAN_5X5);
//! assert_eq!(out[2 * 5 + 2], 200);
//! assert!(out[0] < 200);
//! ```

use crate::{OpsError, OpsResult};
use edgepipe_core::Image;
use tracing::trace;

/// Square convolution kernel with integer weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel<'a> {
    /// Row-major weights, `size * size` of them.
    weights: &'a [i32],
    /// Side length (3 or 5).
    size: usize,
    /// Normalization divisor, at least 1.
    divisor: i32,
}

/// 5x5 Gaussian weights; they sum to the divisor.
#[rustfmt::skip]
pub const GAUSSIAN_5X5: Kernel<'static> = Kernel {
    weights: &[
        2, 4, 5, 4, 2,
        4, 9, 12, 9, 4,
        5, 12, 15, 12, 5,
        4, 9, 12, 9, 4,
        2, 4, 5, 4, 2,
    ],
    size: 5,
    divisor: 159,
};

/// Sobel horizontal derivative.
#[rustfmt::skip]
pub const SOBEL_X: Kernel<'static> = Kernel {
    weights: &[
        -1, 0, 1,
        -2, 0, 2,
        -1, 0, 1,
    ],
    size: 3,
    divisor: 1,
};

/// Sobel vertical derivative.
#[rustfmt::skip]
pub const SOBEL_Y: Kernel<'static> = Kernel {
    weights: &[
        -1, -2, -1,
        0, 0, 0,
        1, 2, 1,
    ],
    size: 3,
    divisor: 1,
};

impl<'a> Kernel<'a> {
    /// Creates a kernel from row-major weights.
    ///
    /// Size must be 3 or 5 and the divisor at least 1.
    ///
    /// # Example
    ///
    /// ```rust
    /// use edgepipe_ops::convolve::Kernel;
    ///
    /// let identity = Kernel::new(&[0, 0, 0, 0, 1, 0, 0, 0, 0], 3, 1).unwrap();
    /// assert_eq!(identity.radius(), 1);
    /// assert!(Kernel::new(&[1; 16], 4, 1).is_err());
    /// ```
    pub fn new(weights: &'a [i32], size: usize, divisor: i32) -> OpsResult<Self> {
        if size != 3 && size != 5 {
            return Err(OpsError::InvalidParameter(format!(
                "kernel size must be 3 or 5, got {}",
                size
            )));
        }
        if weights.len() != size * size {
            return Err(OpsError::InvalidParameter(format!(
                "kernel data size {} doesn't match {}x{}",
                weights.len(),
                size,
                size
            )));
        }
        if divisor < 1 {
            return Err(OpsError::InvalidParameter(format!(
                "kernel divisor must be at least 1, got {}",
                divisor
            )));
        }
        Ok(Self {
            weights,
            size,
            divisor,
        })
    }

    /// Returns the side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the kernel radius (half-size).
    #[inline]
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// Returns the normalization divisor.
    #[inline]
    pub fn divisor(&self) -> i32 {
        self.divisor
    }

    /// Returns the row-major weights.
    #[inline]
    pub fn weights(&self) -> &'a [i32] {
        self.weights
    }
}

/// Evaluates the kernel centered on (col, row).
///
/// Positions outside the image contribute 0. The sum is divided by the
/// kernel divisor, truncating toward zero.
pub fn convolve_at(src: &Image, kernel: &Kernel<'_>, row: u32, col: u32) -> i32 {
    let r = kernel.radius() as i64;
    let mut sum = 0i32;
    for (ky, weights) in kernel.weights().chunks_exact(kernel.size()).enumerate() {
        let y = row as i64 + ky as i64 - r;
        for (kx, &w) in weights.iter().enumerate() {
            let x = col as i64 + kx as i64 - r;
            let sample = src.get_pixel(x, y).unwrap_or(0);
            sum += sample as i32 * w;
        }
    }
    sum / kernel.divisor()
}

/// Convolves every position of the image.
///
/// Returns `width * height` values in row-major order.
pub fn convolve(src: &Image, kernel: &Kernel<'_>) -> Vec<i32> {
    trace!(width = src.width(), height = src.height(), size = kernel.size(), "convolve");

    let (width, height) = src.dimensions();
    let mut dst = Vec::with_capacity(src.pixel_count());
    for row in 0..height {
        for col in 0..width {
            dst.push(convolve_at(src, kernel, row, col));
        }
    }
    dst
}

/// Convolves only positions whose whole footprint lies inside the image.
///
/// The outer ring of `radius` pixels is left at 0. An image with no such
/// interior yields all zeros.
pub fn convolve_interior(src: &Image, kernel: &Kernel<'_>) -> Vec<i32> {
    trace!(width = src.width(), height = src.height(), size = kernel.size(), "convolve_interior");

    let (width, height) = src.dimensions();
    let r = kernel.radius() as u32;
    let mut dst = vec![0i32; src.pixel_count()];
    if width <= 2 * r || height <= 2 * r {
        return dst;
    }

    for row in r..height - r {
        for col in r..width - r {
            dst[row as usize * width as usize + col as usize] = convolve_at(src, kernel, row, col);
        }
    }
    dst
}
