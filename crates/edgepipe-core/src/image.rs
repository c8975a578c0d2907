//! Grayscale image buffer.
//!
//! [`Image`] is the value passed between every stage of the pipeline. It owns
//! its samples outright; stages never share or mutate each other's buffers.
//!
//! # Memory Layout
//!
//! Samples are stored in **row-major** order, top-to-bottom, one byte each:
//!
//! ```text
//! Memory: [s(0,0) s(1,0) s(2,0) ... s(w-1,0)]  <- Row 0
//!         [s(0,1) s(1,1) s(2,1) ... s(w-1,1)]  <- Row 1
//!         ...
//! ```
//!
//! # Usage
//!
//! ```rust
//! use edgepipe_core::Image;
//!
//! let img = Image::filled(4, 3, 255, 128).unwrap();
//! assert_eq!(img.dimensions(), (4, 3));
//! assert_eq!(img.pixel(3, 2), 128);
//! ```

use crate::error::{Error, Result};

/// Owned 8-bit grayscale image.
///
/// # Invariants
///
/// - `width > 0` and `height > 0`
/// - `data.len() == width * height`
/// - `1 <= max_value` and no sample exceeds `max_value`
///
/// Every public constructor checks these, so a value of this type is always
/// well formed.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    /// Image width in pixels
    width: u32,
    /// Image height in pixels
    height: u32,
    /// Largest value a sample may take
    max_value: u8,
    /// Row-major samples
    data: Vec<u8>,
}

impl Image {
    /// Creates an image from existing sample data.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] if a dimension is zero or `data` does
    ///   not hold exactly `width * height` samples
    /// - [`Error::Format`] if `max_value` is zero
    /// - [`Error::InvalidSample`] if a sample exceeds `max_value`
    ///
    /// # Example
    ///
    /// ```rust
    /// use edgepipe_core::Image;
    ///
    /// let img = Image::from_data(2, 2, 255, vec![0, 64, 128, 255]).unwrap();
    /// assert_eq!(img.row(1), &[128, 255]);
    /// ```
    pub fn from_data(width: u32, height: u32, max_value: u8, data: Vec<u8>) -> Result<Self> {
        let expected = Self::sample_count(width, height)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width as i64,
                height as i64,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        if max_value == 0 {
            return Err(Error::format("max value must be in 1..=255"));
        }
        if let Some(index) = data.iter().position(|&s| s > max_value) {
            return Err(Error::invalid_sample(index, data[index] as u32, max_value));
        }
        Ok(Self {
            width,
            height,
            max_value,
            data,
        })
    }

    /// Creates an image with every sample set to `value`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Image::from_data`].
    pub fn filled(width: u32, height: u32, max_value: u8, value: u8) -> Result<Self> {
        let count = Self::sample_count(width, height)?;
        Self::from_data(width, height, max_value, vec![value; count])
    }

    /// Returns `width * height`, rejecting zero-sized or overflowing shapes.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] if either dimension is zero or the
    /// product does not fit in `usize`.
    pub fn sample_count(width: u32, height: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(
                width as i64,
                height as i64,
                "width and height must be positive",
            ));
        }
        (width as usize).checked_mul(height as usize).ok_or_else(|| {
            Error::invalid_dimensions(width as i64, height as i64, "sample count overflows")
        })
    }

    /// Builds a new image with the same geometry and `max_value` as `self`.
    ///
    /// # Errors
    ///
    /// Same checks as [`Image::from_data`]: `data` must hold `pixel_count()`
    /// samples, none above `max_value()`.
    pub fn derive(&self, data: Vec<u8>) -> Result<Self> {
        Self::from_data(self.width, self.height, self.max_value, data)
    }

    /// Builds a new image with the same geometry and `max_value` as `self`,
    /// taking each sample from `f(index)` in row-major order.
    ///
    /// Samples above `max_value()` are clamped to it, so this cannot fail.
    ///
    /// ```rust
    /// use edgepipe_core::Image;
    ///
    /// let src = Image::filled(3, 1, 100, 0).unwrap();
    /// let out = src.derive_with(|i| i as u8 * 80);
    /// assert_eq!(out.data(), &[0, 80, 100]);
    /// ```
    pub fn derive_with<F: FnMut(usize) -> u8>(&self, mut f: F) -> Self {
        let max_value = self.max_value;
        let data = (0..self.data.len()).map(|i| f(i).min(max_value)).collect();
        Self {
            width: self.width,
            height: self.height,
            max_value,
            data,
        }
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the declared maximum sample value.
    #[inline]
    pub fn max_value(&self) -> u8 {
        self.max_value
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    /// Returns the row-major samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the image and returns its samples.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Returns the sample at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Returns the sample at (x, y), or `None` outside the image.
    ///
    /// Takes signed coordinates so convolution footprints can reach past the
    /// borders directly.
    #[inline]
    pub fn get_pixel(&self, x: i64, y: i64) -> Option<u8> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(self.data[y as usize * self.width as usize + x as usize])
    }

    /// Returns one row of samples.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.data[start..start + w]
    }

    /// Iterates over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(self.width as usize)
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("max_value", &self.max_value)
            .field("samples", &self.data.len())
            .finish()
    }
}
