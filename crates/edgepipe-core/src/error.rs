//! Error types for edgepipe operations.
//!
//! A single [`Error`] enum covers every failure the pipeline can surface.
//! Decoding raises all of them synchronously; the processing stages have no
//! failure modes of their own once an [`crate::Image`] exists.
//!
//! # Usage
//!
//! ```rust
//! use edgepipe_core::{Error, Result};
//!
//! fn check(width: i64, height: i64) -> Result<()> {
//!     if width <= 0 || height <= 0 {
//!         return Err(Error::invalid_dimensions(width, height, "must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(0, 10).is_err());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding or building graymap images.
///
/// # Categories
///
/// - **Format errors**: [`Format`](Error::Format), [`InvalidSample`](Error::InvalidSample)
/// - **Dimension errors**: [`InvalidDimensions`](Error::InvalidDimensions)
/// - **Data errors**: [`Truncated`](Error::Truncated)
/// - **Allocation errors**: [`AllocationFailed`](Error::AllocationFailed)
/// - **I/O errors**: [`Io`](Error::Io)
#[derive(Debug, Error)]
pub enum Error {
    /// The byte stream is not a graymap this crate understands.
    ///
    /// Raised for an unrecognized magic token, a header that ends early or
    /// holds a non-numeric token, an unsupported maximum sample value, or a
    /// malformed text sample.
    #[error("format error: {0}")]
    Format(String),

    /// Width or height is not positive, or the buffer size overflows.
    ///
    /// Dimensions are carried as signed values so that negative header
    /// values are reported as written.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Declared width
        width: i64,
        /// Declared height
        height: i64,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Fewer samples are available than the header declares.
    #[error("truncated data: expected {expected} samples, found {actual}")]
    Truncated {
        /// Samples declared by the header (`width * height`)
        expected: usize,
        /// Samples actually present
        actual: usize,
    },

    /// The sample buffer could not be allocated.
    #[error("failed to allocate {requested} bytes: {reason}")]
    AllocationFailed {
        /// Bytes requested
        requested: usize,
        /// Failure reason
        reason: String,
    },

    /// A sample exceeds the declared maximum value.
    #[error("sample {value} at index {index} exceeds max value {max_value}")]
    InvalidSample {
        /// Row-major sample index
        index: usize,
        /// Offending sample value
        value: u32,
        /// Declared maximum
        max_value: u8,
    },

    /// I/O error from the file helpers in `edgepipe-io`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates an [`Error::Format`] error.
    #[inline]
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: i64, height: i64, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::Truncated`] error.
    #[inline]
    pub fn truncated(expected: usize, actual: usize) -> Self {
        Self::Truncated { expected, actual }
    }

    /// Creates an [`Error::AllocationFailed`] error.
    #[inline]
    pub fn allocation_failed(requested: usize, reason: impl Into<String>) -> Self {
        Self::AllocationFailed {
            requested,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::InvalidSample`] error.
    #[inline]
    pub fn invalid_sample(index: usize, value: u32, max_value: u8) -> Self {
        Self::InvalidSample {
            index,
            value,
            max_value,
        }
    }

    /// Returns `true` if this is a format error.
    #[inline]
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::Format(_))
    }

    /// Returns `true` if this is a dimension error.
    #[inline]
    pub fn is_dimension_error(&self) -> bool {
        matches!(self, Self::InvalidDimensions { .. })
    }

    /// Returns `true` if the data ended before all samples were read.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }

    /// Returns `true` if this is an allocation error.
    #[inline]
    pub fn is_allocation_error(&self) -> bool {
        matches!(self, Self::AllocationFailed { .. })
    }

    /// Returns `true` if this is an I/O error.
    #[inline]
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
