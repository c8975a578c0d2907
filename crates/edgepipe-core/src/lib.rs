//! # edgepipe-core
//!
//! Core types for grayscale graymap processing.
//!
//! This crate provides the foundational types shared by the rest of the
//! workspace:
//!
//! - [`Image`] - Owned 8-bit grayscale buffer with a declared maximum sample
//! - [`Error`], [`Result`] - Failure modes of decoding and buffer construction
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. All other edgepipe crates depend
//! on `edgepipe-core`:
//!
//! ```text
//! edgepipe-core (this crate)
//!    ^
//!    |
//!    +-- edgepipe-io (graymap codec)
//!    +-- edgepipe-ops (convolution, gaussian, sobel, pipeline)
//!    +-- edgepipe-cli (batch driver)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;

pub use error::*;
pub use image::*;

/// Prelude module for convenient imports.
///
/// ```
/// use edgepipe_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::Image;
}
