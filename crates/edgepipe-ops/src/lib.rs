//! # edgepipe-ops
//!
//! Graymap filtering: fixed-kernel convolution and the two pipeline stages
//! built on it.
//!
//! # Modules
//!
//! - [`convolve`] - integer convolution with zero-padded borders
//! - [`gaussian`] - 5x5 Gaussian smoothing
//! - [`sobel`] - Sobel gradient magnitude
//! - [`pipeline`] - decode, smooth, detect edges, encode
//!
//! # Example
//!
//! ```rust
//! use edgepipe_core::Image;
//! use edgepipe_ops::pipeline::run;
//!
//! let source = Image::filled(8, 8, 255, 128).unwrap();
//! let stages = run(&source);
//! assert_eq!(stages.blurred.dimensions(), (8, 8));
//! assert_eq!(stages.edges.pixel(0, 0), 0);
//! ```
//!
//! # Arithmetic
//!
//! All convolution is done in `i32` with truncating division, so outputs
//! are bit-reproducible across platforms. Only the Sobel magnitude goes
//! through floating point, for the square root.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod convolve;
pub mod gaussian;
pub mod pipeline;
pub mod sobel;

pub use convolve::Kernel;
pub use error::{OpsError, OpsResult};
pub use gaussian::blur;
pub use pipeline::{process, run, PipelineOutput, Stages};
pub use sobel::detect_edges;
