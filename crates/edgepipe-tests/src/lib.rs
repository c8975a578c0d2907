//! Integration tests for edgepipe crates.
//!
//! This crate contains end-to-end tests that exercise the codec and the
//! pipeline stages together, plus golden-output checks.

#[cfg(test)]
mod golden;
