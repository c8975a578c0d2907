//! Graymap variant detection.
//!
//! The two on-disk variants share a header and differ only in how samples
//! are stored. The first two bytes of a file name the variant.

use edgepipe_core::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Sample encoding of a graymap stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// `P2`: whitespace-separated ASCII decimal samples.
    #[default]
    Text,
    /// `P5`: raw single-byte samples.
    Binary,
}

impl Variant {
    /// Returns the two-byte magic token for this variant.
    pub fn magic(&self) -> &'static [u8; 2] {
        match self {
            Variant::Text => b"P2",
            Variant::Binary => b"P5",
        }
    }

    /// Maps a two-byte magic token to a variant.
    pub fn from_magic(magic: &[u8]) -> Option<Self> {
        match magic {
            b"P2" => Some(Variant::Text),
            b"P5" => Some(Variant::Binary),
            _ => None,
        }
    }

    /// Detects the variant from the start of a byte stream.
    ///
    /// # Errors
    ///
    /// [`Error::Format`] if the stream is shorter than two bytes or does not
    /// start with a recognized magic token.
    pub fn detect(bytes: &[u8]) -> Result<Self> {
        let magic = bytes
            .get(..2)
            .ok_or_else(|| Error::format("stream too short for a magic token"))?;
        Self::from_magic(magic).ok_or_else(|| {
            Error::format(format!(
                "unrecognized magic token {:?}",
                String::from_utf8_lossy(magic)
            ))
        })
    }

    /// Returns true for the raw binary variant.
    #[inline]
    pub fn is_binary(&self) -> bool {
        matches!(self, Variant::Binary)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Text => f.write_str("text (P2)"),
            Variant::Binary => f.write_str("binary (P5)"),
        }
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "ascii" | "plain" | "p2" => Ok(Variant::Text),
            "binary" | "raw" | "p5" => Ok(Variant::Binary),
            other => Err(Error::format(format!("unknown graymap variant: {}", other))),
        }
    }
}
