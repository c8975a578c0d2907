//! Batch configuration file.
//!
//! ```yaml
//! input_dir: images
//! output_dir: out
//! first: 0
//! last: 30
//! prefix: a
//! binary: false
//! wrap: 32
//! ```
//!
//! Every key is optional. `pattern` replaces the numbered series with a glob.

use anyhow::{bail, Context, Result};
use edgepipe_io::{EncodeOptions, Variant, DEFAULT_WRAP};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for one batch run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    /// Directory holding the numbered inputs.
    pub input_dir: PathBuf,
    /// Directory receiving both outputs per input.
    pub output_dir: PathBuf,
    /// First index, inclusive.
    pub first: u32,
    /// Last index, inclusive.
    pub last: u32,
    /// Input names are `<prefix><index>.pgm`.
    pub prefix: String,
    /// Glob selecting inputs; overrides the numbered series.
    pub pattern: Option<String>,
    /// Write P5 instead of P2.
    pub binary: bool,
    /// Right-align text samples to three columns.
    pub padded: bool,
    /// Text samples per line (0 = one line per row).
    pub wrap: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            first: 0,
            last: 30,
            prefix: "a".to_string(),
            pattern: None,
            binary: false,
            padded: false,
            wrap: DEFAULT_WRAP,
        }
    }
}

impl BatchConfig {
    /// Loads a config from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Parses a config from YAML text. Missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as unit, not as an empty map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Rejects settings that cannot describe any inputs.
    pub fn validate(&self) -> Result<()> {
        if self.pattern.is_none() && self.first > self.last {
            bail!("first index {} is after last index {}", self.first, self.last);
        }
        Ok(())
    }

    /// Output layout for both derived images.
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            variant: if self.binary { Variant::Binary } else { Variant::Text },
            wrap: self.wrap,
            padded: self.padded,
        }
    }
}
