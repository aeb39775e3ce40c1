//! Coursework configuration stored in `coursework.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::metadata::DEFAULT_TIMEOUT_MS;

/// Default config file name, resolved against the working directory.
pub const CONFIG_FILE: &str = "coursework.toml";

/// How actual output is compared against a test case's expected output.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// Ignore trailing whitespace on each line and trailing blank lines.
    #[default]
    TrimEnd,
    /// Byte-for-byte equality.
    Exact,
}

/// Coursework configuration (TOML).
///
/// Missing fields default to the values the exercise blocks are written against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CourseworkConfig {
    /// Timeout for metadata blocks that omit `@timeout`.
    pub default_timeout_ms: u64,

    /// Truncate recorded actual output beyond this many bytes.
    pub output_limit_bytes: usize,

    pub comparison: Comparison,
}

impl Default for CourseworkConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: DEFAULT_TIMEOUT_MS,
            output_limit_bytes: 10_000,
            comparison: Comparison::default(),
        }
    }
}

impl CourseworkConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_timeout_ms == 0 {
            return Err(anyhow!("default_timeout_ms must be > 0"));
        }
        if self.output_limit_bytes == 0 {
            return Err(anyhow!("output_limit_bytes must be > 0"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `CourseworkConfig::default()`.
pub fn load_config(path: &Path) -> Result<CourseworkConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config missing, using defaults");
        let cfg = CourseworkConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: CourseworkConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}
