//! Run configuration.
//!
//! TOML-backed settings for a benchmark run: the run name, how many suites
//! execute concurrently, and an optional engine allowlist. Fixture discovery
//! and CLI parsing live with the embedding application, not here.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for one benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Name of the run, used in logs and the final report.
    #[serde(default = "default_name")]
    pub name: String,
    /// Maximum number of suites graded concurrently (default: 4).
    #[serde(default = "default_parallel_suites")]
    pub parallel_suites: usize,
    /// When set, only these engines are graded; the registry itself is left
    /// untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engines: Option<Vec<String>>,
}

fn default_name() -> String {
    "css-minification-benchmark".to_string()
}

fn default_parallel_suites() -> usize {
    4
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            parallel_suites: default_parallel_suites(),
            engines: None,
        }
    }
}

impl RunConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }
}
