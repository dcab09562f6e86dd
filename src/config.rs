//! Runner configuration
//!
//! Settings for the reference embedding (the `blockflow` binary). Sources
//! are merged in the usual order: built-in defaults, then an optional TOML
//! config file, then `BLOCKFLOW_*` environment variables.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RunnerConfig {
    /// Path to the block-program JSON document
    pub program: Option<String>,

    /// Entrance types to trigger after loading; empty means every entrance
    /// the document registers
    #[serde(default)]
    pub entrances: Vec<String>,

    /// Log filter, e.g. "info" or "blockflow_core=debug"
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            program: None,
            entrances: Vec::new(),
            log_filter: default_log_filter(),
        }
    }
}

impl RunnerConfig {
    /// Load configuration. An explicit `path` must exist; otherwise a
    /// `blockflow.toml` next to the working directory is picked up when
    /// present.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();
        builder = match path {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::with_name("blockflow").required(false)),
        };
        builder = builder.add_source(Environment::with_prefix("BLOCKFLOW"));

        let config = builder
            .build()
            .context("Failed to load runner configuration")?;
        config
            .try_deserialize()
            .context("Invalid runner configuration")
    }
}
