/*
 * config.rs
 * Copyright (c) 2026 Posit, PBC
 *
 * Optional `stagemap.yml` configuration.
 */

//! Optional `stagemap.yml` configuration.
//!
//! ```yaml
//! pipeline:
//!   - seed-to-soil
//!   - soil-to-fertilizer
//! parallel:
//!   enabled: true
//!   threshold: 128
//! log-level: debug
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use stagemap_core::{EngineOptions, PipelineSpec};

/// File names searched for, in order, in each directory.
const CONFIG_FILE_NAMES: [&str; 2] = ["stagemap.yml", "stagemap.yaml"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct StageMapConfig {
    /// Explicit stage order. Defaults to the order of maps in the input.
    #[serde(default)]
    pub pipeline: Option<Vec<String>>,

    #[serde(default)]
    pub parallel: ParallelConfig,

    /// Default log level when `RUST_LOG` is unset.
    #[serde(default)]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct ParallelConfig {
    pub enabled: bool,
    pub threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        let options = EngineOptions::default();
        Self {
            enabled: options.parallel,
            threshold: options.parallel_threshold,
        }
    }
}

impl StageMapConfig {
    /// Load the explicit config file, or the nearest one above `input`.
    ///
    /// Returns the default configuration when no file is found.
    pub fn resolve(explicit: Option<&Path>, input: &Path) -> Result<(Self, Option<PathBuf>)> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => find_config(&start_dir(input)),
        };
        match path {
            Some(path) => Ok((Self::load(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }

    /// Parse one config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            parallel: self.parallel.enabled,
            parallel_threshold: self.parallel.threshold,
        }
    }

    pub fn pipeline_spec(&self) -> Option<PipelineSpec> {
        self.pipeline
            .as_ref()
            .map(|names| PipelineSpec::from_names(names.iter().cloned()))
    }
}

/// Directory containing `input`; `.` for bare file names.
fn start_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Search for a config file in `start_dir` and its parents.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current = Some(start_dir);
    while let Some(dir) = current {
        for name in CONFIG_FILE_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        current = dir.parent();
    }
    None
}
