//! # Configuration
//!
//! Settings come from, in increasing precedence:
//! 1. Built-in defaults
//! 2. `shelfsort.toml` (or the file passed with `--config`)
//! 3. Environment variables
//! 4. CLI flags (applied by the caller)
//!
//! ## Environment Variables
//!
//! - `SHELFSORT_DATA_DIR`: directory holding the catalog JSON files
//! - `SHELFSORT_CHART_PATH`: where `bench` writes its chart data

use serde::{Deserialize, Serialize};
use shelfsort_core::ShelfError;
use shelfsort_core::primitives::DEFAULT_BENCHMARK_SIZES;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "shelfsort.toml";

/// Maximum config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding `books.json`, `members.json`, `transactions.json`.
    pub data_dir: PathBuf,
    /// Benchmark settings.
    pub benchmark: BenchmarkConfig,
}

/// `[benchmark]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchmarkConfig {
    /// Data sizes to run.
    pub sizes: Vec<usize>,
    /// Output path for the chart artifact.
    pub chart_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            benchmark: BenchmarkConfig::default(),
        }
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_BENCHMARK_SIZES.to_vec(),
            chart_path: PathBuf::from("sorting_performance.json"),
        }
    }
}

impl Config {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ShelfError> {
        let config: Config =
            toml::from_str(contents).map_err(|e| ShelfError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration.
    ///
    /// With an explicit `path` the file must exist. Without one,
    /// [`DEFAULT_CONFIG_FILE`] is read if present and defaults are used
    /// otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ShelfError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                default
            }
        };

        let metadata = std::fs::metadata(&path).map_err(|e| {
            ShelfError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ShelfError::Config(format!(
                "Config file size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let contents = std::fs::read_to_string(&path).map_err(|e| {
            ShelfError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        tracing::debug!("loaded config from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Apply environment overrides from the process environment.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides from `lookup`.
    #[must_use]
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup("SHELFSORT_DATA_DIR").filter(|v| !v.is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup("SHELFSORT_CHART_PATH").filter(|v| !v.is_empty()) {
            self.benchmark.chart_path = PathBuf::from(path);
        }
        self
    }

    fn validate(&self) -> Result<(), ShelfError> {
        if self.benchmark.sizes.is_empty() {
            return Err(ShelfError::Config(
                "benchmark.sizes must list at least one size".to_string(),
            ));
        }
        Ok(())
    }
}
