use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};

use crate::protocol::{COMPRESSED_SUFFIX, DECOMPRESSED_SUFFIX};
use crate::utils::limits::{MAX_INPUT_SIZE, MAX_PARALLEL_JOBS};

pub const DEFAULT_CONFIG_FILE: &str = "huffpack.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HuffpackConfig {
    pub compressed_suffix: String,
    pub decompressed_suffix: String,
    pub output_directory: Option<PathBuf>,
    pub max_input_size: usize,
    pub max_parallel_jobs: usize,
    pub log_filter: String,
}

impl Default for HuffpackConfig {
    fn default() -> Self {
        Self {
            compressed_suffix: COMPRESSED_SUFFIX.to_string(),
            decompressed_suffix: DECOMPRESSED_SUFFIX.to_string(),
            output_directory: None,
            max_input_size: MAX_INPUT_SIZE,
            max_parallel_jobs: 4,
            log_filter: "huffpack=info".to_string(),
        }
    }
}

impl HuffpackConfig {
    /// Load an explicit config file, or `huffpack.toml` when present.
    /// Falls back to defaults if neither exists.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Self::read(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::read(DEFAULT_CONFIG_FILE)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    fn read(config_path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("reading config {}", config_path))?;
        let config: HuffpackConfig = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", config_path))?;
        Ok(config)
    }

    pub fn save(&self, config_path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.compressed_suffix.is_empty() || self.decompressed_suffix.is_empty() {
            bail!("output suffixes must not be empty");
        }
        if self.compressed_suffix == self.decompressed_suffix {
            bail!("compressed and decompressed suffixes must differ");
        }
        if self.max_parallel_jobs == 0 || self.max_parallel_jobs > MAX_PARALLEL_JOBS {
            bail!("max_parallel_jobs must be between 1 and {}", MAX_PARALLEL_JOBS);
        }
        if self.max_input_size > MAX_INPUT_SIZE {
            bail!("max_input_size cannot exceed {}", MAX_INPUT_SIZE);
        }
        Ok(())
    }
}
