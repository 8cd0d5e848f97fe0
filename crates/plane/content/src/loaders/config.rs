//! Design configuration loader.

use std::path::Path;

use plane_core::DesignConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for design configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parse config from TOML text. Missing keys keep their defaults.
    pub fn parse(content: &str) -> LoadResult<DesignConfig> {
        let config: DesignConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }

    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing DesignConfig
    pub fn load(path: &Path) -> LoadResult<DesignConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }
}
