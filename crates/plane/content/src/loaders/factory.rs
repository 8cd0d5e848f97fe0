//! Content factory for building part catalogs from data files.

use std::path::{Path, PathBuf};

use plane_core::{Catalogs, DesignConfig, EngineCatalog, RotorCatalog, WingCatalog};
use tracing::info;

use crate::loaders::{
    ConfigLoader, EngineCatalogLoader, LoadResult, RotorCatalogLoader, WingCatalogLoader,
};

/// Content factory that loads every part table from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── engines.ron
/// ├── wings.ron
/// └── rotor.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const ENGINES_FILE: &'static str = "engines.ron";
    pub const WINGS_FILE: &'static str = "wings.ron";
    pub const ROTOR_FILE: &'static str = "rotor.ron";

    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load design configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<DesignConfig> {
        ConfigLoader::load(&self.data_dir.join(Self::CONFIG_FILE))
    }

    /// Load engine tables from `engines.ron`.
    pub fn load_engine_catalog(&self) -> LoadResult<EngineCatalog> {
        EngineCatalogLoader::load(&self.data_dir.join(Self::ENGINES_FILE))
    }

    /// Load wing tables from `wings.ron`.
    pub fn load_wing_catalog(&self) -> LoadResult<WingCatalog> {
        WingCatalogLoader::load(&self.data_dir.join(Self::WINGS_FILE))
    }

    /// Load rotor materials from `rotor.ron`.
    pub fn load_rotor_catalog(&self) -> LoadResult<RotorCatalog> {
        RotorCatalogLoader::load(&self.data_dir.join(Self::ROTOR_FILE))
    }

    /// Load all three catalogs.
    pub fn load_catalogs(&self) -> LoadResult<Catalogs> {
        let catalogs = Catalogs::new(
            self.load_engine_catalog()?,
            self.load_wing_catalog()?,
            self.load_rotor_catalog()?,
        );
        info!(data_dir = %self.data_dir.display(), "part catalogs loaded");
        Ok(catalogs)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
