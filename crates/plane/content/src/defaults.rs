//! Stock tables compiled into the crate.
//!
//! The same files live under `data/` and can be copied out as a starting
//! point for a custom data directory.

use plane_core::{Catalogs, DesignConfig};

use crate::loaders::{
    ConfigLoader, EngineCatalogLoader, LoadResult, RotorCatalogLoader, WingCatalogLoader,
};

pub const ENGINES_RON: &str = include_str!("../data/engines.ron");
pub const WINGS_RON: &str = include_str!("../data/wings.ron");
pub const ROTOR_RON: &str = include_str!("../data/rotor.ron");
pub const CONFIG_TOML: &str = include_str!("../data/config.toml");

/// Stock catalogs.
pub fn catalogs() -> LoadResult<Catalogs> {
    Ok(Catalogs::new(
        EngineCatalogLoader::parse(ENGINES_RON)?,
        WingCatalogLoader::parse(WINGS_RON)?,
        RotorCatalogLoader::parse(ROTOR_RON)?,
    ))
}

/// Stock design configuration.
pub fn config() -> LoadResult<DesignConfig> {
    ConfigLoader::parse(CONFIG_TOML)
}
