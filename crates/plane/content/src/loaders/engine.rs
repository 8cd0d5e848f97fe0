//! Engine catalog loader.

use std::path::Path;

use plane_core::{EngineCatalog, EngineCatalogData};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine, mount, push-pull and cowl tables from RON files.
pub struct EngineCatalogLoader;

impl EngineCatalogLoader {
    /// Parse and validate an engine catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<EngineCatalog> {
        let data: EngineCatalogData = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse engine catalog RON: {}", e))?;
        debug!(
            engines = data.engines.len(),
            mounts = data.mounts.len(),
            cowls = data.cowls.len(),
            "engine catalog parsed"
        );
        EngineCatalog::try_from(data)
            .map_err(|e| anyhow::anyhow!("Invalid engine catalog: {}", e))
    }

    /// Load an engine catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing the engine tables
    pub fn load(path: &Path) -> LoadResult<EngineCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plane_core::{CoolingClasses, MountRole, PushPullKind};

    const MINIMAL: &str = r#"(
        engines: [(name: "Rotary", stats: (power: 8.0, mass: 3.0), oiltank: true)],
        mounts: [
            (name: "Tractor", strainfactor: 0.0, dragfactor: 0.0, pp_type: fuselage),
            (name: "Pod", strainfactor: 0.0, dragfactor: 0.5, pp_type: fuselage, role: pod),
        ],
        push_pull: [(kind: fuselage, name: "Fore and Aft", powerfactor: 0.9)],
        cowls: [
            (name: "No Cowl", ed: 1.0, mpd: 0.0, fits: "AIR | LIQUID | ROTARY"),
            (name: "Rotary Cowl", ed: 0.8, mpd: 0.0, fits: "ROTARY"),
        ],
    )"#;

    #[test]
    fn parses_minimal_catalog() {
        let catalog = EngineCatalogLoader::parse(MINIMAL).unwrap();
        assert_eq!(catalog.engines()[0].name, "Rotary");
        assert_eq!(catalog.engines()[0].stats.power, 8.0);
        assert!(catalog.engines()[0].oiltank);
        assert_eq!(catalog.mounts()[0].pp_type, PushPullKind::Fuselage);
        assert_eq!(catalog.mounts()[0].role, MountRole::Other);
        assert_eq!(catalog.mounts()[1].role, MountRole::Pod);
        assert_eq!(catalog.cowls()[0].fits, CoolingClasses::all());
        assert_eq!(catalog.cowls()[1].fits, CoolingClasses::ROTARY);
    }

    #[test]
    fn missing_linkage_is_rejected() {
        let content = MINIMAL.replace("pp_type: fuselage", "pp_type: wing");
        let err = EngineCatalogLoader::parse(&content).unwrap_err();
        assert!(err.to_string().contains("Invalid engine catalog"));
    }

    #[test]
    fn malformed_ron_is_rejected() {
        let err = EngineCatalogLoader::parse("(engines: [").unwrap_err();
        assert!(err.to_string().contains("Failed to parse engine catalog RON"));
    }
}
