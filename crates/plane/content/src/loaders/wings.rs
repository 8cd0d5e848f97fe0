//! Wing catalog loader.

use std::path::Path;

use plane_core::{WingCatalog, WingCatalogData};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Loader for wing skin, stagger, deck and longest-wing tables from RON files.
///
/// Decks are listed top to bottom; the part rules expect the parasol, shoulder,
/// mid, low and gear decks at the first five positions.
pub struct WingCatalogLoader;

impl WingCatalogLoader {
    pub fn parse(content: &str) -> LoadResult<WingCatalog> {
        let data: WingCatalogData = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse wing catalog RON: {}", e))?;
        debug!(
            skins = data.skins.len(),
            staggers = data.staggers.len(),
            decks = data.decks.len(),
            "wing catalog parsed"
        );
        WingCatalog::try_from(data).map_err(|e| anyhow::anyhow!("Invalid wing catalog: {}", e))
    }

    pub fn load(path: &Path) -> LoadResult<WingCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_longest_table_is_rejected() {
        let content = r#"(
            skins: [(name: "Cloth", strainfactor: 1.0, dragfactor: 1.0)],
            staggers: [(name: "Monoplane", wing_count: 1)],
            decks: [(name: "Parasol", limited: true), (name: "Shoulder", limited: true)],
            longest: [(dragfactor: 0.5)],
        )"#;
        let err = WingCatalogLoader::parse(content).unwrap_err();
        assert!(err.to_string().contains("1 rows for 2 decks"));
    }

    #[test]
    fn optional_fields_default() {
        let content = r#"(
            skins: [(name: "Cloth", strainfactor: 1.0, dragfactor: 1.0)],
            staggers: [(name: "Monoplane", wing_count: 1)],
            decks: [(name: "Gear")],
            longest: [(dragfactor: 0.5)],
        )"#;
        let catalog = WingCatalogLoader::parse(content).unwrap();
        assert!(!catalog.skins()[0].flammable);
        assert!(!catalog.staggers()[0].inline);
        assert!(!catalog.decks()[0].limited);
        assert_eq!(catalog.longest()[0].stats.drag, 0.0);
    }
}
