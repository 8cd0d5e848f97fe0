//! Rotor catalog loader.

use std::path::Path;

use plane_core::{RotorCatalog, RotorCatalogData};

use crate::loaders::{LoadResult, read_file};

/// Loader for rotor cantilever materials from RON files.
pub struct RotorCatalogLoader;

impl RotorCatalogLoader {
    pub fn parse(content: &str) -> LoadResult<RotorCatalog> {
        let data: RotorCatalogData = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rotor catalog RON: {}", e))?;
        RotorCatalog::try_from(data).map_err(|e| anyhow::anyhow!("Invalid rotor catalog: {}", e))
    }

    pub fn load(path: &Path) -> LoadResult<RotorCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_without_strain_is_rejected() {
        let content = r#"(cantilevers: [(name: "Paper", stats: (mass: 1.0))])"#;
        let err = RotorCatalogLoader::parse(content).unwrap_err();
        assert!(err.to_string().contains("'Paper' covers no strain"));
    }
}
