//! Content loaders for reading part tables from files.
//!
//! Each loader exposes `parse` for in-memory text and `load` for a file path.

pub mod config;
pub mod engine;
pub mod factory;
pub mod rotor;
pub mod wings;

pub use config::ConfigLoader;
pub use engine::EngineCatalogLoader;
pub use factory::ContentFactory;
pub use rotor::RotorCatalogLoader;
pub use wings::WingCatalogLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
