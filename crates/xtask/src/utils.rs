//! Utility functions for xtask commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use plane_content::{ContentFactory, defaults};
use plane_core::{Catalogs, DesignConfig, PartAssembly, StreamReader};
use serde_json::Value;
use tracing::debug;

/// Environment variable naming the content directory.
pub const DATA_DIR_ENV: &str = "PLANE_DATA_DIR";

/// Where catalogs and config come from.
#[derive(Args)]
pub struct ContentArgs {
    /// Content directory with engines.ron, wings.ron, rotor.ron and config.toml
    /// (defaults to $PLANE_DATA_DIR, then the bundled tables)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl ContentArgs {
    fn resolve_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
    }

    /// Loads the catalogs and config from the resolved source.
    pub fn load(&self) -> Result<(Catalogs, DesignConfig)> {
        match self.resolve_dir() {
            Some(dir) => {
                debug!(dir = %dir.display(), "loading content directory");
                let factory = ContentFactory::new(dir);
                Ok((factory.load_catalogs()?, factory.load_config()?))
            }
            None => {
                debug!("loading bundled content");
                Ok((defaults::catalogs()?, defaults::config()?))
            }
        }
    }

    /// Human-readable name of the resolved source.
    pub fn describe(&self) -> String {
        match self.resolve_dir() {
            Some(dir) => dir.display().to_string(),
            None => "bundled defaults".to_string(),
        }
    }
}

/// Design file encoding, picked by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DesignFormat {
    Json,
    Binary,
}

impl DesignFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("bin") => Ok(Self::Binary),
            _ => bail!(
                "Unknown design format for {}: expected a .json or .bin file",
                path.display()
            ),
        }
    }
}

/// Reads a design file into `design`, returning the raw file size.
pub fn read_design(design: &mut PartAssembly, path: &Path) -> Result<usize> {
    let format = DesignFormat::from_path(path)?;
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read design: {}", path.display()))?;

    match format {
        DesignFormat::Json => {
            let value: Value = serde_json::from_slice(&bytes)
                .with_context(|| format!("Failed to parse design JSON: {}", path.display()))?;
            design
                .from_json(&value)
                .with_context(|| format!("Failed to load design: {}", path.display()))?;
        }
        DesignFormat::Binary => {
            design
                .from_bytes(&bytes)
                .with_context(|| format!("Failed to load design: {}", path.display()))?;
        }
    }
    Ok(bytes.len())
}

/// Save version stamped in a design file, without loading the parts.
pub fn design_version(path: &Path) -> Result<f64> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read design: {}", path.display()))?;
    match DesignFormat::from_path(path)? {
        DesignFormat::Json => {
            let value: Value = serde_json::from_slice(&bytes)?;
            value["version"]
                .as_f64()
                .with_context(|| format!("Design has no version: {}", path.display()))
        }
        DesignFormat::Binary => Ok(StreamReader::from_bytes(&bytes)?.version().get()),
    }
}

pub fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
