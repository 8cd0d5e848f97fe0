//! Convert designs between the JSON and binary encodings

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use console::style;
use plane_core::{DesignConfig, FormatVersion, PartAssembly};

use crate::utils::{ContentArgs, DesignFormat, format_bytes, read_design};

/// Convert a design between the JSON and binary encodings
#[derive(Parser)]
pub struct Convert {
    /// Input design (.json or .bin)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output design (.json or .bin); the encoding follows the extension
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Print the binary encoding as hex
    #[arg(long)]
    hex: bool,

    /// Save version to write (e.g. 11.15 for saves without gull wings)
    #[arg(long, value_name = "VERSION")]
    save_version: Option<f64>,

    #[command(flatten)]
    content: ContentArgs,
}

impl Convert {
    pub fn execute(self) -> Result<()> {
        if self.output.is_none() && !self.hex {
            bail!("Nothing to do: give an OUTPUT path or --hex");
        }

        let (catalogs, config) = self.content.load()?;
        let config = match self.save_version {
            Some(version) => DesignConfig {
                save_version: FormatVersion::new(version),
                ..config
            },
            None => config,
        };
        let mut design = PartAssembly::new(&catalogs, config)?;
        read_design(&mut design, &self.input)?;

        if let Some(output) = &self.output {
            let bytes = match DesignFormat::from_path(output)? {
                DesignFormat::Json => {
                    let json = serde_json::to_string_pretty(&design.to_json()?)
                        .context("Failed to serialize design JSON")?;
                    json.into_bytes()
                }
                DesignFormat::Binary => design.to_bytes()?,
            };
            std::fs::write(output, &bytes)
                .with_context(|| format!("Failed to write design: {}", output.display()))?;
            println!(
                "{} {} -> {} ({})",
                style("Converted").bold().green(),
                self.input.display(),
                output.display(),
                format_bytes(bytes.len())
            );
        }

        if self.hex {
            println!("{}", hex::encode(design.to_bytes()?));
        }

        Ok(())
    }
}
