//! Read and inspect saved designs
//!
//! Loads a `.json` or `.bin` design against the catalogs and prints what each
//! part contributes.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use plane_core::{PartAssembly, Stats};
use serde_json::Value;

use crate::utils::{ContentArgs, design_version, format_bytes, read_design};

/// Print per-part and total stats of a saved design
#[derive(Parser)]
pub struct Inspect {
    /// Design file (.json or .bin)
    #[arg(value_name = "DESIGN")]
    design: PathBuf,

    #[command(flatten)]
    content: ContentArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Non-zero stats per part and for the whole design
    Summary,
    /// Total stats as JSON
    Json,
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        let (catalogs, config) = self.content.load()?;
        let mut design = PartAssembly::new(&catalogs, config)?;
        let size = read_design(&mut design, &self.design)?;
        let version = design_version(&self.design)?;
        design.refresh();

        match self.format {
            OutputFormat::Summary => {
                println!(
                    "{} {}",
                    style("Design File:").bold().cyan(),
                    self.design.display()
                );
                println!("{} {}", style("File Size:").bold().cyan(), format_bytes(size));
                println!("{} {}", style("Save Version:").bold().cyan(), version);
                println!(
                    "{} {}",
                    style("Content:").bold().cyan(),
                    self.content.describe()
                );
                println!();
                print_summary(&mut design)?;
            }
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(design.stats())
                    .context("Failed to serialize stats to JSON")?;
                println!("{}", json);
            }
        }

        Ok(())
    }
}

fn print_summary(design: &mut PartAssembly) -> Result<()> {
    println!("{}", style("=== Design Summary ===").bold().green());
    println!();

    let engine = design.engine();
    println!("{}", style("Engine:").bold().yellow());
    println!("  Type: {}", engine.current_stats().name);
    let mount = engine
        .mount_index()
        .map_or("none", |i| engine.catalog().mounts()[i].name.as_str());
    println!("  Mount: {}", mount);
    let (tractor, pusher) = (engine.tractor(), engine.pusher());
    if tractor.has || pusher.has {
        let side = if tractor.has { "tractor" } else { "pusher" };
        let spinner = if tractor.has { tractor.spinner } else { pusher.spinner };
        println!(
            "  Propeller: {} (spinner gun: {}, artillery: {})",
            side, spinner.gun, spinner.artillery
        );
    }
    if let Some(height) = engine.engine_height() {
        println!("  Engine Height: {}", height);
    }
    println!("  Reliability: {}", engine.reliability());
    println!();

    let rotor = design.rotor();
    println!("{}", style("Rotor:").bold().yellow());
    println!("  Aircraft Type: {}", rotor.aircraft_type());
    if rotor.aircraft_type().is_rotorcraft() {
        println!("  Rotors: {}", rotor.rotor_count());
        println!("  Span: {} (sizing {})", rotor.rotor_span(), rotor.sizing_span());
    }
    println!();

    let wings = design.wings();
    println!("{}", style("Wings:").bold().yellow());
    println!(
        "  Full Wings: {}, Miniature Wings: {}",
        wings.wing_list().len(),
        wings.mini_wing_list().len()
    );
    if let Some(stagger) = wings.stagger() {
        println!("  Layout: {}", wings.catalog().staggers()[stagger].name);
    }
    println!("  Span: {}, Area: {}", wings.span(), wings.area());
    println!();

    for part in design.parts() {
        println!("{}", style(format!("{} Stats:", part.kind())).bold().yellow());
        print_stats(&part.part_stats())?;
        println!();
    }

    println!("{}", style("Total:").bold().yellow());
    print_stats(design.stats())?;
    Ok(())
}

/// Prints every non-zero axis under its save-format name.
fn print_stats(stats: &Stats) -> Result<()> {
    let Value::Object(fields) = serde_json::to_value(stats)? else {
        return Ok(());
    };
    for (name, value) in &fields {
        match value {
            Value::Number(n) if n.as_f64() != Some(0.0) => println!("  {}: {}", name, n),
            Value::Array(notes) => {
                for note in notes {
                    let name = note["name"].as_str().unwrap_or_default();
                    let era = note["era"].as_str().unwrap_or_default();
                    println!("  era: {} ({})", name, era);
                }
            }
            _ => {}
        }
    }
    Ok(())
}
