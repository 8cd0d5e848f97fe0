//! List catalog entries

use anyhow::Result;
use clap::Parser;
use console::style;
use plane_core::{Catalogs, MountRole};

use crate::utils::ContentArgs;

/// List catalog entries
#[derive(Parser)]
pub struct Catalog {
    /// Only list one table
    #[arg(short, long, value_enum)]
    table: Option<Table>,

    #[command(flatten)]
    content: ContentArgs,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Table {
    Engines,
    Mounts,
    Cowls,
    Skins,
    Staggers,
    Decks,
    Cantilevers,
}

impl Catalog {
    pub fn execute(self) -> Result<()> {
        let (catalogs, _) = self.content.load()?;
        println!(
            "{} {}",
            style("Content:").bold().cyan(),
            self.content.describe()
        );
        println!();

        let tables = [
            Table::Engines,
            Table::Mounts,
            Table::Cowls,
            Table::Skins,
            Table::Staggers,
            Table::Decks,
            Table::Cantilevers,
        ];
        for table in tables {
            if self.table.is_none_or(|only| only == table) {
                print_table(&catalogs, table);
            }
        }
        Ok(())
    }
}

fn print_table(catalogs: &Catalogs, table: Table) {
    match table {
        Table::Engines => {
            println!("{}", style("Engines:").bold().yellow());
            for (i, engine) in catalogs.engine.engines().iter().enumerate() {
                let kind = if engine.pulsejet {
                    "pulsejet"
                } else if engine.oiltank {
                    "rotary"
                } else {
                    "piston"
                };
                println!(
                    "  [{}] {} ({}) power {}, mass {}, cooling {}",
                    i,
                    engine.name,
                    kind,
                    engine.stats.power,
                    engine.stats.mass,
                    engine.stats.cooling
                );
            }
        }
        Table::Mounts => {
            println!("{}", style("Mounts:").bold().yellow());
            for (i, mount) in catalogs.engine.mounts().iter().enumerate() {
                let mut notes = vec![mount.pp_type.to_string()];
                if mount.role != MountRole::Other {
                    notes.push(mount.role.to_string());
                }
                if mount.req_ed {
                    notes.push("extended driveshafts".into());
                }
                if mount.req_tail {
                    notes.push("tail mods".into());
                }
                println!("  [{}] {} ({})", i, mount.name, notes.join(", "));
            }
        }
        Table::Cowls => {
            println!("{}", style("Cowls:").bold().yellow());
            for (i, cowl) in catalogs.engine.cowls().iter().enumerate() {
                println!("  [{}] {} fits {:?}, ed {}", i, cowl.name, cowl.fits, cowl.ed);
            }
        }
        Table::Skins => {
            println!("{}", style("Skins:").bold().yellow());
            for (i, skin) in catalogs.wings.skins().iter().enumerate() {
                println!(
                    "  [{}] {} mass/area {}, drag x{}",
                    i, skin.name, skin.stats.mass, skin.dragfactor
                );
            }
        }
        Table::Staggers => {
            println!("{}", style("Staggers:").bold().yellow());
            for (i, stagger) in catalogs.wings.staggers().iter().enumerate() {
                let inline = if stagger.inline { ", inline" } else { "" };
                println!(
                    "  [{}] {} up to {} wings{}",
                    i, stagger.name, stagger.wing_count, inline
                );
            }
        }
        Table::Decks => {
            println!("{}", style("Decks:").bold().yellow());
            for (i, deck) in catalogs.wings.decks().iter().enumerate() {
                let limited = if deck.limited { " (limited)" } else { "" };
                let longest = catalogs.wings.longest()[i].dragfactor;
                println!("  [{}] {}{}, longest-wing drag x{}", i, deck.name, limited, longest);
            }
        }
        Table::Cantilevers => {
            println!("{}", style("Cantilevers:").bold().yellow());
            for (i, material) in catalogs.rotor.cantilevers().iter().enumerate() {
                println!(
                    "  [{}] {} covers {} strain per increment",
                    i, material.name, material.stats.max_strain
                );
            }
        }
    }
    println!();
}
