//! Development tasks for the plane workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{Catalog, Convert, Inspect};

/// Development tasks for the plane workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for plane designs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Print per-part and total stats of a saved design
    Inspect(Inspect),

    /// Convert a design between the JSON and binary encodings
    Convert(Convert),

    /// List catalog entries
    Catalog(Catalog),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for PLANE_DATA_DIR and RUST_LOG)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Inspect(cmd) => cmd.execute(),
        Command::Convert(cmd) => cmd.execute(),
        Command::Catalog(cmd) => cmd.execute(),
    }
}
