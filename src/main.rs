//! Command-line interface for entity-factory
//!
//! # Usage Examples
//!
//! ```bash
//! # JSON request body for the REST API
//! entity-factory attributes \
//!   --schema schemas/foreman.yaml \
//!   --entity Product \
//!   --interface api \
//!   --set name=zoo
//!
//! # Options for the command-line client, reproducible across runs
//! ENTITY_FACTORY_SEED=42 entity-factory attributes \
//!   --schema schemas/foreman.yaml \
//!   --entity Host \
//!   --interface cli \
//!   --format cli
//!
//! # Interface-specific field names
//! entity-factory fields --schema schemas/foreman.yaml --entity Host --interface api
//!
//! # Data-driven test values
//! entity-factory strings --kind valid --seed 7
//! ```
//!
//! Logging is controlled with `RUST_LOG` and written to stderr.

use clap::Parser;
use entity_factory::cli::{Cli, Commands};
use entity_factory::commands::{run_attributes, run_fields, run_strings};

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Attributes(args) => run_attributes(&args)?,
        Commands::Fields(args) => run_fields(&args)?,
        Commands::Strings(args) => run_strings(&args)?,
    };
    println!("{output}");

    Ok(())
}
