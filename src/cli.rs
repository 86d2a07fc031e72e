//! CLI argument definitions for entity-factory.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Generate entity attribute payloads for end-to-end tests.
#[derive(Parser)]
#[command(name = "entity-factory")]
#[command(about = "Generate entity attribute payloads for end-to-end tests")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Build the attribute mapping of one entity
    Attributes(AttributesArgs),

    /// List an entity's fields under an interface
    Fields(FieldsArgs),

    /// Print a data-factory string list
    Strings(StringsArgs),
}

/// Output format for attribute mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON object (REST request body)
    Json,
    /// `--flag value` pairs (command-line client options)
    Cli,
}

/// Which data-factory list to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StringListKind {
    Valid,
    Invalid,
}

/// Schema file, entity and interface selection shared by several commands.
#[derive(Args, Clone, Debug)]
pub struct SchemaOpts {
    /// Path to the YAML schema file
    #[arg(long, env = "ENTITY_FACTORY_SCHEMA")]
    pub schema: PathBuf,

    /// Entity name as declared in the schema file
    #[arg(long)]
    pub entity: String,

    /// Naming convention of the output (default, api, cli)
    #[arg(long, default_value = "default", env = "ENTITY_FACTORY_INTERFACE")]
    pub interface: String,
}

/// Arguments for the attributes command.
#[derive(Args, Clone, Debug)]
pub struct AttributesArgs {
    #[command(flatten)]
    pub schema: SchemaOpts,

    /// Seed for reproducible values
    #[arg(long, env = "ENTITY_FACTORY_SEED")]
    pub seed: Option<u64>,

    /// Explicit field value, using the interface's field name (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub assignments: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

/// Arguments for the fields command.
#[derive(Args, Clone, Debug)]
pub struct FieldsArgs {
    #[command(flatten)]
    pub schema: SchemaOpts,
}

/// Arguments for the strings command.
#[derive(Args, Clone, Debug)]
pub struct StringsArgs {
    /// List to print
    #[arg(long, value_enum)]
    pub kind: StringListKind,

    /// Seed for reproducible values
    #[arg(long, env = "ENTITY_FACTORY_SEED")]
    pub seed: Option<u64>,
}
