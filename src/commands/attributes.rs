//! Attributes command handler.

use crate::cli::{AttributesArgs, OutputFormat};
use crate::commands::load_factory;
use crate::config::parse_assignment;
use anyhow::Context;
use entity_core::AttributeMap;
use entity_generator::Overrides;

/// Run the attributes command.
pub fn run_attributes(args: &AttributesArgs) -> anyhow::Result<String> {
    let mut factory = load_factory(&args.schema)?;
    if let Some(seed) = args.seed {
        factory = factory.with_seed(seed);
    }

    let overrides = args
        .assignments
        .iter()
        .map(|assignment| parse_assignment(assignment))
        .collect::<anyhow::Result<Overrides>>()?;

    tracing::info!(
        "Generating attributes for {} ({} interface, {} overrides)",
        args.schema.entity,
        factory.interface(),
        overrides.len()
    );

    let attributes = factory
        .attributes_with(overrides)
        .with_context(|| format!("Failed to build attributes for {}", args.schema.entity))?;

    render(&attributes, args.format)
}

fn render(attributes: &AttributeMap, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&attributes.to_json())?),
        OutputFormat::Cli => Ok(attributes
            .to_cli_args()
            .iter()
            .map(|arg| shell_quote(arg))
            .collect::<Vec<_>>()
            .join(" ")),
    }
}

/// Single-quote `arg` when a POSIX shell would otherwise split or expand it.
fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_alphanumeric() || "-_.,:/@=+%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
