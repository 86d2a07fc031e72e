//! Fields command handler.

use crate::cli::FieldsArgs;
use crate::commands::load_factory;

/// Run the fields command.
///
/// Prints one line per field: interface name, kind and requiredness.
pub fn run_fields(args: &FieldsArgs) -> anyhow::Result<String> {
    let factory = load_factory(&args.schema)?;
    let fields = factory.fields();

    tracing::info!(
        "Listing {} fields of {} ({} interface)",
        fields.len(),
        args.schema.entity,
        factory.interface()
    );

    let width = fields.keys().map(|name| name.len()).max().unwrap_or(0);
    let lines: Vec<String> = fields
        .iter()
        .map(|(name, descriptor)| {
            let requiredness = if descriptor.is_required() {
                "required"
            } else if descriptor.default_value().is_some() {
                "default"
            } else {
                "optional"
            };
            format!(
                "{name:<width$}  {:<12}  {requiredness}",
                descriptor.kind().name()
            )
        })
        .collect();

    Ok(lines.join("\n"))
}
