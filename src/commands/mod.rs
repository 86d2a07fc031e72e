//! Command handlers.
//!
//! Every handler returns the text to print so the binary stays a thin wrapper
//! and the handlers can be tested directly.

pub mod attributes;
pub mod fields;
pub mod strings;

pub use attributes::run_attributes;
pub use fields::run_fields;
pub use strings::run_strings;

use crate::cli::SchemaOpts;
use anyhow::Context;
use entity_generator::Factory;

/// Load the schema file and bind the selected entity to the selected interface.
pub(crate) fn load_factory(opts: &SchemaOpts) -> anyhow::Result<Factory> {
    let catalog = entity_core::EntityCatalog::from_file(&opts.schema)
        .with_context(|| format!("Failed to load schema file: {:?}", opts.schema))?;
    tracing::debug!(
        "Loaded {} entities from {:?}",
        catalog.len(),
        opts.schema
    );

    let schema = catalog.require(&opts.entity)?;
    let factory = Factory::for_interface(schema, &opts.interface)?;
    Ok(factory)
}
